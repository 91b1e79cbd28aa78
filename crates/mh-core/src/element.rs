//! The five elements and their seasonal strength.
//!
//! Elements interact along two cycles: generation (Wood feeds Fire, Fire makes
//! Earth, Earth bears Metal, Metal carries Water, Water nourishes Wood) and
//! restraint (Wood parts Earth, Earth dams Water, Water quenches Fire, Fire
//! melts Metal, Metal cuts Wood). The lunar month decides which element
//! governs, and every element's strength follows from its relation to the
//! governing one.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One of the five elements (五行).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// 木
    Wood,
    /// 火
    Fire,
    /// 土
    Earth,
    /// 金
    Metal,
    /// 水
    Water,
}

impl Element {
    /// All elements in display order: Wood, Fire, Earth, Metal, Water.
    pub const ALL: [Self; 5] = [
        Self::Wood,
        Self::Fire,
        Self::Earth,
        Self::Metal,
        Self::Water,
    ];

    /// Position in [`Element::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The element this one generates.
    pub fn generates(self) -> Self {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element this one restrains.
    pub fn restrains(self) -> Self {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }

    /// The element that governs a lunar month.
    ///
    /// Spring (1-2) is Wood, summer (4-5) Fire, autumn (7-8) Metal and
    /// winter (10-11) Water; the last month of every season belongs to Earth.
    pub fn for_lunar_month(month: u32) -> DomainResult<Self> {
        match month {
            1 | 2 => Ok(Self::Wood),
            4 | 5 => Ok(Self::Fire),
            7 | 8 => Ok(Self::Metal),
            10 | 11 => Ok(Self::Water),
            3 | 6 | 9 | 12 => Ok(Self::Earth),
            other => Err(DomainError::LunarMonthOutOfRange(other)),
        }
    }

    /// The single-character Chinese name.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Seasonal strength of an element (旺相休囚死).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonalState {
    /// 旺: the governing element itself.
    Prospering,
    /// 相: generated by the governing element.
    Supported,
    /// 休: generates the governing element.
    Resting,
    /// 囚: restrains the governing element.
    Trapped,
    /// 死: restrained by the governing element.
    Dead,
}

impl SeasonalState {
    /// Classify `element` against the element governing the season.
    pub fn of(element: Element, governing: Element) -> Self {
        if element == governing {
            Self::Prospering
        } else if governing.generates() == element {
            Self::Supported
        } else if element.generates() == governing {
            Self::Resting
        } else if element.restrains() == governing {
            Self::Trapped
        } else {
            Self::Dead
        }
    }

    /// Qi adjustment in percent applied during the seasonal round.
    pub fn ratio_percent(self) -> i64 {
        match self {
            Self::Prospering => 60,
            Self::Supported => 30,
            Self::Resting => 0,
            Self::Trapped => -30,
            Self::Dead => -60,
        }
    }

    /// The single-character Chinese name.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Prospering => "旺",
            Self::Supported => "相",
            Self::Resting => "休",
            Self::Trapped => "囚",
            Self::Dead => "死",
        }
    }
}

impl std::fmt::Display for SeasonalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Seasonal states of all five elements for one lunar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTable {
    /// The lunar month (1-12).
    pub month: u32,
    /// The element governing the month.
    pub governing: Element,
    states: [(Element, SeasonalState); 5],
}

impl SeasonTable {
    /// Build the table for a lunar month.
    pub fn for_lunar_month(month: u32) -> DomainResult<Self> {
        let governing = Element::for_lunar_month(month)?;
        let states = Element::ALL.map(|e| (e, SeasonalState::of(e, governing)));
        Ok(Self {
            month,
            governing,
            states,
        })
    }

    /// State of one element.
    pub fn state_of(&self, element: Element) -> SeasonalState {
        self.states[element.index()].1
    }

    /// States in Wood, Fire, Earth, Metal, Water order.
    pub fn states(&self) -> &[(Element, SeasonalState); 5] {
        &self.states
    }
}

impl std::fmt::Display for SeasonTable {
    /// Renders as `木旺，火相，土死，金囚，水休`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (element, state)) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str("，")?;
            }
            write!(f, "{element}{state}")?;
        }
        Ok(())
    }
}
