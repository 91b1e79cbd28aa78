//! Host/guest (体用) five-element analysis.
//!
//! Both trigrams start with 10 qi. The first round scales each by its
//! seasonal state, the second moves qi along the generation or restraint
//! relation between host and guest. The verdict compares what is left.
//!
//! Qi is kept in hundredths so every step of the calculation is exact.

use serde::{Deserialize, Serialize};

use crate::element::{Element, SeasonTable, SeasonalState};
use crate::error::{DomainError, DomainResult};
use crate::trigram::Trigram;

/// A qi (vitality) score in hundredths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Qi(u32);

impl Qi {
    /// Starting qi of every trigram.
    pub const BASE: Self = Self(1000);

    /// Build from hundredths.
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Raw hundredths.
    pub fn hundredths(self) -> u32 {
        self.0
    }

    /// Value as a float, for display.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    fn adjusted_by_percent(self, percent: i64) -> Self {
        let value = i64::from(self.0);
        let adjusted = value + value * percent / 100;
        Self(u32::try_from(adjusted.max(0)).unwrap_or(0))
    }

    fn quarter(self) -> Self {
        Self(self.0 / 4)
    }

    fn half(self) -> Self {
        Self(self.0 / 2)
    }
}

impl std::ops::Add for Qi {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Qi {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Display for Qi {
    /// Shortest exact decimal: `16`, `12.5`, `3.25`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

/// Which trigram plays the host (体).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostSide {
    /// The upper trigram is host, the lower is guest.
    Upper,
    /// The lower trigram is host, the upper is guest.
    Lower,
}

impl HostSide {
    /// Parse the numeric flag: 1 = upper, 0 = lower.
    pub fn from_flag(flag: u32) -> DomainResult<Self> {
        match flag {
            1 => Ok(Self::Upper),
            0 => Ok(Self::Lower),
            other => Err(DomainError::HostFlagOutOfRange(other)),
        }
    }

    /// The numeric flag.
    pub fn flag(self) -> u32 {
        match self {
            Self::Upper => 1,
            Self::Lower => 0,
        }
    }

    /// Host side for a moving line: a moving line in the lower trigram
    /// (positions 1-2) makes the upper trigram the host.
    pub fn for_moving_line(moving_line: u32) -> Self {
        if (1..3).contains(&moving_line) {
            Self::Upper
        } else {
            Self::Lower
        }
    }

    /// Parse `upper` / `lower` (or 上 / 下).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upper" | "up" | "上" | "1" => Some(Self::Upper),
            "lower" | "low" | "down" | "下" | "0" => Some(Self::Lower),
            _ => None,
        }
    }
}

impl std::fmt::Display for HostSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => write!(f, "上卦为体"),
            Self::Lower => write!(f, "下卦为体"),
        }
    }
}

/// Generation/restraint relation between host and guest (生克).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// 体用比和: same element.
    MutualParity,
    /// 体生用: host feeds guest.
    HostGeneratesGuest,
    /// 用生体: guest feeds host.
    GuestGeneratesHost,
    /// 体克用: host restrains guest.
    HostRestrainsGuest,
    /// 用克体: guest restrains host.
    GuestRestrainsHost,
    /// 无生克关系
    NoRelation,
}

impl Relation {
    /// All relation labels.
    pub const ALL: [Self; 6] = [
        Self::MutualParity,
        Self::HostGeneratesGuest,
        Self::GuestGeneratesHost,
        Self::HostRestrainsGuest,
        Self::GuestRestrainsHost,
        Self::NoRelation,
    ];

    /// Classify the relation between a host and a guest element.
    pub fn between(host: Element, guest: Element) -> Self {
        if host == guest {
            Self::MutualParity
        } else if host.generates() == guest {
            Self::HostGeneratesGuest
        } else if guest.generates() == host {
            Self::GuestGeneratesHost
        } else if host.restrains() == guest {
            Self::HostRestrainsGuest
        } else if guest.restrains() == host {
            Self::GuestRestrainsHost
        } else {
            Self::NoRelation
        }
    }

    /// Chinese label.
    pub fn label(self) -> &'static str {
        match self {
            Self::MutualParity => "体用比和",
            Self::HostGeneratesGuest => "体生用",
            Self::GuestGeneratesHost => "用生体",
            Self::HostRestrainsGuest => "体克用",
            Self::GuestRestrainsHost => "用克体",
            Self::NoRelation => "无生克关系",
        }
    }

    fn transfer(self, host: Qi, guest: Qi) -> (Qi, Qi) {
        match self {
            Self::MutualParity | Self::NoRelation => (host, guest),
            Self::HostGeneratesGuest => {
                let moved = host.quarter();
                (host - moved, guest + moved)
            }
            Self::GuestGeneratesHost => {
                let moved = guest.quarter();
                (host + moved, guest - moved)
            }
            Self::HostRestrainsGuest => (host, guest.half()),
            Self::GuestRestrainsHost => (host.half(), guest),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fortune verdict (吉凶).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// 大吉
    GreatlyAuspicious,
    /// 小吉
    MildlyAuspicious,
    /// 小凶
    MildlyInauspicious,
    /// 大凶
    GreatlyInauspicious,
}

impl Verdict {
    /// All verdict labels, best first.
    pub const ALL: [Self; 4] = [
        Self::GreatlyAuspicious,
        Self::MildlyAuspicious,
        Self::MildlyInauspicious,
        Self::GreatlyInauspicious,
    ];

    /// Chinese label.
    pub fn label(self) -> &'static str {
        match self {
            Self::GreatlyAuspicious => "大吉",
            Self::MildlyAuspicious => "小吉",
            Self::MildlyInauspicious => "小凶",
            Self::GreatlyInauspicious => "大凶",
        }
    }

    /// Whether the verdict favours the querent.
    pub fn is_auspicious(self) -> bool {
        matches!(self, Self::GreatlyAuspicious | Self::MildlyAuspicious)
    }

    fn judge(relation: Relation, host: Qi, guest: Qi) -> Self {
        if relation == Relation::MutualParity {
            return if host > Qi::BASE {
                Self::MildlyAuspicious
            } else {
                Self::MildlyInauspicious
            };
        }
        if host > guest {
            if guest.hundredths() * 2 < host.hundredths() {
                Self::GreatlyAuspicious
            } else {
                Self::MildlyAuspicious
            }
        } else if host.hundredths() * 2 < guest.hundredths() {
            Self::GreatlyInauspicious
        } else {
            Self::MildlyInauspicious
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Host and guest qi after each round of the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QiTrace {
    /// (host, guest) after the seasonal round.
    pub seasonal: (Qi, Qi),
    /// (host, guest) after the relation round.
    pub related: (Qi, Qi),
}

/// Result of a host/guest five-element analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiveElementAnalysis {
    /// Which trigram is host.
    pub host_side: HostSide,
    /// Host element.
    pub host: Element,
    /// Guest element.
    pub guest: Element,
    /// Seasonal states of all five elements.
    pub season: SeasonTable,
    /// Host seasonal state.
    pub host_state: SeasonalState,
    /// Guest seasonal state.
    pub guest_state: SeasonalState,
    /// Relation between host and guest.
    pub relation: Relation,
    /// Final verdict.
    pub verdict: Verdict,
    /// Qi after each round.
    pub trace: QiTrace,
}

impl FiveElementAnalysis {
    /// Final host qi.
    pub fn host_qi(&self) -> Qi {
        self.trace.related.0
    }

    /// Final guest qi.
    pub fn guest_qi(&self) -> Qi {
        self.trace.related.1
    }

    /// Strength string, e.g. `木旺，火相，土死，金囚，水休`.
    pub fn strength_summary(&self) -> String {
        self.season.to_string()
    }
}

/// Analyse an (upper, lower) trigram pair for a lunar month.
pub fn analyze(
    upper: u32,
    lower: u32,
    host_side: HostSide,
    lunar_month: u32,
) -> DomainResult<FiveElementAnalysis> {
    let upper = Trigram::by_number(upper)?;
    let lower = Trigram::by_number(lower)?;
    let season = SeasonTable::for_lunar_month(lunar_month)?;

    let (host_trigram, guest_trigram) = match host_side {
        HostSide::Upper => (upper, lower),
        HostSide::Lower => (lower, upper),
    };
    let host = host_trigram.element;
    let guest = guest_trigram.element;

    let host_state = season.state_of(host);
    let guest_state = season.state_of(guest);
    let seasonal = (
        Qi::BASE.adjusted_by_percent(host_state.ratio_percent()),
        Qi::BASE.adjusted_by_percent(guest_state.ratio_percent()),
    );

    let relation = Relation::between(host, guest);
    let related = relation.transfer(seasonal.0, seasonal.1);
    let verdict = Verdict::judge(relation, related.0, related.1);

    Ok(FiveElementAnalysis {
        host_side,
        host,
        guest,
        season,
        host_state,
        guest_state,
        relation,
        verdict,
        trace: QiTrace { seasonal, related },
    })
}

/// [`analyze`] with the numeric host flag (1 = upper is host, 0 = lower).
pub fn analyze_with_flag(
    upper: u32,
    lower: u32,
    host_flag: u32,
    lunar_month: u32,
) -> DomainResult<FiveElementAnalysis> {
    analyze(upper, lower, HostSide::from_flag(host_flag)?, lunar_month)
}
