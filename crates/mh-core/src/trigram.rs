//! The eight trigrams (八卦).
//!
//! Trigrams are numbered in the early-heaven order used by Meihua numerology:
//! 1 乾, 2 兑, 3 离, 4 震, 5 巽, 6 坎, 7 艮, 8 坤. Lines are listed bottom to top.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{DomainError, DomainResult};

/// Name used when a line pattern matches no trigram.
pub const UNKNOWN_TRIGRAM_NAME: &str = "未知";

/// A single hexagram or trigram line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    /// Broken line (阴).
    Yin,
    /// Solid line (阳).
    Yang,
}

impl Line {
    /// The opposite line, as produced by a moving line.
    pub fn flip(self) -> Self {
        match self {
            Self::Yin => Self::Yang,
            Self::Yang => Self::Yin,
        }
    }

    /// Text glyph, drawn top-down when rendering a figure.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Yin => "▅▅  ▅▅",
            Self::Yang => "▅▅▅▅▅▅",
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yin => write!(f, "yin"),
            Self::Yang => write!(f, "yang"),
        }
    }
}

/// One of the eight trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigram {
    /// Early-heaven number, 1-8.
    pub number: u8,
    /// Single-character name, e.g. 乾.
    pub name: &'static str,
    /// Natural image used in hexagram names, e.g. 天 for 乾.
    pub nature: &'static str,
    /// Lines from bottom to top.
    pub lines: [Line; 3],
    /// Associated element.
    pub element: Element,
    /// Later-heaven compass direction.
    pub direction: &'static str,
}

use Line::{Yang, Yin};

/// All eight trigrams indexed by `number - 1`.
pub const TRIGRAMS: [Trigram; 8] = [
    Trigram {
        number: 1,
        name: "乾",
        nature: "天",
        lines: [Yang, Yang, Yang],
        element: Element::Metal,
        direction: "西北",
    },
    Trigram {
        number: 2,
        name: "兑",
        nature: "泽",
        lines: [Yang, Yang, Yin],
        element: Element::Metal,
        direction: "正西",
    },
    Trigram {
        number: 3,
        name: "离",
        nature: "火",
        lines: [Yang, Yin, Yang],
        element: Element::Fire,
        direction: "正南",
    },
    Trigram {
        number: 4,
        name: "震",
        nature: "雷",
        lines: [Yang, Yin, Yin],
        element: Element::Wood,
        direction: "正东",
    },
    Trigram {
        number: 5,
        name: "巽",
        nature: "风",
        lines: [Yin, Yang, Yang],
        element: Element::Wood,
        direction: "东南",
    },
    Trigram {
        number: 6,
        name: "坎",
        nature: "水",
        lines: [Yin, Yang, Yin],
        element: Element::Water,
        direction: "正北",
    },
    Trigram {
        number: 7,
        name: "艮",
        nature: "山",
        lines: [Yin, Yin, Yang],
        element: Element::Earth,
        direction: "东北",
    },
    Trigram {
        number: 8,
        name: "坤",
        nature: "地",
        lines: [Yin, Yin, Yin],
        element: Element::Earth,
        direction: "西南",
    },
];

impl Trigram {
    /// Look up a trigram by its number.
    pub fn by_number(number: u32) -> DomainResult<&'static Self> {
        match number {
            1..=8 => Ok(&TRIGRAMS[number as usize - 1]),
            other => Err(DomainError::TrigramOutOfRange(other)),
        }
    }

    /// Look up a trigram by its lines, bottom to top.
    ///
    /// Returns `None` for a malformed sequence (anything but three lines).
    pub fn by_lines(lines: &[Line]) -> Option<&'static Self> {
        TRIGRAMS.iter().find(|t| t.lines[..] == *lines)
    }

    /// Look up a trigram by its single-character name.
    pub fn by_name(name: &str) -> Option<&'static Self> {
        TRIGRAMS.iter().find(|t| t.name == name)
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Name of the trigram matching `lines`, or [`UNKNOWN_TRIGRAM_NAME`].
pub fn name_for_lines(lines: &[Line]) -> &'static str {
    Trigram::by_lines(lines).map_or(UNKNOWN_TRIGRAM_NAME, |t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_number_bounds() {
        assert_eq!(Trigram::by_number(1).unwrap().name, "乾");
        assert_eq!(Trigram::by_number(8).unwrap().name, "坤");
        assert_eq!(
            Trigram::by_number(0),
            Err(DomainError::TrigramOutOfRange(0))
        );
        assert_eq!(
            Trigram::by_number(9),
            Err(DomainError::TrigramOutOfRange(9))
        );
    }

    #[test]
    fn number_and_lines_round_trip() {
        for n in 1..=8 {
            let t = Trigram::by_number(n).unwrap();
            let back = Trigram::by_lines(&t.lines).unwrap();
            assert_eq!(u32::from(back.number), n);
        }
    }

    #[test]
    fn every_line_pattern_is_a_trigram() {
        let lines = [Yin, Yang];
        for a in lines {
            for b in lines {
                for c in lines {
                    assert!(Trigram::by_lines(&[a, b, c]).is_some());
                }
            }
        }
    }

    #[test]
    fn malformed_lines_are_unknown() {
        assert!(Trigram::by_lines(&[Yang, Yang]).is_none());
        assert!(Trigram::by_lines(&[]).is_none());
        assert_eq!(name_for_lines(&[Yang, Yin, Yang, Yin]), "未知");
    }

    #[test]
    fn elements_match_tradition() {
        let elements: Vec<_> = TRIGRAMS.iter().map(|t| t.element).collect();
        assert_eq!(
            elements,
            vec![
                Element::Metal,
                Element::Metal,
                Element::Fire,
                Element::Wood,
                Element::Wood,
                Element::Water,
                Element::Earth,
                Element::Earth,
            ]
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Trigram::by_name("艮").unwrap().number, 7);
        assert!(Trigram::by_name("X").is_none());
    }

    #[test]
    fn line_flip() {
        assert_eq!(Yin.flip(), Yang);
        assert_eq!(Yang.flip(), Yin);
    }
}
