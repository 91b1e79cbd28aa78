//! Hexagrams composed from two trigrams.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::trigram::{Line, Trigram};

/// Name used when a trigram pair is not in the table.
pub const UNKNOWN_HEXAGRAM_NAME: &str = "未知卦";

/// The 64 hexagram names: `HEXAGRAM_NAMES[upper - 1][lower - 1]`.
const HEXAGRAM_NAMES: [[&str; 8]; 8] = [
    // lower: 乾       兑          离           震            巽          坎         艮          坤
    ["乾为天", "天泽履", "天火同人", "天雷无妄", "天风姤", "天水讼", "天山遁", "天地否"], // 乾
    ["泽天夬", "兑为泽", "泽火革", "泽雷随", "泽风大过", "泽水困", "泽山咸", "泽地萃"], // 兑
    ["火天大有", "火泽睽", "离为火", "火雷噬嗑", "火风鼎", "火水未济", "火山旅", "火地晋"], // 离
    ["雷天大壮", "雷泽归妹", "雷火丰", "震为雷", "雷风恒", "雷水解", "雷山小过", "雷地豫"], // 震
    ["风天小畜", "风泽中孚", "风火家人", "风雷益", "巽为风", "风水涣", "风山渐", "风地观"], // 巽
    ["水天需", "水泽节", "水火既济", "水雷屯", "水风井", "坎为水", "水山蹇", "水地比"], // 坎
    ["山天大畜", "山泽损", "山火贲", "山雷颐", "山风蛊", "山水蒙", "艮为山", "山地剥"], // 艮
    ["地天泰", "地泽临", "地火明夷", "地雷复", "地风升", "地水师", "地山谦", "坤为地"], // 坤
];

/// Look up a hexagram name by upper and lower trigram numbers.
///
/// Pairs outside 1-8 yield [`UNKNOWN_HEXAGRAM_NAME`].
pub fn hexagram_name(upper: u32, lower: u32) -> &'static str {
    match (upper, lower) {
        (1..=8, 1..=8) => HEXAGRAM_NAMES[upper as usize - 1][lower as usize - 1],
        _ => UNKNOWN_HEXAGRAM_NAME,
    }
}

/// Find the (upper, lower) trigram numbers of a hexagram by name.
pub fn trigrams_for_name(name: &str) -> Option<(u32, u32)> {
    HEXAGRAM_NAMES.iter().enumerate().find_map(|(u, row)| {
        row.iter()
            .position(|n| *n == name)
            .map(|l| (u as u32 + 1, l as u32 + 1))
    })
}

/// A six-line figure.
///
/// `upper` and `lower` are `None` only when a half of the figure matches no
/// trigram, which cannot happen for lines produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    /// Upper trigram number, 1-8.
    pub upper: Option<u8>,
    /// Lower trigram number, 1-8.
    pub lower: Option<u8>,
    /// Lines from bottom (index 0) to top (index 5).
    pub lines: [Line; 6],
    /// Display name, e.g. 山泽损.
    pub name: &'static str,
}

impl Hexagram {
    /// Stack `upper` over `lower`.
    pub fn from_trigrams(upper: &Trigram, lower: &Trigram) -> Self {
        let mut lines = [Line::Yin; 6];
        lines[..3].copy_from_slice(&lower.lines);
        lines[3..].copy_from_slice(&upper.lines);
        Self {
            upper: Some(upper.number),
            lower: Some(lower.number),
            lines,
            name: hexagram_name(u32::from(upper.number), u32::from(lower.number)),
        }
    }

    /// Build from trigram numbers.
    pub fn from_numbers(upper: u32, lower: u32) -> DomainResult<Self> {
        Ok(Self::from_trigrams(
            Trigram::by_number(upper)?,
            Trigram::by_number(lower)?,
        ))
    }

    /// Look a hexagram up by its display name.
    pub fn by_name(name: &str) -> Option<Self> {
        let (upper, lower) = trigrams_for_name(name)?;
        Self::from_numbers(upper, lower).ok()
    }

    /// Recover the trigrams and name from six lines.
    pub fn from_lines(lines: [Line; 6]) -> Self {
        let lower = Trigram::by_lines(&lines[..3]).map(|t| t.number);
        let upper = Trigram::by_lines(&lines[3..]).map(|t| t.number);
        let name = match (upper, lower) {
            (Some(u), Some(l)) => hexagram_name(u32::from(u), u32::from(l)),
            _ => UNKNOWN_HEXAGRAM_NAME,
        };
        Self {
            upper,
            lower,
            lines,
            name,
        }
    }

    /// The nuclear (互) hexagram: lines 2-4 form the new lower trigram and
    /// lines 3-5 the new upper trigram.
    pub fn nuclear(&self) -> Self {
        let l = &self.lines;
        Self::from_lines([l[1], l[2], l[3], l[2], l[3], l[4]])
    }

    /// The hexagram with the line at `position` (1 = bottom, 6 = top) flipped.
    pub fn with_line_flipped(&self, position: u32) -> DomainResult<Self> {
        if !(1..=6).contains(&position) {
            return Err(DomainError::LinePositionOutOfRange(position));
        }
        let mut lines = self.lines;
        let idx = position as usize - 1;
        lines[idx] = lines[idx].flip();
        Ok(Self::from_lines(lines))
    }

    /// The upper trigram, if the top half is a valid pattern.
    pub fn upper_trigram(&self) -> Option<&'static Trigram> {
        self.upper.and_then(|n| Trigram::by_number(u32::from(n)).ok())
    }

    /// The lower trigram, if the bottom half is a valid pattern.
    pub fn lower_trigram(&self) -> Option<&'static Trigram> {
        self.lower.and_then(|n| Trigram::by_number(u32::from(n)).ok())
    }

    /// Whether the name came from the table.
    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN_HEXAGRAM_NAME
    }

    /// Positions (1-6) at which two hexagrams differ.
    pub fn differing_lines(&self, other: &Self) -> Vec<u32> {
        self.lines
            .iter()
            .zip(other.lines.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }

    /// Multi-line drawing, top line first.
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .rev()
            .map(|l| l.glyph())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Hexagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
