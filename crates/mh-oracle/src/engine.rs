//! The Meihua number method (数字起卦).
//!
//! A three-digit number and the moment of asking determine everything:
//! the hundreds digit picks the upper trigram, the sum of the tens and units
//! digits picks the lower trigram, and the digit sum plus the shichen picks
//! the moving line. From the primary hexagram come the nuclear hexagram
//! (inner lines) and the mutated hexagram (one line flipped), and both the
//! primary and the mutated hexagram get a host/guest five-element reading.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use mh_core::{
    FiveElementAnalysis, Hexagram, HostSide, SexagenaryMoment, Shichen, Trigram, analyze,
};

use crate::source::{MAX_NUMBER, MIN_NUMBER};

/// Names of the six line positions, bottom to top.
pub const LINE_POSITION_NAMES: [&str; 6] = ["初", "二", "三", "四", "五", "上"];

/// `value mod modulus`, with 0 mapped to `modulus`.
///
/// Trigrams and lines are counted from 1, so a remainder of zero means the
/// last one.
pub fn one_indexed_mod(value: u32, modulus: u32) -> u32 {
    match value % modulus {
        0 => modulus,
        r => r,
    }
}

/// Everything derived from one divination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivinationResult {
    /// The divination number.
    pub number: u32,
    /// 本卦.
    pub primary: Hexagram,
    /// 互卦.
    pub nuclear: Hexagram,
    /// 变卦.
    pub mutated: Hexagram,
    /// 动爻, 1 (bottom) to 6 (top).
    pub moving_line: u32,
    /// Which trigram is host for both readings.
    pub host_side: HostSide,
    /// When the divination was cast.
    pub moment: DateTime<FixedOffset>,
    /// Year, month, day and hour pillars of `moment`.
    pub pillars: SexagenaryMoment,
    /// Lunar month (1 = 寅) used for seasonal strength.
    pub lunar_month: u32,
    /// Shichen of `moment`.
    pub shichen: Shichen,
    /// Five-element reading of the primary hexagram.
    pub primary_analysis: Option<FiveElementAnalysis>,
    /// Five-element reading of the mutated hexagram.
    pub mutated_analysis: Option<FiveElementAnalysis>,
    /// Later-heaven direction of the primary upper trigram.
    pub direction: &'static str,
    /// 应期: upper + lower + zero-based shichen index.
    pub response_timing: u32,
}

impl DivinationResult {
    /// Position name of the moving line, e.g. `五`.
    pub fn moving_line_label(&self) -> &'static str {
        let idx = (self.moving_line.clamp(1, 6) - 1) as usize;
        LINE_POSITION_NAMES[idx]
    }

    /// Nuclear hexagram with its trigram names, e.g. `互见坤震(地雷复)`.
    pub fn nuclear_label(&self) -> String {
        let name_of =
            |t: Option<&'static Trigram>| t.map_or(mh_core::UNKNOWN_TRIGRAM_NAME, |t| t.name);
        format!(
            "互见{}{}({})",
            name_of(self.nuclear.upper_trigram()),
            name_of(self.nuclear.lower_trigram()),
            self.nuclear.name
        )
    }

    /// Local time and shichen, e.g. `2024-10-30 10:00:00 巳时`.
    pub fn time_label(&self) -> String {
        format!(
            "{} {}",
            self.moment.format("%Y-%m-%d %H:%M:%S"),
            self.shichen.name()
        )
    }

    /// The four pillars, e.g. `甲辰年 甲戌月 丁卯日 乙巳时`.
    pub fn ganzhi_label(&self) -> String {
        self.pillars.to_string()
    }
}

/// Cast a divination for `number` at `now`.
///
/// Returns `None` when `number` is outside `[100, 999]`.
pub fn divine(number: u32, now: DateTime<FixedOffset>) -> Option<DivinationResult> {
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
        tracing::debug!(number, "divination number out of range");
        return None;
    }

    let hundreds = number / 100;
    let tens = number / 10 % 10;
    let units = number % 10;

    let upper = one_indexed_mod(hundreds, 8);
    let lower = one_indexed_mod(tens + units, 8);

    let pillars = SexagenaryMoment::from_datetime(now);
    let lunar_month = pillars.lunar_month();
    let shichen = pillars.shichen;
    let moving_line = one_indexed_mod(hundreds + tens + units + shichen.number(), 6);

    let primary = Hexagram::from_numbers(upper, lower).ok()?;
    let nuclear = primary.nuclear();
    // The flipped line is counted from the top: moving line 1 flips the top line.
    let mutated = primary.with_line_flipped(7 - moving_line).ok()?;

    let host_side = HostSide::for_moving_line(moving_line);
    let primary_analysis = analyze(upper, lower, host_side, lunar_month).ok();
    let mutated_analysis = match (mutated.upper, mutated.lower) {
        (Some(u), Some(l)) => analyze(u32::from(u), u32::from(l), host_side, lunar_month).ok(),
        _ => None,
    };

    let direction = Trigram::by_number(upper).map_or("", |t| t.direction);
    let response_timing = upper + lower + u32::from(shichen.branch_index());

    tracing::debug!(
        number,
        primary = primary.name,
        nuclear = nuclear.name,
        mutated = mutated.name,
        moving_line,
        %pillars,
        "divination cast"
    );

    Some(DivinationResult {
        number,
        primary,
        nuclear,
        mutated,
        moving_line,
        host_side,
        moment: now,
        pillars,
        lunar_month,
        shichen,
        primary_analysis,
        mutated_analysis,
        direction,
        response_timing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use mh_core::{Element, Line, Relation, Verdict};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        tz.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn one_indexed_mod_maps_zero() {
        assert_eq!(one_indexed_mod(8, 8), 8);
        assert_eq!(one_indexed_mod(16, 8), 8);
        assert_eq!(one_indexed_mod(9, 8), 1);
        assert_eq!(one_indexed_mod(0, 6), 6);
        assert_eq!(one_indexed_mod(5, 6), 5);
    }

    #[test]
    fn reference_divination() {
        let r = divine(746, at(2024, 10, 30, 10)).unwrap();
        assert_eq!(r.primary.upper, Some(7));
        assert_eq!(r.primary.lower, Some(2));
        assert_eq!(r.primary.name, "山泽损");
        assert_eq!(
            r.primary.lines,
            [Line::Yang, Line::Yang, Line::Yin, Line::Yin, Line::Yin, Line::Yang]
        );
        assert_eq!(r.moving_line, 5);
        assert_eq!(r.moving_line_label(), "五");
        assert_eq!(r.nuclear.name, "地雷复");
        assert_eq!(r.nuclear_label(), "互见坤震(地雷复)");
        assert_eq!(r.mutated.name, "山雷颐");
        assert_eq!(r.mutated.upper, Some(7));
        assert_eq!(r.mutated.lower, Some(4));
        assert_eq!(
            r.mutated.lines,
            [Line::Yang, Line::Yin, Line::Yin, Line::Yin, Line::Yin, Line::Yang]
        );
        assert_eq!(r.host_side, HostSide::Lower);
        assert_eq!(r.lunar_month, 9);
        assert_eq!(r.shichen.number(), 6);
        assert_eq!(r.direction, "东北");
        assert_eq!(r.response_timing, 14);
        assert_eq!(r.time_label(), "2024-10-30 10:00:00 巳时");
        assert_eq!(r.ganzhi_label(), "甲辰年 甲戌月 丁卯日 乙巳时");

        let primary = r.primary_analysis.as_ref().unwrap();
        assert_eq!(primary.host, Element::Metal);
        assert_eq!(primary.guest, Element::Earth);
        assert_eq!(primary.relation, Relation::GuestGeneratesHost);
        assert_eq!(primary.verdict, Verdict::MildlyAuspicious);
        assert_eq!(primary.host_qi().hundredths(), 1700);
        assert_eq!(primary.guest_qi().hundredths(), 1200);

        let mutated = r.mutated_analysis.as_ref().unwrap();
        assert_eq!(mutated.host, Element::Wood);
        assert_eq!(mutated.guest, Element::Earth);
        assert_eq!(mutated.relation, Relation::HostRestrainsGuest);
        assert_eq!(mutated.host_qi().hundredths(), 700);
        assert_eq!(mutated.guest_qi().hundredths(), 800);
        assert_eq!(mutated.verdict, Verdict::MildlyInauspicious);
    }

    #[test]
    fn rerun_is_identical() {
        let now = at(2024, 10, 30, 10);
        assert_eq!(divine(746, now), divine(746, now));
    }

    #[test]
    fn result_serializes() {
        let r = divine(746, at(2024, 10, 30, 10)).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["moving_line"], 5);
        assert_eq!(json["primary"]["name"], "山泽损");
        assert_eq!(json["host_side"], "Lower");
        assert_eq!(json["direction"], "东北");
    }

    #[test]
    fn out_of_range_is_none() {
        let now = at(2024, 10, 30, 10);
        assert!(divine(99, now).is_none());
        assert!(divine(1000, now).is_none());
        assert!(divine(0, now).is_none());
        assert!(divine(100, now).is_some());
        assert!(divine(999, now).is_some());
    }

    #[test]
    fn every_number_yields_a_result() {
        let now = at(2024, 10, 30, 10);
        for n in MIN_NUMBER..=MAX_NUMBER {
            let r = divine(n, now).unwrap();
            assert!((1..=6).contains(&r.moving_line));
            assert_eq!(r.primary.differing_lines(&r.mutated), vec![7 - r.moving_line]);
            assert!(r.primary.is_known() && r.nuclear.is_known() && r.mutated.is_known());
            assert!(r.primary_analysis.is_some() && r.mutated_analysis.is_some());
            assert!(!r.direction.is_empty());
        }
    }

    #[test]
    fn late_night_counts_as_zi() {
        let r = divine(111, at(2024, 10, 30, 23)).unwrap();
        assert_eq!(r.shichen.number(), 1);
        assert_eq!(r.moving_line, 4);
    }

    #[test]
    fn host_side_follows_moving_line() {
        let now = at(2024, 10, 30, 10);
        for n in MIN_NUMBER..=MAX_NUMBER {
            let r = divine(n, now).unwrap();
            let expected = if r.moving_line <= 2 {
                HostSide::Upper
            } else {
                HostSide::Lower
            };
            assert_eq!(r.host_side, expected);
        }
    }

    proptest! {
        #[test]
        fn moving_line_in_range_any_hour(n in 100u32..=999, hour in 0u32..24) {
            let r = divine(n, at(2024, 3, 15, hour)).unwrap();
            prop_assert!((1..=6).contains(&r.moving_line));
            prop_assert_eq!(r.primary.differing_lines(&r.mutated).len(), 1);
            prop_assert_eq!(
                r.response_timing,
                u32::from(r.primary.upper.unwrap())
                    + u32::from(r.primary.lower.unwrap())
                    + r.shichen.number()
                    - 1
            );
        }
    }
}
