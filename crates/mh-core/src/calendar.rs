//! Sexagenary (干支) calendar.
//!
//! Converts a local wall-clock moment into year, month, day and hour
//! stem-branch pairs. Years turn at 立春 and months at each of the twelve
//! 节 solar terms, located from the sun's apparent ecliptic longitude
//! (low-precision solar theory, good to about 0.01°). Day pillars count
//! from the Julian day number; hour pillars follow the 五鼠遁 rule.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// The ten heavenly stems.
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches.
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Branches in lunar-month order: 寅 opens month 1, 丑 closes month 12.
const MONTH_BRANCHES: [&str; 12] = [
    "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥", "子", "丑",
];

/// Ecliptic longitude of 立春, the first 节 of the year.
const START_OF_SPRING_DEG: f64 = 315.0;

/// Julian day of 2000-01-01 12:00 TT.
const J2000: f64 = 2_451_545.0;

/// A stem-branch pair, one of sixty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GanZhi {
    /// Stem index, 0 (甲) to 9 (癸).
    pub stem: u8,
    /// Branch index, 0 (子) to 11 (亥).
    pub branch: u8,
}

impl GanZhi {
    /// The pair at position `index` (0 = 甲子) of the sixty-cycle.
    pub fn from_cycle(index: i64) -> Self {
        let i = index.rem_euclid(60);
        Self {
            stem: (i % 10) as u8,
            branch: (i % 12) as u8,
        }
    }

    /// Build from stem and branch indices, wrapping each.
    pub fn new(stem: i64, branch: i64) -> Self {
        Self {
            stem: stem.rem_euclid(10) as u8,
            branch: branch.rem_euclid(12) as u8,
        }
    }

    /// Stem character.
    pub fn stem_char(self) -> &'static str {
        STEMS[usize::from(self.stem)]
    }

    /// Branch character.
    pub fn branch_char(self) -> &'static str {
        BRANCHES[usize::from(self.branch)]
    }
}

impl std::fmt::Display for GanZhi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem_char(), self.branch_char())
    }
}

/// One of the twelve two-hour periods (时辰), numbered 1 (子) to 12 (亥).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Shichen(u8);

impl TryFrom<u8> for Shichen {
    type Error = DomainError;

    fn try_from(number: u8) -> DomainResult<Self> {
        if (1..=12).contains(&number) {
            Ok(Self(number))
        } else {
            Err(DomainError::ShichenOutOfRange(u32::from(number)))
        }
    }
}

impl Shichen {
    /// The period containing `hour`; 23:00-01:00 is 子 (1).
    pub fn from_hour(hour: u32) -> DomainResult<Self> {
        if hour > 23 {
            return Err(DomainError::HourOutOfRange(hour));
        }
        Ok(Self::containing(hour))
    }

    fn containing(hour: u32) -> Self {
        Self((((hour % 24 + 1) / 2) % 12) as u8 + 1)
    }

    /// Bucket number, 1-12.
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Zero-based branch index, 0 (子) to 11 (亥).
    pub fn branch_index(self) -> u8 {
        self.0 - 1
    }

    /// Name such as `巳时`.
    pub fn name(self) -> String {
        format!("{}时", BRANCHES[usize::from(self.branch_index())])
    }
}

impl std::fmt::Display for Shichen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Lunar month number for a month branch character.
///
/// 寅 is month 1 through 丑 as month 12. Anything else, including an empty
/// string, falls back to month 1.
pub fn lunar_month_from_branch(branch: &str) -> u32 {
    MONTH_BRANCHES
        .iter()
        .position(|b| *b == branch)
        .map_or(1, |i| i as u32 + 1)
}

/// The four pillars of a moment plus its shichen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexagenaryMoment {
    /// Year pillar (turns at 立春).
    pub year: GanZhi,
    /// Month pillar (turns at each 节).
    pub month: GanZhi,
    /// Day pillar (turns at midnight).
    pub day: GanZhi,
    /// Hour pillar.
    pub hour: GanZhi,
    /// Two-hour period.
    pub shichen: Shichen,
}

impl SexagenaryMoment {
    /// Compute the pillars for a moment, read in its own offset.
    pub fn from_datetime(moment: DateTime<FixedOffset>) -> Self {
        Self::from_parts(moment.naive_local(), moment.offset().local_minus_utc())
    }

    /// Compute the pillars for a local moment `utc_offset_hours` ahead of UTC.
    pub fn from_local(moment: NaiveDateTime, utc_offset_hours: i32) -> Self {
        Self::from_parts(moment, utc_offset_hours * 3600)
    }

    fn from_parts(moment: NaiveDateTime, utc_offset_secs: i32) -> Self {
        let jd = julian_date_ut(moment, utc_offset_secs);
        let month_offset = month_offset(sun_longitude(jd));

        let mut year = moment.year();
        // 子 and 丑 months that fall in January or February belong to the previous year.
        if moment.month() <= 2 && month_offset >= 10 {
            year -= 1;
        }
        let year_index = i64::from(year) - 4;
        let year_gz = GanZhi::new(year_index, year_index);

        // 五虎遁: the 寅 month stem follows from the year stem.
        let first_month_stem = i64::from(year_gz.stem % 5) * 2 + 2;
        let month_gz = GanZhi::new(first_month_stem + month_offset, 2 + month_offset);

        let day_number = julian_day_number(moment.date());
        let day_gz = GanZhi::from_cycle(day_number + 49);

        let shichen = Shichen::containing(moment.hour());
        // 五鼠遁: from 23:00 the hour stem already follows the next day.
        let day_stem = if moment.hour() == 23 {
            i64::from(day_gz.stem) + 1
        } else {
            i64::from(day_gz.stem)
        };
        let branch = i64::from(shichen.branch_index());
        let hour_gz = GanZhi::new((day_stem % 5) * 2 + branch, branch);

        Self {
            year: year_gz,
            month: month_gz,
            day: day_gz,
            hour: hour_gz,
            shichen,
        }
    }

    /// Lunar month number derived from the month branch.
    pub fn lunar_month(&self) -> u32 {
        lunar_month_from_branch(self.month.branch_char())
    }
}

impl std::fmt::Display for SexagenaryMoment {
    /// `甲辰年 甲戌月 丁卯日 乙巳时`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年 {}月 {}日 {}时",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Julian day number of a Gregorian calendar date.
pub fn julian_day_number(date: NaiveDate) -> i64 {
    let y = i64::from(date.year());
    let m = i64::from(date.month());
    let d = i64::from(date.day());
    let a = (14 - m) / 12;
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    d + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

fn julian_date_ut(moment: NaiveDateTime, utc_offset_secs: i32) -> f64 {
    let day = julian_day_number(moment.date()) as f64 - 0.5;
    let seconds = f64::from(moment.num_seconds_from_midnight()) - f64::from(utc_offset_secs);
    day + seconds / 86_400.0
}

/// Apparent ecliptic longitude of the sun in degrees, `[0, 360)`.
pub fn sun_longitude(julian_date: f64) -> f64 {
    let t = (julian_date - J2000) / 36_525.0;
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();
    let node = (125.04 - 1934.136 * t).to_radians();
    let apparent = mean_longitude + center - 0.005_69 - 0.004_78 * node.sin();
    apparent.rem_euclid(360.0)
}

/// Months elapsed since the 寅 month: 0 for 寅 through 11 for 丑.
fn month_offset(longitude: f64) -> i64 {
    ((longitude - START_OF_SPRING_DEG).rem_euclid(360.0) / 30.0).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn pillars(moment: NaiveDateTime) -> String {
        SexagenaryMoment::from_local(moment, 8).to_string()
    }

    #[test]
    fn julian_day_numbers() {
        assert_eq!(julian_day_number(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()), 2_451_545);
        assert_eq!(julian_day_number(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 2_460_311);
    }

    #[test]
    fn known_day_pillars() {
        // 2024-01-01 is a 甲子 day.
        let m = SexagenaryMoment::from_local(at(2024, 1, 1, 12), 8);
        assert_eq!(m.day.to_string(), "甲子");
        let m = SexagenaryMoment::from_local(at(2000, 1, 1, 12), 8);
        assert_eq!(m.day.to_string(), "戊午");
    }

    #[test]
    fn autumn_moment() {
        assert_eq!(pillars(at(2024, 10, 30, 10)), "甲辰年 甲戌月 丁卯日 乙巳时");
        let m = SexagenaryMoment::from_local(at(2024, 10, 30, 10), 8);
        assert_eq!(m.lunar_month(), 9);
        assert_eq!(m.shichen.number(), 6);
    }

    #[test]
    fn year_turns_at_start_of_spring() {
        // 立春 2024 falls at about 16:27 Beijing time on 4 February.
        assert_eq!(pillars(at(2024, 2, 4, 12)), "癸卯年 乙丑月 戊戌日 戊午时");
        assert_eq!(pillars(at(2024, 2, 4, 20)), "甲辰年 丙寅月 戊戌日 壬戌时");
    }

    #[test]
    fn january_before_start_of_spring() {
        assert_eq!(pillars(at(2025, 1, 1, 0)), "甲辰年 丙子月 庚午日 丙子时");
        let m = SexagenaryMoment::from_local(at(2025, 1, 1, 0), 8);
        assert_eq!(m.lunar_month(), 11);
    }

    #[test]
    fn late_night_hour_uses_next_day_stem() {
        assert_eq!(pillars(at(2023, 6, 15, 23)), "癸卯年 戊午月 甲辰日 丙子时");
    }

    #[test]
    fn offset_datetime_matches_local() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let moment = at(2024, 10, 30, 10).and_local_timezone(offset).unwrap();
        assert_eq!(
            SexagenaryMoment::from_datetime(moment),
            SexagenaryMoment::from_local(at(2024, 10, 30, 10), 8)
        );
    }

    #[test]
    fn older_date() {
        assert_eq!(pillars(at(1990, 5, 20, 8)), "庚午年 辛巳月 乙酉日 庚辰时");
    }

    #[test]
    fn shichen_buckets() {
        let expected = [
            (0, 1),
            (1, 2),
            (2, 2),
            (3, 3),
            (10, 6),
            (11, 7),
            (21, 12),
            (22, 12),
            (23, 1),
        ];
        for (hour, bucket) in expected {
            assert_eq!(Shichen::from_hour(hour).unwrap().number(), bucket, "hour {hour}");
        }
        assert_eq!(Shichen::from_hour(10).unwrap().name(), "巳时");
        assert_eq!(Shichen::from_hour(24), Err(DomainError::HourOutOfRange(24)));
    }

    #[test]
    fn shichen_deserializes_only_valid_numbers() {
        let si: Shichen = serde_json::from_str("6").unwrap();
        assert_eq!(si.name(), "巳时");
        assert_eq!(serde_json::to_string(&si).unwrap(), "6");
        assert!(serde_json::from_str::<Shichen>("0").is_err());
        assert!(serde_json::from_str::<Shichen>("13").is_err());
        assert_eq!(Shichen::try_from(0), Err(DomainError::ShichenOutOfRange(0)));
    }

    #[test]
    fn branch_to_lunar_month() {
        assert_eq!(lunar_month_from_branch("寅"), 1);
        assert_eq!(lunar_month_from_branch("戌"), 9);
        assert_eq!(lunar_month_from_branch("子"), 11);
        assert_eq!(lunar_month_from_branch("丑"), 12);
        assert_eq!(lunar_month_from_branch(""), 1);
        assert_eq!(lunar_month_from_branch("X"), 1);
    }

    #[test]
    fn cycle_positions() {
        assert_eq!(GanZhi::from_cycle(0).to_string(), "甲子");
        assert_eq!(GanZhi::from_cycle(59).to_string(), "癸亥");
        assert_eq!(GanZhi::from_cycle(60).to_string(), "甲子");
        assert_eq!(GanZhi::from_cycle(-1).to_string(), "癸亥");
    }

    #[test]
    fn sun_longitude_near_equinox() {
        // March equinox 2024: 20 March 03:06 UTC.
        let jd = julian_date_ut(at(2024, 3, 20, 11), 8 * 3600);
        let lon = sun_longitude(jd);
        assert!(lon < 0.5 || lon > 359.5, "{lon}");
    }
}
