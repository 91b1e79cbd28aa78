//! Clock and fallback-number sources.
//!
//! The engine reads the current moment once per divination and draws a
//! fallback number only when the user gave none. Both go through these
//! traits so tests and replays can pin them.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest accepted divination number.
pub const MIN_NUMBER: u32 = 100;
/// Largest accepted divination number.
pub const MAX_NUMBER: u32 = 999;

/// Source of the current moment.
pub trait Clock {
    /// The current moment in the divination time zone.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock shifted into a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Clock for a zone `hours` ahead of UTC; out-of-range offsets fall back to UTC.
    pub fn with_offset_hours(hours: i32) -> Self {
        let offset = FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// A clock stopped at one moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Source of fallback divination numbers in `[100, 999]`.
pub trait NumberSource {
    /// Draw the next number.
    fn next_number(&mut self) -> u32;
}

/// Derives a number from the sub-second microseconds of the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeeded;

impl NumberSource for TimeSeeded {
    fn next_number(&mut self) -> u32 {
        number_from_micros(Utc::now().timestamp_subsec_micros())
    }
}

/// Map microsecond digits into `[100, 999]`.
pub fn number_from_micros(micros: u32) -> u32 {
    micros % 900 + MIN_NUMBER
}

/// Reproducible numbers from a seeded RNG.
#[derive(Debug, Clone)]
pub struct SeededNumbers {
    rng: StdRng,
}

impl SeededNumbers {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NumberSource for SeededNumbers {
    fn next_number(&mut self) -> u32 {
        self.rng.random_range(MIN_NUMBER..=MAX_NUMBER)
    }
}

/// Always yields the same number.
#[derive(Debug, Clone, Copy)]
pub struct FixedNumber(pub u32);

impl NumberSource for FixedNumber {
    fn next_number(&mut self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_map_into_range() {
        assert_eq!(number_from_micros(0), 100);
        assert_eq!(number_from_micros(899), 999);
        assert_eq!(number_from_micros(900), 100);
        assert_eq!(number_from_micros(123_456), 123_456 % 900 + 100);
    }

    #[test]
    fn time_seeded_in_range() {
        let mut source = TimeSeeded;
        for _ in 0..100 {
            let n = source.next_number();
            assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
        }
    }

    #[test]
    fn seeded_numbers_deterministic() {
        let mut a = SeededNumbers::new(42);
        let mut b = SeededNumbers::new(42);
        for _ in 0..20 {
            let n = a.next_number();
            assert_eq!(n, b.next_number());
            assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
        }
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let moment = DateTime::parse_from_rfc3339("2024-10-30T10:00:00+08:00")
            .unwrap()
            .with_timezone(&offset);
        let clock = FixedClock(moment);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_uses_offset() {
        let clock = SystemClock::with_offset_hours(8);
        assert_eq!(clock.now().offset().local_minus_utc(), 8 * 3600);
        let fallback = SystemClock::with_offset_hours(99);
        assert_eq!(fallback.now().offset().local_minus_utc(), 0);
    }
}
