//! A configured divination service: clock, number source and keywords.

use serde::Serialize;

use crate::config::OracleConfig;
use crate::engine::{DivinationResult, divine};
use crate::extract::{Extraction, extract_number_and_question, is_divination_request};
use crate::source::{Clock, NumberSource, SeededNumbers, SystemClock, TimeSeeded};

/// The outcome of handling one request message.
#[derive(Debug, Clone, Serialize)]
pub struct Consultation {
    /// Number and question taken from the message.
    pub extraction: Extraction,
    /// The divination, or `None` when the number was out of range.
    pub result: Option<DivinationResult>,
}

/// Runs divinations against injectable time and number sources.
pub struct Diviner {
    config: OracleConfig,
    clock: Box<dyn Clock + Send + Sync>,
    numbers: Box<dyn NumberSource + Send + Sync>,
}

impl Diviner {
    /// Build from config: a system clock in the configured offset and a
    /// seeded or time-derived number source.
    pub fn new(config: OracleConfig) -> Self {
        let clock = Box::new(SystemClock::with_offset_hours(config.utc_offset_hours));
        let numbers: Box<dyn NumberSource + Send + Sync> = match config.seed {
            Some(seed) => Box::new(SeededNumbers::new(seed)),
            None => Box::new(TimeSeeded),
        };
        Self {
            config,
            clock,
            numbers,
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the fallback number source.
    pub fn with_numbers(mut self, numbers: impl NumberSource + Send + Sync + 'static) -> Self {
        self.numbers = Box::new(numbers);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Whether `text` contains one of the request keywords.
    pub fn is_request(&self, text: &str) -> bool {
        is_divination_request(text, &self.config.request_keywords)
    }

    /// Extract the number and question, drawing a fallback number if needed.
    pub fn extract(&mut self, text: &str) -> Extraction {
        extract_number_and_question(text, self.numbers.as_mut())
    }

    /// Cast a divination for `number` at the current clock time.
    pub fn divine(&self, number: u32) -> Option<DivinationResult> {
        divine(number, self.clock.now())
    }

    /// Extract and divine in one step.
    pub fn consult(&mut self, text: &str) -> Consultation {
        let extraction = self.extract(text);
        let result = self.divine(extraction.number);
        Consultation { extraction, result }
    }
}

impl Default for Diviner {
    fn default() -> Self {
        Self::new(OracleConfig::default())
    }
}

impl std::fmt::Debug for Diviner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diviner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
