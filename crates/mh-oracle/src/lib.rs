//! Meihua Yishu divination by the number method.
//!
//! Turns a chat message into a [`DivinationResult`]: [`extract`] pulls out
//! the three-digit number and the question, [`engine`] derives the primary,
//! nuclear and mutated hexagrams with their five-element readings, and
//! [`Diviner`] ties both to a [`Clock`] and a fallback [`NumberSource`].

pub mod config;
pub mod diviner;
pub mod engine;
pub mod extract;
pub mod source;

pub use config::{DEFAULT_REQUEST_KEYWORDS, OracleConfig};
pub use diviner::{Consultation, Diviner};
pub use engine::{DivinationResult, LINE_POSITION_NAMES, divine, one_indexed_mod};
pub use extract::{Extraction, extract_number_and_question, is_divination_request};
pub use source::{
    Clock, FixedClock, FixedNumber, MAX_NUMBER, MIN_NUMBER, NumberSource, SeededNumbers,
    SystemClock, TimeSeeded,
};
