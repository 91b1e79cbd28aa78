//! Core tables and calculations for Meihua Yishu (梅花易数) divination.
//!
//! Provides the eight trigrams and 64 hexagram names, the five-element
//! host/guest analysis with seasonal strength, and a sexagenary calendar
//! for stamping a divination with its year, month, day and hour pillars.
//! Everything here is pure: no clocks, no randomness, no I/O.

pub mod calendar;
pub mod element;
pub mod error;
pub mod five_elements;
pub mod hexagram;
pub mod trigram;

pub use calendar::{GanZhi, SexagenaryMoment, Shichen, lunar_month_from_branch};
pub use element::{Element, SeasonTable, SeasonalState};
pub use error::{DomainError, DomainResult};
pub use five_elements::{
    FiveElementAnalysis, HostSide, Qi, QiTrace, Relation, Verdict, analyze, analyze_with_flag,
};
pub use hexagram::{Hexagram, UNKNOWN_HEXAGRAM_NAME, hexagram_name};
pub use trigram::{Line, TRIGRAMS, Trigram, UNKNOWN_TRIGRAM_NAME};
