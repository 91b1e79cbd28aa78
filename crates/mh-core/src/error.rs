//! Error types for the divination core.

use thiserror::Error;

/// Result type for core lookups and calculations.
pub type DomainResult<T> = Result<T, DomainError>;

/// An input lies outside its documented numeric domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Trigram numbers run from 1 (乾) to 8 (坤).
    #[error("trigram number {0} out of range (expected 1-8)")]
    TrigramOutOfRange(u32),

    /// Lunar months run from 1 to 12.
    #[error("lunar month {0} out of range (expected 1-12)")]
    LunarMonthOutOfRange(u32),

    /// The host flag selects the upper (1) or lower (0) trigram.
    #[error("host flag {0} out of range (expected 0 or 1)")]
    HostFlagOutOfRange(u32),

    /// Hours of the day run from 0 to 23.
    #[error("hour {0} out of range (expected 0-23)")]
    HourOutOfRange(u32),

    /// Shichen are numbered 1 (子) to 12 (亥).
    #[error("shichen {0} out of range (expected 1-12)")]
    ShichenOutOfRange(u32),

    /// Moving lines are counted 1 (bottom) to 6 (top).
    #[error("line position {0} out of range (expected 1-6)")]
    LinePositionOutOfRange(u32),
}
