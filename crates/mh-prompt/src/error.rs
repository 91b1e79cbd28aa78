//! Error types for prompt formatting and interpretation.

use thiserror::Error;

/// Result type for formatting operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors raised while turning a divination into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// A field the template needs is missing from the summary.
    #[error("divination summary is missing required field `{field}`")]
    ContractViolation {
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Errors from an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// The interpreter produced no text.
    #[error("解读结果为空，请稍后再试。")]
    Empty,

    /// The interpreter ran out of quota; carries its message.
    #[error("{0}")]
    Exhausted(String),

    /// The interpreter failed; carries its message.
    #[error("{0}")]
    Failed(String),
}
