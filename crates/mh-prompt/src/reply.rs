//! Chat reply pipeline: request detection through to the final text.

use serde::{Deserialize, Serialize};

use mh_oracle::Diviner;

use crate::error::InterpretError;
use crate::summary::DivinationSummary;
use crate::template::{
    OUT_OF_RANGE_MESSAGE, build_interpretation_prompt, format_final_reply,
    random_number_disclosure,
};

/// Turns an interpretation prompt into prose, usually by calling an LLM.
pub trait Interpreter {
    /// Interpret `prompt`.
    fn interpret(&self, prompt: &str) -> Result<String, InterpretError>;
}

impl<F> Interpreter for F
where
    F: Fn(&str) -> Result<String, InterpretError>,
{
    fn interpret(&self, prompt: &str) -> Result<String, InterpretError> {
        self(prompt)
    }
}

/// Kind of chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyKind {
    /// A normal text reply.
    Text,
    /// A user-facing error.
    Error,
}

impl std::fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A reply to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Text or error.
    pub kind: ReplyKind,
    /// Message body.
    pub content: String,
}

impl Reply {
    /// A text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
        }
    }

    /// An error reply.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            content: content.into(),
        }
    }

    /// Whether this is an error reply.
    pub fn is_error(&self) -> bool {
        self.kind == ReplyKind::Error
    }
}

/// Handle one chat message.
///
/// Returns `None` when the message is not a divination request, so the
/// caller can fall back to ordinary chat.
pub fn respond(diviner: &mut Diviner, interpreter: &dyn Interpreter, text: &str) -> Option<Reply> {
    if !diviner.is_request(text) {
        return None;
    }

    let consultation = diviner.consult(text);
    let extraction = consultation.extraction;
    let Some(result) = consultation.result else {
        tracing::info!(number = extraction.number, "divination number out of range");
        return Some(Reply::error(OUT_OF_RANGE_MESSAGE));
    };

    let summary = DivinationSummary::from(&result);
    let prompt = match build_interpretation_prompt(&summary, &extraction.question) {
        Ok(prompt) => prompt,
        Err(e) => return Some(Reply::error(e.to_string())),
    };

    let interpretation = match interpreter.interpret(&prompt) {
        Ok(text) if text.trim().is_empty() => {
            tracing::info!("interpreter returned empty text");
            return Some(Reply::error(InterpretError::Empty.to_string()));
        }
        Ok(text) => text,
        Err(e) => {
            tracing::info!(error = %e, "interpretation failed");
            return Some(Reply::error(e.to_string()));
        }
    };

    let disclosure = if extraction.was_random {
        random_number_disclosure(extraction.number)
    } else {
        String::new()
    };

    let reply = match format_final_reply(
        &disclosure,
        &extraction.question,
        extraction.number,
        &summary,
        &interpretation,
    ) {
        Ok(content) => Reply::text(content),
        Err(e) => Reply::error(e.to_string()),
    };
    tracing::info!(
        number = extraction.number,
        primary = result.primary.name,
        kind = %reply.kind,
        "divination reply ready"
    );
    Some(reply)
}
