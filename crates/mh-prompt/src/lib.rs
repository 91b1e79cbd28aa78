//! Prompt and reply formatting for Meihua divinations.
//!
//! A [`DivinationResult`](mh_oracle::DivinationResult) is flattened into a
//! [`DivinationSummary`], rendered into an LLM prompt, and the resulting
//! interpretation is wrapped into the final chat reply by [`respond`].

pub mod error;
pub mod reply;
pub mod summary;
pub mod template;

pub use error::{InterpretError, PromptError, PromptResult};
pub use reply::{Interpreter, Reply, ReplyKind, respond};
pub use summary::DivinationSummary;
pub use template::{
    INTERPRETATION_CHAR_LIMIT, OUT_OF_RANGE_MESSAGE, build_interpretation_prompt,
    format_final_reply, random_number_disclosure,
};
