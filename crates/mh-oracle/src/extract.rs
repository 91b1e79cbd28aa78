//! Pulling the divination number and question out of a chat message.

use serde::{Deserialize, Serialize};

use crate::source::{MAX_NUMBER, MIN_NUMBER, NumberSource};

/// A normalized divination request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Number in `[100, 999]` that seeds the divination.
    pub number: u32,
    /// The question with whitespace and the number removed.
    pub question: String,
    /// Whether the number was synthesized rather than given by the user.
    pub was_random: bool,
}

/// Extract a three-digit number and the question from `text`.
///
/// All whitespace is removed first. A run of exactly three ASCII digits in
/// `[100, 999]` at the start or the end of the text is used and cut out of
/// the question. Otherwise a number is drawn from `source` and the whole
/// text is kept as the question.
pub fn extract_number_and_question(text: &str, source: &mut dyn NumberSource) -> Extraction {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some((number, question)) = anchored_number(&compact) {
        return Extraction {
            number,
            question,
            was_random: false,
        };
    }

    let number = source.next_number();
    tracing::debug!(number, "no usable number in request, drew fallback");
    Extraction {
        number,
        question: compact,
        was_random: true,
    }
}

/// Find an in-range three-digit run at the start or end of `compact`.
///
/// Returns the parsed value and the remaining text. The leading run is tried
/// first; when it is missing or outside `[100, 999]` the trailing run is
/// tried.
pub fn anchored_number(compact: &str) -> Option<(u32, String)> {
    let in_range = |n: &u32| (MIN_NUMBER..=MAX_NUMBER).contains(n);

    let leading = compact.bytes().take_while(u8::is_ascii_digit).count();
    if leading == 3 {
        let number = compact[..3].parse::<u32>().ok().filter(in_range);
        if let Some(number) = number {
            return Some((number, compact[3..].to_string()));
        }
    }

    let trailing = compact.bytes().rev().take_while(u8::is_ascii_digit).count();
    if trailing == 3 && trailing < compact.len() {
        let split = compact.len() - 3;
        let number = compact[split..].parse::<u32>().ok().filter(in_range)?;
        return Some((number, compact[..split].to_string()));
    }

    None
}

/// Whether `text` asks for a divination, by keyword.
pub fn is_divination_request<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    keywords
        .iter()
        .any(|k| !k.as_ref().is_empty() && text.contains(k.as_ref()))
}
