//! Thinking/response segmentation.
//!
//! Some models embed a reasoning segment in their output, delimited by
//! one of several paired marker styles. This module splits that segment
//! from the visible response so the presentation layer can render them
//! separately.

use std::sync::LazyLock;

use regex::Regex;

// Priority order is fixed: only the first matching style is applied,
// even when several distinct styles are present in the same text. Known
// quirk, kept for compatibility with existing model output handling.
static THINKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<thinking>(.*?)</thinking>",
        r"(?is)<think>(.*?)</think>",
        r"(?is)\*thinking\*(.*?)\*/thinking\*",
        r"(?is)\[thinking\](.*?)\[/thinking\]",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static segmentation pattern"))
    .collect()
});

/// Result of splitting model output into reasoning and visible response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segmented {
    /// Extracted reasoning, without its delimiters. Empty when no marker
    /// style matched.
    pub reasoning: String,
    /// The response with the matched segment (delimiters included)
    /// stripped out, trimmed.
    pub response: String,
}

/// Split `text` into a reasoning segment and the visible response.
///
/// Markers are matched case-insensitively and non-greedily, with `.`
/// crossing newlines. When no style matches, `reasoning` is empty and
/// `response` is the trimmed input.
pub fn segment(text: &str) -> Segmented {
    for pattern in THINKING_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let reasoning = captures
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            let response = pattern.replace_all(text, "").trim().to_string();
            return Segmented { reasoning, response };
        }
    }

    Segmented {
        reasoning: String::new(),
        response: text.trim().to_string(),
    }
}
