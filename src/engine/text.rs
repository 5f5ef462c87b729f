//! Text transforms: case conversion, reversal, counting and palindrome checks.

use std::str::FromStr;

use crate::error::{PlaygroundError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextOp {
    Uppercase,
    Lowercase,
    Reverse,
    Count,
    Palindrome,
}

impl TextOp {
    pub const ALL: [TextOp; 5] = [
        TextOp::Uppercase,
        TextOp::Lowercase,
        TextOp::Reverse,
        TextOp::Count,
        TextOp::Palindrome,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextOp::Uppercase => "uppercase",
            TextOp::Lowercase => "lowercase",
            TextOp::Reverse => "reverse",
            TextOp::Count => "count",
            TextOp::Palindrome => "palindrome",
        }
    }
}

impl FromStr for TextOp {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        TextOp::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| PlaygroundError::InvalidOperation(s.to_string()))
    }
}

/// Word and character counts. Lengths are in Unicode scalar values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextCounts {
    pub words: usize,
    pub chars: usize,
    pub chars_no_spaces: usize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextResult {
    /// Output of uppercase / lowercase / reverse.
    Transformed { text: String, original_len: usize },
    Counts(TextCounts),
    Palindrome { is_palindrome: bool, cleaned: String },
}

/// Run `op` over `text`.
///
/// Transforms reject blank input with [`PlaygroundError::EmptyInput`]; counting
/// and the palindrome check accept it (zero counts, trivially a palindrome).
pub fn process(text: &str, op: TextOp) -> Result<TextResult> {
    let needs_content = matches!(op, TextOp::Uppercase | TextOp::Lowercase | TextOp::Reverse);
    if needs_content && text.trim().is_empty() {
        return Err(PlaygroundError::EmptyInput);
    }
    let original_len = text.chars().count();
    let result = match op {
        TextOp::Uppercase => TextResult::Transformed { text: text.to_uppercase(), original_len },
        TextOp::Lowercase => TextResult::Transformed { text: text.to_lowercase(), original_len },
        TextOp::Reverse => TextResult::Transformed { text: text.chars().rev().collect(), original_len },
        TextOp::Count => TextResult::Counts(count(text)),
        TextOp::Palindrome => {
            let cleaned = clean_for_palindrome(text);
            let is_palindrome = cleaned.chars().eq(cleaned.chars().rev());
            TextResult::Palindrome { is_palindrome, cleaned }
        }
    };
    Ok(result)
}

fn count(text: &str) -> TextCounts {
    TextCounts {
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
        chars_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
    }
}

// Lowercase, then keep only [a-z0-9].
fn clean_for_palindrome(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
