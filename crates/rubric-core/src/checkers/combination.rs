//! Combined-response constraints: double answers and prompt echoing.

use crate::args::CheckerArgs;
use crate::ConfigurationError;

/// Split on every run of exactly six asterisks. Longer or shorter runs are
/// literal content, matching the benchmark's `******` separator convention.
fn split_on_separator(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'*' {
            let run_start = i;
            while i < bytes.len() && bytes[i] == b'*' {
                i += 1;
            }
            if i - run_start == 6 {
                segments.push(&text[segment_start..run_start]);
                segment_start = i;
            }
        } else {
            i += 1;
        }
    }
    segments.push(&text[segment_start..]);
    segments
}

/// Trim, case-fold, and drop ASCII punctuation.
fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// `combination:two_responses` — exactly two distinct responses separated by
/// a six-asterisk divider.
///
/// Empty segments at the edges are tolerated (a divider may open or close
/// the text); an empty segment between two dividers invalidates the
/// response.
#[derive(Debug)]
pub struct TwoResponses;

impl TwoResponses {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        let segments = split_on_separator(response);
        let mut answers = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                if index != 0 && index != segments.len() - 1 {
                    return false;
                }
            } else {
                answers.push(trimmed);
            }
        }
        answers.len() == 2 && answers[0] != answers[1]
    }
}

impl Default for TwoResponses {
    fn default() -> Self {
        Self::new()
    }
}

/// `combination:repeat_prompt` — the response must open with the prompt,
/// repeated word for word. Comparison ignores case and ASCII punctuation.
#[derive(Debug)]
pub struct RepeatPrompt {
    normalized_prompt: String,
}

impl RepeatPrompt {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            normalized_prompt: normalize(args.str("prompt_to_repeat")?),
        })
    }

    pub fn check(&self, response: &str) -> bool {
        normalize(response).starts_with(&self.normalized_prompt)
    }
}
