//! Constraints on how the response must begin or end.

use regex::Regex;

use crate::args::CheckerArgs;
use crate::ConfigurationError;

/// Trim, strip one layer of surrounding double quotes, case-fold.
fn normalize(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_lowercase()
}

/// `startend:end_checker` — the response must end with the given phrase.
#[derive(Debug)]
pub struct EndPhrase {
    end_phrase: String,
}

impl EndPhrase {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            end_phrase: normalize(args.str("end_phrase")?),
        })
    }

    pub fn check(&self, response: &str) -> bool {
        normalize(response).ends_with(&self.end_phrase)
    }
}

/// `startend:quotation` — the whole response is wrapped in double quotes.
#[derive(Debug)]
pub struct Quotation;

impl Quotation {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        let trimmed = response.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), trimmed.chars().next_back()) {
            (Some('"'), Some('"')) => trimmed.chars().count() > 1,
            _ => false,
        }
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Self::new()
    }
}

/// `startend:constrained_start` — some line of the response must start with
/// the given phrase (leading whitespace tolerated).
///
/// Used for multi-turn prompts; constructible through the API but carries no
/// registry entry.
#[derive(Debug)]
pub struct ConstrainedStart {
    pattern: Regex,
}

impl ConstrainedStart {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let starter = args.str("starter")?.trim().to_string();
        let pattern = format!(r"(?m)^\s*{}.*$", regex::escape(&starter));
        let pattern = Regex::new(&pattern)
            .map_err(|e| ConfigurationError::invalid("starter", e.to_string()))?;
        Ok(Self { pattern })
    }

    pub fn check(&self, response: &str) -> bool {
        self.pattern.is_match(response)
    }
}
