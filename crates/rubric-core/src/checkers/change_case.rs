//! Letter-case constraints.

use crate::args::CheckerArgs;
use crate::comparison::{Relation, OCCURRENCE_WINDOW};
use crate::textutil;
use crate::ConfigurationError;

/// At least one cased character and no lowercase ones.
fn is_all_upper(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase()) && !text.chars().any(|c| c.is_lowercase())
}

/// At least one cased character and no uppercase ones.
fn is_all_lower(text: &str) -> bool {
    text.chars().any(|c| c.is_lowercase()) && !text.chars().any(|c| c.is_uppercase())
}

/// `change_case:capital_word_frequency` — comparator on the number of
/// fully-uppercase words. Hyphenated compounds count as one word.
#[derive(Debug)]
pub struct CapitalWordFrequency {
    capital_frequency: i64,
    relation: Relation,
}

impl CapitalWordFrequency {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            capital_frequency: args.count("capital_frequency")?,
            relation: args.relation("capital_relation")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let capital_words = textutil::tokenize(response)
            .iter()
            .filter(|word| is_all_upper(word))
            .count() as i64;
        self.relation
            .compare(capital_words, self.capital_frequency, OCCURRENCE_WINDOW)
    }
}

/// `change_case:english_capital` — the response is entirely uppercase and
/// its detected language is English.
///
/// When the case predicate holds but language detection fails, the verdict
/// is true (fail-open). This asymmetry with `language:response_language` is
/// deliberate and preserved for benchmark compatibility.
#[derive(Debug)]
pub struct EnglishCapital;

impl EnglishCapital {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        if !is_all_upper(response) {
            return false;
        }
        match textutil::language_code(response) {
            Ok(code) => code == "en",
            Err(err) => {
                tracing::warn!(error = %err, "language detection failed; verdict true");
                true
            }
        }
    }
}

impl Default for EnglishCapital {
    fn default() -> Self {
        Self::new()
    }
}

/// `change_case:english_lowercase` — the response is entirely lowercase and
/// its detected language is English. Digits and punctuation do not affect
/// the case predicate. Fail-open on detection failure, as above.
#[derive(Debug)]
pub struct EnglishLowercase;

impl EnglishLowercase {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        if !is_all_lower(response) {
            return false;
        }
        match textutil::language_code(response) {
            Ok(code) => code == "en",
            Err(err) => {
                tracing::warn!(error = %err, "language detection failed; verdict true");
                true
            }
        }
    }
}

impl Default for EnglishLowercase {
    fn default() -> Self {
        Self::new()
    }
}
