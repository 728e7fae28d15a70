//! Keyword presence, absence, and frequency checkers.

use std::collections::BTreeSet;

use regex::Regex;

use crate::args::CheckerArgs;
use crate::comparison::{Relation, OCCURRENCE_WINDOW};
use crate::ConfigurationError;

use super::word_pattern;

/// `keywords:existence` — every keyword must appear as a case-insensitive
/// whole-word match.
#[derive(Debug)]
pub struct KeywordExistence {
    patterns: Vec<Regex>,
}

impl KeywordExistence {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let keywords = args.string_list("keywords")?;
        let patterns = keywords
            .iter()
            .map(|kw| word_pattern("keywords", kw))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    pub fn check(&self, response: &str) -> bool {
        self.patterns.iter().all(|p| p.is_match(response))
    }
}

/// `keywords:frequency` — whole-word case-insensitive occurrence count,
/// compared against a threshold.
#[derive(Debug)]
pub struct KeywordFrequency {
    pattern: Regex,
    frequency: i64,
    relation: Relation,
}

impl KeywordFrequency {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            pattern: word_pattern("keyword", args.str("keyword")?.trim())?,
            frequency: args.count("frequency")?,
            relation: args.relation("relation")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let occurrences = self.pattern.find_iter(response).count() as i64;
        self.relation
            .compare(occurrences, self.frequency, OCCURRENCE_WINDOW)
    }
}

/// `keywords:forbidden_words` — no listed word may appear as a whole-word
/// case-insensitive match. Duplicates in the list are deduplicated first.
#[derive(Debug)]
pub struct ForbiddenWords {
    patterns: Vec<Regex>,
}

impl ForbiddenWords {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let words: BTreeSet<String> = args.string_list("forbidden_words")?.into_iter().collect();
        let patterns = words
            .iter()
            .map(|w| word_pattern("forbidden_words", w))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    pub fn check(&self, response: &str) -> bool {
        !self.patterns.iter().any(|p| p.is_match(response))
    }
}

/// `keywords:letter_frequency` — raw case-folded character count across the
/// whole text, not word-bounded.
#[derive(Debug)]
pub struct LetterFrequency {
    letter: char,
    frequency: i64,
    relation: Relation,
}

impl LetterFrequency {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let letter = args.letter("letter")?;
        Ok(Self {
            letter: letter.to_lowercase().next().unwrap_or(letter),
            frequency: args.count("let_frequency")?,
            relation: args.relation("let_relation")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let occurrences = response
            .to_lowercase()
            .chars()
            .filter(|&c| c == self.letter)
            .count() as i64;
        self.relation
            .compare(occurrences, self.frequency, OCCURRENCE_WINDOW)
    }
}
