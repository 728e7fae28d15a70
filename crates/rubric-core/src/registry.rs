//! The constraint registry.
//!
//! A total, immutable mapping from namespaced constraint ids
//! (`"<category>:<name>"`) to checker variants, built once at first use,
//! plus the conflict-table symmetrizer the prompt-synthesis side relies on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use lazy_static::lazy_static;

use crate::checkers::CheckerKind;
use crate::ConfigurationError;

/// The registered constraint ids, by category.
pub mod id {
    pub const KEYWORD_EXISTENCE: &str = "keywords:existence";
    pub const KEYWORD_FREQUENCY: &str = "keywords:frequency";
    pub const FORBIDDEN_WORDS: &str = "keywords:forbidden_words";
    pub const LETTER_FREQUENCY: &str = "keywords:letter_frequency";
    pub const RESPONSE_LANGUAGE: &str = "language:response_language";
    pub const NUMBER_SENTENCES: &str = "length_constraints:number_sentences";
    pub const NUMBER_PARAGRAPHS: &str = "length_constraints:number_paragraphs";
    pub const NUMBER_WORDS: &str = "length_constraints:number_words";
    pub const NTH_PARAGRAPH_FIRST_WORD: &str = "length_constraints:nth_paragraph_first_word";
    pub const NUMBER_PLACEHOLDERS: &str = "detectable_content:number_placeholders";
    pub const POSTSCRIPT: &str = "detectable_content:postscript";
    pub const NUMBER_BULLET_LISTS: &str = "detectable_format:number_bullet_lists";
    pub const CONSTRAINED_RESPONSE: &str = "detectable_format:constrained_response";
    pub const NUMBER_HIGHLIGHTED_SECTIONS: &str =
        "detectable_format:number_highlighted_sections";
    pub const MULTIPLE_SECTIONS: &str = "detectable_format:multiple_sections";
    pub const JSON_FORMAT: &str = "detectable_format:json_format";
    pub const TITLE: &str = "detectable_format:title";
    pub const TWO_RESPONSES: &str = "combination:two_responses";
    pub const REPEAT_PROMPT: &str = "combination:repeat_prompt";
    pub const END_CHECKER: &str = "startend:end_checker";
    pub const QUOTATION: &str = "startend:quotation";
    pub const CAPITAL_WORD_FREQUENCY: &str = "change_case:capital_word_frequency";
    pub const ENGLISH_CAPITAL: &str = "change_case:english_capital";
    pub const ENGLISH_LOWERCASE: &str = "change_case:english_lowercase";
    pub const NO_COMMA: &str = "punctuation:no_comma";
}

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, CheckerKind> = {
        let mut m = HashMap::new();
        m.insert(id::KEYWORD_EXISTENCE, CheckerKind::KeywordExistence);
        m.insert(id::KEYWORD_FREQUENCY, CheckerKind::KeywordFrequency);
        m.insert(id::FORBIDDEN_WORDS, CheckerKind::ForbiddenWords);
        m.insert(id::LETTER_FREQUENCY, CheckerKind::LetterFrequency);
        m.insert(id::RESPONSE_LANGUAGE, CheckerKind::ResponseLanguage);
        m.insert(id::NUMBER_SENTENCES, CheckerKind::SentenceCount);
        m.insert(id::NUMBER_PARAGRAPHS, CheckerKind::ParagraphCount);
        m.insert(id::NUMBER_WORDS, CheckerKind::WordCount);
        m.insert(id::NTH_PARAGRAPH_FIRST_WORD, CheckerKind::NthParagraphFirstWord);
        m.insert(id::NUMBER_PLACEHOLDERS, CheckerKind::PlaceholderCount);
        m.insert(id::POSTSCRIPT, CheckerKind::Postscript);
        m.insert(id::NUMBER_BULLET_LISTS, CheckerKind::BulletListCount);
        m.insert(id::CONSTRAINED_RESPONSE, CheckerKind::ConstrainedResponse);
        m.insert(id::NUMBER_HIGHLIGHTED_SECTIONS, CheckerKind::HighlightedSectionCount);
        m.insert(id::MULTIPLE_SECTIONS, CheckerKind::MultipleSections);
        m.insert(id::JSON_FORMAT, CheckerKind::JsonFormat);
        m.insert(id::TITLE, CheckerKind::Title);
        m.insert(id::TWO_RESPONSES, CheckerKind::TwoResponses);
        m.insert(id::REPEAT_PROMPT, CheckerKind::RepeatPrompt);
        m.insert(id::END_CHECKER, CheckerKind::EndPhrase);
        m.insert(id::QUOTATION, CheckerKind::Quotation);
        m.insert(id::CAPITAL_WORD_FREQUENCY, CheckerKind::CapitalWordFrequency);
        m.insert(id::ENGLISH_CAPITAL, CheckerKind::EnglishCapital);
        m.insert(id::ENGLISH_LOWERCASE, CheckerKind::EnglishLowercase);
        m.insert(id::NO_COMMA, CheckerKind::NoComma);
        m
    };
}

/// Resolve a constraint id to its checker variant.
pub fn resolve(id: &str) -> Result<CheckerKind, ConfigurationError> {
    REGISTRY
        .get(id)
        .copied()
        .ok_or_else(|| ConfigurationError::UnknownConstraint(id.to_string()))
}

/// All registered constraint ids, in stable (sorted) order.
pub fn registered_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = REGISTRY.keys().copied().collect();
    ids.sort_unstable();
    ids
}

/// A table of constraints that cannot be jointly required in one prompt.
pub type ConflictTable = BTreeMap<String, BTreeSet<String>>;

/// Close a conflict table under symmetry and reflexivity.
///
/// If A conflicts with B, B conflicts with A; every id mentioned anywhere in
/// the table conflicts with itself. Pure (the input is not modified) and
/// idempotent. No conflicts ship with the engine; declaring them is the
/// prompt-synthesis side's extensibility point.
pub fn conflict_make(conflicts: &ConflictTable) -> ConflictTable {
    let mut closed: ConflictTable = conflicts.clone();
    for (key, others) in conflicts {
        for other in others {
            closed
                .entry(other.clone())
                .or_default()
                .insert(key.clone());
        }
    }
    let ids: Vec<String> = closed.keys().cloned().collect();
    for id in ids {
        closed.entry(id.clone()).or_default().insert(id);
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_id_resolves() {
        for id in registered_ids() {
            assert!(resolve(id).is_ok(), "{id} must resolve");
        }
    }

    #[test]
    fn test_registry_size() {
        assert_eq!(registered_ids().len(), 25);
    }

    #[test]
    fn test_unknown_id() {
        let err = resolve("keywords:emoji_count").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownConstraint(_)));
        // Categories alone are not ids
        assert!(resolve("keywords").is_err());
    }

    #[test]
    fn test_constrained_start_not_registered() {
        assert!(resolve("startend:constrained_start").is_err());
        assert!(resolve("multi-turn:constrained_start").is_err());
    }

    #[test]
    fn test_id_format() {
        let categories = [
            "keywords",
            "language",
            "length_constraints",
            "detectable_content",
            "detectable_format",
            "multi-turn",
            "combination",
            "startend",
            "change_case",
            "punctuation",
        ];
        for id in registered_ids() {
            let (category, name) = id.split_once(':').expect("id must be namespaced");
            assert!(categories.contains(&category), "unknown category in {id}");
            assert!(!name.is_empty());
        }
    }

    fn table(entries: &[(&str, &[&str])]) -> ConflictTable {
        entries
            .iter()
            .map(|(k, vs)| {
                (
                    k.to_string(),
                    vs.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>(),
                )
            })
            .collect()
    }

    #[test]
    fn test_conflict_make_symmetric_and_reflexive() {
        let closed = conflict_make(&table(&[("a", &["b"]), ("b", &[])]));
        assert!(closed["a"].contains("a"));
        assert!(closed["a"].contains("b"));
        assert!(closed["b"].contains("a"));
        assert!(closed["b"].contains("b"));
    }

    #[test]
    fn test_conflict_make_creates_missing_keys() {
        let closed = conflict_make(&table(&[("a", &["b", "c"])]));
        assert!(closed.contains_key("b"));
        assert!(closed.contains_key("c"));
        assert!(closed["c"].contains("a"));
        assert!(closed["c"].contains("c"));
    }

    #[test]
    fn test_conflict_make_pure() {
        let input = table(&[("a", &["b"])]);
        let before = input.clone();
        let _ = conflict_make(&input);
        assert_eq!(input, before);
    }

    proptest! {
        #[test]
        fn prop_conflict_make_idempotent(
            entries in proptest::collection::btree_map(
                "[a-d]",
                proptest::collection::btree_set("[a-d]", 0..4),
                0..4,
            )
        ) {
            let once = conflict_make(&entries);
            let twice = conflict_make(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_conflict_make_symmetric(
            entries in proptest::collection::btree_map(
                "[a-d]",
                proptest::collection::btree_set("[a-d]", 0..4),
                0..4,
            )
        ) {
            let closed = conflict_make(&entries);
            for (key, others) in &closed {
                for other in others {
                    prop_assert!(closed[other].contains(key));
                }
            }
        }
    }
}
