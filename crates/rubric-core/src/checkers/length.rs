//! Length constraints: sentence, word, and paragraph structure.

use lazy_static::lazy_static;
use regex::Regex;

use crate::args::CheckerArgs;
use crate::comparison::{Relation, SENTENCE_COUNT_WINDOW, WORD_COUNT_WINDOW};
use crate::textutil;
use crate::ConfigurationError;

lazy_static! {
    // Markdown paragraph divider, tolerant of surrounding whitespace.
    static ref PARAGRAPH_DIVIDER: Regex = Regex::new(r"\s*\*\*\*\s*").unwrap();
}

// Characters that terminate the significant part of a paragraph's first word.
const FIRST_WORD_STOPS: [char; 6] = ['.', ',', '?', '!', '\'', '"'];

/// `length_constraints:number_sentences` — comparator on the sentence count.
#[derive(Debug)]
pub struct SentenceCount {
    num_sentences: i64,
    relation: Relation,
}

impl SentenceCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_sentences: args.count("num_sentences")?,
            relation: args.relation("relation")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let actual = textutil::count_sentences(response) as i64;
        self.relation
            .compare(actual, self.num_sentences, SENTENCE_COUNT_WINDOW)
    }
}

/// `length_constraints:number_words` — comparator on the word count.
#[derive(Debug)]
pub struct WordCount {
    num_words: i64,
    relation: Relation,
}

impl WordCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_words: args.count("num_words")?,
            relation: args.relation("relation")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let actual = textutil::count_words(response) as i64;
        self.relation.compare(actual, self.num_words, WORD_COUNT_WINDOW)
    }
}

/// `length_constraints:number_paragraphs` — exact count of paragraphs
/// separated by the markdown divider `***`.
///
/// Empty segments at the edges (a divider opening or closing the response)
/// are discarded; an empty segment in the interior means two dividers with
/// nothing between them, which invalidates the response outright.
#[derive(Debug)]
pub struct ParagraphCount {
    num_paragraphs: i64,
}

impl ParagraphCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_paragraphs: args.count("num_paragraphs")?,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let segments: Vec<&str> = PARAGRAPH_DIVIDER.split(response).collect();
        let mut count = segments.len() as i64;

        for (index, segment) in segments.iter().enumerate() {
            if segment.trim().is_empty() {
                if index == 0 || index == segments.len() - 1 {
                    count -= 1;
                } else {
                    return false;
                }
            }
        }
        count == self.num_paragraphs
    }
}

/// `length_constraints:nth_paragraph_first_word` — the response must have
/// exactly `num_paragraphs` blank-line-separated paragraphs, and the
/// 1-indexed `nth_paragraph` must open with `first_word`.
#[derive(Debug)]
pub struct NthParagraphFirstWord {
    num_paragraphs: i64,
    nth_paragraph: usize,
    first_word: String,
}

impl NthParagraphFirstWord {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let nth = args.count("nth_paragraph")?;
        if nth < 1 {
            return Err(ConfigurationError::invalid(
                "nth_paragraph",
                "paragraph indices start at 1",
            ));
        }
        Ok(Self {
            num_paragraphs: args.count("num_paragraphs")?,
            nth_paragraph: nth as usize,
            first_word: args.str("first_word")?.to_lowercase(),
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let paragraphs: Vec<&str> = response.split("\n\n").collect();
        let count = paragraphs.iter().filter(|p| !p.trim().is_empty()).count() as i64;

        if self.nth_paragraph > count.max(0) as usize {
            return false;
        }
        let paragraph = paragraphs[self.nth_paragraph - 1].trim();
        if paragraph.is_empty() {
            return false;
        }

        let token = match paragraph.split_whitespace().next() {
            Some(token) => token,
            None => return false,
        };
        // One layer of leading quote characters, then everything up to the
        // first punctuation mark, case-folded.
        let token = token.trim_start_matches('\'').trim_start_matches('"');
        let mut first_word = String::new();
        for c in token.chars() {
            if FIRST_WORD_STOPS.contains(&c) {
                break;
            }
            first_word.extend(c.to_lowercase());
        }

        count == self.num_paragraphs && first_word == self.first_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> CheckerArgs {
        CheckerArgs::from_value(value).unwrap()
    }

    #[test]
    fn test_sentence_count_window() {
        let checker = SentenceCount::from_args(&args(json!({
            "num_sentences": 5, "relation": "around",
        })))
        .unwrap();
        // 3 sentences, |3 - 5| <= 2
        assert!(checker.check("One. Two. Three."));
        // 1 sentence, |1 - 5| > 2
        assert!(!checker.check("Just one."));
    }

    #[test]
    fn test_sentence_count_at_most() {
        let checker = SentenceCount::from_args(&args(json!({
            "num_sentences": 2, "relation": "at most",
        })))
        .unwrap();
        assert!(checker.check("One. Two."));
        assert!(!checker.check("One. Two. Three."));
    }

    #[test]
    fn test_word_count() {
        let checker = WordCount::from_args(&args(json!({
            "num_words": 5, "relation": "at least",
        })))
        .unwrap();
        assert!(checker.check("one two three four five six"));
        assert!(!checker.check("one two three"));
    }

    #[test]
    fn test_paragraph_count_exact() {
        let checker =
            ParagraphCount::from_args(&args(json!({"num_paragraphs": 3}))).unwrap();
        assert!(checker.check("A***B***C"));
        assert!(checker.check("First part.\n***\nSecond part.\n***\nThird part."));
        assert!(!checker.check("A***B"));
    }

    #[test]
    fn test_paragraph_count_edge_dividers() {
        let checker =
            ParagraphCount::from_args(&args(json!({"num_paragraphs": 1}))).unwrap();
        // Leading and trailing empty segments are discarded.
        assert!(checker.check("***A***"));
    }

    #[test]
    fn test_paragraph_count_interior_empty_invalidates() {
        let checker =
            ParagraphCount::from_args(&args(json!({"num_paragraphs": 2}))).unwrap();
        assert!(!checker.check("A*** ***B"));
    }

    #[test]
    fn test_nth_paragraph_first_word() {
        let checker = NthParagraphFirstWord::from_args(&args(json!({
            "num_paragraphs": 2, "nth_paragraph": 2, "first_word": "however",
        })))
        .unwrap();
        assert!(checker.check("First paragraph here.\n\nHowever, things changed."));
        // Punctuation after the word is stripped before comparison.
        assert!(checker.check("Intro.\n\n\"However!\" came the reply."));
        assert!(!checker.check("First paragraph here.\n\nMeanwhile, things changed."));
    }

    #[test]
    fn test_nth_paragraph_out_of_range() {
        let checker = NthParagraphFirstWord::from_args(&args(json!({
            "num_paragraphs": 3, "nth_paragraph": 3, "first_word": "end",
        })))
        .unwrap();
        assert!(!checker.check("Only one.\n\nAnd two."));
    }

    #[test]
    fn test_nth_paragraph_count_mismatch() {
        let checker = NthParagraphFirstWord::from_args(&args(json!({
            "num_paragraphs": 2, "nth_paragraph": 1, "first_word": "hello",
        })))
        .unwrap();
        // First word right, paragraph count wrong.
        assert!(!checker.check("Hello there.\n\nSecond.\n\nThird."));
    }

    #[test]
    fn test_nth_paragraph_zero_rejected() {
        let err = NthParagraphFirstWord::from_args(&args(json!({
            "num_paragraphs": 1, "nth_paragraph": 0, "first_word": "x",
        })))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidArgument { .. }));
    }
}
