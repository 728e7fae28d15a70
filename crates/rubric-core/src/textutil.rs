//! Text measurement utilities.
//!
//! Sentence counting, word counting, token extraction, and language
//! identification. These are the measurement leaves the count-style checkers
//! are built on; every function here is pure.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Language identification could not produce a usable verdict.
///
/// How a checker reacts to this is its own policy: `response_language`
/// fails closed, the two English case checkers fail open.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("text is empty or contains no detectable features")]
    Degenerate,

    #[error("language detection was not reliable for this text")]
    Unreliable,

    #[error("detected language {0:?} has no ISO 639-1 mapping")]
    UnsupportedLanguage(whatlang::Lang),
}

lazy_static! {
    // A sentence boundary: a run of terminators, optional closing quote or
    // bracket, then whitespace. Terminators at end-of-text are handled by the
    // trailing-segment rule in `count_sentences`.
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r#"[.!?]+["')\]]*\s"#).unwrap();
}

// Common abbreviations whose trailing period does not end a sentence,
// stored without the final dot ("e.g." is looked up as "e.g").
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "hon", "jr", "sr", "st",
    "vs", "etc", "e.g", "i.e", "cf", "al", "ca", "approx",
    "inc", "ltd", "co", "corp", "dept", "est", "fig", "no", "vol",
    "u.s", "u.k", "u.n",
];

fn ends_with_abbreviation(prefix: &str) -> bool {
    let word = match prefix.split_whitespace().next_back() {
        Some(w) => w,
        None => return false,
    };
    let word = word
        .trim_start_matches(|c: char| matches!(c, '(' | '[' | '"' | '\'' | '\u{201c}' | '\u{2018}'))
        .to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

/// Count sentences using abbreviation-tolerant boundary segmentation.
///
/// A non-empty text with no terminator counts as one sentence; a terminator
/// preceded by a known abbreviation does not open a new sentence.
pub fn count_sentences(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut tail_start = 0;
    for m in SENTENCE_BOUNDARY.find_iter(trimmed) {
        let terminator = &trimmed[m.start()..m.end()];
        if terminator.starts_with('.') && ends_with_abbreviation(&trimmed[..m.start()]) {
            continue;
        }
        count += 1;
        tail_start = m.end();
    }

    if trimmed[tail_start..].chars().any(|c| !c.is_whitespace()) {
        count += 1;
    }
    count
}

/// Count words using Unicode (UAX-29) word segmentation.
pub fn count_words(text: &str) -> usize {
    text.unicode_words().count()
}

/// Split into whitespace-delimited tokens with surrounding punctuation
/// trimmed. Hyphenated compounds stay one token.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|tok| tok.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|tok| !tok.is_empty())
        .collect()
}

/// Identify the dominant language of `text` as an ISO 639-1 code.
pub fn language_code(text: &str) -> Result<&'static str, DetectionError> {
    if text.trim().is_empty() {
        return Err(DetectionError::Degenerate);
    }

    let info = whatlang::detect(text).ok_or(DetectionError::Degenerate)?;
    if !info.is_reliable() {
        return Err(DetectionError::Unreliable);
    }
    iso_639_1(info.lang()).ok_or(DetectionError::UnsupportedLanguage(info.lang()))
}

/// Map a whatlang language to its ISO 639-1 code.
///
/// Covers the languages the benchmark's prompts request; anything the table
/// does not know is reported as unsupported rather than guessed.
fn iso_639_1(lang: whatlang::Lang) -> Option<&'static str> {
    use whatlang::Lang;
    Some(match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Rus => "ru",
        Lang::Ukr => "uk",
        Lang::Pol => "pl",
        Lang::Bul => "bg",
        Lang::Ces => "cs",
        Lang::Nld => "nl",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Hun => "hu",
        Lang::Ron => "ro",
        Lang::Ell => "el",
        Lang::Tur => "tr",
        Lang::Ara => "ar",
        Lang::Heb => "he",
        Lang::Pes => "fa",
        Lang::Hin => "hi",
        Lang::Ben => "bn",
        Lang::Urd => "ur",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Kan => "kn",
        Lang::Mal => "ml",
        Lang::Mar => "mr",
        Lang::Guj => "gu",
        Lang::Pan => "pa",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Tha => "th",
        Lang::Vie => "vi",
        Lang::Ind => "id",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Cmn => "zh",
        _ => return None,
    })
}
