//! The checker catalog.
//!
//! One stateless predicate per constraint family, grouped by category. Every
//! checker is built from its argument bundle by a validating constructor and
//! then exposes a pure `check(&self, response) -> bool`. [`Checker`] is the
//! closed set of variants; [`CheckerKind`] is the tag the registry resolves
//! ids to. Both are matched exhaustively, so a catalog/registry mismatch is
//! a compile error, not a missing handler at run time.

pub mod change_case;
pub mod combination;
pub mod content;
pub mod format;
pub mod keywords;
pub mod language;
pub mod length;
pub mod punctuation;
pub mod startend;

use regex::Regex;

use crate::args::CheckerArgs;
use crate::ConfigurationError;

pub use change_case::{CapitalWordFrequency, EnglishCapital, EnglishLowercase};
pub use combination::{RepeatPrompt, TwoResponses};
pub use content::{PlaceholderCount, Postscript};
pub use format::{
    BulletListCount, ConstrainedResponse, HighlightedSectionCount, JsonFormat,
    MultipleSections, Title, CONSTRAINED_RESPONSE_OPTIONS,
};
pub use keywords::{ForbiddenWords, KeywordExistence, KeywordFrequency, LetterFrequency};
pub use language::ResponseLanguage;
pub use length::{NthParagraphFirstWord, ParagraphCount, SentenceCount, WordCount};
pub use punctuation::NoComma;
pub use startend::{ConstrainedStart, EndPhrase, Quotation};

/// Case-insensitive whole-word pattern for a literal keyword.
pub(crate) fn word_pattern(name: &str, word: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .map_err(|e| ConfigurationError::invalid(name, e.to_string()))
}

/// The tag of a checker variant, resolved from a constraint id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    KeywordExistence,
    KeywordFrequency,
    ForbiddenWords,
    LetterFrequency,
    ResponseLanguage,
    SentenceCount,
    ParagraphCount,
    WordCount,
    NthParagraphFirstWord,
    PlaceholderCount,
    Postscript,
    BulletListCount,
    ConstrainedResponse,
    HighlightedSectionCount,
    MultipleSections,
    JsonFormat,
    Title,
    TwoResponses,
    RepeatPrompt,
    EndPhrase,
    Quotation,
    CapitalWordFrequency,
    EnglishCapital,
    EnglishLowercase,
    NoComma,
    ConstrainedStart,
}

impl CheckerKind {
    /// Build the checker variant, validating its argument schema.
    pub fn build(self, args: &CheckerArgs) -> Result<Checker, ConfigurationError> {
        Ok(match self {
            CheckerKind::KeywordExistence => {
                Checker::KeywordExistence(KeywordExistence::from_args(args)?)
            }
            CheckerKind::KeywordFrequency => {
                Checker::KeywordFrequency(KeywordFrequency::from_args(args)?)
            }
            CheckerKind::ForbiddenWords => {
                Checker::ForbiddenWords(ForbiddenWords::from_args(args)?)
            }
            CheckerKind::LetterFrequency => {
                Checker::LetterFrequency(LetterFrequency::from_args(args)?)
            }
            CheckerKind::ResponseLanguage => {
                Checker::ResponseLanguage(ResponseLanguage::from_args(args)?)
            }
            CheckerKind::SentenceCount => Checker::SentenceCount(SentenceCount::from_args(args)?),
            CheckerKind::ParagraphCount => {
                Checker::ParagraphCount(ParagraphCount::from_args(args)?)
            }
            CheckerKind::WordCount => Checker::WordCount(WordCount::from_args(args)?),
            CheckerKind::NthParagraphFirstWord => {
                Checker::NthParagraphFirstWord(NthParagraphFirstWord::from_args(args)?)
            }
            CheckerKind::PlaceholderCount => {
                Checker::PlaceholderCount(PlaceholderCount::from_args(args)?)
            }
            CheckerKind::Postscript => Checker::Postscript(Postscript::from_args(args)?),
            CheckerKind::BulletListCount => {
                Checker::BulletListCount(BulletListCount::from_args(args)?)
            }
            CheckerKind::ConstrainedResponse => {
                Checker::ConstrainedResponse(ConstrainedResponse::new())
            }
            CheckerKind::HighlightedSectionCount => {
                Checker::HighlightedSectionCount(HighlightedSectionCount::from_args(args)?)
            }
            CheckerKind::MultipleSections => {
                Checker::MultipleSections(MultipleSections::from_args(args)?)
            }
            CheckerKind::JsonFormat => Checker::JsonFormat(JsonFormat::new()),
            CheckerKind::Title => Checker::Title(Title::new()),
            CheckerKind::TwoResponses => Checker::TwoResponses(TwoResponses::new()),
            CheckerKind::RepeatPrompt => Checker::RepeatPrompt(RepeatPrompt::from_args(args)?),
            CheckerKind::EndPhrase => Checker::EndPhrase(EndPhrase::from_args(args)?),
            CheckerKind::Quotation => Checker::Quotation(Quotation::new()),
            CheckerKind::CapitalWordFrequency => {
                Checker::CapitalWordFrequency(CapitalWordFrequency::from_args(args)?)
            }
            CheckerKind::EnglishCapital => Checker::EnglishCapital(EnglishCapital::new()),
            CheckerKind::EnglishLowercase => Checker::EnglishLowercase(EnglishLowercase::new()),
            CheckerKind::NoComma => Checker::NoComma(NoComma::new()),
            CheckerKind::ConstrainedStart => {
                Checker::ConstrainedStart(ConstrainedStart::from_args(args)?)
            }
        })
    }
}

/// A fully-constructed checker: one variant per constraint family, holding
/// the argument bundle captured for one check call.
#[derive(Debug)]
pub enum Checker {
    KeywordExistence(KeywordExistence),
    KeywordFrequency(KeywordFrequency),
    ForbiddenWords(ForbiddenWords),
    LetterFrequency(LetterFrequency),
    ResponseLanguage(ResponseLanguage),
    SentenceCount(SentenceCount),
    ParagraphCount(ParagraphCount),
    WordCount(WordCount),
    NthParagraphFirstWord(NthParagraphFirstWord),
    PlaceholderCount(PlaceholderCount),
    Postscript(Postscript),
    BulletListCount(BulletListCount),
    ConstrainedResponse(ConstrainedResponse),
    HighlightedSectionCount(HighlightedSectionCount),
    MultipleSections(MultipleSections),
    JsonFormat(JsonFormat),
    Title(Title),
    TwoResponses(TwoResponses),
    RepeatPrompt(RepeatPrompt),
    EndPhrase(EndPhrase),
    Quotation(Quotation),
    CapitalWordFrequency(CapitalWordFrequency),
    EnglishCapital(EnglishCapital),
    EnglishLowercase(EnglishLowercase),
    NoComma(NoComma),
    ConstrainedStart(ConstrainedStart),
}

impl Checker {
    /// Run the predicate against a response. Never fails: malformed response
    /// text yields a `false` verdict, not an error.
    pub fn check(&self, response: &str) -> bool {
        match self {
            Checker::KeywordExistence(c) => c.check(response),
            Checker::KeywordFrequency(c) => c.check(response),
            Checker::ForbiddenWords(c) => c.check(response),
            Checker::LetterFrequency(c) => c.check(response),
            Checker::ResponseLanguage(c) => c.check(response),
            Checker::SentenceCount(c) => c.check(response),
            Checker::ParagraphCount(c) => c.check(response),
            Checker::WordCount(c) => c.check(response),
            Checker::NthParagraphFirstWord(c) => c.check(response),
            Checker::PlaceholderCount(c) => c.check(response),
            Checker::Postscript(c) => c.check(response),
            Checker::BulletListCount(c) => c.check(response),
            Checker::ConstrainedResponse(c) => c.check(response),
            Checker::HighlightedSectionCount(c) => c.check(response),
            Checker::MultipleSections(c) => c.check(response),
            Checker::JsonFormat(c) => c.check(response),
            Checker::Title(c) => c.check(response),
            Checker::TwoResponses(c) => c.check(response),
            Checker::RepeatPrompt(c) => c.check(response),
            Checker::EndPhrase(c) => c.check(response),
            Checker::Quotation(c) => c.check(response),
            Checker::CapitalWordFrequency(c) => c.check(response),
            Checker::EnglishCapital(c) => c.check(response),
            Checker::EnglishLowercase(c) => c.check(response),
            Checker::NoComma(c) => c.check(response),
            Checker::ConstrainedStart(c) => c.check(response),
        }
    }
}
