//! Response language checker.

use crate::args::CheckerArgs;
use crate::textutil;
use crate::ConfigurationError;

/// `language:response_language` — the dominant detected language of the
/// response must equal the expected ISO 639-1 code.
///
/// This judges the *primary* language only; stray words in another language
/// do not fail the constraint. Detection failure fails closed: an
/// undecidable response cannot demonstrate compliance.
#[derive(Debug)]
pub struct ResponseLanguage {
    language: String,
}

impl ResponseLanguage {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            language: args.str("language")?.trim().to_lowercase(),
        })
    }

    pub fn check(&self, response: &str) -> bool {
        match textutil::language_code(response) {
            Ok(code) => code == self.language,
            Err(err) => {
                tracing::warn!(error = %err, "language detection failed; verdict false");
                false
            }
        }
    }
}
