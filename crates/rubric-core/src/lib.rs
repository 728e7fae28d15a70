//! # rubric-core
//!
//! Deterministic constraint-verification engine for instruction-following
//! evaluation.
//!
//! A benchmark prompt embeds verifiable instructions ("respond in at least
//! three sentences", "wrap your answer in double quotes", "do not use
//! commas"). This crate answers one question per instruction: did the
//! response satisfy it?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same response and arguments always produce the same
//!    verdict
//! 2. **No LLM calls**: All verification is rule-based (regex, counting,
//!    offline language identification)
//! 3. **Pure**: Checkers are stateless functions of `(response, args)` and
//!    safe to run concurrently
//! 4. **Closed catalog**: Every constraint id resolves to exactly one
//!    checker variant, matched exhaustively
//!
//! ## Example
//!
//! ```rust,ignore
//! use rubric_core::{verify, CheckerArgs};
//!
//! let args = CheckerArgs::from_value(serde_json::json!({
//!     "num_sentences": 3, "relation": "at least",
//! }))?;
//! let verdict = verify("length_constraints:number_sentences", &args,
//!                      "One. Two. Three.")?;
//! assert!(verdict);
//! ```
//!
//! Malformed *response* text never errors: a response that cannot be parsed
//! as instructed simply fails the constraint. Errors are reserved for caller
//! bugs (unknown ids, malformed argument bundles).

pub mod args;
pub mod checkers;
pub mod comparison;
pub mod registry;
pub mod textutil;

// Re-export main types at crate root
pub use args::CheckerArgs;
pub use checkers::{Checker, CheckerKind};
pub use comparison::{
    Relation, OCCURRENCE_WINDOW, SENTENCE_COUNT_WINDOW, WORD_COUNT_WINDOW,
};
pub use registry::{conflict_make, registered_ids, resolve};
pub use textutil::DetectionError;

use thiserror::Error;

/// A caller or configuration bug: the constraint cannot even be constructed.
///
/// One constraint's configuration failure aborts only that constraint's
/// evaluation; it never poisons other constraints or other responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown constraint id: {0}")]
    UnknownConstraint(String),

    #[error("missing required argument `{0}`")]
    MissingArgument(String),

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("unrecognized comparison relation: {0:?} (expected one of \
             \"at most\", \"at least\", \"around\", \"less than\")")]
    InvalidRelation(String),
}

impl ConfigurationError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Verify one constraint against one response.
///
/// This is the main entry point: it resolves `id` in the registry, builds
/// the checker variant from its argument bundle, and runs it. The returned
/// boolean is the verdict; `Err` means the constraint itself was
/// misconfigured, not that the response failed.
pub fn verify(id: &str, args: &CheckerArgs, response: &str) -> Result<bool, ConfigurationError> {
    let checker = registry::resolve(id)?.build(args)?;
    let verdict = checker.check(response);
    tracing::debug!(constraint = id, verdict, "constraint checked");
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_end_to_end() {
        let args = CheckerArgs::from_value(serde_json::json!({
            "keywords": ["cat", "dog"],
        }))
        .unwrap();
        assert!(verify("keywords:existence", &args, "I have a Cat and a dog.").unwrap());
        assert!(!verify("keywords:existence", &args, "I have a cat.").unwrap());
    }

    #[test]
    fn test_verify_unknown_id() {
        let args = CheckerArgs::empty();
        let err = verify("keywords:nonexistent", &args, "text").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownConstraint(_)));
    }

    #[test]
    fn test_verify_missing_argument() {
        let args = CheckerArgs::empty();
        let err = verify("keywords:frequency", &args, "text").unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingArgument(_)));
    }
}
