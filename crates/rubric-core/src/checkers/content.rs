//! Detectable content: placeholders and postscripts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::args::CheckerArgs;
use crate::ConfigurationError;

lazy_static! {
    // Non-greedy bracket span, e.g. "[address]".
    static ref PLACEHOLDER: Regex = Regex::new(r"\[.*?\]").unwrap();
}

/// `detectable_content:number_placeholders` — at least `num_placeholders`
/// square-bracket placeholder spans.
#[derive(Debug)]
pub struct PlaceholderCount {
    num_placeholders: usize,
}

impl PlaceholderCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_placeholders: args.count("num_placeholders")? as usize,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        PLACEHOLDER.find_iter(response).count() >= self.num_placeholders
    }
}

/// `detectable_content:postscript` — the response carries a postscript
/// opened by the given marker.
///
/// The canonical markers "P.S." and "P.P.S" tolerate spacing between their
/// letters ("P. S." still counts); any other marker is matched literally.
/// Matching is case-insensitive and anchored to end of line.
#[derive(Debug)]
pub struct Postscript {
    pattern: Regex,
}

impl Postscript {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let marker = args.str("postscript_marker")?.trim().to_string();
        let pattern = match marker.as_str() {
            "P.P.S" => r"(?m)\s*p\.\s?p\.\s?s.*$".to_string(),
            "P.S." => r"(?m)\s*p\.\s?s\..*$".to_string(),
            other => format!(r"(?m)\s*{}.*$", regex::escape(&other.to_lowercase())),
        };
        let pattern = Regex::new(&pattern).map_err(|e| {
            ConfigurationError::invalid("postscript_marker", e.to_string())
        })?;
        Ok(Self { pattern })
    }

    pub fn check(&self, response: &str) -> bool {
        self.pattern.is_match(&response.to_lowercase())
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
    fn test_placeholder_minimum() {
        let checker =
            PlaceholderCount::from_args(&args(json!({"num_placeholders": 2}))).unwrap();
        assert!(checker.check("Send it to [name] at [address]."));
        assert!(checker.check("[a] [b] [c]"));
        assert!(!checker.check("Send it to [name]."));
    }

    #[test]
    fn test_placeholder_non_greedy() {
        let checker =
            PlaceholderCount::from_args(&args(json!({"num_placeholders": 2}))).unwrap();
        // "[a] and [b]" is two spans, not one greedy span
        assert!(checker.check("[a] and [b]"));
    }

    #[test]
    fn test_postscript_ps() {
        let checker = Postscript::from_args(&args(json!({"postscript_marker": "P.S."}))).unwrap();
        assert!(checker.check("The answer.\n\nP.S. Bring a coat."));
        // Lenient inter-character spacing
        assert!(checker.check("The answer.\n\nP. S. Bring a coat."));
        assert!(checker.check("the answer.\n\np.s. bring a coat."));
        assert!(!checker.check("The answer, plain and simple."));
    }

    #[test]
    fn test_postscript_pps() {
        let checker = Postscript::from_args(&args(json!({"postscript_marker": "P.P.S"}))).unwrap();
        assert!(checker.check("Done.\n\nP.P.S One more thing."));
        assert!(checker.check("Done.\n\nP. P. S One more thing."));
    }

    #[test]
    fn test_postscript_literal_marker() {
        let checker =
            Postscript::from_args(&args(json!({"postscript_marker": "Addendum:"}))).unwrap();
        assert!(checker.check("Main text.\nAddendum: extra detail."));
        assert!(!checker.check("Main text with no addendum marker."));
    }
}
