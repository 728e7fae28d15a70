//! Detectable format: markdown structure, fixed responses, JSON, titles.

use lazy_static::lazy_static;
use regex::Regex;

use crate::args::CheckerArgs;
use crate::ConfigurationError;

/// The only admissible responses for `detectable_format:constrained_response`.
pub const CONSTRAINED_RESPONSE_OPTIONS: [&str; 3] = [
    "My answer is yes.",
    "My answer is no.",
    "My answer is maybe.",
];

lazy_static! {
    // A "* item" bullet line; the second character class keeps "**bold**"
    // lines from counting as bullets.
    static ref STAR_BULLET: Regex = Regex::new(r"(?m)^\s*\*[^\*].*$").unwrap();
    static ref DASH_BULLET: Regex = Regex::new(r"(?m)^\s*-.*$").unwrap();

    // Markdown emphasis spans, single and double asterisk.
    static ref SINGLE_HIGHLIGHT: Regex = Regex::new(r"\*[^\n\*]*\*").unwrap();
    static ref DOUBLE_HIGHLIGHT: Regex = Regex::new(r"\*\*[^\n\*]*\*\*").unwrap();

    // Title wrapped in double angle brackets, no nesting, single line.
    static ref TITLE: Regex = Regex::new(r"<<([^<\n][^>\n]*)>>").unwrap();
}

/// `detectable_format:number_bullet_lists` — exact count of markdown bullet
/// lines, summing the `*` style and the `-` style.
#[derive(Debug)]
pub struct BulletListCount {
    num_bullets: usize,
}

impl BulletListCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_bullets: args.count("num_bullets")? as usize,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let stars = STAR_BULLET.find_iter(response).count();
        let dashes = DASH_BULLET.find_iter(response).count();
        stars + dashes == self.num_bullets
    }
}

/// `detectable_format:constrained_response` — the response must contain one
/// of three fixed phrases verbatim.
#[derive(Debug)]
pub struct ConstrainedResponse;

impl ConstrainedResponse {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        let response = response.trim();
        CONSTRAINED_RESPONSE_OPTIONS
            .iter()
            .any(|option| response.contains(option))
    }
}

impl Default for ConstrainedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// `detectable_format:number_highlighted_sections` — at least
/// `num_highlights` markdown-emphasized spans with non-empty content.
///
/// Single- and double-asterisk spans are counted independently; a span whose
/// inner content strips to nothing (e.g. the `**` pair inside `**bold**`
/// seen by the single-asterisk pattern) is not counted.
#[derive(Debug)]
pub struct HighlightedSectionCount {
    num_highlights: usize,
}

impl HighlightedSectionCount {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        Ok(Self {
            num_highlights: args.count("num_highlights")? as usize,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let mut count = 0;
        for m in SINGLE_HIGHLIGHT.find_iter(response) {
            if !m.as_str().trim_matches('*').trim().is_empty() {
                count += 1;
            }
        }
        for m in DOUBLE_HIGHLIGHT.find_iter(response) {
            let inner = m
                .as_str()
                .strip_prefix("**")
                .and_then(|s| s.strip_suffix("**"))
                .unwrap_or("");
            if !inner.trim().is_empty() {
                count += 1;
            }
        }
        count >= self.num_highlights
    }
}

/// `detectable_format:multiple_sections` — the response is divided into at
/// least `num_sections` sections, each opened by the splitter keyword
/// followed by a token (e.g. "Section 1").
#[derive(Debug)]
pub struct MultipleSections {
    splitter: Regex,
    num_sections: usize,
}

impl MultipleSections {
    pub fn from_args(args: &CheckerArgs) -> Result<Self, ConfigurationError> {
        let keyword = args.str("section_spliter")?.trim().to_string();
        let pattern = format!(r"\s?{}\s?\S+\s?", regex::escape(&keyword));
        let splitter = Regex::new(&pattern)
            .map_err(|e| ConfigurationError::invalid("section_spliter", e.to_string()))?;
        Ok(Self {
            splitter,
            num_sections: args.count("num_sections")? as usize,
        })
    }

    pub fn check(&self, response: &str) -> bool {
        let sections = self.splitter.split(response).count() - 1;
        sections >= self.num_sections
    }
}

/// `detectable_format:json_format` — the whole response, minus an optional
/// markdown code fence, must parse as JSON.
#[derive(Debug)]
pub struct JsonFormat;

impl JsonFormat {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        let mut text = response.trim();
        for prefix in ["```json", "```Json", "```JSON", "```"] {
            text = text.strip_prefix(prefix).unwrap_or(text);
        }
        text = text.strip_suffix("```").unwrap_or(text);
        serde_json::from_str::<serde_json::Value>(text.trim()).is_ok()
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new()
    }
}

/// `detectable_format:title` — at least one non-empty `<<...>>` title span.
#[derive(Debug)]
pub struct Title;

impl Title {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        TITLE
            .captures_iter(response)
            .any(|cap| !cap[1].trim().is_empty())
    }
}

impl Default for Title {
    fn default() -> Self {
        Self::new()
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
    fn test_bullet_count_both_styles() {
        let checker = BulletListCount::from_args(&args(json!({"num_bullets": 5}))).unwrap();
        let response = "* one\n* two\n* three\n- four\n- five";
        assert!(checker.check(response));
        assert!(!checker.check("* one\n- two"));
    }

    #[test]
    fn test_bullet_count_exact_not_minimum() {
        let checker = BulletListCount::from_args(&args(json!({"num_bullets": 2}))).unwrap();
        assert!(checker.check("* one\n- two"));
        assert!(!checker.check("* one\n* two\n- three"));
    }

    #[test]
    fn test_constrained_response() {
        let checker = ConstrainedResponse::new();
        assert!(checker.check("My answer is yes."));
        assert!(checker.check("  My answer is maybe. That is all."));
        assert!(!checker.check("Yes."));
    }

    #[test]
    fn test_highlighted_sections() {
        let checker =
            HighlightedSectionCount::from_args(&args(json!({"num_highlights": 2}))).unwrap();
        assert!(checker.check("Note *this* and *that*."));
        assert!(checker.check("Note *this* and **that**."));
        assert!(!checker.check("Note *this* only."));
    }

    #[test]
    fn test_highlighted_sections_empty_spans_ignored() {
        let checker =
            HighlightedSectionCount::from_args(&args(json!({"num_highlights": 1}))).unwrap();
        assert!(!checker.check("Empty ** and * * spans."));
    }

    #[test]
    fn test_multiple_sections() {
        let checker = MultipleSections::from_args(&args(json!({
            "section_spliter": "Section", "num_sections": 2,
        })))
        .unwrap();
        assert!(checker.check("Section 1\nintro text\nSection 2\nmore text"));
        assert!(!checker.check("Section 1\nonly one section"));
    }

    #[test]
    fn test_json_format() {
        let checker = JsonFormat::new();
        assert!(checker.check("```json\n{\"a\":1}\n```"));
        assert!(checker.check("{\"a\": [1, 2, 3]}"));
        assert!(checker.check("```\n[1, 2]\n```"));
        assert!(!checker.check("{a:1}"));
        assert!(!checker.check("not json at all"));
    }

    #[test]
    fn test_title() {
        let checker = Title::new();
        assert!(checker.check("Title: <<My Title>>"));
        assert!(!checker.check("<<>>"));
        assert!(!checker.check("<< >>"));
        assert!(!checker.check("No title here"));
        // Newlines cannot appear inside a title
        assert!(!checker.check("<<broken\ntitle>>"));
    }
}
