//! Punctuation constraints.

/// `punctuation:no_comma` — the response contains no comma characters.
#[derive(Debug)]
pub struct NoComma;

impl NoComma {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, response: &str) -> bool {
        !response.contains(',')
    }
}

impl Default for NoComma {
    fn default() -> Self {
        Self::new()
    }
}
