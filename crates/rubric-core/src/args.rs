//! Typed access to a constraint's argument bundle.
//!
//! Benchmark datasets carry per-constraint keyword arguments as loose JSON
//! objects. Each checker variant pulls its own named arguments out of a
//! [`CheckerArgs`] at construction; a missing or mistyped argument is a
//! [`ConfigurationError`], never a silent default. Extra keys (datasets
//! routinely pad unused keys with `null`) are ignored.

use serde_json::{Map, Value};

use crate::comparison::Relation;
use crate::ConfigurationError;

/// The argument bundle for one constraint instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckerArgs(Map<String, Value>);

impl CheckerArgs {
    /// Wrap a JSON object as an argument bundle.
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// An empty bundle, for checkers that take no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any JSON value; fails unless it is an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigurationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConfigurationError::InvalidArgument {
                name: "kwargs".to_string(),
                reason: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    /// `null` counts as absent: datasets pad unused keys with it.
    fn get(&self, name: &str) -> Result<&Value, ConfigurationError> {
        match self.0.get(name) {
            Some(Value::Null) | None => {
                Err(ConfigurationError::MissingArgument(name.to_string()))
            }
            Some(value) => Ok(value),
        }
    }

    /// A required string argument.
    pub fn str(&self, name: &str) -> Result<&str, ConfigurationError> {
        self.get(name)?
            .as_str()
            .ok_or_else(|| ConfigurationError::invalid(name, "expected a string"))
    }

    /// A required non-negative integer argument.
    pub fn count(&self, name: &str) -> Result<i64, ConfigurationError> {
        let n = self
            .get(name)?
            .as_i64()
            .ok_or_else(|| ConfigurationError::invalid(name, "expected an integer"))?;
        if n < 0 {
            return Err(ConfigurationError::invalid(name, "expected a non-negative integer"));
        }
        Ok(n)
    }

    /// A required comparison relation argument.
    pub fn relation(&self, name: &str) -> Result<Relation, ConfigurationError> {
        self.str(name)?.parse()
    }

    /// A required single-character argument (surrounding whitespace ignored).
    pub fn letter(&self, name: &str) -> Result<char, ConfigurationError> {
        let s = self.str(name)?.trim().to_string();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigurationError::invalid(name, "expected a single character")),
        }
    }

    /// A required list-of-strings argument.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>, ConfigurationError> {
        let items = self
            .get(name)?
            .as_array()
            .ok_or_else(|| ConfigurationError::invalid(name, "expected a list of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ConfigurationError::invalid(name, "expected a list of strings")
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for CheckerArgs {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}
