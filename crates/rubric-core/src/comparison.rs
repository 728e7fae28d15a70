//! Relational comparison shared by every count- and frequency-style checker.
//!
//! Constraints such as "at least 3 sentences" or "around 300 words" reduce to
//! one of four relations between an observed count and a threshold. The
//! "around" relation is tolerant: it accepts any count within a fixed window
//! of the threshold, and the window is a property of the constraint family,
//! not of the relation itself.

use std::fmt;
use std::str::FromStr;

use crate::ConfigurationError;

/// Tolerance window for "around" on sentence counts.
pub const SENTENCE_COUNT_WINDOW: i64 = 2;

/// Tolerance window for "around" on word counts.
pub const WORD_COUNT_WINDOW: i64 = 25;

/// Tolerance window for "around" on keyword, letter, and capital-word
/// occurrence counts.
pub const OCCURRENCE_WINDOW: i64 = 5;

/// The relational operator of a count-style constraint.
///
/// Parsed from the wire strings `"at most"`, `"at least"`, `"around"`, and
/// `"less than"`. Anything else is a configuration error; there is no
/// default relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    AtMost,
    AtLeast,
    Around,
    LessThan,
}

impl Relation {
    /// Compare an observed count against a threshold.
    ///
    /// `window` is only consulted for [`Relation::Around`]; each checker
    /// captures its family's window constant at construction.
    pub fn compare(self, actual: i64, threshold: i64, window: i64) -> bool {
        match self {
            Relation::AtMost => actual <= threshold,
            Relation::AtLeast => actual >= threshold,
            Relation::Around => (actual - threshold).abs() <= window,
            Relation::LessThan => actual < threshold,
        }
    }

    /// The wire form of the relation.
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::AtMost => "at most",
            Relation::AtLeast => "at least",
            Relation::Around => "around",
            Relation::LessThan => "less than",
        }
    }
}

impl FromStr for Relation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "at most" => Ok(Relation::AtMost),
            "at least" => Ok(Relation::AtLeast),
            "around" => Ok(Relation::Around),
            "less than" => Ok(Relation::LessThan),
            other => Err(ConfigurationError::InvalidRelation(other.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundary_equality() {
        // at most / at least accept equality, less than does not
        assert!(Relation::AtMost.compare(5, 5, 0));
        assert!(Relation::AtLeast.compare(5, 5, 0));
        assert!(!Relation::LessThan.compare(5, 5, 0));
        assert!(Relation::LessThan.compare(4, 5, 0));
    }

    #[test]
    fn test_around_window() {
        assert!(Relation::Around.compare(3, 5, 2));
        assert!(Relation::Around.compare(7, 5, 2));
        assert!(!Relation::Around.compare(8, 5, 2));
        assert!(!Relation::Around.compare(2, 5, 2));
    }

    #[test]
    fn test_parse_known_relations() {
        assert_eq!("at most".parse::<Relation>().unwrap(), Relation::AtMost);
        assert_eq!("at least".parse::<Relation>().unwrap(), Relation::AtLeast);
        assert_eq!("around".parse::<Relation>().unwrap(), Relation::Around);
        assert_eq!("less than".parse::<Relation>().unwrap(), Relation::LessThan);
    }

    #[test]
    fn test_unknown_relation_fails_fast() {
        let err = "roughly".parse::<Relation>().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRelation(_)));
        // Case matters on the wire.
        assert!("At Most".parse::<Relation>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for rel in [
            Relation::AtMost,
            Relation::AtLeast,
            Relation::Around,
            Relation::LessThan,
        ] {
            assert_eq!(rel.as_str().parse::<Relation>().unwrap(), rel);
        }
    }

    proptest! {
        #[test]
        fn prop_around_symmetric(actual in -1000i64..1000, threshold in -1000i64..1000, window in 0i64..100) {
            let forward = Relation::Around.compare(actual, threshold, window);
            let backward = Relation::Around.compare(threshold, actual, window);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_at_most_at_least_partition(actual in -1000i64..1000, threshold in -1000i64..1000) {
            // One of the two weak relations always holds; both hold only at equality.
            let le = Relation::AtMost.compare(actual, threshold, 0);
            let ge = Relation::AtLeast.compare(actual, threshold, 0);
            prop_assert!(le || ge);
            prop_assert_eq!(le && ge, actual == threshold);
        }

        #[test]
        fn prop_less_than_implies_at_most(actual in -1000i64..1000, threshold in -1000i64..1000) {
            if Relation::LessThan.compare(actual, threshold, 0) {
                prop_assert!(Relation::AtMost.compare(actual, threshold, 0));
            }
        }
    }
}
