//! Measurement context: the clinical circumstance a reading was taken in.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// When a glucose reading was taken.
///
/// Serializes as the snake_case identifier. Deserialization is lenient (see
/// [`MeasurementContext::parse_lenient`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementContext {
    Fasting,
    PostMeal,
    Random,
}

/// All contexts, in display order.
pub const ALL_CONTEXTS: [MeasurementContext; 3] = [
    MeasurementContext::Fasting,
    MeasurementContext::PostMeal,
    MeasurementContext::Random,
];

impl MeasurementContext {
    /// Parse a context identifier or label, rejecting anything unknown.
    ///
    /// Accepts both the database identifier (`fasting`) and the user-facing
    /// label (`Pe nemâncate`).
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        let trimmed = s.trim();
        ALL_CONTEXTS
            .into_iter()
            .find(|c| c.as_str() == trimmed || c.label() == trimmed)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid measurement context '{s}'. Must be one of: fasting, post_meal, random"
                ))
            })
    }

    /// Parse a context, resolving anything unrecognized to [`Self::Random`].
    ///
    /// Random is the catch-all rule of the classifier, so an unknown tag is
    /// treated as an unspecified measurement rather than rejected.
    pub fn parse_lenient(s: &str) -> Self {
        match Self::from_str_db(s) {
            Ok(context) => context,
            Err(_) => {
                tracing::warn!(context = %s, "Unrecognized measurement context, using random");
                Self::Random
            }
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fasting => "fasting",
            Self::PostMeal => "post_meal",
            Self::Random => "random",
        }
    }

    /// User-facing label, as written to exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fasting => "Pe nemâncate",
            Self::PostMeal => "După masă (2 ore)",
            Self::Random => "Verificare aleatorie",
        }
    }
}

impl<'de> Deserialize<'de> for MeasurementContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_db_identifiers() {
        for context in ALL_CONTEXTS {
            assert_eq!(
                MeasurementContext::from_str_db(context.as_str()).unwrap(),
                context
            );
        }
    }

    #[test]
    fn accepts_user_facing_labels() {
        assert_eq!(
            MeasurementContext::from_str_db("Pe nemâncate").unwrap(),
            MeasurementContext::Fasting
        );
        assert_eq!(
            MeasurementContext::from_str_db("După masă (2 ore)").unwrap(),
            MeasurementContext::PostMeal
        );
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!(MeasurementContext::from_str_db("before_bed").is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_random() {
        assert_eq!(
            MeasurementContext::parse_lenient("fastng"),
            MeasurementContext::Random
        );
        assert_eq!(
            MeasurementContext::parse_lenient(""),
            MeasurementContext::Random
        );
    }

    #[test]
    fn deserializes_leniently() {
        let parsed: MeasurementContext = serde_json::from_str("\"post_meal\"").unwrap();
        assert_eq!(parsed, MeasurementContext::PostMeal);

        let unknown: MeasurementContext = serde_json::from_str("\"snack\"").unwrap();
        assert_eq!(unknown, MeasurementContext::Random);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&MeasurementContext::PostMeal).unwrap();
        assert_eq!(json, "\"post_meal\"");
    }
}
