//! Reading classification per the ADA 2025 glucose targets.
//!
//! A reading is classified by an ordered rule table: the two global
//! overrides (hypoglycemia, severe hyperglycemia) are checked first, then the
//! bucket table for the measurement context. The function is total over all
//! integers and has no state.

use serde::{Deserialize, Serialize};

use crate::context::MeasurementContext;
use crate::error::CoreError;
use crate::types::MgDl;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Severity of a reading, driving both message selection and UI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Neutral,
    Warning,
    Alert,
    Urgent,
}

impl Tone {
    /// Parse a tone string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "good" => Ok(Self::Good),
            "neutral" => Ok(Self::Neutral),
            "warning" => Ok(Self::Warning),
            "alert" => Ok(Self::Alert),
            "urgent" => Ok(Self::Urgent),
            _ => Err(CoreError::Validation(format!(
                "Invalid tone '{s}'. Must be one of: good, neutral, warning, alert, urgent"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Alert => "alert",
            Self::Urgent => "urgent",
        }
    }
}

/// Tone plus the feedback message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub tone: Tone,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Readings strictly below this are hypoglycemic regardless of context.
pub const HYPOGLYCEMIA_BELOW: MgDl = 70;

/// Readings strictly above this are severely hyperglycemic regardless of context.
pub const SEVERE_HYPERGLYCEMIA_ABOVE: MgDl = 250;

pub const HYPOGLYCEMIA_MESSAGE: &str =
    "⚠️ Hipoglicemie! Consumă imediat 15g carbohidrați rapizi. Verifică din nou în 15 minute.";

pub const SEVERE_HYPERGLYCEMIA_MESSAGE: &str =
    "🚨 Hiperglicemie severă! Bea apă și contactează medicul dacă nu scade în 2 ore.";

struct Outcome {
    tone: Tone,
    message: &'static str,
}

/// A bucket matches every value strictly below `below` that no earlier
/// bucket matched.
struct Bucket {
    below: MgDl,
    outcome: Outcome,
}

struct RuleTable {
    buckets: &'static [Bucket],
    otherwise: Outcome,
}

impl RuleTable {
    fn lookup(&self, value: MgDl) -> &Outcome {
        self.buckets
            .iter()
            .find(|bucket| value < bucket.below)
            .map_or(&self.otherwise, |bucket| &bucket.outcome)
    }
}

const FASTING_RULES: RuleTable = RuleTable {
    buckets: &[
        Bucket {
            below: 100,
            outcome: Outcome {
                tone: Tone::Good,
                message: "✅ Control glicemic excelent! Continuă așa!",
            },
        },
        Bucket {
            below: 126,
            outcome: Outcome {
                tone: Tone::Warning,
                message: "⚠️ Valoare la limită. Atenție la dietă și mișcare.",
            },
        },
    ],
    otherwise: Outcome {
        tone: Tone::Alert,
        message: "🔴 Glicemie crescută. Consultă medicul pentru ajustări.",
    },
};

const POST_MEAL_RULES: RuleTable = RuleTable {
    buckets: &[
        Bucket {
            below: 140,
            outcome: Outcome {
                tone: Tone::Good,
                message: "✅ Excelent! Masa a fost bine tolerată.",
            },
        },
        Bucket {
            below: 180,
            outcome: Outcome {
                tone: Tone::Neutral,
                message: "👍 În limite acceptabile.",
            },
        },
    ],
    otherwise: Outcome {
        tone: Tone::Alert,
        message: "🔴 Prea mare după masă. Redu carbohidrații.",
    },
};

const RANDOM_RULES: RuleTable = RuleTable {
    buckets: &[Bucket {
        below: 140,
        outcome: Outcome {
            tone: Tone::Neutral,
            message: "Valoare normală.",
        },
    }],
    otherwise: Outcome {
        tone: Tone::Warning,
        message: "⚠️ Valoare crescută. Monitorizează mai atent.",
    },
};

fn rules_for(context: MeasurementContext) -> &'static RuleTable {
    match context {
        MeasurementContext::Fasting => &FASTING_RULES,
        MeasurementContext::PostMeal => &POST_MEAL_RULES,
        MeasurementContext::Random => &RANDOM_RULES,
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a reading taken in the given context.
pub fn classify(value: MgDl, context: MeasurementContext) -> Classification {
    if value < HYPOGLYCEMIA_BELOW {
        return Classification {
            tone: Tone::Urgent,
            message: HYPOGLYCEMIA_MESSAGE.to_string(),
        };
    }
    if value > SEVERE_HYPERGLYCEMIA_ABOVE {
        return Classification {
            tone: Tone::Urgent,
            message: SEVERE_HYPERGLYCEMIA_MESSAGE.to_string(),
        };
    }

    let outcome = rules_for(context).lookup(value);
    Classification {
        tone: outcome.tone,
        message: outcome.message.to_string(),
    }
}

/// Classify using an untyped context tag. Unknown tags use the random rule.
pub fn classify_label(value: MgDl, context: &str) -> Classification {
    classify(value, MeasurementContext::parse_lenient(context))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
