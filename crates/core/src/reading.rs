//! Glucose readings and their input validation.
//!
//! A [`Reading`] is classified exactly once, when it is recorded, and carries
//! that classification for its whole life. Readings are never mutated; the
//! accessors hand out copies or shared references only.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::classification::{classify, Classification, Tone};
use crate::context::MeasurementContext;
use crate::error::CoreError;
use crate::types::MgDl;

/// Lowest value the recording form accepts, in mg/dL.
pub const MIN_READING_VALUE: MgDl = 20;

/// Highest value the recording form accepts, in mg/dL.
pub const MAX_READING_VALUE: MgDl = 600;

/// Maximum note length in characters.
pub const MAX_NOTE_LENGTH: usize = 1000;

/// A single glucose measurement with its cached classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    date: NaiveDate,
    #[serde(with = "hh_mm")]
    time: NaiveTime,
    value: MgDl,
    context: MeasurementContext,
    #[serde(flatten)]
    classification: Classification,
    note: Option<String>,
}

impl Reading {
    /// Record a new reading taken at `at`, classifying it now.
    ///
    /// The time is truncated to minutes and a blank note is dropped.
    pub fn record(
        value: MgDl,
        context: MeasurementContext,
        at: NaiveDateTime,
        note: Option<String>,
    ) -> Self {
        Self {
            date: at.date(),
            time: truncate_to_minute(at.time()),
            value,
            context,
            classification: classify(value, context),
            note: normalize_note(note),
        }
    }

    /// Rebuild a reading from persisted fields, keeping the stored
    /// classification as-is.
    pub fn from_stored(
        date: NaiveDate,
        time: NaiveTime,
        value: MgDl,
        context: MeasurementContext,
        classification: Classification,
        note: Option<String>,
    ) -> Self {
        Self {
            date,
            time: truncate_to_minute(time),
            value,
            context,
            classification,
            note: normalize_note(note),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn recorded_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn value(&self) -> MgDl {
        self.value
    }

    pub fn context(&self) -> MeasurementContext {
        self.context
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn tone(&self) -> Tone {
        self.classification.tone
    }

    pub fn message(&self) -> &str {
        &self.classification.message
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// `YYYY-MM-DD`, as persisted and exported.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM`, as persisted and exported.
    pub fn time_string(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a submitted glucose value against the form bounds.
pub fn validate_reading_value(value: MgDl) -> Result<(), CoreError> {
    if !(MIN_READING_VALUE..=MAX_READING_VALUE).contains(&value) {
        return Err(CoreError::Validation(format!(
            "Glucose value must be between {MIN_READING_VALUE} and {MAX_READING_VALUE} mg/dL, got {value}"
        )));
    }
    Ok(())
}

/// Validate an optional free-text note.
pub fn validate_note(note: &str) -> Result<(), CoreError> {
    let length = note.chars().count();
    if length > MAX_NOTE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Note must be at most {MAX_NOTE_LENGTH} characters, got {length}"
        )));
    }
    Ok(())
}

/// Parse a time of day given as `HH:MM` (seconds are accepted and dropped).
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| CoreError::Validation(format!("Invalid time '{s}'. Expected HH:MM")))
}

/// Serialize a [`NaiveTime`] as `HH:MM`.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }
}
