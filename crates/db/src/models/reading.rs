//! Reading row model.

use chrono::{NaiveDate, NaiveTime};
use glucolog_core::classification::{Classification, Tone};
use glucolog_core::context::MeasurementContext;
use glucolog_core::error::CoreError;
use glucolog_core::reading::Reading;
use glucolog_core::types::{DbId, MgDl, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `readings` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReadingRow {
    pub id: DbId,
    pub owner_email: String,
    pub recorded_date: NaiveDate,
    pub recorded_time: NaiveTime,
    pub value: MgDl,
    pub context: String,
    pub message: String,
    pub tone: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

impl ReadingRow {
    /// Convert into a domain reading, keeping the stored classification.
    ///
    /// Unknown context strings resolve to random; an unknown tone is an error
    /// since it can only come from a row written outside this crate.
    pub fn into_reading(self) -> Result<Reading, CoreError> {
        let tone = Tone::from_str_db(&self.tone)?;
        Ok(Reading::from_stored(
            self.recorded_date,
            self.recorded_time,
            self.value,
            MeasurementContext::parse_lenient(&self.context),
            Classification {
                tone,
                message: self.message,
            },
            self.note,
        ))
    }
}

/// DTO for inserting a reading. Borrowed from the domain reading.
#[derive(Debug)]
pub struct CreateReading<'a> {
    pub owner_email: &'a str,
    pub recorded_date: NaiveDate,
    pub recorded_time: NaiveTime,
    pub value: MgDl,
    pub context: &'static str,
    pub message: &'a str,
    pub tone: &'static str,
    pub note: Option<&'a str>,
}

impl<'a> CreateReading<'a> {
    pub fn from_reading(owner_email: &'a str, reading: &'a Reading) -> Self {
        Self {
            owner_email,
            recorded_date: reading.date(),
            recorded_time: reading.time(),
            value: reading.value(),
            context: reading.context().as_str(),
            message: reading.message(),
            tone: reading.tone().as_str(),
            note: reading.note(),
        }
    }
}
