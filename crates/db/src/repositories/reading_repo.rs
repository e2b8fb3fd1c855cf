//! Repository for the `readings` table.
//!
//! Rows are only ever inserted or bulk-deleted per owner; there is no
//! update path.

use sqlx::PgPool;

use crate::models::reading::{CreateReading, ReadingRow};

/// Column list for readings queries.
const COLUMNS: &str = "id, owner_email, recorded_date, recorded_time, value, context, \
    message, tone, note, created_at";

/// Provides append, list, and clear operations for readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Append a reading, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReading<'_>,
    ) -> Result<ReadingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO readings
                (owner_email, recorded_date, recorded_time, value, context, message, tone, note)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingRow>(&query)
            .bind(input.owner_email)
            .bind(input.recorded_date)
            .bind(input.recorded_time)
            .bind(input.value)
            .bind(input.context)
            .bind(input.message)
            .bind(input.tone)
            .bind(input.note)
            .fetch_one(pool)
            .await
    }

    /// List every reading for an owner in insertion order.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_email: &str,
    ) -> Result<Vec<ReadingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM readings
             WHERE owner_email = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ReadingRow>(&query)
            .bind(owner_email)
            .fetch_all(pool)
            .await
    }

    /// Delete every reading for an owner. Returns the number of rows removed.
    pub async fn delete_all_for_owner(
        pool: &PgPool,
        owner_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM readings WHERE owner_email = $1")
            .bind(owner_email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
