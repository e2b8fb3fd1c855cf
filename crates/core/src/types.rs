/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All server-side timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Glucose concentration in mg/dL.
pub type MgDl = i32;
