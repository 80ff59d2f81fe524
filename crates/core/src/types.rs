/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Identifier assigned by the store to a persisted request row.
pub type RecordId = DbId;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
