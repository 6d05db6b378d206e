/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (project schedules, hold windows, leave) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Status ID type matching SMALLINT/SMALLSERIAL lookup tables.
pub type StatusId = i16;
