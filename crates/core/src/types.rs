/// All entity identifiers are UUIDs assigned by the backend service.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date used for goshuin visit tracking.
pub type VisitDate = chrono::NaiveDate;
