use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored summary record, as returned by read operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub id: i64,
    pub url: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPayload {
    pub url: String,
}

/// Validated update payload. A full update replaces both fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryUpdatePayload {
    pub url: String,
    pub summary: String,
}

/// Short response body used by create and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub id: i64,
    pub url: String,
}
