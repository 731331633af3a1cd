use chrono::{DateTime, Utc};

// Data model representing a Task item
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Task {
    pub(crate) id: i64,
    pub(crate) content: String,
    // Never written by any route, rows always keep the column default.
    pub(crate) completed: i64,
    pub(crate) date_created: DateTime<Utc>,
}

// The "current user" record, at most one row exists at a time
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) password: String,
}
