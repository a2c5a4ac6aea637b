use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterItem {
    pub id: i64,
    pub job_description: String,
    pub user_details: String,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}
