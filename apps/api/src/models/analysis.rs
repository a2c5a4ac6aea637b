use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// ATS-style review of a resume, as returned to the client and stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    pub score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_points: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// What the resume is measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisTarget {
    JobDescription(String),
    /// No concrete posting; either field may be empty for a general ATS review.
    Field {
        field_of_interest: String,
        target_role: String,
    },
}

impl AnalysisTarget {
    pub fn job_description(&self) -> Option<&str> {
        match self {
            AnalysisTarget::JobDescription(jd) => Some(jd),
            AnalysisTarget::Field { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisItem {
    pub id: i64,
    pub resume_text: String,
    pub job_description: Option<String>,
    pub analysis_data: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}
