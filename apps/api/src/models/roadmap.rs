use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

/// One step of a learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Timeframe label, e.g. "Week 1-2".
    #[serde(default)]
    pub week: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub detailed_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: i64,
    pub user_email: String,
    pub target_field: String,
    pub roadmap_data: Json<RoadmapResult>,
    pub created_at: DateTime<Utc>,
}

/// The learner's situation a roadmap is planned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapBrief {
    pub target_field: String,
    pub timeline: String,
    pub current_level: String,
    pub weekly_commitment: Option<String>,
}
