use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::history::{delete_owned, HistoryTable, IdQuery};
use crate::models::roadmap::{RoadmapBrief, RoadmapItem, RoadmapResult};
use crate::roadmap::store::{insert_roadmap, list_roadmaps};
use crate::state::AppState;

const DEFAULT_LEVEL: &str = "Beginner";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    #[serde(default)]
    pub target_field: String,
    #[serde(default)]
    pub timeline: String,
    pub current_level: Option<String>,
    pub weekly_commitment: Option<String>,
}

impl RoadmapRequest {
    fn into_brief(self) -> Result<RoadmapBrief, AppError> {
        let target_field = self.target_field.trim().to_string();
        let timeline = self.timeline.trim().to_string();
        if target_field.is_empty() || timeline.is_empty() {
            return Err(AppError::Validation(
                "targetField and timeline are required".to_string(),
            ));
        }

        let current_level = self
            .current_level
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

        Ok(RoadmapBrief {
            target_field,
            timeline,
            current_level,
            weekly_commitment: self
                .weekly_commitment
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

/// POST /api/roadmap
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResult>, AppError> {
    let brief = request.into_brief()?;

    let roadmap = state.advisor.plan_roadmap(&brief).await?;
    let (id, created_at) =
        insert_roadmap(&state.db, &user.email, &brief.target_field, &roadmap).await?;

    Ok(Json(RoadmapResult {
        id: Some(id),
        created_at: Some(created_at),
        target_field: Some(brief.target_field),
        ..roadmap
    }))
}

/// GET /api/roadmap/history
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<RoadmapItem>>, AppError> {
    Ok(Json(list_roadmaps(&state.db, &user.email).await?))
}

/// DELETE /api/roadmap/history?id=N
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, AppError> {
    let id = query.parse()?;
    delete_owned(&state.db, HistoryTable::Roadmaps, id, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
