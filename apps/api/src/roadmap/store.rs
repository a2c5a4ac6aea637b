use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use tracing::info;

use crate::models::roadmap::{RoadmapItem, RoadmapResult};

/// Stores the roadmap body and returns the assigned id and timestamp.
pub async fn insert_roadmap(
    pool: &PgPool,
    user_email: &str,
    target_field: &str,
    roadmap: &RoadmapResult,
) -> Result<(i64, DateTime<Utc>), sqlx::Error> {
    let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO roadmaps (user_email, target_field, roadmap_data)
        VALUES ($1, $2, $3)
        RETURNING id, created_at
        "#,
    )
    .bind(user_email)
    .bind(target_field)
    .bind(Json(roadmap))
    .fetch_one(pool)
    .await?;

    info!(
        "Stored roadmap {id} ({} milestones) for {user_email}",
        roadmap.milestones.len()
    );
    Ok((id, created_at))
}

/// Newest first.
pub async fn list_roadmaps(pool: &PgPool, user_email: &str) -> Result<Vec<RoadmapItem>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapItem>(
        r#"
        SELECT id, user_email, target_field, roadmap_data, created_at
        FROM roadmaps
        WHERE user_email = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .await
}
