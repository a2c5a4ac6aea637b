use sqlx::{types::Json, PgPool};
use tracing::info;

use crate::models::analysis::{AnalysisResult, ResumeAnalysisItem};

pub async fn insert_analysis(
    pool: &PgPool,
    user_email: &str,
    resume_text: &str,
    job_description: Option<&str>,
    analysis: &AnalysisResult,
) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO resume_analyses (user_email, resume_text, job_description, analysis_data)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user_email)
    .bind(resume_text)
    .bind(job_description)
    .bind(Json(analysis))
    .fetch_one(pool)
    .await?;

    info!("Stored resume analysis {id} (score {}) for {user_email}", analysis.score);
    Ok(id)
}

/// Newest first.
pub async fn list_analyses(
    pool: &PgPool,
    user_email: &str,
) -> Result<Vec<ResumeAnalysisItem>, sqlx::Error> {
    sqlx::query_as::<_, ResumeAnalysisItem>(
        r#"
        SELECT id, resume_text, job_description, analysis_data, created_at
        FROM resume_analyses
        WHERE user_email = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .await
}
