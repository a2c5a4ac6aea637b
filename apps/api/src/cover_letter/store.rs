use sqlx::PgPool;
use tracing::info;

use crate::models::cover_letter::CoverLetterItem;

pub async fn insert_cover_letter(
    pool: &PgPool,
    user_email: &str,
    job_description: &str,
    user_details: &str,
    cover_letter: &str,
) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO cover_letters (user_email, job_description, user_details, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user_email)
    .bind(job_description)
    .bind(user_details)
    .bind(cover_letter)
    .fetch_one(pool)
    .await?;

    info!("Stored cover letter {id} for {user_email}");
    Ok(id)
}

/// Newest first.
pub async fn list_cover_letters(
    pool: &PgPool,
    user_email: &str,
) -> Result<Vec<CoverLetterItem>, sqlx::Error> {
    sqlx::query_as::<_, CoverLetterItem>(
        r#"
        SELECT id, job_description, user_details, cover_letter, created_at
        FROM cover_letters
        WHERE user_email = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .await
}
