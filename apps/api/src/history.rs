//! Helpers shared by the per-feature history endpoints.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;

/// `?id=N` on the history DELETE endpoints. Kept as a string so a bad value
/// surfaces as our 400 body rather than the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn parse(&self) -> Result<i64, AppError> {
        let raw = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Query parameter 'id' is required".to_string()))?;
        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation(format!("Invalid id '{raw}'")))
    }
}

/// Tables holding one artifact per row, owned through `user_email`.
#[derive(Debug, Clone, Copy)]
pub enum HistoryTable {
    ResumeAnalyses,
    CoverLetters,
    Roadmaps,
}

impl HistoryTable {
    fn name(self) -> &'static str {
        match self {
            HistoryTable::ResumeAnalyses => "resume_analyses",
            HistoryTable::CoverLetters => "cover_letters",
            HistoryTable::Roadmaps => "roadmaps",
        }
    }

    fn label(self) -> &'static str {
        match self {
            HistoryTable::ResumeAnalyses => "Resume analysis",
            HistoryTable::CoverLetters => "Cover letter",
            HistoryTable::Roadmaps => "Roadmap",
        }
    }
}

/// Deletes one row owned by `user_email`. Rows of other users are reported as not found.
pub async fn delete_owned(
    pool: &PgPool,
    table: HistoryTable,
    id: i64,
    user_email: &str,
) -> Result<(), AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND user_email = $2",
        table.name()
    );
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(user_email)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {id} not found", table.label())));
    }

    info!("Deleted {} {id} for {user_email}", table.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover_letter::store::insert_cover_letter;

    fn query(id: Option<&str>) -> IdQuery {
        IdQuery {
            id: id.map(String::from),
        }
    }

    #[test]
    fn test_parse_valid_id() {
        assert_eq!(query(Some(" 42 ")).parse().unwrap(), 42);
    }

    #[test]
    fn test_parse_missing_or_invalid_id() {
        assert!(matches!(query(None).parse(), Err(AppError::Validation(_))));
        assert!(matches!(query(Some("")).parse(), Err(AppError::Validation(_))));
        assert!(matches!(query(Some("abc")).parse(), Err(AppError::Validation(_))));
        assert!(matches!(query(Some("-1")).parse(), Err(AppError::Validation(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_delete_owned_rejects_other_users_rows(pool: PgPool) {
        let id = insert_cover_letter(&pool, "ada@example.com", "Rust dev", "Ada", "Dear team")
            .await
            .unwrap();

        let other = delete_owned(&pool, HistoryTable::CoverLetters, id, "bob@example.com").await;
        assert!(matches!(other, Err(AppError::NotFound(_))));

        delete_owned(&pool, HistoryTable::CoverLetters, id, "ada@example.com")
            .await
            .unwrap();

        let again = delete_owned(&pool, HistoryTable::CoverLetters, id, "ada@example.com").await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }
}
