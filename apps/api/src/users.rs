use axum::{extract::State, Json};
use sqlx::PgPool;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Inserts the user or overwrites their display name; e-mail is the identity.
pub async fn upsert_user(pool: &PgPool, email: &str, name: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name
        RETURNING id, email, name, created_at
        "#,
    )
    .bind(email)
    .bind(name)
    .fetch_one(pool)
    .await
}

/// POST /api/user
pub async fn handle_sync_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let row = upsert_user(&state.db, &user.email, &user.name).await?;
    info!("Synced user {} (id {})", row.email, row.id);
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_upsert_keeps_id_and_overwrites_name(pool: PgPool) {
        let created = upsert_user(&pool, "ada@example.com", "Ada").await.unwrap();
        let renamed = upsert_user(&pool, "ada@example.com", "Ada Lovelace").await.unwrap();
        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.name, "Ada Lovelace");
        assert_eq!(renamed.created_at, created.created_at);

        let cleared = upsert_user(&pool, "ada@example.com", "").await.unwrap();
        assert_eq!(cleared.id, created.id);
        assert_eq!(cleared.name, "");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
