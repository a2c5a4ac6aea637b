use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::chat::{ChatItem, ChatMessageRow, ChatRole};

pub struct NewChatMessage<'a> {
    pub user_email: &'a str,
    pub chat_id: Uuid,
    pub chat_title: &'a str,
    pub role: ChatRole,
    pub content: &'a str,
}

pub async fn insert_message(
    pool: &PgPool,
    message: NewChatMessage<'_>,
) -> Result<ChatMessageRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (user_email, chat_id, chat_title, role, content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, chat_id, chat_title, role, content, created_at
        "#,
    )
    .bind(message.user_email)
    .bind(message.chat_id)
    .bind(message.chat_title)
    .bind(message.role.as_str())
    .bind(message.content)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored {} message {} in chat {}",
        message.role.as_str(),
        row.id,
        row.chat_id
    );
    Ok(row)
}

/// Title of an existing chat, taken from its first message.
pub async fn find_chat_title(
    pool: &PgPool,
    user_email: &str,
    chat_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT chat_title FROM chat_messages
        WHERE user_email = $1 AND chat_id = $2
        ORDER BY id ASC
        LIMIT 1
        "#,
    )
    .bind(user_email)
    .bind(chat_id)
    .fetch_optional(pool)
    .await
}

/// One entry per chat, newest chat first.
pub async fn list_sessions(pool: &PgPool, user_email: &str) -> Result<Vec<ChatItem>, sqlx::Error> {
    sqlx::query_as::<_, ChatItem>(
        r#"
        SELECT chat_id, chat_title, created_at FROM (
            SELECT DISTINCT ON (chat_id) chat_id, chat_title, created_at
            FROM chat_messages
            WHERE user_email = $1
            ORDER BY chat_id, id ASC
        ) sessions
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .await
}

/// Messages of one chat in the order they were stored.
pub async fn list_messages(
    pool: &PgPool,
    user_email: &str,
    chat_id: Uuid,
) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        SELECT id, chat_id, chat_title, role, content, created_at
        FROM chat_messages
        WHERE user_email = $1 AND chat_id = $2
        ORDER BY id ASC
        "#,
    )
    .bind(user_email)
    .bind(chat_id)
    .fetch_all(pool)
    .await
}

/// Returns the number of deleted messages.
pub async fn delete_chat(pool: &PgPool, user_email: &str, chat_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_messages WHERE user_email = $1 AND chat_id = $2")
        .bind(user_email)
        .bind(chat_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADA: &str = "ada@example.com";

    async fn store(pool: &PgPool, user_email: &str, chat_id: Uuid, title: &str, role: ChatRole) -> ChatMessageRow {
        insert_message(
            pool,
            NewChatMessage {
                user_email,
                chat_id,
                chat_title: title,
                role,
                content: "message",
            },
        )
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_sessions_newest_first_with_first_message_title(pool: PgPool) {
        let older = Uuid::new_v4();
        let newer = Uuid::new_v4();
        store(&pool, ADA, older, "Resume tips", ChatRole::User).await;
        store(&pool, ADA, older, "Renamed later", ChatRole::Assistant).await;
        store(&pool, ADA, newer, "Interview prep", ChatRole::User).await;
        store(&pool, "bob@example.com", Uuid::new_v4(), "Other", ChatRole::User).await;
        sqlx::query("UPDATE chat_messages SET created_at = created_at - INTERVAL '1 hour' WHERE chat_id = $1")
            .bind(older)
            .execute(&pool)
            .await
            .unwrap();

        let sessions = list_sessions(&pool, ADA).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].chat_id, newer);
        assert_eq!(sessions[1].chat_id, older);
        assert_eq!(sessions[1].chat_title, "Resume tips");

        let messages = list_messages(&pool, ADA, older).await.unwrap();
        assert_eq!(sessions[1].created_at, messages[0].created_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_messages_in_insertion_order(pool: PgPool) {
        let chat_id = Uuid::new_v4();
        let first = store(&pool, ADA, chat_id, "Resume tips", ChatRole::User).await;
        let second = store(&pool, ADA, chat_id, "Resume tips", ChatRole::Assistant).await;
        let third = store(&pool, ADA, chat_id, "Resume tips", ChatRole::User).await;

        let ids: Vec<i64> = list_messages(&pool, ADA, chat_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
        assert_eq!(second.role, "assistant");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_find_chat_title_uses_first_message(pool: PgPool) {
        let chat_id = Uuid::new_v4();
        assert_eq!(find_chat_title(&pool, ADA, chat_id).await.unwrap(), None);

        store(&pool, ADA, chat_id, "Resume tips", ChatRole::User).await;
        store(&pool, ADA, chat_id, "Something else", ChatRole::Assistant).await;
        assert_eq!(
            find_chat_title(&pool, ADA, chat_id).await.unwrap().as_deref(),
            Some("Resume tips")
        );
        assert_eq!(find_chat_title(&pool, "bob@example.com", chat_id).await.unwrap(), None);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_delete_chat_is_scoped_to_owner(pool: PgPool) {
        let chat_id = Uuid::new_v4();
        store(&pool, ADA, chat_id, "Resume tips", ChatRole::User).await;
        store(&pool, ADA, chat_id, "Resume tips", ChatRole::Assistant).await;

        assert_eq!(delete_chat(&pool, "bob@example.com", chat_id).await.unwrap(), 0);
        assert_eq!(delete_chat(&pool, ADA, chat_id).await.unwrap(), 2);
        assert!(list_messages(&pool, ADA, chat_id).await.unwrap().is_empty());
    }
}
