use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::chat::derive_chat_title;
use crate::chat::store::{
    delete_chat, find_chat_title, insert_message, list_messages, list_sessions, NewChatMessage,
};
use crate::errors::AppError;
use crate::models::chat::{ChatItem, ChatMessageRow, ChatRole};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub output: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMessageRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    pub chat_id: Option<String>,
    pub chat_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatIdQuery {
    pub chat_id: Option<String>,
}

/// Without `chatId` the history endpoint lists sessions; with it, one chat's messages.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatHistoryResponse {
    Sessions(Vec<ChatItem>),
    Messages(Vec<ChatMessageRow>),
}

fn parse_chat_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("Invalid chatId '{}'", raw.trim())))
}

fn required_chat_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_chat_id(raw),
        None => Err(AppError::Validation("chatId is required".to_string())),
    }
}

/// Title for a stored message: the caller's title, else the chat's existing
/// title, else one derived from the content.
fn resolve_chat_title(provided: Option<&str>, existing: Option<String>, content: &str) -> String {
    match (provided.map(str::trim).filter(|s| !s.is_empty()), existing) {
        (Some(title), _) => title.to_string(),
        (None, Some(title)) => title,
        (None, None) => derive_chat_title(content),
    }
}

/// POST /api/ai-career-chat-agent
pub async fn handle_chat(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let input = request.user_input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("userInput cannot be empty".to_string()));
    }

    let output = state.advisor.chat(input).await?;
    Ok(Json(ChatResponse { output }))
}

/// POST /api/ai-career-chat-agent/history
pub async fn handle_save_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SaveMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessageRow>), AppError> {
    let role = ChatRole::parse(&request.role).ok_or_else(|| {
        AppError::Validation("role must be 'user' or 'assistant'".to_string())
    })?;
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    let chat_id = required_chat_id(request.chat_id.as_deref())?;

    let provided_title = request
        .chat_title
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let existing_title = match provided_title {
        Some(_) => None,
        None => find_chat_title(&state.db, &user.email, chat_id).await?,
    };
    let chat_title = resolve_chat_title(provided_title, existing_title, &request.content);

    let row = insert_message(
        &state.db,
        NewChatMessage {
            user_email: &user.email,
            chat_id,
            chat_title: &chat_title,
            role,
            content: &request.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/ai-career-chat-agent/history[?chatId=U]
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ChatIdQuery>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let chat_id = query
        .chat_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let response = match chat_id {
        Some(raw) => {
            let chat_id = parse_chat_id(raw)?;
            ChatHistoryResponse::Messages(list_messages(&state.db, &user.email, chat_id).await?)
        }
        None => ChatHistoryResponse::Sessions(list_sessions(&state.db, &user.email).await?),
    };
    Ok(Json(response))
}

/// DELETE /api/ai-career-chat-agent/history?chatId=U
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ChatIdQuery>,
) -> Result<StatusCode, AppError> {
    let chat_id = required_chat_id(query.chat_id.as_deref())?;

    let deleted = delete_chat(&state.db, &user.email, chat_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Chat {chat_id} not found")));
    }

    info!("Deleted chat {chat_id} ({deleted} messages) for {}", user.email);
    Ok(StatusCode::NO_CONTENT)
}
