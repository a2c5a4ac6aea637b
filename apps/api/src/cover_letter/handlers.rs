use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::cover_letter::store::{insert_cover_letter, list_cover_letters};
use crate::errors::AppError;
use crate::history::{delete_owned, HistoryTable, IdQuery};
use crate::models::cover_letter::CoverLetterItem;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub user_details: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

impl CoverLetterRequest {
    fn validate(&self) -> Result<(&str, &str), AppError> {
        let jd = self.job_description.trim();
        let details = self.user_details.trim();
        if jd.is_empty() || details.is_empty() {
            return Err(AppError::Validation(
                "Both jobDescription and userDetails are required".to_string(),
            ));
        }
        Ok((jd, details))
    }
}

/// POST /api/cover-letter
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let (job_description, user_details) = request.validate()?;

    let cover_letter = state
        .advisor
        .write_cover_letter(job_description, user_details)
        .await?;

    insert_cover_letter(
        &state.db,
        &user.email,
        job_description,
        user_details,
        &cover_letter,
    )
    .await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// GET /api/cover-letter/history
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<CoverLetterItem>>, AppError> {
    Ok(Json(list_cover_letters(&state.db, &user.email).await?))
}

/// DELETE /api/cover-letter/history?id=N
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, AppError> {
    let id = query.parse()?;
    delete_owned(&state.db, HistoryTable::CoverLetters, id, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        let req: CoverLetterRequest =
            serde_json::from_str(r#"{"jobDescription": "Rust dev", "userDetails": "  "}"#).unwrap();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req: CoverLetterRequest = serde_json::from_str(r#"{"userDetails": "Ada"}"#).unwrap();
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_trims() {
        let req: CoverLetterRequest = serde_json::from_str(
            r#"{"jobDescription": " Rust dev ", "userDetails": "Ada, 5 years"}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap(), ("Rust dev", "Ada, 5 years"));
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = serde_json::to_value(CoverLetterResponse {
            cover_letter: "Dear team".to_string(),
        })
        .unwrap();
        assert_eq!(body["coverLetter"], "Dear team");
    }
}
