use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::history::{delete_owned, HistoryTable, IdQuery};
use crate::models::analysis::{AnalysisResult, AnalysisTarget, ResumeAnalysisItem};
use crate::resume_analyzer::extract::{extract_resume_text, is_pdf};
use crate::resume_analyzer::store::{insert_analysis, list_analyses};
use crate::state::AppState;

/// Fields collected from the multipart analyzer form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<Bytes>,
    job_description: String,
    field_of_interest: String,
    target_role: String,
}

impl AnalyzeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => form.resume = Some(field.bytes().await?),
                "jobDescription" => form.job_description = field.text().await?,
                "fieldOfInterest" => form.field_of_interest = field.text().await?,
                "targetRole" => form.target_role = field.text().await?,
                other => tracing::debug!("Ignoring unknown form field '{other}'"),
            }
        }
        Ok(form)
    }

    fn target(&self) -> AnalysisTarget {
        let jd = self.job_description.trim();
        if jd.is_empty() {
            AnalysisTarget::Field {
                field_of_interest: self.field_of_interest.trim().to_string(),
                target_role: self.target_role.trim().to_string(),
            }
        } else {
            AnalysisTarget::JobDescription(jd.to_string())
        }
    }
}

/// POST /api/resume-analyzer
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = AnalyzeForm::read(multipart).await?;
    let target = form.target();

    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    if !is_pdf(&resume) {
        return Err(AppError::Validation(
            "The resume must be a PDF file".to_string(),
        ));
    }

    let resume_text = extract_resume_text(resume).await?;
    let analysis = state.advisor.analyze_resume(&resume_text, &target).await?;

    insert_analysis(
        &state.db,
        &user.email,
        &resume_text,
        target.job_description(),
        &analysis,
    )
    .await?;

    Ok(Json(analysis))
}

/// GET /api/resume-analyzer/history
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ResumeAnalysisItem>>, AppError> {
    Ok(Json(list_analyses(&state.db, &user.email).await?))
}

/// DELETE /api/resume-analyzer/history?id=N
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, AppError> {
    let id = query.parse()?;
    delete_owned(&state.db, HistoryTable::ResumeAnalyses, id, &user.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(jd: &str, field: &str, role: &str) -> AnalyzeForm {
        AnalyzeForm {
            resume: None,
            job_description: jd.to_string(),
            field_of_interest: field.to_string(),
            target_role: role.to_string(),
        }
    }

    #[test]
    fn test_job_description_takes_precedence() {
        let target = form(" Senior Rust Engineer ", "Backend", "SRE").target();
        assert_eq!(
            target,
            AnalysisTarget::JobDescription("Senior Rust Engineer".to_string())
        );
        assert_eq!(target.job_description(), Some("Senior Rust Engineer"));
    }

    #[test]
    fn test_blank_job_description_falls_back_to_field() {
        let target = form("   ", " Data ", "Analyst").target();
        assert_eq!(
            target,
            AnalysisTarget::Field {
                field_of_interest: "Data".to_string(),
                target_role: "Analyst".to_string(),
            }
        );
        assert_eq!(target.job_description(), None);
    }
}
