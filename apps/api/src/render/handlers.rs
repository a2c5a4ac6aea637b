use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::render::cover_letter::{
    COVER_LETTER_DOCX_FILE_NAME, COVER_LETTER_FILE_NAME, DOCX_CONTENT_TYPE,
};
use crate::render::resume::{resume_file_name, TemplateInfo, TEMPLATES};
use crate::render::{render_cover_letter_docx, render_cover_letter_pdf, render_resume_pdf};

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterExportRequest {
    #[serde(default)]
    pub cover_letter: String,
}

impl CoverLetterExportRequest {
    fn into_text(self) -> Result<String, AppError> {
        if self.cover_letter.trim().is_empty() {
            return Err(AppError::Validation("coverLetter is required".to_string()));
        }
        Ok(self.cover_letter)
    }
}

fn attachment(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn render_blocking<F>(render: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce() -> Result<Vec<u8>, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| AppError::Render(format!("render task failed: {e}")))?
}

/// GET /api/resume/templates
pub async fn handle_templates() -> Json<&'static [TemplateInfo]> {
    Json(TEMPLATES)
}

/// POST /api/resume/pdf
pub async fn handle_resume_pdf(
    user: AuthenticatedUser,
    Json(data): Json<ResumeData>,
) -> Result<Response, AppError> {
    if data.personal_info.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "personalInfo.fullName is required".to_string(),
        ));
    }
    let file_name = resume_file_name(&data.personal_info.full_name);

    let bytes = render_blocking(move || render_resume_pdf(&data)).await?;
    info!(user = %user.email, bytes = bytes.len(), "Rendered resume PDF");

    Ok(attachment(bytes, PDF_CONTENT_TYPE, &file_name))
}

/// POST /api/cover-letter/pdf
pub async fn handle_cover_letter_pdf(
    user: AuthenticatedUser,
    Json(request): Json<CoverLetterExportRequest>,
) -> Result<Response, AppError> {
    let text = request.into_text()?;
    let bytes = render_blocking(move || render_cover_letter_pdf(&text)).await?;
    info!(user = %user.email, bytes = bytes.len(), "Rendered cover letter PDF");

    Ok(attachment(bytes, PDF_CONTENT_TYPE, COVER_LETTER_FILE_NAME))
}

/// POST /api/cover-letter/docx
pub async fn handle_cover_letter_docx(
    user: AuthenticatedUser,
    Json(request): Json<CoverLetterExportRequest>,
) -> Result<Response, AppError> {
    let text = request.into_text()?;
    let bytes = render_blocking(move || render_cover_letter_docx(&text)).await?;
    info!(user = %user.email, bytes = bytes.len(), "Rendered cover letter DOCX");

    Ok(attachment(bytes, DOCX_CONTENT_TYPE, COVER_LETTER_DOCX_FILE_NAME))
}
