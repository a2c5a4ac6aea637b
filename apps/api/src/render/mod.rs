// Document rendering: templates lay content out into a `Document`, `pdf` writes
// it. The cover letter also has a Word export. Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod cover_letter;
pub mod document;
pub mod handlers;
pub mod pdf;
pub mod resume;

use crate::errors::AppError;
use crate::models::resume::ResumeData;

pub use cover_letter::render_cover_letter_docx;

/// Renders the "Corporate Professional" resume.
pub fn render_resume_pdf(data: &ResumeData) -> Result<Vec<u8>, AppError> {
    let doc = resume::layout_resume(data);
    pdf::to_pdf_bytes(&doc, &format!("{} Resume", data.personal_info.full_name.trim()))
}

pub fn render_cover_letter_pdf(text: &str) -> Result<Vec<u8>, AppError> {
    let doc = cover_letter::layout_cover_letter(text);
    pdf::to_pdf_bytes(&doc, "Cover Letter")
}
