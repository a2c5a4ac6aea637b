//! Career advisor: the AI-backed operations behind every feature endpoint.
//!
//! `AppState` holds an `Arc<dyn CareerAdvisor>`. `LlmAdvisor` is the production
//! backend; tests swap in a canned implementation.

pub mod prompts;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::analysis::{AnalysisResult, AnalysisTarget};
use crate::models::roadmap::{Milestone, RoadmapBrief, RoadmapResult};

use prompts::*;

/// Resume text beyond this many characters is cut before prompting.
const MAX_RESUME_CHARS: usize = 20_000;

#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    async fn analyze_resume(
        &self,
        resume_text: &str,
        target: &AnalysisTarget,
    ) -> Result<AnalysisResult, AppError>;

    async fn write_cover_letter(
        &self,
        job_description: &str,
        user_details: &str,
    ) -> Result<String, AppError>;

    async fn plan_roadmap(&self, brief: &RoadmapBrief) -> Result<RoadmapResult, AppError>;

    async fn chat(&self, user_input: &str) -> Result<String, AppError>;
}

/// Advisor backed by the Claude API through `LlmClient`.
pub struct LlmAdvisor {
    llm: LlmClient,
}

impl LlmAdvisor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CareerAdvisor for LlmAdvisor {
    async fn analyze_resume(
        &self,
        resume_text: &str,
        target: &AnalysisTarget,
    ) -> Result<AnalysisResult, AppError> {
        let prompt = build_analysis_prompt(resume_text, target);
        let system = format!("{RESUME_ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}");
        let draft: AnalysisDraft = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to analyze resume: {e}")))?;
        Ok(draft.normalize())
    }

    async fn write_cover_letter(
        &self,
        job_description: &str,
        user_details: &str,
    ) -> Result<String, AppError> {
        let prompt = COVER_LETTER_PROMPT
            .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
            .replace("{job_description}", job_description)
            .replace("{user_details}", user_details);
        let letter = self
            .llm
            .call_text(&prompt, COVER_LETTER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to write cover letter: {e}")))?;
        Ok(letter)
    }

    async fn plan_roadmap(&self, brief: &RoadmapBrief) -> Result<RoadmapResult, AppError> {
        let prompt = build_roadmap_prompt(brief);
        let system = format!("{ROADMAP_SYSTEM} {JSON_ONLY_SYSTEM}");
        let roadmap: RoadmapResult = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to generate roadmap: {e}")))?;
        normalize_roadmap(roadmap)
    }

    async fn chat(&self, user_input: &str) -> Result<String, AppError> {
        debug!("Chat request ({} chars)", user_input.len());
        let output = self
            .llm
            .call_text(user_input, CHAT_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Chat completion failed: {e}")))?;
        Ok(output)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt builders
// ────────────────────────────────────────────────────────────────────────────

fn build_analysis_prompt(resume_text: &str, target: &AnalysisTarget) -> String {
    let (target_clause, target_block) = match target {
        AnalysisTarget::JobDescription(jd) => (
            "against the job description".to_string(),
            format!("JOB DESCRIPTION:\n{jd}\n"),
        ),
        AnalysisTarget::Field {
            field_of_interest,
            target_role,
        } => {
            let field = field_of_interest.trim();
            let role = target_role.trim();
            match (field.is_empty(), role.is_empty()) {
                (true, true) => (
                    "for general ATS compatibility and overall quality".to_string(),
                    String::new(),
                ),
                _ => {
                    let mut block = String::new();
                    if !field.is_empty() {
                        block.push_str(&format!("FIELD OF INTEREST: {field}\n"));
                    }
                    if !role.is_empty() {
                        block.push_str(&format!("TARGET ROLE: {role}\n"));
                    }
                    (
                        "for the target field and role, using typical industry expectations"
                            .to_string(),
                        block,
                    )
                }
            }
        }
    };

    RESUME_ANALYSIS_PROMPT
        .replace("{target_clause}", &target_clause)
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
        .replace("{target_block}", &target_block)
}

fn build_roadmap_prompt(brief: &RoadmapBrief) -> String {
    let weekly = brief
        .weekly_commitment
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("not specified");
    ROADMAP_PROMPT
        .replace("{target_field}", &brief.target_field)
        .replace("{timeline}", &brief.timeline)
        .replace("{current_level}", &brief.current_level)
        .replace("{weekly_commitment}", weekly)
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output normalisation
// ────────────────────────────────────────────────────────────────────────────

/// Lenient shape of the model's analysis output.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalysisDraft {
    score: f64,
    summary: String,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    improvement_points: Vec<String>,
    missing_keywords: Vec<String>,
}

impl AnalysisDraft {
    fn normalize(self) -> AnalysisResult {
        AnalysisResult {
            score: clamp_score(self.score),
            summary: self.summary.trim().to_string(),
            strengths: clean_list(self.strengths),
            weaknesses: clean_list(self.weaknesses),
            improvement_points: clean_list(self.improvement_points),
            missing_keywords: clean_list(self.missing_keywords),
        }
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Trims entries, drops blanks and case-insensitive duplicates, keeps first-seen order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

fn normalize_roadmap(roadmap: RoadmapResult) -> Result<RoadmapResult, AppError> {
    let title = roadmap.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Llm("Roadmap response had no title".to_string()));
    }

    let milestones: Vec<Milestone> = roadmap
        .milestones
        .into_iter()
        .map(|m| Milestone {
            week: m.week.trim().to_string(),
            goal: m.goal.trim().to_string(),
            topics: clean_list(m.topics),
            resources: clean_list(m.resources),
            detailed_steps: clean_list(m.detailed_steps),
        })
        .filter(|m| !m.goal.is_empty() || !m.topics.is_empty())
        .collect();

    if milestones.is_empty() {
        warn!("Roadmap '{title}' came back without usable milestones");
        return Err(AppError::Llm(
            "Roadmap response had no milestones".to_string(),
        ));
    }

    Ok(RoadmapResult {
        id: None,
        title,
        description: roadmap.description.trim().to_string(),
        milestones,
        tips: clean_list(roadmap.tips),
        created_at: None,
        target_field: None,
    })
}

#[cfg(test)]
pub mod testing {
    //! Canned advisor for handler and router tests.

    use super::*;

    pub struct CannedAdvisor;

    pub fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            score: 78,
            summary: "Solid backend profile.".to_string(),
            strengths: vec!["Rust".to_string()],
            weaknesses: vec!["No metrics".to_string()],
            improvement_points: vec!["Quantify impact".to_string()],
            missing_keywords: vec!["Kubernetes".to_string()],
        }
    }

    #[async_trait]
    impl CareerAdvisor for CannedAdvisor {
        async fn analyze_resume(
            &self,
            _resume_text: &str,
            _target: &AnalysisTarget,
        ) -> Result<AnalysisResult, AppError> {
            Ok(sample_analysis())
        }

        async fn write_cover_letter(
            &self,
            _job_description: &str,
            _user_details: &str,
        ) -> Result<String, AppError> {
            Ok("Dear Hiring Manager,\n\nI am excited to apply.".to_string())
        }

        async fn plan_roadmap(&self, brief: &RoadmapBrief) -> Result<RoadmapResult, AppError> {
            Ok(RoadmapResult {
                id: None,
                title: format!("{} in {}", brief.target_field, brief.timeline),
                description: String::new(),
                milestones: vec![Milestone {
                    week: "Week 1".to_string(),
                    goal: "Basics".to_string(),
                    topics: vec![],
                    resources: vec![],
                    detailed_steps: vec![],
                }],
                tips: vec![],
                created_at: None,
                target_field: None,
            })
        }

        async fn chat(&self, user_input: &str) -> Result<String, AppError> {
            Ok(format!("You asked: {user_input}"))
        }
    }
}
