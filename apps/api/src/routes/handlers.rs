//! Axum route handlers. Every POST handler runs the same linear pipeline:
//! decode typed request -> build prompt -> model gateway -> parse ->
//! normalize or pass through. Handlers add no error handling beyond `?`.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::extract::extract_text_from_pdf;
use crate::models::{ChatMessage, JobApplication};
use crate::normalize::{normalize_fixed, parse_model_json, ATS_FIELDS, REWRITE_FIELDS};
use crate::prompts;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeAndJobRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeRewriteRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    pub focus_role: String,
}

fn default_tone() -> String {
    "Professional".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub applicant_context: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeOnlyRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CareerCoachRequest {
    pub message_history: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct JobMarketRequest {
    pub target_role: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct JobAlertsRequest {
    pub resume_text: String,
    pub target_role: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct RecruiterBulkRequest {
    pub resumes: Vec<String>,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct OrchestrationRequest {
    pub objective: String,
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct OcrDiagnosticsRequest {
    pub ocr_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SalaryBenchmarkRequest {
    pub role: String,
    pub location: String,
    pub experience_years: f64,
}

#[derive(Debug, Deserialize)]
pub struct CareerProgressRequest {
    pub resume_text: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub skills_acquired: Vec<String>,
    #[serde(default)]
    pub job_applications: Vec<JobApplication>,
}

#[derive(Debug, Deserialize)]
pub struct LinkedinSyncRequest {
    pub profile_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeVariantsRequest {
    pub resume_variants: Vec<String>,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline helper
// ────────────────────────────────────────────────────────────────────────────

/// Sends the prompt through the gateway and strictly parses the reply.
/// Exactly one model call per invocation.
async fn invoke_model(state: &AppState, prompt: &str) -> Result<Value, AppError> {
    let raw = state.gateway.generate(prompt).await?;
    parse_model_json(&raw)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Welcome to AI Career Copilot API" }))
}

/// POST /analyze — multipart upload: `resume` (PDF file) + `job_description`
/// (text field). The one fixed-shape endpoint fed by PDF extraction.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::FileRead(e.to_string()))?;
                resume_bytes = Some(bytes);
            }
            Some("job_description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let resume_bytes = resume_bytes
        .ok_or_else(|| AppError::Validation("multipart field 'resume' is required".to_string()))?;
    let job_description = job_description.ok_or_else(|| {
        AppError::Validation("multipart field 'job_description' is required".to_string())
    })?;

    let resume_text = extract_text_from_pdf(&resume_bytes)?;
    let prompt = prompts::ats_evaluation(&resume_text, &job_description);
    let reply = invoke_model(&state, &prompt).await?;
    Ok(Json(normalize_fixed(&reply, ATS_FIELDS)))
}

/// POST /resume/rewrite — fixed-shape reply, key aliases reconciled.
pub async fn handle_resume_rewrite(
    State(state): State<AppState>,
    Json(request): Json<ResumeRewriteRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::resume_rewrite(
        &request.resume_text,
        &request.job_description,
        &request.tone,
        &request.focus_role,
    );
    let reply = invoke_model(&state, &prompt).await?;
    Ok(Json(normalize_fixed(&reply, REWRITE_FIELDS)))
}

/// POST /resume/skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::skill_gap(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /resume/achievements
pub async fn handle_achievements(
    State(state): State<AppState>,
    Json(request): Json<ResumeOnlyRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::achievement_quantifier(&request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /resume/role-fit
pub async fn handle_role_fit(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::role_fit(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /resume/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::cover_letter(
        &request.resume_text,
        &request.job_description,
        &request.applicant_context,
    );
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /resume/variants
pub async fn handle_resume_variants(
    State(state): State<AppState>,
    Json(request): Json<ResumeVariantsRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::multi_resume_compare(&request.resume_variants, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /career/coach
pub async fn handle_career_coach(
    State(state): State<AppState>,
    Json(request): Json<CareerCoachRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::career_coach(&request.message_history);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /career/path
pub async fn handle_career_path(
    State(state): State<AppState>,
    Json(request): Json<ResumeOnlyRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::career_path(&request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /career/job-market
pub async fn handle_job_market(
    State(state): State<AppState>,
    Json(request): Json<JobMarketRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::job_market(&request.target_role, &request.location);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /career/progress-tracker
pub async fn handle_career_progress(
    State(state): State<AppState>,
    Json(request): Json<CareerProgressRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::career_progress_tracker(
        &request.resume_text,
        &request.certifications,
        &request.skills_acquired,
        &request.job_applications,
    );
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /jobs/parse
pub async fn handle_job_parser(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::job_parser(&request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /jobs/ats-check
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::ats_check(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /jobs/one-click-optimize
pub async fn handle_one_click_optimize(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::one_click_optimization(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /jobs/alerts
pub async fn handle_job_alerts(
    State(state): State<AppState>,
    Json(request): Json<JobAlertsRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::job_alerts(&request.resume_text, &request.target_role, &request.location);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /visualizations/summary
pub async fn handle_visualization_summary(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::visualization_summary(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /recruiter/bulk-score
pub async fn handle_recruiter_bulk_score(
    State(state): State<AppState>,
    Json(request): Json<RecruiterBulkRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::recruiter_bulk_score(&request.resumes, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /analytics/orchestration
pub async fn handle_orchestration(
    State(state): State<AppState>,
    Json(request): Json<OrchestrationRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::orchestration_plan(&request.objective, &request.context);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /analytics/embeddings
pub async fn handle_embeddings(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::embeddings_analysis(&request.resume_text, &request.job_description);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /analytics/knowledge-graph
pub async fn handle_knowledge_graph(
    State(state): State<AppState>,
    Json(request): Json<ResumeOnlyRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::knowledge_graph(&request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /analytics/ocr-diagnostics
pub async fn handle_ocr_diagnostics(
    State(state): State<AppState>,
    Json(request): Json<OcrDiagnosticsRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::ocr_diagnostics(&request.ocr_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /portfolio/generate
pub async fn handle_portfolio_generate(
    State(state): State<AppState>,
    Json(request): Json<ResumeOnlyRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::portfolio_blueprint(&request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /interview/readiness
pub async fn handle_interview_readiness(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::interview_readiness(&request.job_description, &request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /salary/benchmark
pub async fn handle_salary_benchmark(
    State(state): State<AppState>,
    Json(request): Json<SalaryBenchmarkRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt =
        prompts::salary_benchmark(&request.role, &request.location, request.experience_years);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /linkedin/sync
pub async fn handle_linkedin_sync(
    State(state): State<AppState>,
    Json(request): Json<LinkedinSyncRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::linkedin_sync(&request.profile_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}

/// POST /extension/keyword-highlight
pub async fn handle_keyword_highlight(
    State(state): State<AppState>,
    Json(request): Json<ResumeAndJobRequest>,
) -> Result<Json<Value>, AppError> {
    let prompt = prompts::keyword_highlight(&request.job_description, &request.resume_text);
    Ok(Json(invoke_model(&state, &prompt).await?))
}
