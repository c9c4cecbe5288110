//! Prompt Catalog — one pure builder function per feature.
//!
//! Every builder concatenates the fixed system preamble, a task description,
//! and the caller-supplied text blocks labeled with field names. Builders are
//! deterministic string formatting: no side effects, no external calls, no
//! validation (empty input is accepted verbatim).
//!
//! Design rule: every prompt explicitly enumerates the exact output key names
//! the model should emit. The normalizer recognizes only a small finite set
//! of aliases per canonical key, so the enumeration is load-bearing.

use std::collections::BTreeMap;

use crate::models::{ChatMessage, JobApplication};

/// Common preamble to encourage factual, structured responses from the model.
pub const SYSTEM_PREAMBLE: &str =
    "You are AI Career Copilot, a meticulous assistant for resume and career analytics. \
     Always respond in valid JSON, use professional tone, and ground recommendations in the \
     provided context. Avoid fabricating facts beyond the supplied information.";

/// ATS evaluation prompt used by `POST /analyze`.
pub fn ats_evaluation(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Evaluate resume alignment with the job description. Return JSON with keys \
         `jd_match` (percentage string), `missing_keywords` (array of strings), and \
         `profile_summary` (concise paragraph).\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// Rewrites the resume toward a specific role and tone.
pub fn resume_rewrite(
    resume_text: &str,
    job_description: &str,
    tone: &str,
    focus_role: &str,
) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Rewrite the resume to match the job description. Emphasize quantifiable \
         achievements, ATS compliance, and cohesive narrative. Return JSON with keys \
         `rewritten_resume` (markdown string), `key_adjustments` (array of strings), and \
         `keyword_alignment_score` (percentage string).\n\
         DesiredTone: {tone}\nTargetRole: {focus_role}\n\
         OriginalResume:\n{resume_text}\n\nJobDescription:\n{job_description}"
    )
}

/// Surfaces skill gaps and learning resources.
pub fn skill_gap(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Identify critical hard and soft skills missing from the resume when compared \
         with the job description. Include JSON keys `missing_hard_skills`, \
         `missing_soft_skills`, and `course_recommendations` (each item having `name`, \
         `provider`, `url`).\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// Quantifies qualitative resume bullets.
pub fn achievement_quantifier(resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Rewrite resume bullets with measurable impact. Provide JSON with \
         `quantified_bullets` (array of strings) and `methodology_notes` (array explaining \
         assumptions).\n\
         Resume:\n{resume_text}"
    )
}

/// Multi-factor role fit assessment.
pub fn role_fit(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Compute role fit. Return JSON with `overall_fit`, `skill_alignment`, \
         `experience_alignment`, `growth_potential` (percentage strings), and `insights` \
         (array of strings).\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// Drafts a tailored cover letter. The applicant context map is interpolated
/// as `key: value` lines in key order.
pub fn cover_letter(
    resume_text: &str,
    job_description: &str,
    applicant_context: &BTreeMap<String, String>,
) -> String {
    let context_lines = applicant_context
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Draft a compelling one-page cover letter tailored to the job description and \
         resume. Provide JSON with `cover_letter` (markdown string) and `talking_points` \
         (array of bullets).\n\
         ApplicantContext:\n{context_lines}\n\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// Continues the coaching conversation. History is passed wholesale as one
/// block of `Role:`/`Content:` pairs.
pub fn career_coach(message_history: &[ChatMessage]) -> String {
    let history_block = message_history
        .iter()
        .map(|message| format!("Role: {}\nContent: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Continue the coaching conversation with clear, actionable guidance. Return \
         JSON with `reply` (string) and `suggested_next_questions` (array of strings).\n\
         ConversationHistory:\n{history_block}"
    )
}

/// Recommends career paths and salary bands.
pub fn career_path(resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Suggest next-step career moves, salary bands, and rationale. Include JSON keys \
         `recommended_roles` (array of objects with `title`, `salary_range`, `confidence`), \
         `upskilling_paths` (array), and `long_term_projection`.\n\
         Resume:\n{resume_text}"
    )
}

/// Job market insights for a role and location.
pub fn job_market(target_role: &str, location: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Summarize hiring demand, trending skills, and top industries for the role and \
         location. Output JSON with `demand_level`, `top_skills`, `emerging_roles`, and \
         `market_commentary`.\n\
         Role: {target_role}\nLocation: {location}"
    )
}

/// Extracts structured job description data.
pub fn job_parser(job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Parse the job description into JSON with `title`, `company`, \
         `employment_type`, `responsibilities` (array), `required_skills`, \
         `preferred_skills`, and `keywords`.\n\
         JobDescription:\n{job_description}"
    )
}

/// Simulates ATS compatibility checks across common platforms.
pub fn ats_check(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Simulate ATS screening across Workday, Lever, and Greenhouse. Provide JSON \
         with `scores` (object keyed by platform with percentage strings), \
         `formatting_issues` (array), and `recommendations` (array).\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// One-click optimization guidance.
pub fn one_click_optimization(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Produce optimization highlights, keyword matches, and tailored elevator pitch. \
         Return JSON with `optimized_summary`, `priority_edits`, and `keyword_matches`.\n\
         Resume:\n{resume_text}\n\nJob Description:\n{job_description}"
    )
}

/// AI job alert recommendations.
pub fn job_alerts(resume_text: &str, target_role: &str, location: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Suggest three hypothetical job postings with \u{2265}90% fit. Provide JSON \
         array `job_alerts` containing objects with `company`, `title`, `match_score`, \
         `reasoning`, and `apply_link_placeholder`.\n\
         Resume:\n{resume_text}\nTargetRole: {target_role}\nLocation: {location}"
    )
}

/// Data for visualization widgets (heatmap, keyword cloud, progress tracker).
pub fn visualization_summary(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Create data for skill heatmap, keyword cloud, and progress tracker. Return \
         JSON with `skill_heatmap` (array of {{skill, proficiency, demand}}), `keyword_cloud` \
         (array of {{keyword, frequency}}), and `progress_tracker` (array of milestones).\n\
         Resume:\n{resume_text}\nJob Description:\n{job_description}"
    )
}

/// Recruiter bulk screening. Resumes are numbered `Resume_1`, `Resume_2`, ...
/// so the model's `candidate_id` values can be traced back.
pub fn recruiter_bulk_score(resumes: &[String], job_description: &str) -> String {
    let resumes_block = resumes
        .iter()
        .enumerate()
        .map(|(idx, resume)| format!("Resume_{}:\n{}", idx + 1, resume))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Score multiple resumes against the job description and produce a ranking \
         matrix. Return JSON with `candidate_rankings` (array of objects containing \
         `candidate_id`, `overall_score`, `strengths`, `risks`) and `skill_matrix` (array \
         keyed by skill with coverage percentage).\n\
         JobDescription:\n{job_description}\n\nResumes:\n{resumes_block}"
    )
}

/// Chain orchestration planning.
pub fn orchestration_plan(objective: &str, context: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Produce a step-by-step reasoning plan that references external tools when \
         needed. Provide JSON with `steps` (array of strings) and `tool_calls` (array of \
         objects containing `tool` and `purpose`).\n\
         Objective:\n{objective}\nContext:\n{context}"
    )
}

/// Embeddings-style semantic similarity narrative.
pub fn embeddings_analysis(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Explain semantic similarity insights between resume and job description. \
         Return JSON with `semantic_similarity_score`, `top_matching_segments`, and \
         `gap_segments`.\n\
         Resume:\n{resume_text}\nJob Description:\n{job_description}"
    )
}

/// Skill knowledge graph blueprint.
pub fn knowledge_graph(resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Build a lightweight knowledge graph of skills and related roles. Return JSON \
         with `nodes` (array) and `edges` (array with `source`, `target`, `strength`).\n\
         Resume:\n{resume_text}"
    )
}

/// OCR extraction diagnostics over raw OCR text.
pub fn ocr_diagnostics(ocr_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Describe OCR extraction confidence and detected sections from the provided raw \
         OCR text. Provide JSON with `confidence`, `sections` (array of {{title, content}}), \
         and `cleanup_recommendations`.\n\
         OCRText:\n{ocr_text}"
    )
}

/// Personal career portfolio blueprint.
pub fn portfolio_blueprint(resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Outline a personal career portfolio structure based on resume achievements. \
         Return JSON with `site_structure`, `highlight_projects`, and `call_to_actions`.\n\
         Resume:\n{resume_text}"
    )
}

/// Interview preparation artifacts.
pub fn interview_readiness(job_description: &str, resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Generate likely interview questions and readiness plan. Return JSON with \
         `behavioral_questions`, `technical_questions`, and `prep_tips`.\n\
         Resume:\n{resume_text}\nJob Description:\n{job_description}"
    )
}

/// Salary benchmarking insights.
pub fn salary_benchmark(role: &str, location: &str, experience_years: f64) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Provide salary benchmarking insights. Return JSON with `median_salary`, \
         `percentile_25`, `percentile_75`, and `data_sources`.\n\
         Role: {role}\nLocation: {location}\nExperienceYears: {experience_years}"
    )
}

/// Career progress tracking over certifications, skills, and applications.
/// Empty collections interpolate as `None` so the model is told explicitly.
pub fn career_progress_tracker(
    resume_text: &str,
    certifications: &[String],
    skills_acquired: &[String],
    job_applications: &[JobApplication],
) -> String {
    let certs_block = bullet_list(certifications);
    let skills_block = bullet_list(skills_acquired);
    let apps_block = if job_applications.is_empty() {
        "None".to_string()
    } else {
        job_applications
            .iter()
            .map(|app| {
                format!(
                    "- {}: {} ({})",
                    app.company.as_deref().unwrap_or("Unknown"),
                    app.role.as_deref().unwrap_or("Unknown"),
                    app.status.as_deref().unwrap_or("pending"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Analyze career progress and provide actionable insights. Return JSON with \
         `progress_score` (percentage string), `milestones_achieved` (array of strings), \
         `next_milestones` (array of strings), `skill_development_plan` (array of \
         {{skill, priority, timeline}}), and `career_trajectory_summary` (string).\n\
         Resume:\n{resume_text}\n\n\
         Certifications:\n{certs_block}\n\n\
         Skills Acquired:\n{skills_block}\n\n\
         Job Applications:\n{apps_block}"
    )
}

/// Converts a LinkedIn profile into an optimized resume structure.
pub fn linkedin_sync(profile_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Transform the LinkedIn profile into a resume-ready structure with \
         ATS-friendly formatting. Return JSON with `resume_summary`, `experience_sections` \
         (array of {{title, bullets}}), `skills_matrix` (array of {{skill, proficiency}}), \
         and `optimization_tips`.\n\
         LinkedInProfile:\n{profile_text}"
    )
}

/// Keyword highlighter for the browser-extension surface.
pub fn keyword_highlight(job_description: &str, resume_text: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Compare the job description with the resume and highlight missing or \
         low-frequency keywords. Return JSON with `missing_keywords`, `highlight_sections` \
         (array of {{section, keywords}}), and `action_items`.\n\
         JobDescription:\n{job_description}\n\nResume:\n{resume_text}"
    )
}

/// Compares multiple resume variants against one job description.
pub fn multi_resume_compare(resume_variants: &[String], job_description: &str) -> String {
    let variants_block = resume_variants
        .iter()
        .enumerate()
        .map(|(idx, resume)| format!("Variant_{}:\n{}", idx + 1, resume))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "{SYSTEM_PREAMBLE}\n\n\
         Task: Compare the provided resume variants against the job description. Return JSON \
         with `best_variant_id`, `variant_scores` (array of {{variant_id, score}}), and \
         `improvement_notes` (array of strings).\n\
         JobDescription:\n{job_description}\n\nResumes:\n{variants_block}"
    )
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
