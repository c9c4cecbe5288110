pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/analyze", post(handlers::handle_analyze))
        // Resume API
        .route("/resume/rewrite", post(handlers::handle_resume_rewrite))
        .route("/resume/skill-gap", post(handlers::handle_skill_gap))
        .route("/resume/achievements", post(handlers::handle_achievements))
        .route("/resume/role-fit", post(handlers::handle_role_fit))
        .route("/resume/cover-letter", post(handlers::handle_cover_letter))
        .route("/resume/variants", post(handlers::handle_resume_variants))
        // Career API
        .route("/career/coach", post(handlers::handle_career_coach))
        .route("/career/path", post(handlers::handle_career_path))
        .route("/career/job-market", post(handlers::handle_job_market))
        .route(
            "/career/progress-tracker",
            post(handlers::handle_career_progress),
        )
        // Jobs API
        .route("/jobs/parse", post(handlers::handle_job_parser))
        .route("/jobs/ats-check", post(handlers::handle_ats_check))
        .route(
            "/jobs/one-click-optimize",
            post(handlers::handle_one_click_optimize),
        )
        .route("/jobs/alerts", post(handlers::handle_job_alerts))
        // Visualizations / recruiter / analytics
        .route(
            "/visualizations/summary",
            post(handlers::handle_visualization_summary),
        )
        .route(
            "/recruiter/bulk-score",
            post(handlers::handle_recruiter_bulk_score),
        )
        .route(
            "/analytics/orchestration",
            post(handlers::handle_orchestration),
        )
        .route("/analytics/embeddings", post(handlers::handle_embeddings))
        .route(
            "/analytics/knowledge-graph",
            post(handlers::handle_knowledge_graph),
        )
        .route(
            "/analytics/ocr-diagnostics",
            post(handlers::handle_ocr_diagnostics),
        )
        // Portfolio / interview / salary
        .route(
            "/portfolio/generate",
            post(handlers::handle_portfolio_generate),
        )
        .route(
            "/interview/readiness",
            post(handlers::handle_interview_readiness),
        )
        .route("/salary/benchmark", post(handlers::handle_salary_benchmark))
        // Integrations
        .route("/linkedin/sync", post(handlers::handle_linkedin_sync))
        .route(
            "/extension/keyword-highlight",
            post(handlers::handle_keyword_highlight),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::*;
    use crate::extract::sample_pdf;
    use crate::gateway::{GatewayError, ModelGateway};

    /// Records every prompt it receives and returns a canned reply.
    struct MockGateway {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelGateway for MockGateway {
        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(GatewayError::Api {
                    status: 503,
                    message: "model unavailable".to_string(),
                }),
            }
        }
    }

    fn app(gateway: Arc<MockGateway>) -> Router {
        build_router(AppState { gateway })
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    const BOUNDARY: &str = "copilot-test-boundary";

    fn multipart_analyze_body(pdf: Option<&[u8]>, job_description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(jd) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\ncontent-disposition: form-data; \
                     name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(pdf) = pdf {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\ncontent-disposition: form-data; name=\"resume\"; \
                     filename=\"resume.pdf\"\r\ncontent-type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(pdf);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_analyze(app: Router, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    #[tokio::test]
    async fn test_root_returns_greeting() {
        let app = app(MockGateway::replying("{}"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body, json!({"message": "Welcome to AI Career Copilot API"}));
    }

    #[tokio::test]
    async fn test_analyze_returns_canonical_shape() {
        let gateway = MockGateway::replying(
            r#"{"jd_match":"85%","missing_keywords":["python"],"profile_summary":"Good candidate"}"#,
        );
        let body = multipart_analyze_body(
            Some(&sample_pdf("Sample resume text")),
            Some("Looking for a Python developer"),
        );
        let (status, json_body) = post_analyze(app(gateway.clone()), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body,
            json!({
                "jd_match": "85%",
                "missing_keywords": ["python"],
                "profile_summary": "Good candidate"
            })
        );
        // Extracted PDF text and the form field both reach the prompt verbatim.
        let prompt = gateway.last_prompt();
        assert!(prompt.contains("Sample resume text"));
        assert!(prompt.contains("Looking for a Python developer"));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_reconciles_title_case_reply() {
        let gateway = MockGateway::replying(
            r#"{"JD Match":"72%","MissingKeywords":["docker"],"Profile Summary":"Solid"}"#,
        );
        let body = multipart_analyze_body(Some(&sample_pdf("Sample resume text")), Some("JD"));
        let (status, json_body) = post_analyze(app(gateway), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body,
            json!({
                "jd_match": "72%",
                "missing_keywords": ["docker"],
                "profile_summary": "Solid"
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_missing_job_description_is_422() {
        let gateway = MockGateway::replying("{}");
        let body = multipart_analyze_body(Some(&sample_pdf("Sample resume text")), None);
        let (status, json_body) = post_analyze(app(gateway.clone()), body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_unreadable_pdf_is_500_file_read_error() {
        let gateway = MockGateway::replying("{}");
        let body = multipart_analyze_body(Some(b"definitely not a pdf"), Some("JD"));
        let (status, json_body) = post_analyze(app(gateway.clone()), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body["error"]["code"], "FILE_READ_ERROR");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_job_market_passes_reply_through_unchanged() {
        let reply = json!({
            "demand_level": "High",
            "top_skills": ["Python"],
            "emerging_roles": ["AI Strategist"],
            "market_commentary": "Growing demand"
        });
        let gateway = MockGateway::replying(&reply.to_string());
        let (status, json_body) = post_json(
            app(gateway.clone()),
            "/career/job-market",
            json!({"target_role": "ML Engineer", "location": "Remote"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body, reply);
        let prompt = gateway.last_prompt();
        assert!(prompt.contains("ML Engineer"));
        assert!(prompt.contains("Remote"));
    }

    #[tokio::test]
    async fn test_resume_rewrite_normalizes_and_defaults() {
        // Reply uses the alternate convention and omits the score entirely.
        let gateway = MockGateway::replying(
            r#"{"RewrittenResume":"Updated resume","KeyAdjustments":["Added metrics"]}"#,
        );
        let (status, json_body) = post_json(
            app(gateway),
            "/resume/rewrite",
            json!({
                "resume_text": "Original resume",
                "job_description": "JD",
                "tone": "Friendly",
                "focus_role": "Data Scientist"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body,
            json!({
                "rewritten_resume": "Updated resume",
                "key_adjustments": ["Added metrics"],
                "keyword_alignment_score": "0%"
            })
        );
    }

    #[tokio::test]
    async fn test_resume_rewrite_tone_defaults_to_professional() {
        let gateway = MockGateway::replying("{}");
        let (status, _) = post_json(
            app(gateway.clone()),
            "/resume/rewrite",
            json!({
                "resume_text": "Resume",
                "job_description": "JD",
                "focus_role": "SRE"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(gateway.last_prompt().contains("DesiredTone: Professional"));
    }

    #[tokio::test]
    async fn test_career_coach_passes_history_into_prompt() {
        let gateway = MockGateway::replying(r#"{"reply":"ok","suggested_next_questions":[]}"#);
        let (status, json_body) = post_json(
            app(gateway.clone()),
            "/career/coach",
            json!({
                "message_history": [
                    {"role": "user", "content": "How do I negotiate salary?"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body["reply"], "ok");
        assert!(gateway
            .last_prompt()
            .contains("Role: user\nContent: How do I negotiate salary?"));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_500_parse_error_not_partial_success() {
        let gateway = MockGateway::replying("Sure! Here is my analysis: the resume looks fine.");
        let (status, json_body) = post_json(
            app(gateway),
            "/resume/skill-gap",
            json!({"resume_text": "Resume", "job_description": "JD"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body["error"]["code"], "MODEL_RESPONSE_PARSE_ERROR");
        assert_eq!(json_body["error"]["message"], "Failed to parse model response");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_underlying_message() {
        let gateway = MockGateway::failing();
        let (status, json_body) = post_json(
            app(gateway),
            "/jobs/parse",
            json!({"resume_text": "Resume", "job_description": "JD"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body["error"]["code"], "UPSTREAM_ERROR");
        assert!(json_body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_422() {
        let gateway = MockGateway::replying("{}");
        let request = Request::builder()
            .method("POST")
            .uri("/career/job-market")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"target_role": "ML Engineer"}"#))
            .unwrap();
        let response = app(gateway.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_recruiter_bulk_score_sends_numbered_resumes() {
        let gateway = MockGateway::replying(r#"{"candidate_rankings":[],"skill_matrix":[]}"#);
        let (status, _) = post_json(
            app(gateway.clone()),
            "/recruiter/bulk-score",
            json!({
                "resumes": ["First candidate", "Second candidate"],
                "job_description": "Platform role"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let prompt = gateway.last_prompt();
        assert!(prompt.contains("Resume_1:\nFirst candidate"));
        assert!(prompt.contains("Resume_2:\nSecond candidate"));
    }

    #[tokio::test]
    async fn test_salary_benchmark_passes_through_array_reply() {
        // Pass-through endpoints tolerate any JSON shape, arrays included.
        let gateway = MockGateway::replying(r#"[{"median_salary": "120k"}]"#);
        let (status, json_body) = post_json(
            app(gateway),
            "/salary/benchmark",
            json!({"role": "ML Engineer", "location": "Remote", "experience_years": 4.0}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json_body.is_array());
    }

    #[tokio::test]
    async fn test_progress_tracker_accepts_defaulted_collections() {
        let gateway = MockGateway::replying(r#"{"progress_score":"40%"}"#);
        let (status, _) = post_json(
            app(gateway.clone()),
            "/career/progress-tracker",
            json!({"resume_text": "Resume"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(gateway.last_prompt().contains("Certifications:\nNone"));
    }
}
