pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{chat, cover_letter, render, resume_analyzer, roadmap, users};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/user", post(users::handle_sync_user))
        // Resume analyzer
        .route(
            "/api/resume-analyzer",
            post(resume_analyzer::handlers::handle_analyze)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/resume-analyzer/history",
            get(resume_analyzer::handlers::handle_history)
                .delete(resume_analyzer::handlers::handle_delete),
        )
        // Cover letters
        .route(
            "/api/cover-letter",
            post(cover_letter::handlers::handle_generate),
        )
        .route(
            "/api/cover-letter/history",
            get(cover_letter::handlers::handle_history)
                .delete(cover_letter::handlers::handle_delete),
        )
        .route(
            "/api/cover-letter/pdf",
            post(render::handlers::handle_cover_letter_pdf),
        )
        .route(
            "/api/cover-letter/docx",
            post(render::handlers::handle_cover_letter_docx),
        )
        // Roadmaps
        .route("/api/roadmap", post(roadmap::handlers::handle_generate))
        .route(
            "/api/roadmap/history",
            get(roadmap::handlers::handle_history).delete(roadmap::handlers::handle_delete),
        )
        // Career chat
        .route(
            "/api/ai-career-chat-agent",
            post(chat::handlers::handle_chat),
        )
        .route(
            "/api/ai-career-chat-agent/history",
            get(chat::handlers::handle_history)
                .post(chat::handlers::handle_save_message)
                .delete(chat::handlers::handle_delete),
        )
        // Resume builder
        .route(
            "/api/resume/templates",
            get(render::handlers::handle_templates),
        )
        .route("/api/resume/pdf", post(render::handlers::handle_resume_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::USER_EMAIL_HEADER;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "career-coach-test-boundary";

    async fn send(request: Request<Body>) -> Response {
        build_router(AppState::for_tests())
            .oneshot(request)
            .await
            .unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_EMAIL_HEADER, "ada@example.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/resume-analyzer")
            .header(USER_EMAIL_HEADER, "ada@example.com")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_code(response: Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        value["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "career-coach-api");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let response = send(
            Request::builder()
                .uri("/api/roadmap/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_analyzer_requires_resume_file() {
        let response = send(multipart_request(&[(
            "jobDescription",
            None,
            b"Rust engineer",
        )]))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyzer_rejects_non_pdf() {
        let response = send(multipart_request(&[(
            "resume",
            Some("resume.pdf"),
            b"just some text",
        )]))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyzer_enforces_upload_limit() {
        let oversized = vec![b'a'; 128 * 1024];
        let response = send(multipart_request(&[(
            "resume",
            Some("resume.pdf"),
            &oversized,
        )]))
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cover_letter_requires_both_fields() {
        let response = send(json_request(
            Method::POST,
            "/api/cover-letter",
            json!({"jobDescription": "Rust engineer", "userDetails": "  "}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_roadmap_requires_target_field() {
        let response = send(json_request(
            Method::POST,
            "/api/roadmap",
            json!({"timeline": "3 months"}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_round_trip_through_advisor() {
        let response = send(json_request(
            Method::POST,
            "/api/ai-career-chat-agent",
            json!({"userInput": "How do I learn Rust?"}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["output"], "You asked: How do I learn Rust?");
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_input() {
        let response = send(json_request(
            Method::POST,
            "/api/ai-career-chat-agent",
            json!({"userInput": "   "}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_save_message_rejects_unknown_role() {
        let response = send(json_request(
            Method::POST,
            "/api/ai-career-chat-agent/history",
            json!({"role": "system", "content": "hi", "chatId": "2f1e0c3a-7d3b-4c1e-9a0f-1b2c3d4e5f60"}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_rejects_invalid_id() {
        for uri in [
            "/api/resume-analyzer/history",
            "/api/cover-letter/history?id=abc",
            "/api/roadmap/history?id=-4",
            "/api/ai-career-chat-agent/history?chatId=not-a-uuid",
        ] {
            let response = send(json_request(Method::DELETE, uri, json!({}))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_templates_lists_corporate() {
        let response = send(
            Request::builder()
                .uri("/api/resume/templates")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value[0]["id"], "corporate");
    }

    #[tokio::test]
    async fn test_resume_pdf_download() {
        let response = send(json_request(
            Method::POST,
            "/api/resume/pdf",
            json!({
                "personalInfo": {"fullName": "Ada Lovelace", "email": "ada@example.com"},
                "skills": [{"category": "Languages", "skills": ["Rust", "SQL"]}]
            }),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada_Lovelace_Resume.pdf\""
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_resume_pdf_requires_name() {
        let response = send(json_request(
            Method::POST,
            "/api/resume/pdf",
            json!({"personalInfo": {"fullName": " "}}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cover_letter_pdf() {
        let response = send(json_request(
            Method::POST,
            "/api/cover-letter/pdf",
            json!({"coverLetter": "Dear Hiring Manager,\n\nThank you."}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Cover_Letter.pdf\""
        );

        let response = send(json_request(
            Method::POST,
            "/api/cover-letter/pdf",
            json!({"coverLetter": ""}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cover_letter_docx() {
        let response = send(json_request(
            Method::POST,
            "/api/cover-letter/docx",
            json!({"coverLetter": "Dear Hiring Manager,\n\nThank you."}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Cover_Letter.docx\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"PK\x03\x04"));

        let response = send(json_request(
            Method::POST,
            "/api/cover-letter/docx",
            json!({"coverLetter": "  "}),
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
