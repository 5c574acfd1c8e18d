pub mod health;
pub mod status;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/", get(health::root_handler))
        .route(
            "/api/status",
            post(status::handle_create_status).get(status::handle_list_status),
        )
        // Generation API
        .route(
            "/api/generate-script",
            post(handlers::handle_generate_script),
        )
        .route("/api/generate-job", post(handlers::handle_generate_job))
        .route("/api/jobs", get(handlers::handle_list_jobs))
        .route("/api/jobs/:id", get(handlers::handle_get_job))
        .with_state(state)
}

/// CORS for the configured origins. No origins means any origin, without credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::fake::ScriptedGenerator;
    use crate::store::memory::MemoryStore;
    use crate::store::Collection;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/unused".to_string(),
            db_name: None,
            gemini_api_key: Some("test-key".to_string()),
            cors_origins: Vec::new(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn test_app(llm: ScriptedGenerator, store: Arc<MemoryStore>) -> Router {
        build_router(AppState {
            store,
            llm: Arc::new(llm),
            config: test_config(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_root_says_hello() {
        let app = test_app(ScriptedGenerator::replying(&[]), Arc::new(MemoryStore::new()));
        let (status, body) = send(app, get("/api/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello World"}));
    }

    #[tokio::test]
    async fn test_health_reports_model_configuration() {
        let app = test_app(ScriptedGenerator::replying(&[]), Arc::new(MemoryStore::new()));
        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model_configured"], true);
    }

    #[tokio::test]
    async fn test_status_checks_are_stored_and_listed() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(ScriptedGenerator::replying(&[]), store.clone());

        let (status, created) = send(
            app.clone(),
            post_json("/api/status", json!({"client_name": "uptime-bot"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["client_name"], "uptime-bot");
        assert!(created["id"].is_string());
        assert!(created["timestamp"].is_string());

        let (status, listed) = send(app, get("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
        assert_eq!(store.len(Collection::StatusChecks).await, 1);
    }

    #[tokio::test]
    async fn test_generate_script_returns_normalized_script() {
        let llm = ScriptedGenerator::replying(&["```json\n{\"hook\":\"Wow\",\"estimated_duration\":\"45s\"}\n```"]);
        let app = test_app(llm, Arc::new(MemoryStore::new()));

        let (status, body) = send(
            app,
            post_json(
                "/api/generate-script",
                json!({"product_name": "Glow", "target_audience": "parents", "tone": "Warm"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "script": "",
                "visual_hook": "Product showcase",
                "hook": "Wow",
                "body": "",
                "cta": "Get it now!",
                "estimated_duration": 45
            })
        );
    }

    #[tokio::test]
    async fn test_generate_script_model_failure_is_500_with_message() {
        let llm = ScriptedGenerator::failing(429, "quota exceeded");
        let app = test_app(llm, Arc::new(MemoryStore::new()));

        let (status, body) = send(
            app,
            post_json(
                "/api/generate-script",
                json!({"product_name": "Glow", "target_audience": "parents", "tone": "Warm"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Failed to generate script: API error (status 429): quota exceeded"
        );
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_generated_job_can_be_fetched_by_id() {
        let llm = ScriptedGenerator::replying(&["not json at all"]);
        let store = Arc::new(MemoryStore::new());
        let app = test_app(llm, store.clone());

        let (status, created) = send(
            app.clone(),
            post_json(
                "/api/generate-job",
                json!({"job_title": "Editor", "company": "Acme", "target_profile": "Detail-oriented"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["job_description"], "not json at all");
        assert_eq!(created["job_title"], "Editor");
        assert_eq!(created["key_responsibilities"], json!([]));
        assert_eq!(created["script"], Value::Null);
        assert_eq!(created["created_by"], "admin");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(app.clone(), get(&format!("/api/jobs/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, listed) = send(app, get("/api/jobs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_unknown_job_is_404() {
        let app = test_app(ScriptedGenerator::replying(&[]), Arc::new(MemoryStore::new()));

        let (status, body) = send(app.clone(), get("/api/jobs/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Job posting not found");

        let (status, _) = send(
            app,
            get("/api/jobs/6a2f41a3-c54c-4ce3-8d2c-0a5d8e3b5e11"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_job_storage_failure_is_500() {
        let llm = ScriptedGenerator::replying(&["{}"]);
        let app = test_app(llm, Arc::new(MemoryStore::failing_writes()));

        let (status, body) = send(
            app,
            post_json(
                "/api/generate-job",
                json!({"job_title": "Editor", "company": "Acme", "target_profile": "Anyone"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
    }

    #[tokio::test]
    async fn test_generate_job_rejects_missing_fields() {
        let app = test_app(ScriptedGenerator::replying(&[]), Arc::new(MemoryStore::new()));
        let (status, _) = send(
            app,
            post_json("/api/generate-job", json!({"job_title": "Editor"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_cors_allow_list_echoes_listed_origin() {
        let layer = cors_layer(&["https://app.example".to_string()]).unwrap();
        let app = test_app(ScriptedGenerator::replying(&[]), Arc::new(MemoryStore::new()))
            .layer(layer);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/jobs")
            .header(header::ORIGIN, "https://app.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
