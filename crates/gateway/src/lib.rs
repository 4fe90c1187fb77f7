//! HTTP API gateway for InboxPilot.
//!
//! Exposes the v1 agent endpoint and a health/status endpoint:
//!
//! - `POST /v1/agent/respond` — validate the envelope, dispatch to a skill
//! - `GET  /health`           — service status, registered skills, metrics
//!
//! The gateway owns everything the core treats as external: envelope
//! validation, the service-key check, request-id header override, error →
//! status-code mapping, and latency/error metrics.
//!
//! Built on Axum.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use inboxpilot_config::AppConfig;
use inboxpilot_core::AgentRequest;
use inboxpilot_runtime::AgentRuntime;
use inboxpilot_telemetry::{MetricsEngine, MetricsSnapshot};

/// Header that overrides the payload's requestId when present.
const REQUEST_ID_HEADER: &str = "x-request-id";
/// Header carrying the inbound service key.
const SERVICE_KEY_HEADER: &str = "x-agent-platform-key";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: AppConfig,
    pub runtime: Arc<AgentRuntime>,
    pub metrics: Arc<MetricsEngine>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

type SharedState = Arc<GatewayState>;

/// Build gateway state from configuration with the default runtime.
pub fn build_state(config: AppConfig) -> SharedState {
    Arc::new(GatewayState {
        config,
        runtime: Arc::new(AgentRuntime::default()),
        metrics: Arc::new(MetricsEngine::new()),
        start_time: chrono::Utc::now(),
    })
}

/// Build the Axum router with all gateway routes.
///
/// The service-key check applies to /v1 only; /health stays open so
/// monitoring can poll it freely.
pub fn build_router(state: SharedState) -> Router {
    let v1 = Router::new()
        .route("/agent/respond", post(respond_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            service_key_middleware,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
        .nest("/v1", v1)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = build_state(config);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Middleware ---

/// Validate the inbound service key when key protection is enabled.
///
/// Mismatch yields 401 and the core is never invoked.
async fn service_key_middleware(
    State(state): State<SharedState>,
    req: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = &state.config.gateway.inbound_api_key {
        let provided = req
            .headers()
            .get(SERVICE_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if provided != Some(expected.as_str()) {
            warn!("Rejected request with missing or invalid agent platform key");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    Ok(next.run(req).await)
}

// --- Handlers ---

/// Error body for 4xx responses from the agent endpoint.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    #[serde(rename = "requestId")]
    request_id: Option<String>,
}

async fn respond_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(mut request): Json<AgentRequest>,
) -> Response {
    let started = Instant::now();

    // Request ID can be sourced from header or payload; the header wins.
    if let Some(id) = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|id| !id.trim().is_empty())
    {
        request.request_id = id.to_string();
    }

    let request_id = (!request.request_id.trim().is_empty()).then(|| request.request_id.clone());

    if let Err(e) = request.validate() {
        state.metrics.record(elapsed_ms(started), true);
        warn!(error = %e, "Rejected malformed agent request");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                detail: e.to_string(),
                request_id,
            }),
        )
            .into_response();
    }

    match state.runtime.respond(&request) {
        Ok(response) => {
            state.metrics.record(elapsed_ms(started), false);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            state.metrics.record(elapsed_ms(started), true);
            warn!(error = %e, skill = %request.skill, "Skill resolution failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    detail: e.to_string(),
                    request_id,
                }),
            )
                .into_response()
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    service: String,
    version: &'static str,
    registered_skills: Vec<&'static str>,
    uptime_secs: i64,
    metrics: MetricsSnapshot,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.config.service_name.clone(),
        version: "v1",
        registered_skills: state.runtime.registered_skills(),
        uptime_secs: (chrono::Utc::now() - state.start_time).num_seconds(),
        metrics: state.metrics.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        build_state(AppConfig::default())
    }

    fn respond_request(payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/agent/respond")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn auth_payload() -> Value {
        json!({
            "version": "v1",
            "skill": "auth",
            "requestId": "test-request-1",
            "messages": [
                { "role": "user", "content": "I forgot my password and cannot login" }
            ],
            "context": {
                "surface": "login",
                "locale": "en-IN",
                "email": "user@example.com",
                "metadata": {}
            },
            "allowedActions": ["auth.forgot_password", "auth.open_login"],
            "requestedAction": null,
            "requestedActionPayload": {}
        })
    }

    #[tokio::test]
    async fn health_endpoint_reports_skills_and_metrics() {
        let app = build_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], "v1");
        assert_eq!(body["registeredSkills"], json!(["auth", "auth-login", "inbox"]));
        assert_eq!(body["metrics"]["requestCount"], 0);
    }

    #[tokio::test]
    async fn auth_scenario_returns_forgot_password_action() {
        let app = build_router(test_state());

        let response = app.oneshot(respond_request(&auth_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["intent"], "forgot_password");
        assert!((body["confidence"].as_f64().unwrap() - 0.92).abs() < 1e-6);
        assert_eq!(body["suggestedActions"][0]["name"], "auth.forgot_password");
        assert_eq!(body["uiHints"]["surface"], "login");
    }

    #[tokio::test]
    async fn inbox_scenario_returns_compose_action() {
        let app = build_router(test_state());
        let payload = json!({
            "version": "v1",
            "skill": "inbox",
            "requestId": "inbox-test-1",
            "messages": [
                { "role": "user", "content": "Please draft a quick reply for this thread" }
            ],
            "context": {
                "surface": "inbox",
                "locale": "en-IN",
                "metadata": { "threadId": "thread-1", "subject": "Q4 planning notes" }
            },
            "allowedActions": ["inbox.compose_reply_draft", "inbox.summarize_thread"]
        });

        let response = app.oneshot(respond_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["skill"], "inbox");
        assert_eq!(body["intent"], "compose_reply_draft");
        assert_eq!(body["suggestedActions"][0]["name"], "inbox.compose_reply_draft");
        assert_eq!(body["suggestedActions"][0]["payload"]["threadId"], "thread-1");
    }

    #[tokio::test]
    async fn unknown_skill_returns_400_with_detail() {
        let app = build_router(test_state());
        let payload = json!({
            "skill": "unknown-skill",
            "requestId": "invalid-skill-1",
            "messages": [{ "role": "user", "content": "hello" }]
        });

        let response = app.oneshot(respond_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "unsupported skill 'unknown-skill'");
        assert_eq!(body["requestId"], "invalid-skill-1");
    }

    #[tokio::test]
    async fn request_id_header_overrides_payload() {
        let app = build_router(test_state());
        let payload = json!({
            "skill": "unknown-skill",
            "requestId": "payload-id",
            "messages": [{ "role": "user", "content": "hello" }]
        });

        let request = Request::builder()
            .method("POST")
            .uri("/v1/agent/respond")
            .header("content-type", "application/json")
            .header(REQUEST_ID_HEADER, "header-id")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["requestId"], "header-id");
    }

    #[tokio::test]
    async fn blank_message_content_is_rejected() {
        let app = build_router(test_state());
        let payload = json!({
            "skill": "auth",
            "requestId": "bad-1",
            "messages": [{ "role": "user", "content": "   " }]
        });

        let response = app.oneshot(respond_request(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("content"));
    }

    #[tokio::test]
    async fn service_key_mismatch_is_unauthorized() {
        let mut config = AppConfig::default();
        config.gateway.inbound_api_key = Some("expected-key".into());
        let state = build_state(config);
        let app = build_router(state.clone());

        let response = app.oneshot(respond_request(&auth_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Health stays open.
        let app = build_router(state);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn matching_service_key_is_accepted() {
        let mut config = AppConfig::default();
        config.gateway.inbound_api_key = Some("expected-key".into());
        let app = build_router(build_state(config));

        let request = Request::builder()
            .method("POST")
            .uri("/v1/agent/respond")
            .header("content-type", "application/json")
            .header(SERVICE_KEY_HEADER, "expected-key")
            .body(Body::from(auth_payload().to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_count_handled_requests() {
        let state = test_state();

        let app = build_router(state.clone());
        app.oneshot(respond_request(&auth_payload())).await.unwrap();

        let app = build_router(state.clone());
        let payload = json!({
            "skill": "unknown-skill",
            "requestId": "m-1",
            "messages": [{ "role": "user", "content": "hello" }]
        });
        app.oneshot(respond_request(&payload)).await.unwrap();

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.request_count, 2);
        assert_eq!(snapshot.error_count, 1);
        assert!((snapshot.error_rate - 0.5).abs() < 1e-9);
    }
}
