//! HTTP routes
//!
//! The page itself is server-rendered: forms post to `/search` or
//! `/location`, the controller runs, and the browser is redirected back to
//! `/` to see the new state. A small JSON API mirrors the same operations.

use crate::client::BackendApi;
use crate::controller::state::PageSnapshot;
use crate::controller::SubmitOutcome;
use crate::error::Error;
use crate::geo::{LocationProvider, UserLocation};
use crate::render::html::render_page;
use crate::server::state::AppState;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::debug;

/// Locate the static assets directory
///
/// Tries relative to cwd first, then next to the executable.
fn static_dir() -> PathBuf {
    let local = PathBuf::from("static");
    if local.exists() {
        return local;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

/// Create the router
pub fn create_router<B, L>(state: Arc<AppState<B, L>>) -> Router
where
    B: BackendApi + 'static,
    L: LocationProvider + 'static,
{
    Router::new()
        .route("/", get(index_handler::<B, L>))
        .route("/search", post(search_form_handler::<B, L>))
        .route("/location", post(location_form_handler::<B, L>))
        .route("/api/state", get(state_handler::<B, L>))
        .route("/api/search", post(search_api_handler::<B, L>))
        .route("/api/location", post(location_api_handler::<B, L>))
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir()))
        .with_state(state)
}

/// Search request body, from the page form or the JSON API
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "BUSY" => StatusCode::CONFLICT,
            "EMPTY_QUERY" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::BackendRequest(_) => "BACKEND_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Search page
///
/// GET /
async fn index_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
) -> Result<Html<String>, ApiError> {
    let snapshot = state.controller.snapshot().await;
    Ok(Html(render_page(&snapshot, state.maps_key())?))
}

/// Page form submit
///
/// POST /search
async fn search_form_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
    Form(req): Form<SearchRequest>,
) -> Redirect {
    let outcome = state.controller.submit(&req.query).await;
    debug!("Form search finished: {}", outcome_name(&outcome));
    Redirect::to("/")
}

/// Page "update location" button
///
/// POST /location
async fn location_form_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
) -> Redirect {
    state.controller.refresh_location().await;
    Redirect::to("/")
}

/// Current page state
///
/// GET /api/state
async fn state_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
) -> Json<PageSnapshot> {
    Json(state.controller.snapshot().await)
}

/// Run a search and return the resulting page state
///
/// POST /api/search
async fn search_api_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<PageSnapshot>, ApiError> {
    match state.controller.submit(&req.query).await {
        SubmitOutcome::Rejected => Err(ApiError {
            error: "Query must not be empty".to_string(),
            code: "EMPTY_QUERY".to_string(),
        }),
        SubmitOutcome::Busy => Err(ApiError {
            error: "A search is already in progress".to_string(),
            code: "BUSY".to_string(),
        }),
        SubmitOutcome::Finished(_) => Ok(Json(state.controller.snapshot().await)),
    }
}

/// Location refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationResponse {
    pub location: Option<UserLocation>,
}

/// Re-resolve the user's location
///
/// POST /api/location
async fn location_api_handler<B: BackendApi, L: LocationProvider>(
    State(state): State<Arc<AppState<B, L>>>,
) -> Json<LocationResponse> {
    Json(LocationResponse {
        location: state.controller.refresh_location().await,
    })
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe
///
/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn outcome_name(outcome: &SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Rejected => "rejected",
        SubmitOutcome::Busy => "busy",
        SubmitOutcome::Finished(_) => "finished",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::testing::{MockBackend, MockLocator};
    use crate::controller::PageController;
    use crate::geo::Coordinates;
    use crate::model::fixtures;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    type TestState = AppState<MockBackend, MockLocator>;

    fn create_test_state(backend: MockBackend, coords: Option<Coordinates>) -> Arc<TestState> {
        let mut config = Config::default();
        config.maps.embed_api_key = "test-key".to_string();
        Arc::new(AppState::new(
            Arc::new(config),
            PageController::new(backend, MockLocator::new(coords)),
        ))
    }

    fn ok_backend(places: usize) -> MockBackend {
        let places = (0..places)
            .map(|i| fixtures::place(&format!("p{}", i), -6.2, 106.8))
            .collect();
        MockBackend::replying(Ok(fixtures::response(places)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_idle() {
        let app = create_router(create_test_state(ok_backend(0), None));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Find Places with AI"));
        assert!(html.contains("Where can I eat ramen near me?"));
    }

    #[tokio::test]
    async fn test_form_search_redirects_and_renders_result() {
        let state = create_test_state(ok_backend(2), None);
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(form_post("/search", "query=Where+can+I+eat+ramen+near+Blok+M%3F"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let queries = state.controller.backend().queries.lock().unwrap().clone();
        assert_eq!(queries[0].query, "Where can I eat ramen near Blok M?");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Here are ramen spots"));
        assert_eq!(html.matches("<article class=\"card\">").count(), 2);
        assert!(html.contains("<iframe"));
    }

    #[tokio::test]
    async fn test_form_search_blank_query() {
        let state = create_test_state(ok_backend(0), None);
        let app = create_router(state.clone());

        let response = app.oneshot(form_post("/search", "query=+++")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.controller.backend().query_count(), 0);
    }

    #[tokio::test]
    async fn test_api_search_empty_places_has_no_map() {
        let app = create_router(create_test_state(ok_backend(0), None));

        let response = app
            .oneshot(json_post(
                "/api/search",
                serde_json::json!({"query": "Where can I eat ramen near Blok M?"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot["state"]["status"], "success");
        assert_eq!(snapshot["state"]["data"]["ai_response"], "Here are ramen spots");
        assert_eq!(snapshot["state"]["data"]["places"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_api_search_empty_query() {
        let app = create_router(create_test_state(ok_backend(0), None));

        let response = app
            .oneshot(json_post("/api/search", serde_json::json!({"query": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(err.code, "EMPTY_QUERY");
    }

    #[tokio::test]
    async fn test_api_search_backend_error_shows_banner() {
        let backend = MockBackend::replying(Err("An error occurred".into()));
        let app = create_router(create_test_state(backend, None));

        let response = app
            .clone()
            .oneshot(json_post("/api/search", serde_json::json!({"query": "ramen"})))
            .await
            .unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot["state"]["status"], "error");
        assert_eq!(snapshot["state"]["data"], "An error occurred");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("An error occurred"));
    }

    #[tokio::test]
    async fn test_api_search_busy() {
        let (backend, gate) = ok_backend(0).gated();
        let entered = backend.entered.clone();
        let state = create_test_state(backend, None);
        let app = create_router(state.clone());

        let first = {
            let app = app.clone();
            tokio::spawn(async move {
                app.oneshot(json_post("/api/search", serde_json::json!({"query": "ramen"})))
                    .await
                    .unwrap()
            })
        };
        entered.notified().await;

        let response = app
            .clone()
            .oneshot(json_post("/api/search", serde_json::json!({"query": "pizza"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Searching..."));

        gate.notify_one();
        assert_eq!(first.await.unwrap().status(), StatusCode::OK);
        assert_eq!(state.controller.backend().query_count(), 1);
    }

    #[tokio::test]
    async fn test_api_search_after_abandoned_request() {
        let (backend, gate) = ok_backend(0).gated();
        let entered = backend.entered.clone();
        let state = create_test_state(backend, None);
        let app = create_router(state.clone());

        // Client goes away while the backend is still answering
        let first = app
            .clone()
            .oneshot(json_post("/api/search", serde_json::json!({"query": "ramen"})));
        tokio::select! {
            _ = first => panic!("gated search should not finish"),
            _ = entered.notified() => {}
        }

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Search was cancelled"));
        assert!(!html.contains("Searching..."));

        gate.notify_one();
        let response = app
            .oneshot(json_post("/api/search", serde_json::json!({"query": "pizza"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot["state"]["status"], "success");
        assert_eq!(state.controller.backend().query_count(), 2);
    }

    #[tokio::test]
    async fn test_location_refresh_updates_label_and_examples() {
        let backend = ok_backend(0).with_city("Menteng");
        let app = create_router(create_test_state(backend, Some(Coordinates::new(-6.2, 106.8))));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/location")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let loc: LocationResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(loc.location.unwrap().label.as_deref(), Some("Menteng"));

        let response = app
            .oneshot(Request::builder().uri("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot["examples"][1], "Find coffee shops near Menteng");
    }

    #[tokio::test]
    async fn test_location_form_redirects() {
        let app = create_router(create_test_state(ok_backend(0), None));

        let response = app.oneshot(form_post("/location", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(create_test_state(ok_backend(0), None));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(health.status, "healthy");
    }
}
