//! # itops-api: HTTP Service for the Issue Tracker
//!
//! Thin axum layer over [`itops_state::IssueTracker`]: translates JSON
//! requests into tracker calls and tracker results into JSON responses.
//!
//! ## API Surface
//!
//! | Route                   | Module                 |
//! |-------------------------|------------------------|
//! | `POST /issue`           | [`routes::issues`]     |
//! | `GET /issues`           | [`routes::issues`]     |
//! | `GET/PATCH /issue/{id}` | [`routes::issues`]     |
//! | `GET /users`            | [`routes::users`]      |
//! | `GET /openapi.json`     | [`openapi`]            |
//! | `GET /health/*`         | this module            |
//! | `GET /metrics`          | this module            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Every error, including unknown routes, is rendered as
//! `{"error": <message>, "code": <status>}`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(routes::issues::router())
        .merge(routes::users::router())
        .merge(openapi::router())
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if let Some(metrics) = state.metrics.clone() {
        router = router
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .fallback(not_found)
            .layer(from_fn_with_state(
                metrics,
                middleware::metrics::metrics_middleware,
            ));
    } else {
        router = router.fallback(not_found);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
}

async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {method} {}", uri.path()))
}

/// GET /metrics: Prometheus scrape endpoint.
///
/// Refreshes the issues-by-status gauge before encoding.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let Some(metrics) = state.metrics.as_ref() else {
        return AppError::NotFound("metrics are disabled".to_string()).into_response();
    };

    for (status, count) in state.tracker.status_counts() {
        metrics.set_issue_count(status.as_str(), count);
    }

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => AppError::Internal(e).into_response(),
    }
}

/// Liveness probe: 200 whenever the process is serving.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the store answers.
async fn readiness(State(state): State<AppState>) -> &'static str {
    let next = state.tracker.next_issue_id();
    tracing::trace!(next_issue_id = %next, "readiness probe");
    "ready"
}
