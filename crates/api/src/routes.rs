//! Route-Definitionen fuer die REST-API (/api/v1/...)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;

use crate::{handlers, ApiState};

/// GET / – Begruessung mit Versionsinfo
async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Pruefstand API",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /healthz – Health-Check-Endpunkt
async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Erstellt den vollstaendigen Router (Root, Health und /api/v1)
pub fn api_router() -> Router<ApiState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        // Auth
        .route("/api/v1/auth/signup", post(handlers::auth::signup))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/me", get(handlers::auth::me))
        // Domains
        .route("/api/v1/domains", get(handlers::domains::list_domains))
        .route("/api/v1/domains", post(handlers::domains::create_domain))
        .route("/api/v1/domains/:id", get(handlers::domains::get_domain))
        .route("/api/v1/domains/:id", put(handlers::domains::update_domain))
        // Agent-I/O
        .route(
            "/api/v1/domains/:domain_id/agent-io",
            get(handlers::kontext::list_agent_io).post(handlers::kontext::create_agent_io),
        )
        .route(
            "/api/v1/domains/:domain_id/agent-io/:id",
            delete(handlers::kontext::delete_agent_io),
        )
        // User Stories
        .route(
            "/api/v1/domains/:domain_id/user-stories",
            get(handlers::kontext::list_stories).post(handlers::kontext::create_story),
        )
        .route(
            "/api/v1/domains/:domain_id/user-stories/:id",
            delete(handlers::kontext::delete_story),
        )
        // Prompts
        .route(
            "/api/v1/domains/:domain_id/prompts",
            get(handlers::kontext::list_prompts).post(handlers::kontext::create_prompt),
        )
        .route(
            "/api/v1/domains/:domain_id/prompts/:id",
            put(handlers::kontext::update_prompt).delete(handlers::kontext::delete_prompt),
        )
        // Trainingsbeispiele
        .route(
            "/api/v1/domains/:domain_id/training-examples",
            get(handlers::kontext::list_beispiele).post(handlers::kontext::create_beispiel),
        )
        .route(
            "/api/v1/domains/:domain_id/training-examples/:id",
            delete(handlers::kontext::delete_beispiel),
        )
        // Dokumente
        .route(
            "/api/v1/domains/:domain_id/documents",
            get(handlers::dokumente::list_documents).post(handlers::dokumente::upload_document),
        )
        .route(
            "/api/v1/domains/:domain_id/documents/:id",
            delete(handlers::dokumente::delete_document),
        )
        // Testfaelle & Evaluation
        .route(
            "/api/v1/domains/:domain_id/test-sets",
            get(handlers::evaluation::list_test_sets).post(handlers::evaluation::create_test_set),
        )
        .route(
            "/api/v1/domains/:domain_id/test-sets/:id",
            delete(handlers::evaluation::delete_test_set),
        )
        .route(
            "/api/v1/domains/:domain_id/run-eval",
            post(handlers::evaluation::run_eval),
        )
        .route(
            "/api/v1/domains/:domain_id/metrics",
            get(handlers::evaluation::get_metrics),
        )
        // Dashboard
        .route("/api/v1/dashboard/stats", get(handlers::dashboard::get_stats))
        .route(
            "/api/v1/dashboard/recent-evaluations",
            get(handlers::dashboard::get_recent_evaluations),
        )
        .route(
            "/api/v1/dashboard/high-risk-agents",
            get(handlers::dashboard::get_high_risk_agents),
        )
}
