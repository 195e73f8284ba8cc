pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;
pub mod ndjson;

use std::sync::Arc;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{http::StatusCode, Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::accounts::AccountDirectory;
use crate::audit::{AuditLog, ReportStore};
use crate::config::AegisConfig;
use crate::errors::AegisError;
use crate::llm::{self, LLMProvider};
use crate::pipeline::{Pacing, RemediationOrchestrator, SimulatedEngine};
use crate::prompts::PromptTable;
use crate::providers::Providers;
use tracing::error;

pub use errors::INTERNAL_ERROR_MESSAGE;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AegisConfig>,
    pub providers: Providers,
    pub accounts: Arc<AccountDirectory>,
    pub orchestrator: Arc<RemediationOrchestrator>,
    pub audit: Arc<AuditLog>,
    pub reports: Arc<ReportStore>,
    pub pacing: Pacing,
}

pub fn create_app_state(config: AegisConfig) -> Result<AppState, AegisError> {
    let llm: Arc<dyn LLMProvider> = Arc::from(llm::create_provider(&config.llm)?);
    create_app_state_with_llm(config, llm)
}

/// Same as [`create_app_state`] with an explicit generative-text backend.
pub fn create_app_state_with_llm(
    config: AegisConfig,
    llm: Arc<dyn LLMProvider>,
) -> Result<AppState, AegisError> {
    let pacing = Pacing::from_config(&config.pacing);
    let prompts = Arc::new(PromptTable::load(config.llm.prompts_dir.as_deref())?);
    let orchestrator = RemediationOrchestrator::new(
        llm,
        Arc::new(SimulatedEngine::new(pacing)),
        prompts,
        pacing,
    );

    Ok(AppState {
        providers: Providers::from_config(&config, pacing),
        accounts: Arc::new(AccountDirectory::new(&config.accounts)),
        orchestrator: Arc::new(orchestrator),
        audit: Arc::new(AuditLog::new(&config.storage.audit_log)),
        reports: Arc::new(ReportStore::new(&config.storage.reports_dir, &config.storage.public_base_url)),
        pacing,
        config: Arc::new(config),
    })
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": INTERNAL_ERROR_MESSAGE}))).into_response()
}

pub fn build_router(state: AppState) -> Router {
    let remediate = Router::new()
        .route("/api/remediate", post(routes::remediate::remediate))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::api_key_middleware));

    let routes = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/scan", post(routes::scans::scan_identity))
        .route("/api/graph", get(routes::scans::threat_graph))
        .route("/api/reports/:owner/:file", get(routes::reports::get_report))
        .merge(remediate);

    with_service_layers(routes).with_state(state)
}

/// Panic capture, CORS and request tracing shared by every route.
fn with_service_layers(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
