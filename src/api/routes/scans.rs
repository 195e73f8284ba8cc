use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use crate::api::models::{parse_json_body, GraphQuery, ScanRequest};
use crate::api::AppState;
use crate::config::OperationMode;
use crate::errors::AegisError;
use crate::models::{IntelligenceReport, ScanInput, ScanInputType, SecurityGraph};
use tracing::info;

fn resolve_mode(state: &AppState, requested: Option<&str>) -> Result<OperationMode, AegisError> {
    match requested.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mode) => mode.parse(),
        None => Ok(state.config.mode),
    }
}

pub async fn scan_identity(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IntelligenceReport>, AegisError> {
    let req: ScanRequest = parse_json_body(&body)?;
    let input_type: ScanInputType = req.input_type.parse()?;
    let input = ScanInput::new(input_type, &req.value);
    input.validate()?;

    let mode = resolve_mode(&state, req.mode.as_deref())?;
    let provider = state.providers.select(mode);
    info!(scan_type = %input.input_type, mode = %mode, provider = provider.provider_name(), "Scan requested");

    let report = provider.scan_identity(&input).await?;
    Ok(Json(report))
}

pub async fn threat_graph(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<SecurityGraph>, AegisError> {
    let identity = query
        .identity
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| AegisError::InvalidInput("identity query parameter is required".into()))?;

    let mode = resolve_mode(&state, query.mode.as_deref())?;
    let graph = state.providers.select(mode).threat_graph(identity).await?;
    Ok(Json(graph))
}
