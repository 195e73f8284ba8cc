use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use crate::api::AppState;
use crate::errors::AegisError;

pub async fn get_report(
    State(state): State<AppState>,
    Path((owner, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, AegisError> {
    let content = state.reports.load(&owner, &file).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], content))
}
