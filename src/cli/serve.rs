use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::AegisConfig;
use crate::errors::AegisError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, config: AegisConfig) -> Result<(), AegisError> {
    info!(host = %args.host, port = args.port, mode = %config.mode, "Starting API server");

    let state = api::create_app_state(config)?;
    info!(
        audit_log = %state.audit.path().display(),
        pacing = state.pacing.is_enabled(),
        accounts = state.accounts.len(),
        "Application state ready"
    );
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AegisError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
