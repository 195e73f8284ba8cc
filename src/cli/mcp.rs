use crate::cli::commands::McpArgs;
use crate::cli::scan::resolve_mode;
use crate::config::AegisConfig;
use crate::errors::AegisError;
use crate::mcp::McpServer;
use crate::pipeline::Pacing;
use crate::providers::Providers;

/// Stdout carries protocol frames only; diagnostics go to stderr via tracing.
pub async fn handle_mcp(args: McpArgs, config: AegisConfig) -> Result<(), AegisError> {
    let mode = resolve_mode(args.mode.as_deref(), &config)?;
    let providers = Providers::from_config(&config, Pacing::from_config(&config.pacing));
    let server = McpServer::new(providers.select(mode));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await
}
