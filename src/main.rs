use std::path::{Path, PathBuf};
use aegis::{cli, config, errors};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // stderr keeps stdout free for command output and MCP frames.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = run(cli).await;

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                errors::AegisError::Config(_) => 2,
                errors::AegisError::Authentication(_) => 4,
                errors::AegisError::InvalidInput(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: cli::Cli) -> Result<(), errors::AegisError> {
    let config_path = cli.config.as_deref().map(PathBuf::from);
    let quiet = cli.quiet;

    if let cli::Commands::Validate(args) = &cli.command {
        return handle_validate(Path::new(&args.config)).await;
    }

    let config = config::load_config(config_path.as_deref()).await?;
    match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args, config).await,
        cli::Commands::Scan(args) => cli::scan::handle_scan(args, config, quiet).await,
        cli::Commands::Graph(args) => cli::scan::handle_graph(args, config).await,
        cli::Commands::Remediate(args) => cli::remediate::handle_remediate(args, config, quiet).await,
        cli::Commands::Mcp(args) => cli::mcp::handle_mcp(args, config).await,
        cli::Commands::Validate(_) => Ok(()),
    }
}

async fn handle_validate(path: &Path) -> Result<(), errors::AegisError> {
    let config = config::parse_config(path).await?;
    println!(
        "Configuration is valid: {} (mode {}, {} accounts)",
        path.display(),
        config.mode,
        config.accounts.len()
    );
    let key = config
        .llm
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .map(config::credentials::mask_secret)
        .unwrap_or_else(|| "none".to_string());
    println!("LLM provider: {} (key {})", config.llm.provider, key);
    Ok(())
}
