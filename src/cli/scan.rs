use std::time::Duration;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use crate::cli::commands::{GraphArgs, ScanArgs};
use crate::config::{AegisConfig, OperationMode};
use crate::errors::AegisError;
use crate::models::{ScanInput, ScanInputType, SourceState};
use crate::pipeline::Pacing;
use crate::providers::Providers;

pub(crate) fn resolve_mode(requested: Option<&str>, config: &AegisConfig) -> Result<OperationMode, AegisError> {
    match requested {
        Some(mode) => mode.parse(),
        None => Ok(config.mode),
    }
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

pub async fn handle_scan(args: ScanArgs, config: AegisConfig, quiet: bool) -> Result<(), AegisError> {
    let input_type: ScanInputType = args.input_type.parse()?;
    let input = ScanInput::new(input_type, &args.value);
    input.validate()?;

    let mode = resolve_mode(args.mode.as_deref(), &config)?;
    let providers = Providers::from_config(&config, Pacing::from_config(&config.pacing));
    let provider = providers.select(mode);

    let bar = (!quiet && !args.json).then(|| spinner(format!("Scanning {} ({}, {})", input.value, input_type, mode)));
    let result = provider.scan_identity(&input).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let risk = match report.risk_score {
        score if score >= 70 => style(format!("{}/100", score)).red().bold(),
        score if score >= 30 => style(format!("{}/100", score)).yellow().bold(),
        score => style(format!("{}/100", score)).green().bold(),
    };
    println!("{} {}", style("Target:").bold(), input.value);
    println!("{} {}", style("Risk score:").bold(), risk);
    println!("{} {}", style("Breaches found:").bold(), report.found_breaches);
    println!("{} {}", style("Summary:").bold(), report.summary);

    if let Some(sources) = &report.details.sources {
        println!();
        for source in sources {
            let status = match source.status {
                SourceState::Active => style("ACTIVE").green(),
                SourceState::Skipped => style("SKIPPED").dim(),
                SourceState::Error => style("ERROR").red(),
            };
            match &source.reason {
                Some(reason) => println!("  {:<14} {} ({})", source.source, status, reason),
                None => println!("  {:<14} {}", source.source, status),
            }
        }
    }
    Ok(())
}

pub async fn handle_graph(args: GraphArgs, config: AegisConfig) -> Result<(), AegisError> {
    let identity = args.identity.trim();
    if identity.is_empty() {
        return Err(AegisError::InvalidInput("identity is required".into()));
    }
    let mode = resolve_mode(args.mode.as_deref(), &config)?;
    let providers = Providers::from_config(&config, Pacing::from_config(&config.pacing));
    let graph = providers.select(mode).threat_graph(identity).await?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
