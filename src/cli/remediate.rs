use console::style;
use crate::api::create_app_state;
use crate::cli::commands::RemediateArgs;
use crate::cli::scan::{resolve_mode, spinner};
use crate::config::AegisConfig;
use crate::errors::AegisError;
use crate::models::{LogEntry, LogLevel, ScanInput, ScanInputType, Tier};
use crate::pipeline::LogSink;
use crate::reporting::format_remediation_summary;

/// Prints progress entries to the terminal as they arrive.
struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn emit(&self, entry: LogEntry) {
        let tag = match entry.level {
            LogLevel::Info => style("INFO ").cyan(),
            LogLevel::Success => style("OK   ").green(),
            LogLevel::Warning => style("WARN ").yellow(),
            LogLevel::Error => style("ERROR").red().bold(),
        };
        println!("{} {} {}", style(&entry.timestamp).dim(), tag, entry.message);
    }
}

pub async fn handle_remediate(args: RemediateArgs, config: AegisConfig, quiet: bool) -> Result<(), AegisError> {
    let input_type: ScanInputType = args.input_type.parse()?;
    let input = ScanInput::new(input_type, &args.identity);
    input.validate()?;
    let mode = resolve_mode(args.mode.as_deref(), &config)?;

    let state = create_app_state(config)?;
    let tier: Tier = match args.tier.as_deref() {
        Some(tier) => tier.parse()?,
        None => state.accounts.tier_for(&input.value),
    };

    let provider = state.providers.select(mode);
    let bar = (!quiet).then(|| spinner(format!("Scanning {} ({})", input.value, mode)));
    let result = provider.scan_identity(&input).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let report = result?;

    let outcome = state
        .orchestrator
        .run(&input.value, input_type, tier, &report, &ConsoleSink)
        .await;

    println!();
    println!("{}", format_remediation_summary(&report, &outcome));
    Ok(())
}
