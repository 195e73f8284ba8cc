use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aegis", version, about = "Identity exposure scanner with tiered remediation workflows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Scan an identity for exposure
    Scan(ScanArgs),
    /// Print the threat graph for an identity
    Graph(GraphArgs),
    /// Run the remediation workflow for an identity in the terminal
    Remediate(RemediateArgs),
    /// Serve the scan tool over MCP (JSON-RPC on stdio)
    Mcp(McpArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Input type: EMAIL, MOBILE, SOCIAL
    #[arg(short = 't', long = "type", default_value = "EMAIL")]
    pub input_type: String,

    /// Identity to scan
    #[arg(long)]
    pub value: String,

    /// Provider mode: SIMULATION or REAL (defaults to config)
    #[arg(long)]
    pub mode: Option<String>,

    /// Output the raw report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct GraphArgs {
    /// Identity whose graph to print
    #[arg(long)]
    pub identity: String,

    /// Provider mode: SIMULATION or REAL (defaults to config)
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Clone)]
pub struct RemediateArgs {
    /// Identity to remediate
    #[arg(long)]
    pub identity: String,

    /// Input type: EMAIL, MOBILE, SOCIAL
    #[arg(short = 't', long = "type", default_value = "EMAIL")]
    pub input_type: String,

    /// Tier override: FREE, PRO, PREMIUM (defaults to the account directory)
    #[arg(long)]
    pub tier: Option<String>,

    /// Provider mode: SIMULATION or REAL (defaults to config)
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Clone)]
pub struct McpArgs {
    /// Provider mode: SIMULATION or REAL (defaults to config)
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
