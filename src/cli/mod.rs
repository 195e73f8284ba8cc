pub mod commands;
pub mod mcp;
pub mod remediate;
pub mod scan;
pub mod serve;

pub use commands::{Cli, Commands};
