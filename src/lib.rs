pub mod accounts;
pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod reporting;
