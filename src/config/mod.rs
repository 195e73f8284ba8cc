pub mod parser;
pub mod schema;
pub mod types;
pub mod services;
pub mod credentials;

pub use types::*;
pub use services::{ServiceName, ServiceRegistry, ServiceSettings};
pub use parser::{load_config, parse_config};
