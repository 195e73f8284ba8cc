pub mod types;
pub mod classification;

pub use types::AegisError;
pub use classification::ErrorClassification;
