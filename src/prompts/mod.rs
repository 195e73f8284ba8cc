pub mod loader;

pub use loader::PromptTable;
