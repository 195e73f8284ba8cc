pub mod log;
pub mod report_store;
pub mod utils;

pub use log::{AuditLog, AuditRecord};
pub use report_store::{ReportStore, StoredReport};
