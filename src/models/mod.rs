pub mod scan;
pub mod report;
pub mod graph;
pub mod log_entry;
pub mod remediation;
pub mod tier;

pub use scan::{ScanInput, ScanInputType};
pub use report::{IntelligenceReport, ReportDetails, SourceState, SourceStatus};
pub use graph::{EdgeKind, GraphEdge, GraphNode, NodeKind, SecurityGraph, Severity};
pub use log_entry::{LogEntry, LogLevel};
pub use remediation::{OutcomeKind, RemediationOutcome};
pub use tier::Tier;
