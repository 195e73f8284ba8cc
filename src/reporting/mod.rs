pub mod formatter;

pub use formatter::{format_compliance_report, format_remediation_summary, ComplianceContext};
