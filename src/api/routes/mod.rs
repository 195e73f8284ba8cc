pub mod health;
pub mod remediate;
pub mod reports;
pub mod scans;
