use std::path::{Path, PathBuf};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use crate::errors::AegisError;
use crate::models::Tier;
use super::utils::storage_error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub timestamp: String,
    pub identity: String,
    pub outcome: String,
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_id: Option<String>,
}

/// Append-only JSON-lines audit trail.
pub struct AuditLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AuditLog {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(
        &self,
        identity: &str,
        outcome: &str,
        tier: Tier,
        threat_id: Option<&str>,
    ) -> Result<AuditRecord, AegisError> {
        let record = AuditRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            identity: identity.to_string(),
            outcome: outcome.to_string(),
            tier,
            threat_id: threat_id.map(str::to_string),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| storage_error(parent, e))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| storage_error(&self.path, e))?;
        file.write_all(line.as_bytes()).await.map_err(|e| storage_error(&self.path, e))?;
        file.flush().await.map_err(|e| storage_error(&self.path, e))?;
        Ok(record)
    }

    pub async fn read_all(&self) -> Result<Vec<AuditRecord>, AegisError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(AegisError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(&dir.path().join("nested").join("audit.jsonl"));

        let first = log.append("pro@x.com", "AUTHORIZED", Tier::Pro, Some("T1")).await.unwrap();
        log.append("premium@x.com", "AUTHORIZED", Tier::Premium, None).await.unwrap();

        let records = log.read_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], first);
        assert_eq!(records[0].threat_id.as_deref(), Some("T1"));
        assert_eq!(records[1].tier, Tier::Premium);
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn test_missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(&dir.path().join("audit.jsonl"));
        assert!(log.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let log = AuditLog::new(&blocker.join("audit.jsonl"));
        let err = log.append("a@b.com", "AUTHORIZED", Tier::Pro, None).await.unwrap_err();
        assert!(matches!(err, AegisError::Storage(_)));
    }
}
