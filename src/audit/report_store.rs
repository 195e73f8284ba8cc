use std::path::{Path, PathBuf};
use chrono::Utc;
use uuid::Uuid;
use crate::errors::AegisError;
use super::utils::{atomic_write, storage_error};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub owner: String,
    pub file: String,
    pub path: PathBuf,
    pub url: String,
}

/// Plain-text compliance reports stored as `<root>/<owner>/<file>`.
pub struct ReportStore {
    root: PathBuf,
    public_base_url: String,
}

impl ReportStore {
    pub fn new(root: &Path, public_base_url: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn store(&self, identity: &str, content: &str) -> Result<StoredReport, AegisError> {
        let owner = owner_segment(identity);
        let file = format!(
            "{}-{}.txt",
            Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
            Uuid::new_v4().simple()
        );
        let path = self.root.join(&owner).join(&file);
        atomic_write(&path, content).await?;
        debug!(path = %path.display(), "Stored compliance report");

        let url = format!("{}/api/reports/{}/{}", self.public_base_url, owner, file);
        Ok(StoredReport { owner, file, path, url })
    }

    pub async fn load(&self, owner: &str, file: &str) -> Result<String, AegisError> {
        validate_segment(owner)?;
        validate_segment(file)?;
        let path = self.root.join(owner).join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AegisError::NotFound(format!("Report {}/{}", owner, file)))
            }
            Err(e) => Err(storage_error(&path, e)),
        }
    }
}

fn allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@')
}

/// Directory name derived from an identity.
pub fn owner_segment(identity: &str) -> String {
    let cleaned: String = identity
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if allowed_char(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() { "anonymous".to_string() } else { cleaned }
}

fn validate_segment(segment: &str) -> Result<(), AegisError> {
    let valid = !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.starts_with('.')
        && segment.chars().all(allowed_char);
    if valid {
        Ok(())
    } else {
        Err(AegisError::InvalidInput(format!("Invalid report path segment: {}", segment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_segment_sanitizes() {
        assert_eq!(owner_segment("Pro@X.com"), "pro@x.com");
        assert_eq!(owner_segment("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(owner_segment("  "), "anonymous");
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path(), "http://localhost:8080/");
        let stored = store.store("pro@x.com", "report body").await.unwrap();

        assert!(stored.url.starts_with("http://localhost:8080/api/reports/pro@x.com/"));
        assert!(stored.file.ends_with(".txt"));
        assert_eq!(store.load(&stored.owner, &stored.file).await.unwrap(), "report body");
    }

    #[tokio::test]
    async fn test_concurrent_stores_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(ReportStore::new(dir.path(), "http://localhost:8080"));

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let body = format!("report {}", i);
                    let stored = store.store("pro@x.com", &body).await.unwrap();
                    (stored, body)
                })
            })
            .collect();

        let mut urls = std::collections::HashSet::new();
        for handle in handles {
            let (stored, body) = handle.await.unwrap();
            assert_eq!(store.load(&stored.owner, &stored.file).await.unwrap(), body);
            urls.insert(stored.url);
        }
        assert_eq!(urls.len(), 64);
        assert_eq!(std::fs::read_dir(dir.path().join("pro@x.com")).unwrap().count(), 64);
    }

    #[tokio::test]
    async fn test_load_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path(), "http://localhost:8080");
        let err = store.load("..", "secret.txt").await.unwrap_err();
        assert!(matches!(err, AegisError::InvalidInput(_)));
        let err = store.load("owner", "a/b.txt").await.unwrap_err();
        assert!(matches!(err, AegisError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path(), "http://localhost:8080");
        let err = store.load("owner", "missing.txt").await.unwrap_err();
        assert!(matches!(err, AegisError::NotFound(_)));
    }
}
