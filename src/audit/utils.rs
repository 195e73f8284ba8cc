use std::path::Path;
use uuid::Uuid;
use crate::errors::AegisError;

/// Atomic file write: write to a per-call temp file, then rename
pub async fn atomic_write(path: &Path, content: &str) -> Result<(), AegisError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| storage_error(parent, e))?;
    }
    let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    tokio::fs::write(&tmp, content).await.map_err(|e| storage_error(&tmp, e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(storage_error(path, e));
    }
    Ok(())
}

pub fn storage_error(path: &Path, e: std::io::Error) -> AegisError {
    AegisError::Storage(format!("{}: {}", path.display(), e))
}
