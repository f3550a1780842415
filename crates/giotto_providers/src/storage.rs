//! Atomic media file writes.

use giotto_error::{ProviderError, ProviderErrorKind};
use std::path::Path;

/// Write media bytes to a path through a temp file + rename, creating parent
/// directories as needed. A crash mid-write never leaves a half-written
/// artifact at the final path.
pub(crate) async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), ProviderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Io(format!(
                "create {}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        ProviderError::new(ProviderErrorKind::Io(format!(
            "write {}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        ProviderError::new(ProviderErrorKind::Io(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;

    Ok(())
}
