//! JSON artifact storage.
//!
//! Each artifact is one file holding one compact JSON value. Writes replace
//! the whole file; reads decode the whole file or fail. There is no locking:
//! two ingestions of the same term race per file and the last write wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::CacheError;

pub async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Read and decode an artifact.
///
/// A missing file is [`CacheError::NotFound`]; a file that does not decode
/// as `T` is [`CacheError::Json`], never an empty value.
pub async fn read<T: DeserializeOwned>(path: &Path) -> Result<T, CacheError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CacheError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(CacheError::io(path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|source| CacheError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` and write it as the complete content of `path`,
/// creating parent directories as needed.
pub async fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CacheError> {
    let json = serde_json::to_string(value).map_err(|source| CacheError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        create_dir(parent).await?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| CacheError::io(path, e))?;

    tracing::debug!(path = %path.display(), "artifact saved");
    Ok(())
}

pub async fn create_dir(path: &Path) -> Result<(), CacheError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| CacheError::io(path, e))
}
