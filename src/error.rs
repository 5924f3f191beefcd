//! Error kinds surfaced by the cache pipeline.
//!
//! Ingestion failures are terminal: nothing retries, and artifacts already
//! written before the failure stay on disk. Accessors recover
//! [`CacheError::NotFound`] into default payloads for every artifact kind
//! except the term info record.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The remote service answered with its "no such term" warning block.
    #[error("term does not exist: {0}")]
    TermNotFound(String),

    /// Transport failure or non-success HTTP status while fetching a dump.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact exists but does not hold the expected JSON value.
    #[error("invalid JSON artifact {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn term_not_found_display() {
        let e = CacheError::TermNotFound("xyzzy".into());
        assert!(e.to_string().contains("xyzzy"));
        assert!(!e.is_not_found());
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e = CacheError::io("/tmp/cache/c/chat", io_err);
        assert!(e.to_string().contains("/tmp/cache/c/chat"));
        assert!(e.source().is_some());
    }

    #[test]
    fn not_found_is_recoverable() {
        let e = CacheError::NotFound(PathBuf::from("/tmp/x/infos.json"));
        assert!(e.is_not_found());
        assert!(e.to_string().contains("infos.json"));
    }
}
