//! Extension seam between the ingestion orchestrator and the remote service.
//!
//! [`crate::ingest::load_term`] only needs *some* way to turn a term into
//! raw dump text. The production implementation is
//! [`HttpDumpSource`](crate::fetch::HttpDumpSource); tests and offline tools
//! can implement [`DumpSource`] over fixtures or a local mirror.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use jdm_cache::error::CacheError;
//! use jdm_cache::traits::DumpSource;
//!
//! pub struct MirrorSource {
//!     dir: std::path::PathBuf,
//! }
//!
//! #[async_trait]
//! impl DumpSource for MirrorSource {
//!     async fn fetch_dump(&self, term: &str) -> Result<String, CacheError> {
//!         let path = self.dir.join(format!("{term}.txt"));
//!         tokio::fs::read_to_string(&path)
//!             .await
//!             .map_err(|e| CacheError::io(path, e))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::CacheError;

/// Produces the decoded dump text for one (already normalized) term.
#[async_trait]
pub trait DumpSource: Send + Sync {
    /// Fetch the dump for `term`.
    ///
    /// Called at most once per ingestion, only on a cache miss. No retries
    /// happen above this call.
    async fn fetch_dump(&self, term: &str) -> Result<String, CacheError>;
}
