//! Cache-or-fetch orchestration.
//!
//! A term is either uncached (no `infos.json`) or cached. On a miss the
//! dump is fetched, segmented, resolved and written as five artifacts, in
//! that order and exactly once per call. The info record is written last:
//! it is the existence probe, so an ingestion that fails half-way leaves
//! the term uncached and the next call fetches again. Artifacts written
//! before the failure are left in place.
//!
//! Concurrent misses on the same term are not serialized; both fetch and
//! the last writer wins per file.

use anyhow::Result;
use tracing::{info, warn};

use crate::cache;
use crate::config::Config;
use crate::error::CacheError;
use crate::fetch::HttpDumpSource;
use crate::models::TermGraph;
use crate::parse::parse_dump;
use crate::segment::segment;
use crate::shard::{normalize_term, ArtifactPaths, ShardLocator};
use crate::traits::DumpSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The info artifact already existed; nothing was fetched.
    Cached,
    /// The dump was fetched and all artifacts written.
    Fetched,
}

/// Make sure `term` is cached, fetching it through `source` on a miss.
pub async fn load_term<S>(
    locator: &ShardLocator,
    source: &S,
    term: &str,
) -> Result<LoadOutcome, CacheError>
where
    S: DumpSource + ?Sized,
{
    let normalized = normalize_term(term);
    let paths = locator.locate(&normalized);

    if cache::exists(&paths.info).await {
        info!(term = %normalized, "cache hit");
        return Ok(LoadOutcome::Cached);
    }
    info!(term = %normalized, dir = %paths.term_dir.display(), "cache miss");

    match ingest(source, term, &normalized, &paths).await {
        Ok(()) => Ok(LoadOutcome::Fetched),
        Err(e) => {
            warn!(term = %normalized, error = %e, "ingestion failed");
            Err(e)
        }
    }
}

/// `normalized` is what gets fetched and stored; `queried` only names the
/// term in the fallback info record.
async fn ingest<S>(
    source: &S,
    queried: &str,
    normalized: &str,
    paths: &ArtifactPaths,
) -> Result<(), CacheError>
where
    S: DumpSource + ?Sized,
{
    let raw = source.fetch_dump(normalized).await?;
    let dump = segment(normalized, &raw)?;
    let graph = parse_dump(queried, &dump);

    cache::create_dir(&paths.term_dir).await?;
    write_artifacts(paths, &graph).await?;

    info!(
        term = normalized,
        definitions = graph.definitions.len(),
        relation_types = graph.relation_types.len(),
        outgoing = graph.outgoing.len(),
        incoming = graph.incoming.len(),
        "term cached"
    );
    Ok(())
}

async fn write_artifacts(paths: &ArtifactPaths, graph: &TermGraph) -> Result<(), CacheError> {
    cache::write(&paths.definitions, &graph.definitions).await?;
    cache::write(&paths.types, &graph.relation_types).await?;
    cache::write(&paths.outgoing, &graph.outgoing).await?;
    cache::write(&paths.incoming, &graph.incoming).await?;
    cache::write(&paths.info, &graph.info).await
}

/// CLI entry point for `jdm load`.
pub async fn run_load(config: &Config, term: &str) -> Result<()> {
    let locator = ShardLocator::new(&config.cache.root);
    let source = HttpDumpSource::new(&config.remote);

    let outcome = load_term(&locator, &source, term).await?;
    let status = match outcome {
        LoadOutcome::Cached => "cached",
        LoadOutcome::Fetched => "fetched",
    };
    println!("{} {}", status, term);
    println!("  directory: {}", locator.locate(term).term_dir.display());
    Ok(())
}
