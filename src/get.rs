//! Read access to cached artifacts.
//!
//! Definitions, relation types and both edge lists fall back to a fixed
//! default payload when their file is absent, so callers always get
//! *something* to render. The info record has no default: its absence means
//! the term was never ingested and is reported as
//! [`CacheError::NotFound`].

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cache;
use crate::config::Config;
use crate::error::CacheError;
use crate::fetch::HttpDumpSource;
use crate::ingest::load_term;
use crate::models::{Definition, Direction, RelationEntry, RelationType, TermInfo};
use crate::shard::ShardLocator;

/// The five artifact kinds, for CLI dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Info,
    Definitions,
    RelationTypes,
    Outgoing,
    Incoming,
}

/// All artifacts of one term in a single response.
#[derive(Debug, Clone, Serialize)]
pub struct TermResponse {
    pub info: TermInfo,
    pub definitions: Vec<Definition>,
    pub relation_types: Vec<RelationType>,
    pub outgoing: Vec<RelationEntry>,
    pub incoming: Vec<RelationEntry>,
}

pub async fn term_info(locator: &ShardLocator, term: &str) -> Result<TermInfo, CacheError> {
    cache::read(&locator.locate(term).info).await
}

pub async fn term_definitions(
    locator: &ShardLocator,
    term: &str,
) -> Result<Vec<Definition>, CacheError> {
    read_or(&locator.locate(term).definitions, || vec![Definition::none()]).await
}

pub async fn term_relation_types(
    locator: &ShardLocator,
    term: &str,
) -> Result<Vec<RelationType>, CacheError> {
    read_or(&locator.locate(term).types, || vec![RelationType::blank()]).await
}

pub async fn term_relations(
    locator: &ShardLocator,
    term: &str,
    direction: Direction,
) -> Result<Vec<RelationEntry>, CacheError> {
    let paths = locator.locate(term);
    let path = match direction {
        Direction::Outgoing => &paths.outgoing,
        Direction::Incoming => &paths.incoming,
    };
    read_or(path, || vec![RelationEntry::placeholder(direction)]).await
}

/// One artifact re-serialized as JSON text.
pub async fn get_artifact(
    locator: &ShardLocator,
    term: &str,
    artifact: Artifact,
) -> Result<String, CacheError> {
    let paths = locator.locate(term);
    match artifact {
        Artifact::Info => to_json(&paths.info, &term_info(locator, term).await?),
        Artifact::Definitions => to_json(&paths.definitions, &term_definitions(locator, term).await?),
        Artifact::RelationTypes => to_json(&paths.types, &term_relation_types(locator, term).await?),
        Artifact::Outgoing => to_json(
            &paths.outgoing,
            &term_relations(locator, term, Direction::Outgoing).await?,
        ),
        Artifact::Incoming => to_json(
            &paths.incoming,
            &term_relations(locator, term, Direction::Incoming).await?,
        ),
    }
}

pub async fn get_term(locator: &ShardLocator, term: &str) -> Result<TermResponse, CacheError> {
    Ok(TermResponse {
        info: term_info(locator, term).await?,
        definitions: term_definitions(locator, term).await?,
        relation_types: term_relation_types(locator, term).await?,
        outgoing: term_relations(locator, term, Direction::Outgoing).await?,
        incoming: term_relations(locator, term, Direction::Incoming).await?,
    })
}

/// CLI entry point for the single-artifact commands.
pub async fn run_get(config: &Config, term: &str, artifact: Artifact) -> Result<()> {
    let locator = ShardLocator::new(&config.cache.root);
    let json = get_artifact(&locator, term, artifact).await?;
    println!("{}", json);
    Ok(())
}

/// CLI entry point for `jdm show`: cache-or-fetch, then print every
/// artifact as one pretty-printed JSON object.
pub async fn run_show(config: &Config, term: &str) -> Result<()> {
    let locator = ShardLocator::new(&config.cache.root);
    let source = HttpDumpSource::new(&config.remote);

    load_term(&locator, &source, term).await?;
    let response = get_term(&locator, term).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn read_or<T, F>(path: &Path, default: F) -> Result<T, CacheError>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    match cache::read(path).await {
        Err(e) if e.is_not_found() => Ok(default()),
        other => other,
    }
}

fn to_json<T: Serialize>(path: &Path, value: &T) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|source| CacheError::Json {
        path: path.to_path_buf(),
        source,
    })
}
