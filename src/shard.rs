//! Term → cache directory mapping.
//!
//! Terms are grouped into one-letter shard directories under the cache
//! root. Accented vowels share their base vowel's shard, and terms starting
//! with `_` or `=` (internal JDM nodes such as `_COM` or `=chat`) go to
//! `special`, as do terms starting with `.` so no shard is named `.`.
//!
//! ```text
//! <root>/e/école/infos.json
//!               /definitions.json
//!               /types.json
//!               /outgoings.json
//!               /incomings.json
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Config;

pub const SPECIAL_SHARD: &str = "special";

pub const INFO_FILE: &str = "infos.json";
pub const DEFINITIONS_FILE: &str = "definitions.json";
pub const TYPES_FILE: &str = "types.json";
pub const OUTGOING_FILE: &str = "outgoings.json";
pub const INCOMING_FILE: &str = "incomings.json";

/// Make a term usable as a single path component.
///
/// Colons become underscores, as do path separators. A term made only of
/// dots (`.`, `..`) has its dots replaced too, so the component can never
/// point outside its shard directory.
pub fn normalize_term(term: &str) -> String {
    if !term.is_empty() && term.chars().all(|c| c == '.') {
        return "_".repeat(term.len());
    }
    term.replace([':', '/', '\\'], "_")
}

/// Shard directory name for a term (see module docs).
pub fn shard_key(term: &str) -> String {
    let Some(first) = term.chars().next() else {
        return SPECIAL_SHARD.to_string();
    };
    let lower: String = first.to_lowercase().collect();
    let base = match lower.as_str() {
        "a" | "à" | "â" => "a",
        "e" | "é" | "è" | "ê" | "ë" => "e",
        "i" | "î" | "ï" => "i",
        "o" | "ô" | "ö" => "o",
        "u" | "û" | "ù" | "ü" => "u",
        "_" | "=" | "." => SPECIAL_SHARD,
        _ => return lower,
    };
    base.to_string()
}

/// Every path an ingestion touches for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub shard_dir: PathBuf,
    pub term_dir: PathBuf,
    pub info: PathBuf,
    pub definitions: PathBuf,
    pub types: PathBuf,
    pub outgoing: PathBuf,
    pub incoming: PathBuf,
}

impl ArtifactPaths {
    /// All five artifact files, in the order ingestion writes them.
    pub fn artifacts(&self) -> [&Path; 5] {
        [
            &self.definitions,
            &self.types,
            &self.outgoing,
            &self.incoming,
            &self.info,
        ]
    }
}

/// Resolves terms to artifact paths under a fixed cache root.
#[derive(Debug, Clone)]
pub struct ShardLocator {
    root: PathBuf,
}

impl ShardLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn locate(&self, term: &str) -> ArtifactPaths {
        let term = normalize_term(term);
        let shard_dir = self.root.join(shard_key(&term));
        let term_dir = shard_dir.join(&term);

        ArtifactPaths {
            info: term_dir.join(INFO_FILE),
            definitions: term_dir.join(DEFINITIONS_FILE),
            types: term_dir.join(TYPES_FILE),
            outgoing: term_dir.join(OUTGOING_FILE),
            incoming: term_dir.join(INCOMING_FILE),
            shard_dir,
            term_dir,
        }
    }
}

/// CLI entry point for `jdm shard`: show where a term lives, without I/O.
pub fn run_shard(config: &Config, term: &str) -> Result<()> {
    let normalized = normalize_term(term);
    let paths = ShardLocator::new(&config.cache.root).locate(&normalized);

    println!("shard:       {}", shard_key(&normalized));
    println!("directory:   {}", paths.term_dir.display());
    println!("info:        {}", paths.info.display());
    println!("definitions: {}", paths.definitions.display());
    println!("types:       {}", paths.types.display());
    println!("outgoing:    {}", paths.outgoing.display());
    println!("incoming:    {}", paths.incoming.display());
    Ok(())
}
