//! # jdm CLI
//!
//! Command-line front end to the term cache.
//!
//! ## Usage
//!
//! ```bash
//! jdm --config ./config/jdm.toml <command> <term>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `jdm load <term>` | Fetch and cache the term unless already cached |
//! | `jdm info <term>` | Print the term info record (fails if not cached) |
//! | `jdm defs <term>` | Print the definitions |
//! | `jdm types <term>` | Print the relation type catalog |
//! | `jdm outgoing <term>` | Print outgoing relations |
//! | `jdm incoming <term>` | Print incoming relations |
//! | `jdm show <term>` | Load, then print every artifact |
//! | `jdm shard <term>` | Print the shard and artifact paths |
//!
//! The read commands never fetch: on an uncached term they print the
//! default payload of their artifact.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jdm_cache::get::Artifact;
use jdm_cache::{config, get, ingest, logger, shard};

/// jdm: populate-once cache of JeuxDeMots term dumps.
#[derive(Parser)]
#[command(
    name = "jdm",
    about = "jdm: fetch, resolve and cache JeuxDeMots term dumps",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/jdm.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a term's dump and write its cache artifacts.
    ///
    /// Does nothing beyond an existence check when the term is already
    /// cached.
    Load { term: String },

    /// Print the term info record.
    Info { term: String },

    /// Print the term's definitions.
    Defs { term: String },

    /// Print the relation types used around the term.
    Types { term: String },

    /// Print relations going out of the term.
    Outgoing { term: String },

    /// Print relations coming into the term.
    Incoming { term: String },

    /// Load the term, then print all artifacts as one JSON object.
    Show { term: String },

    /// Print the shard directory and artifact paths for a term.
    Shard { term: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    logger::init(&cfg.log.level)?;

    match cli.command {
        Commands::Load { term } => ingest::run_load(&cfg, &term).await?,
        Commands::Info { term } => get::run_get(&cfg, &term, Artifact::Info).await?,
        Commands::Defs { term } => get::run_get(&cfg, &term, Artifact::Definitions).await?,
        Commands::Types { term } => get::run_get(&cfg, &term, Artifact::RelationTypes).await?,
        Commands::Outgoing { term } => get::run_get(&cfg, &term, Artifact::Outgoing).await?,
        Commands::Incoming { term } => get::run_get(&cfg, &term, Artifact::Incoming).await?,
        Commands::Show { term } => get::run_show(&cfg, &term).await?,
        Commands::Shard { term } => shard::run_shard(&cfg, &term)?,
    }

    Ok(())
}
