//! # jdm-cache
//!
//! A populate-once JSON cache of JeuxDeMots lexical network dumps.
//!
//! For each queried term the remote `rezo-dump` service returns one flat
//! text dump describing the term's neighbourhood: the term itself, every
//! term its relations reference, the relation types in use, and the
//! outgoing and incoming edges. This crate fetches that dump once, cuts it
//! into sections, resolves the edges' numeric ids into names, and persists
//! five JSON artifacts per term. Later reads never touch the network.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │  Fetch   │──▶│ Segment  │──▶│  Parse   │──▶│  Cache   │
//! │ (HTTP)   │   │ sections │   │ resolve  │   │  JSON    │
//! └──────────┘   └──────────┘   └──────────┘   └────┬─────┘
//!       ▲                                            │
//!  ┌────┴─────┐                                ┌─────▼────┐
//!  │  Ingest  │ cache-or-fetch                 │   Get    │ accessors
//!  └──────────┘                                └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! jdm load chat                 # fetch and cache once
//! jdm outgoing chat             # outgoing relations as JSON
//! jdm show "pomme de terre"     # load + every artifact
//! jdm shard École               # where the cache files live
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Error kinds |
//! | [`models`] | Artifact types and default payloads |
//! | [`shard`] | Term → shard directory and artifact paths |
//! | [`cache`] | JSON artifact read/write |
//! | [`fetch`] | Remote dump fetching and decoding |
//! | [`segment`] | Dump section segmentation |
//! | [`parse`] | Record parsing and id resolution |
//! | [`ingest`] | Cache-or-fetch orchestration |
//! | [`get`] | Artifact accessors |
//! | [`traits`] | Dump source extension seam |

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod get;
pub mod ingest;
pub mod logger;
pub mod models;
pub mod parse;
pub mod segment;
pub mod shard;
pub mod traits;
