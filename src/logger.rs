//! stderr logging for the `jdm` binary.
//!
//! The `[log] level` from the config is the default; `RUST_LOG` directives
//! still apply on top of it. stdout is reserved for command output.

use anyhow::{anyhow, bail, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Validate a configured level name (`error` .. `trace`, or `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    // LevelFilter parses "" as ERROR; an empty setting is a config mistake.
    if level.trim().is_empty() {
        bail!("[log] level is empty");
    }
    level
        .trim()
        .parse::<LevelFilter>()
        .with_context(|| format!("[log] level: unknown level '{level}'"))
}

/// Install the global subscriber. Call once, after the config is loaded.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(level)?.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("logging already initialised: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_level_names() {
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level(" debug ").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn test_bad_level_names_the_setting() {
        let err = parse_level("verbose").unwrap_err().to_string();
        assert!(err.contains("'verbose'"), "{err}");
        assert!(parse_level("  ").is_err());
    }
}
