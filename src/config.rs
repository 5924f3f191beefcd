use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logger;

/// Query template of the public rezo-dump endpoint. `{term}` is replaced by
/// the escaped term.
pub const DEFAULT_DUMP_URL: &str = "http://www.jeuxdemots.org/rezo-dump.php?gotermsubmit=Chercher&gotermrel={term}&rel=&output=onlyxml";

pub const TERM_PLACEHOLDER: &str = "{term}";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub cache: CacheConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_dump_url")]
    pub dump_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            dump_url: default_dump_url(),
        }
    }
}

fn default_dump_url() -> String {
    DEFAULT_DUMP_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.cache.root.as_os_str().is_empty() {
        bail!("cache.root must not be empty");
    }
    config.cache.root = expand_home(&config.cache.root);

    let placeholders = config.remote.dump_url.matches(TERM_PLACEHOLDER).count();
    if placeholders != 1 {
        bail!(
            "remote.dump_url must contain '{}' exactly once (found {})",
            TERM_PLACEHOLDER,
            placeholders
        );
    }

    logger::parse_level(&config.log.level)?;

    Ok(config)
}

/// Replace a leading `~` with the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = parse_config("[cache]\nroot = \"/var/cache/jdm\"\n").unwrap();
        assert_eq!(cfg.cache.root, PathBuf::from("/var/cache/jdm"));
        assert_eq!(cfg.remote.dump_url, DEFAULT_DUMP_URL);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_missing_cache_section_rejected() {
        assert!(parse_config("[log]\nlevel = \"debug\"\n").is_err());
    }

    #[test]
    fn test_empty_root_rejected() {
        assert!(parse_config("[cache]\nroot = \"\"\n").is_err());
    }

    #[test]
    fn test_dump_url_requires_single_placeholder() {
        let no_placeholder = "[cache]\nroot = \"/c\"\n[remote]\ndump_url = \"http://x/dump\"\n";
        assert!(parse_config(no_placeholder).is_err());

        let twice = "[cache]\nroot = \"/c\"\n[remote]\ndump_url = \"http://x/{term}/{term}\"\n";
        assert!(parse_config(twice).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let content = "[cache]\nroot = \"/c\"\n[log]\nlevel = \"verbose\"\n";
        assert!(parse_config(content).is_err());
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let cfg = parse_config("[cache]\nroot = \"~/jdm-cache\"\n").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(cfg.cache.root, home.join("jdm-cache"));
        }
    }
}
