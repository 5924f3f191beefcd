//! Remote dump fetching.
//!
//! The rezo-dump endpoint takes the term in its query string using the
//! legacy JavaScript `escape()` encoding (Latin-1 `%XX`, `%uXXXX` above
//! U+00FF) and answers in ISO-8859-1. Both directions are handled here so
//! the rest of the pipeline only sees Rust strings.
//!
//! No timeout and no retry are configured at this layer: a hung request
//! only blocks the ingestion that issued it.

use async_trait::async_trait;
use tracing::info;

use crate::config::{RemoteConfig, TERM_PLACEHOLDER};
use crate::error::CacheError;
use crate::traits::DumpSource;

/// Substitute an escaped `term` into the endpoint template.
///
/// Whitespace runs are not collapsed: each whitespace character becomes
/// one `+`.
pub fn build_query_url(template: &str, term: &str) -> String {
    let plus_joined: String = term
        .chars()
        .map(|c| if c.is_whitespace() { '+' } else { c })
        .collect();
    template.replacen(TERM_PLACEHOLDER, &legacy_escape(&plus_joined), 1)
}

fn legacy_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let code = c as u32;
        if c.is_ascii_alphanumeric() || "@*_+-./".contains(c) {
            out.push(c);
        } else if code < 0x100 {
            out.push_str(&format!("%{:02X}", code));
        } else {
            // Astral characters are escaped as their UTF-16 code units.
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("%u{:04X}", unit));
            }
        }
    }
    out
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of the same
/// value, so decoding cannot fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// [`DumpSource`] backed by the public HTTP endpoint.
pub struct HttpDumpSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpDumpSource {
    pub fn new(config: &RemoteConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &RemoteConfig) -> Self {
        Self {
            client,
            url_template: config.dump_url.clone(),
        }
    }

    /// GET `url` and decode the body.
    ///
    /// Transport failures and non-success statuses both surface as
    /// [`CacheError::Network`].
    pub async fn fetch(&self, url: &str) -> Result<String, CacheError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(decode_latin1(&bytes))
    }
}

#[async_trait]
impl DumpSource for HttpDumpSource {
    async fn fetch_dump(&self, term: &str) -> Result<String, CacheError> {
        let url = build_query_url(&self.url_template, term);
        info!(term, url = %url, "fetching dump");
        self.fetch(&url).await
    }
}
