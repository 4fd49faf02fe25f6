//! HTTP downloads for tool installation
use crate::error::ProvisionError;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// Source of remote bytes. Implemented over reqwest for real runs.
pub trait Fetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    fn fetch_text(&self, url: &str) -> Result<String> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).with_context(|| format!("Response from {} is not UTF-8", url))
    }
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("keel-dev/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "http.get");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProvisionError::Download(format!("{}: {}", url, e)))?
            .error_for_status()
            .map_err(|e| ProvisionError::Download(format!("{}: {}", url, e)))?;
        let bytes = response
            .bytes()
            .map_err(|e| ProvisionError::Download(format!("{}: {}", url, e)))?;
        debug!(url, len = bytes.len(), "http.done");
        Ok(bytes.to_vec())
    }
}
