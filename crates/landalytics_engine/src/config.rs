use std::time::Duration;

use url::Url;

use crate::types::ScanError;

/// Environment variable naming the analysis service base address.
pub const API_URL_ENV: &str = "LANDALYTICS_API_URL";

const ANALYZE_PATH: &str = "api/v1/analyze";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Covers the full streaming read. The narrative phase includes a remote
    /// scrape plus an LLM call upstream, so this is generous.
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(mut base_url: Url) -> Self {
        // Url::join treats the last path segment as a file unless the path
        // ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Resolves settings from the environment. The base address is required;
    /// its absence is a configuration failure surfaced before any request.
    pub fn from_env() -> Result<Self, ScanError> {
        Self::from_base_url(std::env::var(API_URL_ENV).ok())
    }

    pub fn from_base_url(base_url: Option<String>) -> Result<Self, ScanError> {
        let raw = base_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ScanError::EndpointNotConfigured)?;
        let url = Url::parse(&raw).map_err(|err| ScanError::InvalidEndpoint {
            url: raw.clone(),
            message: err.to_string(),
        })?;
        Ok(Self::new(url))
    }

    /// Full URL of the analyze endpoint.
    pub fn analyze_endpoint(&self) -> Result<Url, ScanError> {
        self.base_url
            .join(ANALYZE_PATH)
            .map_err(|err| ScanError::InvalidEndpoint {
                url: self.base_url.to_string(),
                message: err.to_string(),
            })
    }
}
