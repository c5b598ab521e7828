use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default number of candidate identifiers probed per request.
pub const DEFAULT_BUCKET_SIZE: usize = 4096;

const fn default_bucket_size() -> usize {
    DEFAULT_BUCKET_SIZE
}

/// Settings for one reconstruction run against a GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconConfig {
    /// The GraphQL endpoint URL to probe
    pub url: String,

    /// HTTP headers sent with every request (e.g., for authentication)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// How many candidate identifiers are batched into one probe request
    #[serde(default = "default_bucket_size")]
    pub bucket_size: usize,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retries on server errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
}

impl ReconConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            bucket_size: DEFAULT_BUCKET_SIZE,
            timeout: None,
            retry: None,
        }
    }

    /// Sets `name`, replacing any existing header that differs only in case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Headers as sorted `(name, value)` pairs.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Describes the first problem with these settings, if any.
    #[must_use]
    pub fn problem(&self) -> Option<String> {
        let url = self.url.trim();
        if url.is_empty() {
            return Some("url must not be empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Some(format!("url '{url}' must use http or https"));
        }
        if self.bucket_size == 0 {
            return Some("bucketSize must be greater than zero".to_string());
        }
        None
    }
}
