//! Endpoint settings resolved from the config file and command-line flags.

use anyhow::{Context, Result};
use graphql_recon_config::{find_config, load_config, ReconConfig};
use graphql_recon_introspect::ProbeClient;
use std::path::PathBuf;
use std::time::Duration;

/// Flags shared by every command that talks to the endpoint.
#[derive(Debug, Default, clap::Args)]
pub struct EndpointArgs {
    /// GraphQL endpoint URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP headers to include in every request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    /// These are merged with headers from the config file (CLI takes precedence)
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of retries on server errors (overrides config file)
    #[arg(long)]
    pub retry: Option<u32>,
}

impl EndpointArgs {
    /// Merges these flags over the config file, if one is given or found.
    ///
    /// A config file is only required when no `--url` is passed.
    pub fn resolve(self, config_path: Option<PathBuf>) -> Result<ReconConfig> {
        let config_path = match config_path {
            Some(path) => Some(path),
            None => {
                let current_dir = std::env::current_dir()?;
                find_config(&current_dir).context("Failed to search for config")?
            }
        };

        let mut config = match (config_path, self.url.as_ref()) {
            (Some(path), _) => load_config(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            (None, Some(url)) => ReconConfig::new(url.clone()),
            (None, None) => anyhow::bail!(
                "No config file found. Use --config to specify one or pass --url."
            ),
        };

        self.apply(&mut config)?;
        Ok(config)
    }

    /// Applies command-line overrides to `config`.
    fn apply(self, config: &mut ReconConfig) -> Result<()> {
        if let Some(url) = self.url {
            config.url = url;
        }

        for header in &self.headers {
            let (name, value) = parse_header(header).context("Failed to parse headers")?;
            config.set_header(name, value);
        }

        if self.timeout.is_some() {
            config.timeout = self.timeout;
        }
        if self.retry.is_some() {
            config.retry = self.retry;
        }

        if let Some(problem) = config.problem() {
            anyhow::bail!("Invalid endpoint settings: {problem}");
        }

        Ok(())
    }
}

/// Builds a transport client for the resolved settings.
pub fn client_for(config: &ReconConfig) -> ProbeClient {
    let mut client = ProbeClient::new().with_headers(config.header_pairs());
    if let Some(timeout) = config.timeout {
        client = client.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(retry) = config.retry {
        client = client.with_retries(retry);
    }
    client
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}
