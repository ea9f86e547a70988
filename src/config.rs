//! Configuration module for RepoFetch.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`repofetch.yaml`)
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # repofetch.yaml
//!
//! # Fetch defaults
//! fetch:
//!   type: ssh          # ssh, https or direct
//!   dist: ./vendor     # destination directory (default: current directory)
//!   extract: false     # unpack downloaded archives in place
//!
//! # HTTP options for archive downloads
//! http:
//!   timeout_secs: 300
//! ```

use crate::error::Result;
use crate::options::Transport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fetch defaults applied when the caller did not set a value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FetchOptions {
    /// Transport used when none is given on the command line.
    #[serde(rename = "type")]
    pub transport: Transport,

    /// Destination directory; the current working directory when unset.
    pub dist: Option<PathBuf>,

    /// Unpack downloaded archives in place.
    pub extract: bool,
}

/// HTTP options for archive downloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    300
}

/// The main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Fetch defaults.
    pub fetch: FetchOptions,

    /// HTTP options.
    pub http: HttpOptions,
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigParse` error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Generate an example configuration file.
    #[must_use]
    pub fn example_yaml() -> String {
        r"# repofetch configuration file

# Fetch defaults
fetch:
  # Transport used when none is given on the command line: ssh, https or direct
  type: ssh

  # Destination directory; defaults to the current working directory
  # dist: ./vendor

  # Unpack downloaded archives in place
  extract: false

# HTTP options for archive downloads
http:
  # Request timeout in seconds
  timeout_secs: 300
"
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    ///
    /// Only arguments the caller explicitly set override file values.
    pub fn merge_cli_args(&mut self, args: &crate::cli::FetchArgs) {
        if let Some(transport) = args.transport {
            self.fetch.transport = transport;
        }
        if let Some(ref dist) = args.dist {
            self.fetch.dist = Some(dist.clone());
        }
        if args.extract {
            self.fetch.extract = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fetch.transport, Transport::Ssh);
        assert_eq!(config.fetch.dist, None);
        assert!(!config.fetch.extract);
        assert_eq!(config.http.timeout_secs, 300);
    }

    #[test]
    fn test_example_yaml_parses() {
        let config = Config::from_yaml(&Config::example_yaml()).unwrap();
        assert_eq!(config.fetch.transport, Transport::Ssh);
        assert_eq!(config.http.timeout_secs, 300);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("http:\n  timeout_secs: 60\n").unwrap();
        assert_eq!(config.http.timeout_secs, 60);
        assert_eq!(config.fetch.transport, Transport::Ssh);
    }

    #[test]
    fn test_transport_from_yaml() {
        let config = Config::from_yaml("fetch:\n  type: direct\n  extract: true\n").unwrap();
        assert_eq!(config.fetch.transport, Transport::Direct);
        assert!(config.fetch.extract);
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(Config::from_yaml("fetch: [not, a, mapping]").is_err());
    }
}
