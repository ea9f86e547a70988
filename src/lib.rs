//! # RepoFetch
//!
//! Clone repositories or download archive snapshots from shorthand
//! references.
//!
//! RepoFetch normalizes a variety of repository reference notations
//! (`owner/name` shorthand, SSH URLs, HTTPS URLs) into canonical,
//! fully-qualified URLs, then performs one of two retrieval actions:
//! a clone through the external `git` client, or a direct download of a
//! pre-built archive snapshot.
//!
//! ## Features
//!
//! - **Reference normalization**: `owner/name`, SSH and HTTPS URLs for
//!   GitHub and GitLab, with an optional `#ref` checkout fragment
//! - **Transport selection**: clone over ssh or https, or fetch a
//!   provider archive snapshot directly
//! - **Opaque pass-through**: unrecognized references are used verbatim
//! - **Thin I/O collaborators**: external git client for cloning,
//!   streaming HTTPS download and in-place unpacking for archives
//!
//! ## Example
//!
//! ```rust,no_run
//! use repofetch::{Config, Fetcher, ResolveOverrides};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let fetcher = Fetcher::new(config);
//!
//!     // Clone rust-lang/cargo into the current directory
//!     let path = fetcher.fetch("rust-lang/cargo", &ResolveOverrides::default()).await?;
//!     println!("Fetched into {}", path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod git;
pub mod options;
pub mod parser;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{RepoFetchError, Result};
pub use options::{resolve, ResolveOverrides, ResolvedOptions, Transport};

use std::path::PathBuf;

/// Main orchestrator that coordinates resolution and retrieval.
///
/// The `Fetcher` is the primary entry point for using RepoFetch as a
/// library. It resolves the reference, then dispatches to the clone or
/// archive-download collaborator based on the resolved transport.
///
/// # Example
///
/// ```rust,no_run
/// use repofetch::{Config, Fetcher, ResolveOverrides, Transport};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let fetcher = Fetcher::new(Config::default());
///
///     let overrides = ResolveOverrides {
///         transport: Some(Transport::Direct),
///         ..ResolveOverrides::default()
///     };
///     let archive = fetcher.fetch("rust-lang/cargo#v1.0", &overrides).await?;
///     println!("Archive at {}", archive.display());
///     Ok(())
/// }
/// ```
pub struct Fetcher {
    config: Config,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolve a reference and perform the retrieval it requests.
    ///
    /// Configuration values fill in any override the caller left unset.
    /// Clone transports probe for a usable git client first; the direct
    /// transport downloads the archive and, when configured, unpacks it
    /// in place. Returns the path of the cloned directory or downloaded
    /// archive file.
    ///
    /// # Errors
    ///
    /// Resolution errors are raised before any I/O collaborator runs;
    /// collaborator failures are surfaced verbatim. Any failure
    /// terminates the operation — there is no partial-success reporting.
    pub async fn fetch(
        &self,
        reference: &str,
        overrides: &ResolveOverrides,
    ) -> Result<PathBuf> {
        let merged = ResolveOverrides {
            transport: overrides.transport.or(Some(self.config.fetch.transport)),
            dist: overrides
                .dist
                .clone()
                .or_else(|| self.config.fetch.dist.clone()),
            checkout: overrides.checkout.clone(),
            custom: overrides.custom,
        };

        let options = options::resolve(reference, &merged)?;

        tracing::info!(
            repo = %options.repo,
            transport = %options.transport,
            dist = %options.dist.display(),
            "Fetching repository"
        );

        match options.transport {
            Transport::Direct => {
                let archive = download::download_archive(&options, &self.config.http).await?;
                if self.config.fetch.extract {
                    download::extract_archive(&archive).await?;
                }
                Ok(archive)
            }
            Transport::Ssh | Transport::Https => {
                git::check_git().await?;
                git::clone_repository(&options).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let config = Config::default();
        let _fetcher = Fetcher::new(config);
    }
}
