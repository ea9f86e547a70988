//! Git collaborator layer.
//!
//! This module groups everything that talks about git hosts and the
//! external git client:
//!
//! - [`GitProvider`] implementations that render canonical clone and
//!   archive URLs for the known hosts (GitHub, GitLab)
//! - The availability probe and clone collaborator built on the external
//!   `git` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use repofetch::git;
//! use repofetch::options::{resolve, ResolveOverrides};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let options = resolve("rust-lang/cargo", &ResolveOverrides::default())?;
//!
//!     git::check_git().await?;
//!     let path = git::clone_repository(&options).await?;
//!     println!("Cloned to: {}", path.display());
//!
//!     Ok(())
//! }
//! ```

mod clone;
mod providers;

pub use clone::{check_git, clone_repository};
pub use providers::{provider_for_host, GitHubProvider, GitLabProvider, GitProvider};
