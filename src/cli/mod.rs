//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `fetch`: Clone a repository or download an archive snapshot
//! - `resolve`: Print the resolved options for a reference without fetching
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Clone by shorthand into the current directory
//! repofetch fetch rust-lang/cargo
//!
//! # Clone a branch over https into a target directory
//! repofetch fetch rust-lang/cargo#dev --type https --dist ./vendor
//!
//! # Download an archive snapshot and unpack it
//! repofetch fetch rust-lang/cargo#v1.0 --type direct --extract
//!
//! # Inspect the resolution without any I/O
//! repofetch resolve rust-lang/cargo#dev --format json
//!
//! # Initialize configuration
//! repofetch init
//!
//! # Validate configuration
//! repofetch validate repofetch.yaml
//! ```

use crate::options::Transport;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// RepoFetch - clone repositories or download archive snapshots from shorthand references.
#[derive(Parser, Debug)]
#[command(
    name = "repofetch",
    author,
    version,
    about = "Clone repositories or download archive snapshots from shorthand references",
    long_about = "RepoFetch normalizes repository references (owner/name shorthand, SSH and \
                  HTTPS URLs, provider archive URLs) and either clones the repository with \
                  the external git client or downloads a pre-built archive snapshot."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "REPOFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a repository or download an archive snapshot
    #[command(visible_alias = "f")]
    Fetch(FetchArgs),

    /// Print the resolved options for a reference without fetching
    #[command(visible_alias = "r")]
    Resolve(ResolveArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the fetch command.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Repository reference: owner/name shorthand, SSH or HTTPS URL,
    /// optionally carrying a checkout ref after `#`
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Transport to retrieve with
    #[arg(short = 't', long = "type", value_name = "TYPE", value_enum)]
    pub transport: Option<Transport>,

    /// Destination directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Fallback checkout ref, used when the reference carries no fragment
    #[arg(long, value_name = "REF")]
    pub checkout: Option<String>,

    /// Treat the reference as an opaque URL, skipping normalization
    #[arg(long)]
    pub custom: bool,

    /// Unpack a downloaded archive in place
    #[arg(long)]
    pub extract: bool,
}

/// Arguments for the resolve command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Repository reference to resolve
    #[arg(value_name = "REFERENCE")]
    pub reference: String,

    /// Transport to resolve for
    #[arg(short = 't', long = "type", value_name = "TYPE", value_enum)]
    pub transport: Option<Transport>,

    /// Destination directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Fallback checkout ref, used when the reference carries no fragment
    #[arg(long, value_name = "REF")]
    pub checkout: Option<String>,

    /// Treat the reference as an opaque URL, skipping normalization
    #[arg(long)]
    pub custom: bool,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "repofetch.yaml")]
    pub config: PathBuf,
}

/// Output format for the resolve command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable field listing
    Text,
    /// Pretty-printed JSON
    Json,
}
