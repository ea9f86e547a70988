//! Repository reference parsing utilities.
//!
//! This module handles parsing of repository reference strings into
//! structured [`RepoReference`] values.
//!
//! # Supported Reference Shapes
//!
//! - **Shorthand**: `owner/name` (resolves against the default host)
//! - **SSH**: `git@github.com:owner/name.git`
//! - **HTTPS**: `https://gitlab.com/owner/name.git`
//! - **Custom**: anything else, passed through verbatim
//!
//! A checkout ref may be appended to any shape after a `#` separator,
//! e.g. `owner/name#dev`.

use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

/// Host a bare `owner/name` shorthand resolves against.
pub const DEFAULT_HOST: &str = "github.com";

// Regex patterns for classifying references, tested in priority order
static SHORTHAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Matches: owner/name — exactly two path segments, no scheme
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)/([A-Za-z0-9][A-Za-z0-9._-]*)$")
        .expect("Invalid regex")
});

static SSH_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Matches: git@host:owner/name with an optional .git suffix
    Regex::new(r"^git@(github\.com|gitlab\.com):([^/:@#]+)/([^/:@#]+?)(?:\.git)?$")
        .expect("Invalid regex")
});

static HTTPS_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Matches: https://host/owner/name with an optional .git suffix
    Regex::new(r"^https://(github\.com|gitlab\.com)/([^/#]+)/([^/#]+?)(?:\.git)?$")
        .expect("Invalid regex")
});

/// A classified repository reference.
///
/// Produced by [`parse_reference`] from the raw input string after the
/// checkout fragment has been stripped. The variants are tested in a fixed
/// priority order; the first matching shape wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoReference {
    /// Bare `owner/name` shorthand, no scheme.
    Shorthand {
        /// Repository owner
        owner: String,
        /// Repository name
        name: String,
    },
    /// SSH clone URL for a known host.
    SshUrl {
        /// Known host (`github.com` or `gitlab.com`)
        host: String,
        /// Repository owner
        owner: String,
        /// Repository name
        name: String,
    },
    /// HTTPS clone URL for a known host.
    HttpsUrl {
        /// Known host (`github.com` or `gitlab.com`)
        host: String,
        /// Repository owner
        owner: String,
        /// Repository name
        name: String,
    },
    /// Any reference not matching a recognized shape; kept verbatim.
    Custom {
        /// The fragment-stripped input
        url: String,
    },
}

impl RepoReference {
    /// Whether the reference did not match any recognized shape.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// The known host this reference resolves against, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Shorthand { .. } => Some(DEFAULT_HOST),
            Self::SshUrl { host, .. } | Self::HttpsUrl { host, .. } => Some(host),
            Self::Custom { .. } => None,
        }
    }
}

/// A parsed reference: the classified repository plus the checkout ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// The classified repository reference.
    pub repo: RepoReference,
    /// Checkout ref extracted from the fragment; empty if none was given.
    pub checkout: String,
    /// The reference with the checkout fragment stripped, otherwise verbatim.
    pub base: String,
}

/// Parse a repository reference string into a structured [`ParsedReference`].
///
/// The checkout fragment (everything after the first `#`) is split off
/// first; the remainder is classified by shape. Classification is by the
/// shape of the whole string — a custom reference that happens to end in a
/// recognizable suffix is not re-parsed.
///
/// # Examples
///
/// ```rust
/// use repofetch::parser::{parse_reference, RepoReference};
///
/// let parsed = parse_reference("rust-lang/cargo#dev").unwrap();
/// assert!(matches!(parsed.repo, RepoReference::Shorthand { .. }));
/// assert_eq!(parsed.checkout, "dev");
///
/// let parsed = parse_reference("git@gitlab.com:rust-lang/cargo.git").unwrap();
/// assert!(matches!(parsed.repo, RepoReference::SshUrl { .. }));
/// ```
///
/// # Errors
///
/// Returns [`InvalidReference`](crate::error::RepoFetchError::InvalidReference)
/// if the reference is empty.
pub fn parse_reference(reference: &str) -> Result<ParsedReference> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(crate::err!(InvalidReference {
            reference: reference.to_string(),
        }));
    }

    let (base, checkout) = split_checkout(reference);

    let repo = if let Some(caps) = SHORTHAND_PATTERN.captures(&base) {
        RepoReference::Shorthand {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        }
    } else if let Some(caps) = SSH_URL_PATTERN.captures(&base) {
        RepoReference::SshUrl {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            name: caps[3].to_string(),
        }
    } else if let Some(caps) = HTTPS_URL_PATTERN.captures(&base) {
        RepoReference::HttpsUrl {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            name: caps[3].to_string(),
        }
    } else {
        tracing::debug!(reference = %base, "Unrecognized reference shape, treating as custom");
        RepoReference::Custom { url: base.clone() }
    };

    Ok(ParsedReference {
        repo,
        checkout,
        base,
    })
}

/// Split a reference at the first `#` into (base, checkout).
///
/// A trailing `.git` on the fragment belongs to the URL, not the ref:
/// `git@github.com:owner/name#dev.git` carries the checkout ref `dev`.
fn split_checkout(reference: &str) -> (String, String) {
    match reference.split_once('#') {
        Some((base, fragment)) => {
            let checkout = fragment.strip_suffix(".git").unwrap_or(fragment);
            (base.to_string(), checkout.to_string())
        }
        None => (reference.to_string(), String::new()),
    }
}
