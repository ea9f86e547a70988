//! Option resolution.
//!
//! This is the public entry point of the core: merge caller-supplied
//! overrides with defaults, classify the reference, and render the
//! canonical repository URL for the requested transport. The whole step
//! is synchronous and pure — it runs before any I/O collaborator and
//! must be the only place a malformed reference can fail.

use crate::error::Result;
use crate::git::provider_for_host;
use crate::parser::{parse_reference, RepoReference, DEFAULT_HOST};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Retrieval mechanism for a resolved repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Clone over SSH (`git@host:owner/name.git`).
    #[default]
    Ssh,
    /// Clone over HTTPS (`https://host/owner/name.git`).
    Https,
    /// Download a pre-built archive snapshot.
    Direct,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Https => write!(f, "https"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// Caller-supplied partial configuration for [`resolve`].
///
/// Every field defaults to "not set"; only fields the caller explicitly
/// set override the built-in defaults. An absent field never overrides.
#[derive(Debug, Clone, Default)]
pub struct ResolveOverrides {
    /// Requested transport; defaults to [`Transport::Ssh`].
    pub transport: Option<Transport>,
    /// Destination directory; defaults to the current working directory.
    pub dist: Option<PathBuf>,
    /// Fallback checkout ref, used only when the reference carries no
    /// `#` fragment.
    pub checkout: Option<String>,
    /// Treat the reference as an opaque URL, bypassing the URL builder.
    pub custom: Option<bool>,
}

/// A fully resolved retrieval request.
///
/// Constructed once per invocation, immutable thereafter, and consumed by
/// exactly one retrieval action (clone or archive download).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    /// Canonical, fully-qualified URL (clone URL or archive URL).
    pub repo: String,
    /// Resolved checkout ref; empty string if none was specified.
    pub checkout: String,
    /// Requested transport mode.
    #[serde(rename = "type")]
    pub transport: Transport,
    /// Destination directory.
    pub dist: PathBuf,
    /// Whether the reference was treated as an opaque URL.
    pub custom: bool,
}

/// Resolve a repository reference and overrides into [`ResolvedOptions`].
///
/// # Examples
///
/// ```rust
/// use repofetch::options::{resolve, ResolveOverrides, Transport};
///
/// let options = resolve("rust-lang/cargo", &ResolveOverrides::default()).unwrap();
/// assert_eq!(options.repo, "git@github.com:rust-lang/cargo.git");
/// assert_eq!(options.transport, Transport::Ssh);
/// ```
///
/// # Errors
///
/// Fails synchronously on an empty reference (`InvalidReference`) and on
/// an archive request without a ref against a host whose default branch
/// cannot be assumed (`CheckoutRequired`). No I/O is performed.
pub fn resolve(reference: &str, overrides: &ResolveOverrides) -> Result<ResolvedOptions> {
    let parsed = parse_reference(reference)?;

    let transport = overrides.transport.unwrap_or_default();
    let dist = overrides.dist.clone().unwrap_or_else(default_dist);

    // A fragment in the reference wins over a supplied fallback ref
    let checkout = if parsed.checkout.is_empty() {
        overrides.checkout.clone().unwrap_or_default()
    } else {
        parsed.checkout.clone()
    };

    // Custom is forced when the parser could not classify the reference,
    // and honored when the caller asked for it on a well-formed URL
    let custom = overrides.custom.unwrap_or(false) || parsed.repo.is_custom();

    let repo = if custom {
        // Builder bypass: the fragment-stripped reference, verbatim
        parsed.base.clone()
    } else {
        build_repo_url(&parsed.repo, transport, &checkout)?
    };

    tracing::debug!(
        reference = %reference,
        repo = %repo,
        transport = %transport,
        checkout = %checkout,
        custom = custom,
        "Resolved repository reference"
    );

    Ok(ResolvedOptions {
        repo,
        checkout,
        transport,
        dist,
        custom,
    })
}

/// Render the canonical URL for a classified reference.
fn build_repo_url(repo: &RepoReference, transport: Transport, checkout: &str) -> Result<String> {
    let (host, owner, name) = match repo {
        RepoReference::Shorthand { owner, name } => {
            (DEFAULT_HOST, owner.as_str(), name.as_str())
        }
        RepoReference::SshUrl { host, owner, name }
        | RepoReference::HttpsUrl { host, owner, name } => {
            (host.as_str(), owner.as_str(), name.as_str())
        }
        RepoReference::Custom { url } => return Ok(url.clone()),
    };

    let provider = provider_for_host(host).ok_or_else(|| {
        crate::err!(UnsupportedHost {
            host: host.to_string(),
        })
    })?;

    match transport {
        Transport::Ssh => Ok(provider.ssh_url(owner, name)),
        Transport::Https => Ok(provider.https_url(owner, name)),
        Transport::Direct => provider.archive_url(owner, name, checkout),
    }
}

fn default_dist() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GITHUB_SSH_URL: &str = "git@github.com:acme/widget.git";
    const GITLAB_SSH_URL: &str = "git@gitlab.com:acme/widget.git";
    const GITHUB_HTTPS_URL: &str = "https://github.com/acme/widget.git";
    const GITLAB_HTTPS_URL: &str = "https://gitlab.com/acme/widget.git";

    fn with_transport(transport: Transport) -> ResolveOverrides {
        ResolveOverrides {
            transport: Some(transport),
            ..ResolveOverrides::default()
        }
    }

    #[test]
    fn test_shorthand_defaults() {
        let options = resolve("acme/widget", &ResolveOverrides::default()).unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);
        assert_eq!(options.checkout, "");
        assert_eq!(options.transport, Transport::Ssh);
        assert_eq!(options.dist, env::current_dir().unwrap());
        assert!(!options.custom);
    }

    #[test]
    fn test_ssh_url_is_idempotent() {
        let options = resolve(GITHUB_SSH_URL, &ResolveOverrides::default()).unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);

        let options = resolve(GITLAB_SSH_URL, &ResolveOverrides::default()).unwrap();
        assert_eq!(options.repo, GITLAB_SSH_URL);
    }

    #[test]
    fn test_https_transport() {
        let options = resolve("acme/widget", &with_transport(Transport::Https)).unwrap();
        assert_eq!(options.repo, GITHUB_HTTPS_URL);
        assert_eq!(options.transport, Transport::Https);

        let options = resolve(GITHUB_SSH_URL, &with_transport(Transport::Https)).unwrap();
        assert_eq!(options.repo, GITHUB_HTTPS_URL);

        let options = resolve(GITLAB_SSH_URL, &with_transport(Transport::Https)).unwrap();
        assert_eq!(options.repo, GITLAB_HTTPS_URL);
    }

    #[test]
    fn test_https_url_to_ssh() {
        let options = resolve(GITHUB_HTTPS_URL, &ResolveOverrides::default()).unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);
    }

    #[test]
    fn test_checkout_fragment_extraction() {
        let options = resolve("acme/widget#dev", &ResolveOverrides::default()).unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);
        assert_eq!(options.checkout, "dev");

        let options = resolve(
            "git@github.com:acme/widget#dev.git",
            &ResolveOverrides::default(),
        )
        .unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);
        assert_eq!(options.checkout, "dev");

        let options = resolve(
            "https://github.com/acme/widget#dev.git",
            &ResolveOverrides::default(),
        )
        .unwrap();
        assert_eq!(options.repo, GITHUB_SSH_URL);
        assert_eq!(options.checkout, "dev");
    }

    #[test]
    fn test_checkout_with_https_transport() {
        let options = resolve("acme/widget#dev", &with_transport(Transport::Https)).unwrap();
        assert_eq!(options.repo, GITHUB_HTTPS_URL);
        assert_eq!(options.checkout, "dev");
    }

    #[test]
    fn test_checkout_override_is_fallback_only() {
        let overrides = ResolveOverrides {
            checkout: Some("v2.0".to_string()),
            ..ResolveOverrides::default()
        };

        let options = resolve("acme/widget", &overrides).unwrap();
        assert_eq!(options.checkout, "v2.0");

        // The fragment wins over the fallback
        let options = resolve("acme/widget#dev", &overrides).unwrap();
        assert_eq!(options.checkout, "dev");
    }

    #[test]
    fn test_direct_github_archive() {
        let options = resolve("acme/widget#dev", &with_transport(Transport::Direct)).unwrap();
        assert_eq!(
            options.repo,
            "https://github.com/acme/widget/archive/dev.zip"
        );
        assert_eq!(options.checkout, "dev");
    }

    #[test]
    fn test_direct_github_archive_default_ref() {
        let options = resolve("acme/widget", &with_transport(Transport::Direct)).unwrap();
        assert_eq!(
            options.repo,
            "https://github.com/acme/widget/archive/master.zip"
        );
    }

    #[test]
    fn test_direct_gitlab_archive() {
        let options = resolve(
            "git@gitlab.com:acme/widget#dev.git",
            &with_transport(Transport::Direct),
        )
        .unwrap();
        assert_eq!(
            options.repo,
            "https://gitlab.com/acme/widget/repository/archive.zip?ref=dev"
        );
    }

    #[test]
    fn test_direct_gitlab_archive_requires_ref() {
        let result = resolve(GITLAB_SSH_URL, &with_transport(Transport::Direct));
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_flag_bypasses_builder() {
        // A well-formed known-host URL, forced custom by the caller: the
        // fragment-stripped input is kept verbatim for every transport
        for transport in [Transport::Ssh, Transport::Https, Transport::Direct] {
            let overrides = ResolveOverrides {
                transport: Some(transport),
                custom: Some(true),
                ..ResolveOverrides::default()
            };
            let options =
                resolve("https://github.com/acme/widget.git#dev", &overrides).unwrap();
            assert_eq!(options.repo, GITHUB_HTTPS_URL);
            assert_eq!(options.checkout, "dev");
            assert!(options.custom);
        }
    }

    #[test]
    fn test_unrecognized_reference_forces_custom() {
        let options = resolve(
            "git@example.com:acme/widget.git#dev",
            &ResolveOverrides::default(),
        )
        .unwrap();
        assert!(options.custom);
        assert_eq!(options.repo, "git@example.com:acme/widget.git");
        assert_eq!(options.checkout, "dev");
    }

    #[test]
    fn test_dist_override() {
        let overrides = ResolveOverrides {
            dist: Some(PathBuf::from("/tmp/fetched")),
            ..ResolveOverrides::default()
        };
        let options = resolve("acme/widget", &overrides).unwrap();
        assert_eq!(options.dist, PathBuf::from("/tmp/fetched"));
    }

    #[test]
    fn test_empty_reference_fails() {
        assert!(resolve("", &ResolveOverrides::default()).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let options = resolve("acme/widget", &ResolveOverrides::default()).unwrap();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["type"], "ssh");
        assert_eq!(json["repo"], GITHUB_SSH_URL);
        assert_eq!(json["custom"], false);
    }
}
