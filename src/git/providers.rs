//! Git provider implementations.
//!
//! This module contains the URL builders for each supported Git provider.

use crate::error::Result;

/// Default ref used for GitHub archive snapshots when no checkout is given.
const GITHUB_DEFAULT_ARCHIVE_REF: &str = "master";

/// Trait for Git provider implementations.
///
/// Each provider implements this trait to render the canonical clone and
/// archive URLs for its host convention. URL building is pure string
/// construction; no I/O happens here.
pub trait GitProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &'static str;

    /// The host this provider serves.
    fn host(&self) -> &'static str;

    /// Check if this provider can handle the given host.
    fn can_handle(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(self.host())
    }

    /// Canonical SSH clone URL.
    fn ssh_url(&self, owner: &str, name: &str) -> String {
        format!("git@{}:{}/{}.git", self.host(), owner, name)
    }

    /// Canonical HTTPS clone URL.
    fn https_url(&self, owner: &str, name: &str) -> String {
        format!("https://{}/{}/{}.git", self.host(), owner, name)
    }

    /// Downloadable archive URL for the given checkout ref.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot build an archive URL
    /// without an explicit checkout ref.
    fn archive_url(&self, owner: &str, name: &str, checkout: &str) -> Result<String>;
}

/// GitHub provider implementation.
pub struct GitHubProvider;

impl GitProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn host(&self) -> &'static str {
        "github.com"
    }

    fn archive_url(&self, owner: &str, name: &str, checkout: &str) -> Result<String> {
        // GitHub serves archive-by-ref zips; fall back to the assumed
        // default branch when no ref was requested.
        let reference = if checkout.is_empty() {
            GITHUB_DEFAULT_ARCHIVE_REF
        } else {
            checkout
        };
        Ok(format!(
            "https://{}/{}/{}/archive/{}.zip",
            self.host(),
            owner,
            name,
            reference
        ))
    }
}

/// GitLab provider implementation.
pub struct GitLabProvider;

impl GitProvider for GitLabProvider {
    fn name(&self) -> &'static str {
        "GitLab"
    }

    fn host(&self) -> &'static str {
        "gitlab.com"
    }

    fn archive_url(&self, owner: &str, name: &str, checkout: &str) -> Result<String> {
        // GitLab's repository-archive endpoint takes the ref as a query
        // parameter. The default branch name cannot be assumed, so an
        // explicit ref is required.
        if checkout.is_empty() {
            return Err(crate::err!(CheckoutRequired {
                host: self.host().to_string(),
            }));
        }
        Ok(format!(
            "https://{}/{}/{}/repository/archive.zip?ref={}",
            self.host(),
            owner,
            name,
            checkout
        ))
    }
}

/// Registered providers, in lookup order.
static PROVIDERS: &[&(dyn GitProvider)] = &[&GitHubProvider, &GitLabProvider];

/// Find the provider that serves the given host.
#[must_use]
pub fn provider_for_host(host: &str) -> Option<&'static dyn GitProvider> {
    PROVIDERS.iter().copied().find(|p| p.can_handle(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_clone_urls() {
        let provider = GitHubProvider;

        assert_eq!(
            provider.ssh_url("org", "repo"),
            "git@github.com:org/repo.git"
        );
        assert_eq!(
            provider.https_url("org", "repo"),
            "https://github.com/org/repo.git"
        );
    }

    #[test]
    fn test_gitlab_clone_urls() {
        let provider = GitLabProvider;

        assert_eq!(
            provider.ssh_url("org", "repo"),
            "git@gitlab.com:org/repo.git"
        );
        assert_eq!(
            provider.https_url("org", "repo"),
            "https://gitlab.com/org/repo.git"
        );
    }

    #[test]
    fn test_github_archive_url() {
        let provider = GitHubProvider;

        assert_eq!(
            provider.archive_url("org", "repo", "dev").unwrap(),
            "https://github.com/org/repo/archive/dev.zip"
        );

        // No ref falls back to the assumed default branch
        assert_eq!(
            provider.archive_url("org", "repo", "").unwrap(),
            "https://github.com/org/repo/archive/master.zip"
        );
    }

    #[test]
    fn test_gitlab_archive_url() {
        let provider = GitLabProvider;

        assert_eq!(
            provider.archive_url("org", "repo", "dev").unwrap(),
            "https://gitlab.com/org/repo/repository/archive.zip?ref=dev"
        );
    }

    #[test]
    fn test_gitlab_archive_requires_ref() {
        let provider = GitLabProvider;
        assert!(provider.archive_url("org", "repo", "").is_err());
    }

    #[test]
    fn test_provider_lookup() {
        assert_eq!(provider_for_host("github.com").map(|p| p.name()), Some("GitHub"));
        assert_eq!(provider_for_host("gitlab.com").map(|p| p.name()), Some("GitLab"));
        assert_eq!(provider_for_host("GitHub.com").map(|p| p.name()), Some("GitHub"));
        assert!(provider_for_host("bitbucket.org").is_none());
    }
}
