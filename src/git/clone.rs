//! Git clone collaborator.
//!
//! Shells out to the external `git` client: an availability probe run
//! before any clone attempt, and the clone itself with an optional
//! checkout of a branch/tag/commit afterwards. Each operation completes
//! or reports failure exactly once; no retries, no partial cleanup.

use crate::error::{RepoFetchError, Result};
use crate::options::ResolvedOptions;
use std::path::PathBuf;
use tokio::process::Command;

/// Probe whether a usable `git` client is present.
///
/// Returns the client's version string on success.
///
/// # Errors
///
/// Returns [`ToolUnavailable`](RepoFetchError::ToolUnavailable) when the
/// binary cannot be located or does not answer `git --version`.
pub async fn check_git() -> Result<String> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|e| {
            crate::err!(ToolUnavailable {
                tool: "git".to_string(),
                message: e.to_string(),
            })
        })?;

    if !output.status.success() {
        return Err(crate::err!(ToolUnavailable {
            tool: "git".to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    tracing::debug!(version = %version, "git client available");
    Ok(version)
}

/// Clone the resolved repository into the destination directory.
///
/// Runs `git clone {repo}` with the working directory set to `dist`
/// (created if absent), then `git checkout {ref}` inside the cloned
/// directory when a checkout ref was resolved. Returns the path of the
/// cloned directory.
///
/// # Errors
///
/// Returns [`CloneFailed`](RepoFetchError::CloneFailed) with the captured
/// stderr when either git invocation reports a non-zero exit.
pub async fn clone_repository(options: &ResolvedOptions) -> Result<PathBuf> {
    tokio::fs::create_dir_all(&options.dist)
        .await
        .map_err(|e| RepoFetchError::io(&options.dist, e, file!(), line!()))?;

    let target = options.dist.join(repo_dir_name(&options.repo));

    tracing::info!(
        url = %options.repo,
        path = %target.display(),
        "Cloning repository"
    );

    let output = Command::new("git")
        .arg("clone")
        .arg(&options.repo)
        .current_dir(&options.dist)
        .output()
        .await
        .map_err(|e| {
            crate::err!(CloneFailed {
                url: options.repo.clone(),
                message: e.to_string(),
            })
        })?;

    if !output.status.success() {
        return Err(crate::err!(CloneFailed {
            url: options.repo.clone(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }));
    }

    if !options.checkout.is_empty() {
        tracing::debug!(
            path = %target.display(),
            checkout = %options.checkout,
            "Checking out ref"
        );

        let output = Command::new("git")
            .args(["checkout", options.checkout.as_str()])
            .current_dir(&target)
            .output()
            .await
            .map_err(|e| {
                crate::err!(CloneFailed {
                    url: options.repo.clone(),
                    message: e.to_string(),
                })
            })?;

        if !output.status.success() {
            return Err(crate::err!(CloneFailed {
                url: options.repo.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }));
        }
    }

    tracing::info!(path = %target.display(), "Repository cloned successfully");
    Ok(target)
}

/// Directory name git will clone into, derived from the URL's last
/// path segment with any `.git` suffix stripped.
fn repo_dir_name(url: &str) -> String {
    let url = url.trim_end_matches('/').trim_end_matches(".git");

    url.rsplit(&['/', ':'][..])
        .find(|segment| !segment.is_empty())
        .unwrap_or("repository")
        .to_string()
}
