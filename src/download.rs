//! Archive download collaborator.
//!
//! Fetches a pre-built archive snapshot over HTTPS and leaves the archive
//! file inside the destination directory; optionally unpacks it in place.
//! A single outstanding request per invocation, reported once — no
//! retries, no partial-failure semantics.

use crate::config::HttpOptions;
use crate::error::{RepoFetchError, Result};
use crate::options::ResolvedOptions;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Download the archive at the resolved URL into the destination directory.
///
/// The file name is derived from the URL path's last segment (query
/// stripped), with `.zip` appended when missing. Returns the path of the
/// written archive file.
///
/// # Errors
///
/// Returns [`DownloadFailed`](RepoFetchError::DownloadFailed) on request
/// errors or a non-success HTTP status (the status code is preserved).
pub async fn download_archive(
    options: &ResolvedOptions,
    http: &HttpOptions,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(&options.dist)
        .await
        .map_err(|e| RepoFetchError::io(&options.dist, e, file!(), line!()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()
        .map_err(|e| {
            crate::err!(DownloadFailed {
                url: options.repo.clone(),
                status_code: None,
                message: e.to_string(),
            })
        })?;

    tracing::info!(url = %options.repo, "Downloading archive");

    let response = client.get(&options.repo).send().await.map_err(|e| {
        crate::err!(DownloadFailed {
            url: options.repo.clone(),
            status_code: None,
            message: e.to_string(),
        })
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(crate::err!(DownloadFailed {
            url: options.repo.clone(),
            status_code: Some(status.as_u16()),
            message: format!("HTTP status {status}"),
        }));
    }

    let path = options.dist.join(archive_file_name(&options.repo));

    let progress = match response.content_length() {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar
        }
        None => ProgressBar::hidden(),
    };

    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| RepoFetchError::io(&path, e, file!(), line!()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            crate::err!(DownloadFailed {
                url: options.repo.clone(),
                status_code: None,
                message: e.to_string(),
            })
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|e| RepoFetchError::io(&path, e, file!(), line!()))?;
        progress.inc(chunk.len() as u64);
    }

    file.flush()
        .await
        .map_err(|e| RepoFetchError::io(&path, e, file!(), line!()))?;
    progress.finish_and_clear();

    tracing::info!(path = %path.display(), "Archive downloaded");
    Ok(path)
}

/// Unpack a downloaded zip archive next to the archive file.
///
/// Extraction is synchronous work, run on the blocking pool. Returns the
/// directory the archive was unpacked into.
///
/// # Errors
///
/// Returns [`ExtractFailed`](RepoFetchError::ExtractFailed) on a corrupt
/// or unreadable archive.
pub async fn extract_archive(archive: &Path) -> Result<PathBuf> {
    let dest = archive
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!(path = %archive.display(), "Extracting archive");

    let archive_path = archive.to_path_buf();
    let extract_dest = dest.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::open(&archive_path)
            .map_err(|e| RepoFetchError::io(&archive_path, e, file!(), line!()))?;

        let mut zip = zip::ZipArchive::new(file).map_err(|e| {
            crate::err!(ExtractFailed {
                path: archive_path.clone(),
                message: e.to_string(),
            })
        })?;

        zip.extract(&extract_dest).map_err(|e| {
            crate::err!(ExtractFailed {
                path: archive_path.clone(),
                message: e.to_string(),
            })
        })
    })
    .await
    .map_err(|e| RepoFetchError::internal(format!("Extract task failed: {e}"), file!(), line!()))??;

    Ok(dest)
}

/// File name for the downloaded archive, derived from the URL.
fn archive_file_name(repo: &str) -> String {
    let name = url::Url::parse(repo)
        .ok()
        .and_then(|u| {
            u.path_segments().and_then(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .last()
                    .map(String::from)
            })
        })
        .unwrap_or_default();

    let name = if name.is_empty() {
        "archive".to_string()
    } else {
        name
    };

    if name.ends_with(".zip") {
        name
    } else {
        format!("{name}.zip")
    }
}
