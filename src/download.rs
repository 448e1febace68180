//! Streaming download with progress tracking and stall detection

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use indicatif::ProgressBar;
use log::debug;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

// Download timeout constants. A stalled mirror should fail loudly instead
// of hanging the installer forever.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30); // Initial connection
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(300); // 5 min no data

/// Download failures that carry enough context to be actionable.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP {status} while fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no data received for {stalled_for}s while fetching {url} ({downloaded}/{total} bytes)")]
    Stalled {
        url: String,
        stalled_for: u64,
        downloaded: u64,
        total: u64,
    },
}

/// Build the HTTP client shared by the script and archive downloads.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(crate::release::USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Stream `url` into `dest`, reporting byte progress on `bar` when given.
///
/// The file handle lives only inside this function, so every exit path
/// closes it. Inactivity on the stream aborts the download with a stall
/// diagnostic rather than waiting forever.
pub async fn download_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    bar: Option<&ProgressBar>,
) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to request {url}"))?;

    if !response.status().is_success() {
        return Err(DownloadError::Status {
            url: url.to_string(),
            status: response.status(),
        }
        .into());
    }

    let total = response.content_length().unwrap_or(0);
    if let Some(bar) = bar
        && total > 0
    {
        bar.set_length(total);
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    let mut downloaded: u64 = 0;

    let mut stream = response.bytes_stream();

    loop {
        // Wrap stream.next() with a timeout so a silent connection surfaces
        // as an error instead of an endless wait.
        let chunk = match timeout(INACTIVITY_TIMEOUT, stream.next()).await {
            Ok(Some(Ok(chunk))) => chunk,
            Ok(Some(Err(e))) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Transfer failed while fetching {url}")));
            }
            Ok(None) => break, // Stream ended normally
            Err(_) => {
                return Err(DownloadError::Stalled {
                    url: url.to_string(),
                    stalled_for: INACTIVITY_TIMEOUT.as_secs(),
                    downloaded,
                    total,
                }
                .into());
            }
        };

        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        downloaded += chunk.len() as u64;

        if let Some(bar) = bar {
            bar.set_position(downloaded);
        }
    }

    file.flush()
        .await
        .with_context(|| format!("Failed to flush {}", dest.display()))?;

    debug!("Downloaded {downloaded} bytes from {url}");
    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stall_error_reports_progress() {
        let err = DownloadError::Stalled {
            url: "https://example.invalid/run.zip".into(),
            stalled_for: 300,
            downloaded: 1024,
            total: 4096,
        };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("1024/4096"));
        assert!(msg.contains("https://example.invalid/run.zip"));
    }

    #[test]
    fn status_error_names_the_url() {
        let err = DownloadError::Status {
            url: "https://example.invalid/start.sh".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("start.sh"));
    }
}
