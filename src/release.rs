//! GitHub release API interaction

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::error;
use serde::Deserialize;

/// Releases listing of the server distribution, newest first.
const RELEASES_URL: &str =
    "https://api.github.com/repos/PowerNukkitX/PowerNukkitX/releases";

/// Name of the runnable-server archive attached to each release.
pub const ARCHIVE_ASSET: &str = "powernukkitx-run.zip";

const API_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent for every request this tool makes; the GitHub API rejects
/// anonymous clients without one.
pub(crate) const USER_AGENT: &str = "pnx-cli/0.1";

/// GitHub release metadata from API
#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

/// GitHub release asset metadata
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
}

impl Release {
    /// Exact-name lookup of the runnable-server archive among the assets.
    pub fn archive_asset(&self) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == ARCHIVE_ASSET)
    }
}

/// Fetch every release of the server, in GitHub API order (newest first).
///
/// A transport or API failure is not fatal at this stage: it is logged and
/// an empty list comes back, which the pipeline treats as "nothing to
/// install".
pub async fn fetch_releases() -> Vec<Release> {
    recover(try_fetch_releases().await)
}

/// Collapse a failed fetch into the empty list, logging the error.
fn recover(fetched: Result<Vec<Release>>) -> Vec<Release> {
    match fetched {
        Ok(releases) => releases,
        Err(e) => {
            error!("Error fetching releases from GitHub: {e:#}");
            Vec::new()
        }
    }
}

/// Fallible fetch, kept separate for callers that want the error itself.
pub async fn try_fetch_releases() -> Result<Vec<Release>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(API_TIMEOUT)
        .build()?;

    let response = client.get(RELEASES_URL).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("GitHub API error: HTTP {}", response.status()));
    }

    let releases: Vec<Release> = response.json().await?;
    Ok(releases)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {
            "tag_name": "v2.0.1",
            "assets": [
                {
                    "name": "sources.zip",
                    "browser_download_url": "https://example.invalid/sources.zip",
                    "size": 10
                },
                {
                    "name": "powernukkitx-run.zip",
                    "browser_download_url": "https://example.invalid/run.zip",
                    "size": 52428800
                }
            ]
        },
        { "tag_name": "v2.0.0", "assets": [] }
    ]"#;

    #[test]
    fn releases_keep_api_order() {
        let releases: Vec<Release> = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "v2.0.1");
        assert_eq!(releases[1].tag_name, "v2.0.0");
    }

    #[test]
    fn archive_lookup_matches_the_exact_name() {
        let releases: Vec<Release> = serde_json::from_str(PAYLOAD).unwrap();
        let asset = releases[0].archive_asset().unwrap();
        assert_eq!(asset.name, ARCHIVE_ASSET);
        assert_eq!(asset.browser_download_url, "https://example.invalid/run.zip");
        assert_eq!(asset.size, 52_428_800);
        assert!(releases[1].archive_asset().is_none());
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        let payload = r#"[{ "tag_name": "v2.0.0", "assets": [], "prerelease": false }]"#;
        let releases: Vec<Release> = serde_json::from_str(payload).unwrap();
        assert_eq!(releases[0].tag_name, "v2.0.0");
    }

    #[test]
    fn a_failed_fetch_collapses_to_an_empty_list() {
        let releases = recover(Err(anyhow!("connection refused")));
        assert!(releases.is_empty());
    }

    #[test]
    fn a_successful_fetch_passes_through_untouched() {
        let fetched: Vec<Release> = serde_json::from_str(PAYLOAD).unwrap();
        let releases = recover(Ok(fetched));
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name, "v2.0.1");
    }
}
