//! Release download and extraction
//!
//! Turns one GitHub release into a runnable server directory: platform
//! start script, release archive, extraction in place, cleanup of the
//! files that are not needed at runtime.

use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::download::{self, download_to_file};
use crate::extract::extract_archive;
use crate::platform::Platform;
use crate::release::{Release, ARCHIVE_ASSET};

/// Helper jar bundled in the release archive; not needed once extracted.
pub const AUX_LAUNCHER_JAR: &str = "cli.jar";

/// What the installer did for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Archive downloaded and extracted into the target directory.
    Installed,
    /// The release carries no server archive; the directory was left
    /// untouched.
    NoArchiveAsset,
}

/// Download and unpack `release` into `dir`.
///
/// A release without the archive asset is not an error: the operator is
/// told and nothing is written. Download and extraction failures propagate.
pub async fn install_release(release: &Release, dir: &Path) -> Result<InstallOutcome> {
    let Some(asset) = release.archive_asset() else {
        info!("No zip file found in the latest release.");
        return Ok(InstallOutcome::NoArchiveAsset);
    };

    let platform = Platform::current();
    let client = download::http_client()?;

    // Start script first; next to the archive it is a rounding error.
    let script_path = dir.join(platform.script_name());
    download_to_file(&client, &platform.script_url(), &script_path, None)
        .await
        .with_context(|| format!("Failed to download {}", platform.script_name()))?;

    // The archive lands inside the target directory and is removed again
    // after extraction.
    let archive_path = dir.join(ARCHIVE_ASSET);
    let bar = download_bar(asset.size, &release.tag_name)?;
    let downloaded =
        download_to_file(&client, &asset.browser_download_url, &archive_path, Some(&bar)).await;
    bar.finish_and_clear();
    downloaded.with_context(|| format!("Failed to download {ARCHIVE_ASSET}"))?;

    let spinner = spinner("Extracting the server files...")?;
    let extracted = extract_archive(&archive_path, dir).await;
    spinner.finish_and_clear();
    let entries = extracted.with_context(|| format!("Failed to extract {ARCHIVE_ASSET}"))?;
    info!("Extracted {entries} files from {ARCHIVE_ASSET}");

    cleanup_artifacts(dir).await?;

    #[cfg(unix)]
    make_script_executable(&script_path);

    info!(
        "Installed PowerNukkitX {} into {}",
        release.tag_name,
        dir.display()
    );
    Ok(InstallOutcome::Installed)
}

fn download_bar(total: u64, tag: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:50.green/blue}] {bytes}/{total_bytes}  {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );
    bar.set_message(format!("📥 PowerNukkitX {tag}"));
    Ok(bar)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress bar template")?,
    );
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(bar)
}

/// Remove the downloaded archive and the bundled helper jar.
async fn cleanup_artifacts(dir: &Path) -> Result<()> {
    let archive_path = dir.join(ARCHIVE_ASSET);
    tokio::fs::remove_file(&archive_path)
        .await
        .with_context(|| format!("Failed to remove {}", archive_path.display()))?;

    // Older releases did not bundle the helper jar; a missing file is fine.
    let aux_path = dir.join(AUX_LAUNCHER_JAR);
    if let Err(e) = tokio::fs::remove_file(&aux_path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        return Err(
            anyhow::Error::new(e).context(format!("Failed to remove {}", aux_path.display()))
        );
    }

    Ok(())
}

/// Mark the start script executable. Failure is logged, not fatal; the
/// operator can chmod by hand.
#[cfg(unix)]
fn make_script_executable(script: &Path) {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = std::fs::set_permissions(script, Permissions::from_mode(0o755)) {
        log::warn!("Failed to make {} executable: {}", script.display(), e);
    }
}
