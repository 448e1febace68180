//! Release archive extraction

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use zip::ZipArchive;

/// Extract the whole archive into `dest`, overwriting files that already
/// exist so a rerun upgrades in place.
///
/// Inflation is CPU-bound, so the work runs on the blocking pool. Returns
/// the number of file entries written.
pub async fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let archive_path = archive_path.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || extract_blocking(&archive_path, &dest))
        .await
        .context("Extraction task failed")?
}

fn extract_blocking(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = std::fs::File::open(archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file).context("Failed to read zip archive")?;

    let mut written = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read zip entry at index {i}"))?;

        // Refuse entries whose path would escape the target directory.
        let Some(relative) = entry.enclosed_name() else {
            return Err(anyhow!("Zip entry {:?} has an unsafe path", entry.name()));
        };
        let out_path: PathBuf = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .with_context(|| format!("Failed to create {}", out_path.display()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // File::create truncates, which is what upgrades an existing
        // installation in place.
        let mut out = std::fs::File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("Failed to extract {}", out_path.display()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, Permissions::from_mode(mode))
                .with_context(|| format!("Failed to set permissions on {}", out_path.display()))?;
        }

        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[tokio::test]
    async fn extracts_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("run.zip");
        build_archive(
            &archive,
            &[("powernukkitx.jar", "jar"), ("libs/dep.jar", "dep")],
        );

        let written = extract_archive(&archive, dir.path()).await.unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("powernukkitx.jar")).unwrap(),
            "jar"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("libs/dep.jar")).unwrap(),
            "dep"
        );
    }

    #[tokio::test]
    async fn overwrites_existing_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("powernukkitx.jar"), "old").unwrap();

        let archive = dir.path().join("run.zip");
        build_archive(&archive, &[("powernukkitx.jar", "new")]);

        extract_archive(&archive, dir.path()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("powernukkitx.jar")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn missing_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_archive(&dir.path().join("nope.zip"), dir.path()).await;
        assert!(result.is_err());
    }
}
