//! Detection probes against real directories.

use std::fs;
use std::path::Path;

use pnx_cli::detect::{self, InstallState, LIBS_DIR, SERVER_JAR};
use pnx_cli::platform::Platform;

fn put_libs(dir: &Path) {
    fs::create_dir_all(dir.join(LIBS_DIR)).unwrap();
}

fn put_jar(dir: &Path) {
    fs::write(dir.join(SERVER_JAR), b"jar").unwrap();
}

fn put_script(dir: &Path, platform: Platform) {
    fs::write(dir.join(platform.script_name()), b"run").unwrap();
}

#[test]
fn empty_directory_is_incomplete() {
    let dir = tempfile::tempdir().unwrap();

    let check = detect::inspect(dir.path(), Platform::Unix);

    assert_eq!(check.state(), InstallState::Incomplete);
    assert!(!check.has_libs);
    assert!(!check.has_server_jar);
    assert!(!check.has_start_script);
}

#[test]
fn all_three_markers_make_a_complete_install() {
    let dir = tempfile::tempdir().unwrap();
    put_libs(dir.path());
    put_jar(dir.path());
    put_script(dir.path(), Platform::Unix);

    let check = detect::inspect(dir.path(), Platform::Unix);

    assert_eq!(check.state(), InstallState::Complete);
    assert!(detect::is_complete(dir.path(), Platform::Unix));
}

#[test]
fn any_missing_marker_means_incomplete() {
    for missing in ["libs", "jar", "script"] {
        let dir = tempfile::tempdir().unwrap();
        if missing != "libs" {
            put_libs(dir.path());
        }
        if missing != "jar" {
            put_jar(dir.path());
        }
        if missing != "script" {
            put_script(dir.path(), Platform::Unix);
        }

        assert!(
            !detect::is_complete(dir.path(), Platform::Unix),
            "install should be incomplete without the {missing} marker"
        );
    }
}

#[test]
fn script_for_the_wrong_platform_does_not_count() {
    let dir = tempfile::tempdir().unwrap();
    put_libs(dir.path());
    put_jar(dir.path());
    put_script(dir.path(), Platform::Windows);

    assert!(!detect::is_complete(dir.path(), Platform::Unix));
    assert!(detect::is_complete(dir.path(), Platform::Windows));
}

#[test]
fn unix_script_does_not_satisfy_windows() {
    let dir = tempfile::tempdir().unwrap();
    put_libs(dir.path());
    put_jar(dir.path());
    put_script(dir.path(), Platform::Unix);

    assert!(!detect::is_complete(dir.path(), Platform::Windows));
}

#[test]
fn probes_see_the_directory_as_it_is_now() {
    let dir = tempfile::tempdir().unwrap();
    put_libs(dir.path());
    put_jar(dir.path());
    put_script(dir.path(), Platform::Unix);
    assert!(detect::is_complete(dir.path(), Platform::Unix));

    fs::remove_file(dir.path().join(SERVER_JAR)).unwrap();

    assert!(!detect::is_complete(dir.path(), Platform::Unix));
}
