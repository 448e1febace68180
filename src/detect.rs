//! Installation state detection
//!
//! Decides whether a directory already holds a runnable server by checking
//! the files the start script needs:
//! - `libs/` dependency directory
//! - `powernukkitx.jar` server archive
//! - the start script for the current platform
//!
//! Every probe reads the filesystem fresh; nothing is cached between the
//! pipeline's entry points. `server.properties` is deliberately not part of
//! the check: configuration is optional, and a complete but unconfigured
//! server starts with its built-in defaults.

use std::path::Path;

use crate::platform::Platform;

/// Directory holding the server's bundled dependencies.
pub const LIBS_DIR: &str = "libs";

/// Main server archive extracted from the release bundle.
pub const SERVER_JAR: &str = "powernukkitx.jar";

/// Installation state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// At least one required file is missing; a rerun overwrites remnants.
    Incomplete,
    /// All required files present; download and extraction are skipped.
    Complete,
}

/// Presence flags for the three required files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallCheck {
    pub has_libs: bool,
    pub has_server_jar: bool,
    pub has_start_script: bool,
}

impl InstallCheck {
    pub fn is_complete(&self) -> bool {
        self.has_libs && self.has_server_jar && self.has_start_script
    }

    pub fn state(&self) -> InstallState {
        if self.is_complete() {
            InstallState::Complete
        } else {
            InstallState::Incomplete
        }
    }
}

/// Probe `dir` for the required files.
///
/// Only the script for `platform` counts: a leftover `start.bat` on a Unix
/// host does not make the installation complete.
pub fn inspect(dir: &Path, platform: Platform) -> InstallCheck {
    InstallCheck {
        has_libs: dir.join(LIBS_DIR).exists(),
        has_server_jar: dir.join(SERVER_JAR).exists(),
        has_start_script: dir.join(platform.script_name()).exists(),
    }
}

/// True when `dir` holds everything the start script needs.
pub fn is_complete(dir: &Path, platform: Platform) -> bool {
    inspect(dir, platform).is_complete()
}
