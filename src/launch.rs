//! Start-script launching
//!
//! The spawned server inherits the installer's stdio, so the operator talks
//! to the server console directly. The installer either waits for the
//! server to exit and reports how it went, or replaces itself with the
//! server entirely.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::platform::Platform;

/// How to hand control to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    /// Spawn the start script, wait for it, report its exit status.
    #[default]
    SpawnWait,
    /// Replace this process with the start script (Unix only).
    Replace,
}

/// Exit status of the spawned server, split the way operators ask about it:
/// the exit code when the script returned one, the terminating signal when
/// it did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl LaunchOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run the platform start script inside `dir`.
pub fn launch(dir: &Path, platform: Platform, mode: LaunchMode) -> Result<LaunchOutcome> {
    let script = dir.join(platform.script_name());

    match mode {
        LaunchMode::Replace => replace_process(dir, &script),
        LaunchMode::SpawnWait => spawn_and_wait(dir, &script),
    }
}

/// Spawn with inherited stdio and wait for the script to finish.
fn spawn_and_wait(dir: &Path, script: &Path) -> Result<LaunchOutcome> {
    let status = Command::new(script)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to start {}", script.display()))?;

    Ok(LaunchOutcome {
        code: status.code(),
        signal: signal_of(&status),
    })
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

/// Replace the installer with the start script. Returns only on failure.
#[cfg(unix)]
fn replace_process(dir: &Path, script: &Path) -> Result<LaunchOutcome> {
    use std::os::unix::process::CommandExt;

    let err = Command::new(script).current_dir(dir).exec();
    Err(anyhow::Error::new(err).context(format!("Failed to exec {}", script.display())))
}

/// Process replacement is a Unix facility; elsewhere fall back to waiting.
#[cfg(not(unix))]
fn replace_process(dir: &Path, script: &Path) -> Result<LaunchOutcome> {
    log::warn!("Process replacement is not available on this platform; spawning instead");
    spawn_and_wait(dir, script)
}
