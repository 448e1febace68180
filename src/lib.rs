//! PowerNukkitX installer and launcher.
//!
//! Probes a directory for an existing server, downloads the latest
//! release from GitHub when it is missing, optionally walks the operator
//! through `server.properties`, and starts the platform start script.

pub mod banner;
pub mod cli;
pub mod detect;
pub mod download;
pub mod extract;
pub mod installer;
pub mod launch;
pub mod pipeline;
pub mod platform;
pub mod properties;
pub mod release;
pub mod wizard;

pub use cli::Cli;
pub use detect::{is_complete, InstallCheck, InstallState};
pub use installer::InstallOutcome;
pub use launch::{LaunchMode, LaunchOutcome};
pub use pipeline::{run, PipelineOptions, RunReport};
pub use platform::Platform;
pub use release::Release;
