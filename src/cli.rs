//! Command line interface

use std::path::PathBuf;

use clap::Parser;

/// Install, configure and launch a PowerNukkitX server.
#[derive(Parser, Debug, Clone)]
#[command(name = "pnx")]
#[command(version, about = "Install, configure and launch a PowerNukkitX server")]
pub struct Cli {
    /// Install into DIR instead of the current directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip the configuration wizard after installing
    #[arg(long)]
    pub no_wizard: bool,

    /// Install without starting the server afterwards
    #[arg(long)]
    pub no_launch: bool,

    /// Non-interactive mode for CI and scripts
    ///
    /// Runs the whole flow without any prompts: the target directory is
    /// taken as given and the configuration wizard is skipped.
    #[arg(long)]
    pub no_interaction: bool,

    /// Replace this process with the server instead of waiting on it
    #[arg(long)]
    pub exec: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Prompts are allowed in this run.
    pub fn interactive(&self) -> bool {
        !self.no_interaction
    }
}
