//! End-to-end install flow
//!
//! Probes the target directory, installs the latest release when needed,
//! offers the configuration wizard and hands the directory to the
//! launcher. Network, installer and launcher are injected so the flow
//! itself can be exercised in tests without touching GitHub.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use inquire::validator::Validation;
use inquire::{Confirm, Text};
use log::{error, info};

use crate::banner;
use crate::cli::Cli;
use crate::detect;
use crate::installer::{self, InstallOutcome};
use crate::launch::{self, LaunchMode, LaunchOutcome};
use crate::platform::Platform;
use crate::properties;
use crate::release::{self, Release};
use crate::wizard;

/// Resolved behaviour for one run, derived from the command line.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory to probe and install into.
    pub dir: PathBuf,
    /// Ask the operator to confirm or change the directory.
    pub confirm_dir: bool,
    /// Offer the configuration wizard after a fresh install.
    pub offer_wizard: bool,
    /// Wait for Enter after a completed wizard before starting the server.
    pub pause_before_launch: bool,
    /// Start the server at the end of the run.
    pub launch: bool,
    /// How to start it.
    pub launch_mode: LaunchMode,
}

impl PipelineOptions {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if let Some(dir) = &cli.dir
            && !dir.is_dir()
        {
            bail!("{} is not a directory", dir.display());
        }
        let dir = match &cli.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to resolve the current directory")?,
        };
        let interactive = cli.interactive();
        Ok(Self {
            // An explicit --dir is taken at face value.
            confirm_dir: interactive && cli.dir.is_none(),
            offer_wizard: interactive && !cli.no_wizard,
            pause_before_launch: interactive,
            launch: !cli.no_launch,
            launch_mode: if cli.exec {
                LaunchMode::Replace
            } else {
                LaunchMode::SpawnWait
            },
            dir,
        })
    }
}

/// What one run actually did.
#[derive(Debug)]
pub struct RunReport {
    /// Directory the run ended up working in.
    pub dir: PathBuf,
    /// The directory already held a complete server.
    pub already_installed: bool,
    /// The release feed was queried.
    pub fetched: bool,
    pub install: Option<InstallOutcome>,
    /// The wizard ran to completion and wrote a configuration.
    pub configured: bool,
    pub launch: Option<LaunchOutcome>,
}

impl RunReport {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            already_installed: false,
            fetched: false,
            install: None,
            configured: false,
            launch: None,
        }
    }
}

/// Run the whole flow with the real network, installer and launcher.
pub async fn run(cli: &Cli) -> Result<RunReport> {
    if cli.interactive() {
        banner::show_welcome();
    }
    let options = PipelineOptions::from_cli(cli)?;
    run_with_deps(
        options,
        release::fetch_releases,
        |release, dir| async move { installer::install_release(&release, &dir).await },
        |dir, mode| launch::launch(dir, Platform::current(), mode),
    )
    .await
}

/// Same flow with the side effects injected.
///
/// A directory that already holds the server skips straight to the
/// launcher without a single network call. Otherwise the latest release
/// is installed, the wizard offered, and the launcher invoked last.
pub async fn run_with_deps<Fetch, FetchFut, Install, InstallFut, Launch>(
    options: PipelineOptions,
    fetch: Fetch,
    install: Install,
    launch: Launch,
) -> Result<RunReport>
where
    Fetch: FnOnce() -> FetchFut,
    FetchFut: Future<Output = Vec<Release>>,
    Install: FnOnce(Release, PathBuf) -> InstallFut,
    InstallFut: Future<Output = Result<InstallOutcome>>,
    Launch: FnOnce(&Path, LaunchMode) -> Result<LaunchOutcome>,
{
    let platform = Platform::current();
    let mut report = RunReport::new(options.dir.clone());

    if detect::is_complete(&report.dir, platform) {
        info!("Required files are already present. Skipping download and extraction.");
        report.already_installed = true;
        finish_launch(&options, &mut report, launch)?;
        return Ok(report);
    }

    if options.confirm_dir {
        report.dir = confirm_directory(&report.dir)?;
        // The chosen directory may hold an install the first probe missed.
        if detect::is_complete(&report.dir, platform) {
            info!("Required files are already present. Skipping download and extraction.");
            report.already_installed = true;
            finish_launch(&options, &mut report, launch)?;
            return Ok(report);
        }
    }

    let releases = fetch().await;
    report.fetched = true;
    let Some(release) = releases.into_iter().next() else {
        info!("No releases found; nothing to install.");
        return Ok(report);
    };
    info!("Latest release: {}", release.tag_name);

    let outcome = install(release, report.dir.clone()).await?;
    report.install = Some(outcome);
    if outcome == InstallOutcome::NoArchiveAsset {
        return Ok(report);
    }

    if options.offer_wizard
        && let Some(output) = wizard::run()?
    {
        output.properties.write_to(&report.dir)?;
        if let Some(players) = &output.whitelist_players
            && let Err(e) = properties::write_whitelist(&report.dir, players)
        {
            error!("Failed to write {}: {e:#}", properties::WHITELIST_FILE);
        }
        report.configured = true;
        banner::show_configured();
    }

    // The gate belongs to the wizard flow: a run that skipped or declined
    // the wizard starts the server directly.
    if report.configured && options.pause_before_launch && options.launch {
        banner::wait_for_enter()?;
    }

    finish_launch(&options, &mut report, launch)?;
    Ok(report)
}

/// Hand the directory to the launcher, unless launching is disabled.
/// A server that stops with a failure is reported, not treated as a
/// crash of this tool.
fn finish_launch<Launch>(
    options: &PipelineOptions,
    report: &mut RunReport,
    launch: Launch,
) -> Result<()>
where
    Launch: FnOnce(&Path, LaunchMode) -> Result<LaunchOutcome>,
{
    if !options.launch {
        return Ok(());
    }
    let outcome = launch(&report.dir, options.launch_mode)?;
    if !outcome.success() {
        match (outcome.code, outcome.signal) {
            (Some(code), _) => error!("Server exited with code {code}"),
            (None, Some(signal)) => error!("Server terminated by signal {signal}"),
            (None, None) => error!("Server exited abnormally"),
        }
    }
    report.launch = Some(outcome);
    Ok(())
}

/// Let the operator keep the proposed directory or type another one.
/// The replacement must already exist.
fn confirm_directory(dir: &Path) -> Result<PathBuf> {
    let shown = dir.display().to_string();
    let keep = Confirm::new(&format!("Install PowerNukkitX into {shown}?"))
        .with_default(true)
        .with_help_message("Choose No to pick a different folder")
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    if keep {
        return Ok(dir.to_path_buf());
    }

    let answer = Text::new("Enter the path of the PowerNukkitX installation folder:")
        .with_initial_value(&shown)
        .with_validator(|input: &str| {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Ok(Validation::Invalid("Undefined path.".into()));
            }
            if !Path::new(trimmed).is_dir() {
                return Ok(Validation::Invalid("Invalid path.".into()));
            }
            Ok(Validation::Valid)
        })
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;

    Ok(PathBuf::from(answer.trim()))
}
