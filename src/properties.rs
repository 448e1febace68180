//! `server.properties` schema and rendering
//!
//! The server reads a fixed key=value file. Everything the wizard can set
//! is modeled as a typed field here and rendered through one deterministic
//! template, so the same answers always produce the same file. Keys the
//! wizard does not touch keep the stock values the server ships with.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// File the server reads its settings from.
pub const PROPERTIES_FILE: &str = "server.properties";

/// Allow-list consulted by the server when `white-list=on`.
pub const WHITELIST_FILE: &str = "white-list.txt";

/// Keys the wizard controls; every rendered file must carry all of them.
pub const REQUIRED_KEYS: &[&str] = &[
    "motd",
    "sub-motd",
    "server-port",
    "white-list",
    "max-players",
    "use-terra",
    "enable-query",
    "enable-rcon",
    "rcon.password",
    "force-resources",
    "xbox-auth",
];

/// on/off switch, spelled the way the server expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    On,
    #[default]
    Off,
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }

    pub fn from_flag(on: bool) -> Self {
        if on { Toggle::On } else { Toggle::Off }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Toggle::On => "on",
            Toggle::Off => "off",
        })
    }
}

/// Typed view of the settings the wizard can influence.
///
/// `Default` carries the minimal-configuration values: whatever a minimal
/// run does not ask about stays at these settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProperties {
    pub motd: String,
    pub sub_motd: String,
    pub server_port: u32,
    pub max_players: u32,
    pub white_list: Toggle,
    pub use_terra: Toggle,
    pub enable_query: Toggle,
    pub enable_rcon: Toggle,
    pub rcon_password: String,
    pub force_resources: Toggle,
    pub xbox_auth: Toggle,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self {
            motd: "PowerNukkitX Server".to_string(),
            sub_motd: "v2.powernukkitx.com".to_string(),
            server_port: 19132,
            max_players: 20,
            white_list: Toggle::Off,
            use_terra: Toggle::Off,
            enable_query: Toggle::On,
            enable_rcon: Toggle::Off,
            rcon_password: String::new(),
            force_resources: Toggle::Off,
            xbox_auth: Toggle::On,
        }
    }
}

impl ServerProperties {
    /// Schema check before anything is written: identity fields must not be
    /// blank, and RCON needs a password when enabled.
    pub fn validate(&self) -> Result<()> {
        if self.motd.trim().is_empty() {
            bail!("motd must not be empty");
        }
        if self.sub_motd.trim().is_empty() {
            bail!("sub-motd must not be empty");
        }
        if self.enable_rcon.is_on() && self.rcon_password.is_empty() {
            bail!("rcon.password is required when enable-rcon is on");
        }
        Ok(())
    }

    /// Render the full configuration file, newline-terminated.
    pub fn render(&self) -> String {
        format!(
            r#"#Properties Config file
motd={motd}
sub-motd={sub_motd}
server-port={server_port}
server-ip=0.0.0.0
view-distance=16
white-list={white_list}
achievements=on
announce-player-achievements=on
spawn-protection=16
max-players={max_players}
allow-flight=off
spawn-animals=on
spawn-mobs=on
gamemode=0
force-gamemode=off
hardcore=off
pvp=on
difficulty=1
level-name=world
level-seed=
allow-nether=off
allow-the_end=off
use-terra={use_terra}
enable-query={enable_query}
enable-rcon={enable_rcon}
rcon.password={rcon_password}
auto-save=on
force-resources={force_resources}
force-resources-allow-client-packs=off
xbox-auth={xbox_auth}
check-login-time=off
disable-auto-bug-report=off
allow-shaded=off
server-authoritative-movement=server-auth
network-encryption=on
"#,
            motd = self.motd,
            sub_motd = self.sub_motd,
            server_port = self.server_port,
            white_list = self.white_list,
            max_players = self.max_players,
            use_terra = self.use_terra,
            enable_query = self.enable_query,
            enable_rcon = self.enable_rcon,
            rcon_password = self.rcon_password,
            force_resources = self.force_resources,
            xbox_auth = self.xbox_auth,
        )
    }

    /// Validate, then write `server.properties` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        self.validate()?;
        let path = dir.join(PROPERTIES_FILE);
        std::fs::write(&path, self.render())
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Split a comma-separated player list into clean names.
pub fn parse_players(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Write the allow-list file, one name per line, newline-terminated.
pub fn write_whitelist(dir: &Path, players: &[String]) -> Result<()> {
    let path = dir.join(WHITELIST_FILE);
    let mut contents = players.join("\n");
    contents.push('\n');
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))
}
