//! Platform detection for start script selection

use once_cell::sync::OnceCell;

/// Raw-file base URL of the start-script repository.
pub const SCRIPTS_BASE_URL: &str =
    "https://raw.githubusercontent.com/PowerNukkitX/scripts/master";

/// Platform family, as far as the server distribution cares about it.
///
/// The distribution ships exactly two start scripts: a batch file for
/// Windows and a shell script for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

/// Global cache for platform detection (initialized once, used everywhere)
static PLATFORM_CACHE: OnceCell<Platform> = OnceCell::new();

impl Platform {
    /// Detect the current platform (cached after first call)
    pub fn current() -> Self {
        *PLATFORM_CACHE.get_or_init(|| Self::from_os(std::env::consts::OS))
    }

    /// Classify an OS name as `std::env::consts::OS` spells it.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            _ => Platform::Unix,
        }
    }

    /// File name of the start script shipped for this platform.
    pub fn script_name(&self) -> &'static str {
        match self {
            Platform::Unix => "start.sh",
            Platform::Windows => "start.bat",
        }
    }

    /// Download URL for this platform's start script.
    pub fn script_url(&self) -> String {
        format!("{}/{}", SCRIPTS_BASE_URL, self.script_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_names_map_to_script_names() {
        assert_eq!(Platform::from_os("windows").script_name(), "start.bat");
        assert_eq!(Platform::from_os("linux").script_name(), "start.sh");
        assert_eq!(Platform::from_os("macos").script_name(), "start.sh");
        assert_eq!(Platform::from_os("freebsd").script_name(), "start.sh");
    }

    #[test]
    fn script_urls_point_at_the_scripts_repo() {
        assert_eq!(
            Platform::Unix.script_url(),
            "https://raw.githubusercontent.com/PowerNukkitX/scripts/master/start.sh"
        );
        assert_eq!(
            Platform::Windows.script_url(),
            "https://raw.githubusercontent.com/PowerNukkitX/scripts/master/start.bat"
        );
    }
}
