//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. built-in defaults;
//! 2. the TOML config file (`--config`, or `config.toml` in the platform
//!    config directory);
//! 3. `QUIZDECK_*` environment variables (e.g. `QUIZDECK_THEME=light`);
//! 4. CLI flags, applied with [`Config::merge_cli`].
//!
//! A config file that cannot be parsed is reported and ignored. Unknown keys
//! are logged with the closest known key as a suggestion.
//!
//! ```toml
//! theme = "dark"
//! keybinding_profile = "vim"
//! accessible = false
//!
//! [custom_keybindings]
//! quit = ["x"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, ThemeArg};
use crate::tui::keybindings::KeybindingProfile;

/// Prefix of environment variables read into the config.
pub const ENV_PREFIX: &str = "QUIZDECK_";

/// Top-level keys accepted in the config file.
const KNOWN_KEYS: &[&str] = &[
    "theme",
    "keybinding_profile",
    "custom_keybindings",
    "accessible",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred TUI theme.
    pub theme: ThemeArg,
    /// Keybinding profile used as the base set of bindings.
    pub keybinding_profile: KeybindingProfile,
    /// Extra bindings: action name to key specifications.
    pub custom_keybindings: HashMap<String, Vec<String>>,
    /// ASCII borders for screen readers and limited terminals.
    pub accessible: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeArg::Auto,
            keybinding_profile: KeybindingProfile::Universal,
            custom_keybindings: HashMap::new(),
            accessible: false,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    #[must_use]
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                log::debug!("No config directory available, using defaults");
                Self::load_layers(None)
            }
        }
    }

    /// Load the configuration using `path` as the config file.
    ///
    /// A missing file is not an error. Parse errors fall back to defaults
    /// plus environment variables.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        if path.exists() {
            warn_unknown_keys(path);
            Self::load_layers(Some(path))
        } else {
            log::debug!("Config file {} not found", path.display());
            Self::load_layers(None)
        }
    }

    fn load_layers(path: Option<&Path>) -> Self {
        let env_only = || {
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Env::prefixed(ENV_PREFIX).only(KNOWN_KEYS))
        };

        let figment = match path {
            Some(path) => Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).only(KNOWN_KEYS)),
            None => env_only(),
        };

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid configuration: {}", e);
                env_only().extract().unwrap_or_default()
            }
        }
    }

    /// Apply CLI flags on top of the loaded configuration.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if let Some(profile) = cli.keybinding_profile {
            self.keybinding_profile = profile;
        }
        if cli.accessible {
            self.accessible = true;
        }
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "quizdeck", "quizdeck")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Log a warning for every unknown top-level key in the config file.
fn warn_unknown_keys(path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return;
    };
    for key in table.keys() {
        if KNOWN_KEYS.contains(&key.as_str()) {
            continue;
        }
        match suggest_key(key) {
            Some(suggestion) => log::warn!(
                "Unknown config key '{}' in {} (did you mean '{}'?)",
                key,
                path.display(),
                suggestion
            ),
            None => log::warn!("Unknown config key '{}' in {}", key, path.display()),
        }
    }
}

/// Closest known key to `key`, if any is similar enough.
#[must_use]
pub fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(key, known)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeArg::Auto);
        assert_eq!(config.keybinding_profile, KeybindingProfile::Universal);
        assert!(config.custom_keybindings.is_empty());
        assert!(!config.accessible);
    }

    #[test]
    fn test_suggest_key() {
        assert_eq!(suggest_key("them"), Some("theme"));
        assert_eq!(suggest_key("keybinding_profil"), Some("keybinding_profile"));
        assert_eq!(suggest_key("zzz"), None);
    }

    #[test]
    fn test_merge_cli_overrides() {
        use clap::Parser;

        let mut config = Config::default();
        let cli = Cli::try_parse_from([
            "quizdeck",
            "--theme",
            "dark",
            "--accessible",
            "run",
            "q.json",
        ])
        .unwrap();
        config.merge_cli(&cli);
        assert_eq!(config.theme, ThemeArg::Dark);
        assert!(config.accessible);
        assert_eq!(config.keybinding_profile, KeybindingProfile::Universal);
    }
}
