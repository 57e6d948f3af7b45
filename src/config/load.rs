use std::{env, path::PathBuf};

use super::error::SettingsError;
use super::schema::Settings;

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 2] = ["logging.allowed_levels", "library.extensions"];

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `CADENCE__`) override it, and falls back to struct defaults.
/// List-valued keys take comma-separated values, e.g.
/// `CADENCE__LOGGING__ALLOWED_LEVELS=debug,info`.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        let env = LIST_KEYS.iter().fold(
            ::config::Environment::with_prefix("CADENCE")
                .separator("__")
                .list_separator(",")
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        );
        builder = builder.add_source(env);

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Parse settings straight from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Range checks the deserializer cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player.volume > 100 {
            return Err(SettingsError::Volume(self.player.volume));
        }
        let rate = self.player.speed_rate;
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err(SettingsError::SpeedRate(rate));
        }
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(SettingsError::NoExtensions);
        }
        Ok(())
    }
}

/// Resolve the config path from `CADENCE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENCE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadence/config.toml`
/// or `~/.config/cadence/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("cadence").join("config.toml"))
}
