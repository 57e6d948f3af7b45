use crate::config::{Settings, SettingsError};

/// Load and validate settings. Config is optional; any failure falls back to
/// defaults so playback can still start.
pub fn load_settings() -> Settings {
    match Settings::load().and_then(|s| s.validate().map(|()| s)) {
        Ok(s) => s,
        Err(e @ SettingsError::Load(_)) => {
            tracing::warn!("{e}, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("invalid config, using defaults: {e}");
            Settings::default()
        }
    }
}
