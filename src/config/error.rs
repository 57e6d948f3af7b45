use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("player.volume must be within 0..=100, got {0}")]
    Volume(u8),
    #[error("player.speed_rate must be within 0.0..=100.0, got {0}")]
    SpeedRate(f32),
    #[error("library.extensions must name at least one extension")]
    NoExtensions,
}
