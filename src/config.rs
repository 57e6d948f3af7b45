//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (player defaults, playlist mode,
//! debug logging, library scanning) and helpers to load it from disk.

mod error;
mod load;
mod schema;

pub use error::SettingsError;
pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
