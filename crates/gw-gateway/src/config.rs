//! Configuration loading and management.
//!
//! All four platform ids are required and carry no defaults: a missing
//! variable fails extraction, so a misconfigured process dies at startup
//! instead of silently tracking nothing.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};

use gw_core::{ChannelId, SubjectId};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Subject whose game sessions are tracked and called out.
    pub tracked_subject: SubjectId,
    /// Subject whose reactions trigger the callout.
    pub trigger_subject: SubjectId,
    /// Channel receiving session lines, reports, and reminders.
    pub report_channel: ChannelId,
    /// Subject mentioned by the morning reminder.
    pub mention_target: SubjectId,
    /// Path of the append-only session log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Environment variables (`GW_*`) take precedence over TOML files.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (GW_*)
        figment = figment.merge(Env::prefixed("GW_"));

        Self::from_figment(&figment)
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}

/// Returns the platform-specific config directory for gamewatch.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gamewatch"))
}

/// Returns the default session log path under the platform data directory.
///
/// On Linux: `~/.local/share/gamewatch/sessions.log`
fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gamewatch")
        .join("sessions.log")
}
