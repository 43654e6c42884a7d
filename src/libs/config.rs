//! Configuration management for the vigil watchdog.
//!
//! Handles application settings with support for both programmatic
//! configuration and an interactive setup wizard. Configuration is stored as
//! pretty-printed JSON in the platform-specific application data directory
//! (see `libs/data_storage.rs`), so it survives updates and can be edited by
//! hand.
//!
//! ## Configuration Structure
//!
//! - **Monitor Config**: idle timeout and the set of input codes counted as
//!   activity
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vigil::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Load existing configuration or fall back to defaults
//! let config = Config::read()?;
//!
//! // Run the interactive setup wizard and persist the result
//! Config::init()?.save()?;
//! # Ok(())
//! # }
//! ```

use crate::libs::activity::{ActivityCode, ActivitySet};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::time::Duration;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Activity monitor configuration settings.
///
/// ## Timing Configuration
///
/// The idle timeout is the debounce interval: the monitor reports `Running`
/// on the first qualifying event and falls back to `Idle` only after a full
/// timeout passes with no further activity. Shorter timeouts make the signal
/// more nervous; longer ones smooth over natural micro-pauses in typing or
/// reading.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Inactivity interval in milliseconds before the monitor reports Idle.
    ///
    /// Every qualifying input event restarts this countdown. Must be
    /// greater than zero; validated when the monitor is constructed.
    pub idle_timeout_ms: u64,

    /// Input codes counted as activity; `None` means every known code.
    ///
    /// Pointer move is always treated as activity regardless of this list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_codes: Option<Vec<ActivityCode>>,
}

impl Default for MonitorConfig {
    /// Defaults: a 2500 ms timeout rides out the gaps inside a burst of
    /// typing or pointer motion while still reporting Idle promptly, and
    /// every known code counts as activity.
    fn default() -> Self {
        Self {
            idle_timeout_ms: 2500,
            activity_codes: None,
        }
    }
}

impl MonitorConfig {
    /// The idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Builds the activity set, failing fast on an empty code list.
    pub fn activity_set(&self) -> Result<ActivitySet> {
        match &self.activity_codes {
            Some(codes) => ActivitySet::from_codes(codes),
            None => Ok(ActivitySet::all()),
        }
    }

    /// Validates the configured values without constructing a monitor.
    pub fn validate(&self) -> Result<()> {
        if self.idle_timeout_ms == 0 {
            return Err(msg_error_anyhow!(Message::InvalidIdleTimeout));
        }
        self.activity_set()?;
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Activity monitoring behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when absent.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Runs the interactive configuration setup wizard.
    ///
    /// Existing values are offered as defaults so re-running the wizard
    /// only changes what the user touches.
    pub fn init() -> Result<Self> {
        let mut config = match Self::read() {
            Ok(config) => config,
            Err(_) => Config::default(),
        };

        let node_descriptions = vec![ConfigModule {
            key: "monitor".to_string(),
            name: "Monitor".to_string(),
        }];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "monitor" => {
                    let default = config.monitor.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleMonitor);
                    let monitor = MonitorConfig {
                        // Debounce interval before the Idle transition
                        idle_timeout_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptIdleTimeout.to_string())
                            .default(default.idle_timeout_ms)
                            .interact_text()?,

                        // Code selection stays a hand-edited field; the
                        // wizard only covers the common timing knob.
                        activity_codes: default.activity_codes,
                    };
                    monitor.validate()?;
                    config.monitor = Some(monitor);
                }
                _ => {} // Unknown module keys are safely ignored
            }
        }

        Ok(config)
    }
}
