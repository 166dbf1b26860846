//! Configuration management system for the jtrack application.
//!
//! This module handles application settings for the Jira integration and the
//! time recorder. It supports both programmatic configuration and an
//! interactive setup wizard.
//!
//! ## Configuration Structure
//!
//! Each part of the application has its own optional configuration section:
//!
//! - **Jira Config**: Jira instance URL and credentials
//! - **Timer Config**: Tick cadence and stop deadline of the time recorder
//!
//! ## Storage
//!
//! - Configuration is stored as pretty-printed JSON in the platform data directory
//! - A missing configuration file is not an error; defaults are used instead
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use jtrack::libs::config::Config;
//!
//! let config = Config::read()?;
//! let timer = config.timer.unwrap_or_default();
//! timer.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the application.
///
/// Used by the interactive setup to list the sections a user can configure.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Errors raised when configuration values are inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timer tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("stop deadline ({deadline} ms) must be longer than the tick interval ({tick} ms)")]
    DeadlineNotAfterTick { tick: u64, deadline: u64 },
}

/// Time recorder configuration settings.
///
/// ## Timing Configuration
///
/// - **Tick interval**: how often the live display is refreshed. It also
///   bounds how long a healthy ticker takes to notice a stop request.
/// - **Stop deadline**: how long a stop waits for the ticker to acknowledge
///   before the ticker is aborted and the session's time is discarded.
///
/// The deadline must be longer than the tick interval so that a ticker in
/// the middle of a normal cycle is never mistaken for a stalled one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    /// Tick interval in milliseconds.
    pub tick_interval: u64,

    /// Stop acknowledgement deadline in milliseconds.
    pub stop_deadline: u64,
}

impl Default for TimerConfig {
    /// Default values:
    /// - 1000ms tick interval
    /// - 2000ms stop deadline
    fn default() -> Self {
        TimerConfig {
            tick_interval: 1000,
            stop_deadline: 2000,
        }
    }
}

impl TimerConfig {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.tick_interval)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.stop_deadline)
    }

    /// Checks that the timings can work together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.stop_deadline <= self.tick_interval {
            return Err(ConfigError::DeadlineNotAfterTick {
                tick: self.tick_interval,
                deadline: self.stop_deadline,
            });
        }
        Ok(())
    }
}

/// Main configuration container for the entire application.
///
/// All sections are optional so users only configure what they use.
/// Unconfigured sections are omitted from the JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Jira API integration configuration.
    ///
    /// Required for listing issues and reporting worklogs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,

    /// Time recorder configuration. Defaults apply when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    /// Path of the configuration file in the application data directory.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads configuration from the application data directory.
    ///
    /// Returns the default configuration if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    /// Reads configuration from an explicit file path.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration to the application data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Saves the configuration as pretty-printed JSON to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Returns the timer section or its defaults, validated.
    pub fn timer(&self) -> Result<TimerConfig, ConfigError> {
        let timer = self.timer.clone().unwrap_or_default();
        timer.validate()?;
        Ok(timer)
    }

    /// Runs an interactive configuration setup wizard.
    ///
    /// Starts from the existing configuration, lets the user pick which
    /// modules to configure and prompts for each of their settings with the
    /// current values as defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal input fails or a module's setup fails.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![
            JiraConfig::module(),
            ConfigModule {
                key: "timer".to_string(),
                name: "Timer".to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "jira" => config.jira = Some(JiraConfig::init(&config.jira)?),
                "timer" => {
                    let default = config.timer.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleTimer);
                    let timer = TimerConfig {
                        tick_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTickInterval.to_string())
                            .default(default.tick_interval)
                            .interact_text()?,
                        stop_deadline: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStopDeadline.to_string())
                            .default(default.stop_deadline)
                            .interact_text()?,
                    };
                    timer.validate()?;
                    config.timer = Some(timer);
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
