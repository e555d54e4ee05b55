//! # Settings Module
//!
//! ## Purpose
//! Keeps the user preferences of the balancer shell in one JSON file (`balancer_config.json`)
//! so the terminal menu, the batch runner and the logger read the same values.
//!
//! ## Key Features
//! - **Defaults**: a missing or broken file never stops the program, defaults are used instead
//! - **Validation**: log level names are checked before they are stored
//! - **Persistence**: every change made through a setter is written back to the file
//! - **Test Isolation**: `save_config` does not touch the real file during tests
//!
//! ## Configuration Format
//! ```json
//! {
//!   "log_level": "info",
//!   "log_file": null,
//!   "accept_arrow_aliases": true,
//!   "print_matrix": false,
//!   "json_output": false
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust
//! use KiBalance::settings::BalancerSettings;
//!
//! let settings = BalancerSettings::with_config_file("no_such_config.json");
//! assert!(settings.get_config().accept_arrow_aliases);
//! assert_eq!(settings.get_config().level_filter(), log::LevelFilter::Info);
//! ```

use log::{LevelFilter, warn};
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// name of the settings file in the working directory
pub const CONFIG_FILE: &str = "balancer_config.json";

/// Serializable user preferences.
///
/// # Fields
/// * `log_level` - one of off, error, warn, info, debug, trace
/// * `log_file` - when set, log records are also written to this file
/// * `accept_arrow_aliases` - `->`, `=>`, `<=>` and `=` are read as `>`
/// * `print_matrix` - the matrix of the equation is printed with every result
/// * `json_output` - results are printed as JSON instead of tables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalancerConfig {
    pub log_level: String,
    pub log_file: Option<String>,
    pub accept_arrow_aliases: bool,
    pub print_matrix: bool,
    pub json_output: bool,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            accept_arrow_aliases: true,
            print_matrix: false,
            json_output: false,
        }
    }
}

impl BalancerConfig {
    /// log level for the logger, unknown names give `Info`
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Owner of the configuration and of the path it is stored at.
#[derive(Debug, Clone)]
pub struct BalancerSettings {
    config: BalancerConfig,
    config_file: String,
}

impl BalancerSettings {
    /// Loads `balancer_config.json` from the working directory or falls back to defaults.
    pub fn new() -> Self {
        Self::with_config_file(CONFIG_FILE)
    }

    /// Creates settings stored at a custom path.
    ///
    /// # Arguments
    /// * `config_file` - Path to the configuration file
    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_else(|e| {
            warn!(
                "settings file {} cannot be read ({}), defaults are used",
                config_file, e
            );
            BalancerConfig::default()
        });
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Reads the configuration file.
    ///
    /// # Returns
    /// * `Ok(BalancerConfig)` - loaded configuration, defaults when the file does not exist
    /// * `Err(Box<dyn std::error::Error>)` - on I/O or JSON errors
    pub fn load_config(config_file: &str) -> Result<BalancerConfig, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: BalancerConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(BalancerConfig::default())
        }
    }

    /// Writes the configuration to its file. During tests this method does nothing.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            self.save_to(&self.config_file)
        }
    }

    /// Writes the configuration to the given path.
    pub fn save_to(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Sets the log level after checking the name.
    ///
    /// # Returns
    /// * `Err` - for names the logger does not know
    pub fn set_log_level(&mut self, level: &str) -> Result<(), Box<dyn std::error::Error>> {
        let level = level.trim().to_lowercase();
        if LevelFilter::from_str(&level).is_err() {
            return Err(format!("Unknown log level: {}", level).into());
        }
        self.config.log_level = level;
        self.save_config()
    }

    /// Sets or clears the log file. Empty string clears it.
    pub fn set_log_file(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.trim();
        self.config.log_file = if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        };
        self.save_config()
    }

    /// Switches one of the boolean options by its JSON name.
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), Box<dyn std::error::Error>> {
        match name {
            "accept_arrow_aliases" => self.config.accept_arrow_aliases = value,
            "print_matrix" => self.config.print_matrix = value,
            "json_output" => self.config.json_output = value,
            _ => return Err(format!("Unknown option: {}", name).into()),
        }
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = BalancerConfig::default();
        self.save_config()
    }

    /// option | value table
    pub fn settings_table(&self) -> Table {
        let config = &self.config;
        let mut table = Table::new();
        table.add_row(row!["Option", "Value"]);
        table.add_row(row!["settings file", self.config_file]);
        table.add_row(row!["log_level", config.log_level]);
        table.add_row(row![
            "log_file",
            config.log_file.as_deref().unwrap_or("-")
        ]);
        table.add_row(row!["accept_arrow_aliases", config.accept_arrow_aliases]);
        table.add_row(row!["print_matrix", config.print_matrix]);
        table.add_row(row!["json_output", config.json_output]);
        table
    }
}

impl Default for BalancerSettings {
    fn default() -> Self {
        Self::new()
    }
}
