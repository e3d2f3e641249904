use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::PollError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Connection settings
    pub serial_port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    pub parity: ParityConfig,
    pub slave_address: u8,

    // Polling settings
    pub poll_interval_seconds: u64,

    // Output settings
    pub console_output: bool,
    pub http_output: Option<HttpOutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpOutputConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParityConfig {
    None,
    Even,
    Odd,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Connection settings
            serial_port: "/dev/ttyUSB0".to_string(),
            baud_rate: 19200,
            timeout_ms: 1000,
            parity: ParityConfig::None,
            slave_address: 10,

            // Polling settings
            poll_interval_seconds: 2,

            // Output settings
            console_output: false,
            http_output: Some(HttpOutputConfig {
                enabled: true,
                endpoint: "https://api.example.com/generator_data".to_string(),
                timeout_seconds: 10,
            }),
        }
    }
}

impl Config {
    /// Settings resolution: defaults, then the optional config file, then
    /// command line overrides.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, PollError> {
        let mut config = match matches.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(port) = matches.get_one::<String>("port") {
            config.serial_port = port.clone();
        }
        if let Some(baud) = matches.get_one::<String>("baud") {
            config.baud_rate = baud
                .parse()
                .map_err(|_| PollError::Config(format!("Invalid baud rate: {}", baud)))?;
        }
        if let Some(interval) = matches.get_one::<String>("interval") {
            config.poll_interval_seconds = interval
                .parse()
                .map_err(|_| PollError::Config(format!("Invalid interval: {}", interval)))?;
        }
        if let Some(slave) = matches.get_one::<String>("slave") {
            config.slave_address = slave
                .parse()
                .map_err(|_| PollError::Config(format!("Invalid slave address: {}", slave)))?;
        }
        if matches.get_flag("console") {
            config.console_output = true;
        }
        if let Some(endpoint) = matches.get_one::<String>("endpoint") {
            match config.http_output.as_mut() {
                Some(http) => {
                    http.endpoint = endpoint.clone();
                    http.enabled = true;
                }
                None => {
                    config.http_output = Some(HttpOutputConfig {
                        enabled: true,
                        endpoint: endpoint.clone(),
                        timeout_seconds: 10,
                    });
                }
            }
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PollError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            PollError::Config(format!(
                "Cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| PollError::Config(format!("Invalid config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PollError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PollError::Config(format!("Cannot create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PollError::Config(format!("Cannot encode config: {}", e)))?;
        std::fs::write(&path, content).map_err(|e| {
            PollError::Config(format!(
                "Cannot write {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(())
    }
}
