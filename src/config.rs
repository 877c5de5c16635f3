//! Configuration module for the echo-once demo.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line arguments for the exchange demo
#[derive(Parser, Debug)]
#[command(name = "echo-once")]
#[command(author = "echo-once authors")]
#[command(version = "0.1.0")]
#[command(about = "A single-shot TCP exchange demo", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address the server binds and the client connects to (e.g., 127.0.0.1:50007)
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Message the client sends
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// Milliseconds the launcher waits after starting the server before
    /// starting the client
    #[arg(long)]
    pub startup_delay_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Which side of the exchange to run (defaults to both)
    #[command(subcommand)]
    pub role: Option<Role>,
}

/// Which side of the exchange this process runs
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Launch server and client together and wait for both
    #[default]
    Run,
    /// Run only the server: accept one connection and echo one message
    Serve,
    /// Run only the client: send one message and log the reply
    Send,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exchange-related configuration
#[derive(Debug, Deserialize)]
pub struct ExchangeConfig {
    /// Address to bind (server) and connect to (client)
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Message the client sends
    #[serde(default = "default_message")]
    pub message: String,
    /// Launcher delay between starting server and client
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            message: default_message(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:50007".to_string()
}

fn default_message() -> String {
    "Hallo vom Client!".to_string()
}

fn default_startup_delay_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub message: String,
    pub startup_delay_ms: u64,
    pub log_level: String,
    pub role: Role,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        // Load TOML config if specified
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Ok(Self::from_parts(cli, toml_config))
    }

    /// Merge CLI args with TOML config (CLI takes precedence)
    fn from_parts(cli: CliArgs, toml_config: TomlConfig) -> Self {
        Config {
            listen: cli.listen.unwrap_or(toml_config.exchange.listen),
            message: cli.message.unwrap_or(toml_config.exchange.message),
            startup_delay_ms: cli
                .startup_delay_ms
                .unwrap_or(toml_config.exchange.startup_delay_ms),
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
            role: cli.role.unwrap_or_default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.exchange.listen, "127.0.0.1:50007");
        assert_eq!(config.exchange.message, "Hallo vom Client!");
        assert_eq!(config.exchange.startup_delay_ms, 200);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [exchange]
            listen = "0.0.0.0:50007"
            message = "Servus!"
            startup_delay_ms = 500

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exchange.listen, "0.0.0.0:50007");
        assert_eq!(config.exchange.message, "Servus!");
        assert_eq!(config.exchange.startup_delay_ms, 500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_overrides_toml() {
        let toml_str = r#"
            [exchange]
            listen = "0.0.0.0:50007"
            message = "Servus!"
            startup_delay_ms = 500
        "#;
        let toml_config: TomlConfig = toml::from_str(toml_str).unwrap();

        let cli = CliArgs::parse_from([
            "echo-once",
            "--listen",
            "127.0.0.1:60007",
            "--message",
            "Hallo vom Client!",
            "--startup-delay-ms",
            "100",
        ]);

        let config = Config::from_parts(cli, toml_config);
        assert_eq!(config.listen, "127.0.0.1:60007");
        assert_eq!(config.message, "Hallo vom Client!");
        assert_eq!(config.startup_delay_ms, 100);
        assert_eq!(config.role, Role::Run);
    }

    #[test]
    fn test_toml_applies_when_cli_is_silent() {
        let toml_str = r#"
            [exchange]
            listen = "0.0.0.0:50007"
            startup_delay_ms = 500

            [logging]
            level = "debug"
        "#;
        let toml_config: TomlConfig = toml::from_str(toml_str).unwrap();

        let cli = CliArgs::parse_from(["echo-once"]);

        let config = Config::from_parts(cli, toml_config);
        assert_eq!(config.listen, "0.0.0.0:50007");
        assert_eq!(config.message, "Hallo vom Client!");
        assert_eq!(config.startup_delay_ms, 500);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let toml_str = r#"
            [exchange]
            message = "Moin!"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exchange.listen, "127.0.0.1:50007");
        assert_eq!(config.exchange.message, "Moin!");
        assert_eq!(config.exchange.startup_delay_ms, 200);
        assert_eq!(config.logging.level, "info");
    }
}
