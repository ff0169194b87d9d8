//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILGRAB_CONFIG` (environment variable)
//! 2. `~/.config/mailgrab/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailgrab\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IMAP server settings.
    pub server: ServerConfig,
    /// Download behavior defaults.
    pub download: DownloadConfig,
    /// General behavior settings.
    pub general: GeneralConfig,
}

/// IMAP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IMAP host name.
    pub host: String,
    /// IMAP TLS port.
    pub port: u16,
    /// Default mailbox to search.
    pub mailbox: String,
}

/// Download behavior defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Default output directory for attachments.
    pub output_dir: Option<PathBuf>,
    /// Create the output directory if it does not exist.
    pub create_output_dir: bool,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "imap.gmail.com".to_string(),
            port: 993,
            mailbox: "INBOX".to_string(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            create_output_dir: false,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MAILGRAB_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("mailgrab").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.server.host, "imap.gmail.com");
        assert_eq!(cfg.server.port, 993);
        assert_eq!(cfg.server.mailbox, "INBOX");
        assert_eq!(cfg.general.log_level, "warn");
        assert!(cfg.download.output_dir.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[server]
mailbox = "Receipts"

[download]
create_output_dir = true
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.server.mailbox, "Receipts");
        assert!(cfg.download.create_output_dir);
        // Other fields use defaults
        assert_eq!(cfg.server.host, "imap.gmail.com");
        assert_eq!(cfg.server.port, 993);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.host, cfg.server.host);
        assert_eq!(parsed.server.port, cfg.server.port);
    }
}
