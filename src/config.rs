//! TOML configuration parsing and validation.
//!
//! ```toml
//! [db]
//! path = "./data/parts.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! api_prefix = "/api/v1"
//! title = "Parts API"
//! allowed_origins = ["*"]
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Only `[db]` is required; `[server]` and `[logging]` fall back to the
//! defaults shown above.
//!
//! These environment variables override the file, before validation:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `PARTS_DB_PATH` | `db.path` |
//! | `PARTS_SERVER_BIND` | `server.bind` |
//! | `PARTS_LOG_LEVEL` | `logging.level` |

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_prefix: default_api_prefix(),
            title: default_title(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_api_prefix() -> String {
    "/api/v1".to_string()
}
fn default_title() -> String {
    "Parts API".to_string()
}
fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub fn tracing_level(&self) -> Result<tracing::Level> {
        self.level
            .parse::<tracing::Level>()
            .with_context(|| format!("Unknown logging.level: '{}'", self.level))
    }
}

impl Config {
    /// A config with defaults everywhere except the database path.
    pub fn minimal(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig {
                path: db_path.into(),
            },
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.db.path.as_os_str().is_empty() {
            anyhow::bail!("db.path must not be empty");
        }

        let prefix = &self.server.api_prefix;
        if !prefix.starts_with('/') || prefix.ends_with('/') {
            anyhow::bail!(
                "server.api_prefix must start with '/' and must not end with '/': '{}'",
                prefix
            );
        }

        if self.server.allowed_origins.is_empty() {
            anyhow::bail!("server.allowed_origins must not be empty (use [\"*\"] for any)");
        }

        self.logging.tracing_level()?;
        Ok(())
    }
}

impl Config {
    /// Apply `PARTS_*` overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PARTS_DB_PATH") {
            self.db.path = PathBuf::from(path);
        }
        if let Some(bind) = lookup("PARTS_SERVER_BIND") {
            self.server.bind = bind;
        }
        if let Some(level) = lookup("PARTS_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_omitted() {
        let config: Config = toml::from_str("[db]\npath = \"parts.sqlite\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.api_prefix, "/api/v1");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.server.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.logging.tracing_level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "/tmp/parts.sqlite"

            [server]
            bind = "0.0.0.0:9000"
            api_prefix = "/api/v2"
            title = "Inventory"
            allowed_origins = ["http://localhost:3000"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.title, "Inventory");
        assert_eq!(config.logging.tracing_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_bad_prefix_rejected() {
        let mut config = Config::minimal("parts.sqlite");
        config.server.api_prefix = "api/v1".to_string();
        assert!(config.validate().is_err());
        config.server.api_prefix = "/api/v1/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_level_rejected() {
        let mut config = Config::minimal("parts.sqlite");
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_origins_rejected() {
        let mut config = Config::minimal("parts.sqlite");
        config.server.allowed_origins.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = Config::minimal("parts.sqlite");
        config.apply_env_overrides(|key| match key {
            "PARTS_DB_PATH" => Some("/var/lib/parts.sqlite".to_string()),
            "PARTS_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(config.db.path, PathBuf::from("/var/lib/parts.sqlite"));
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.logging.tracing_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_env_override_is_validated() {
        let mut config = Config::minimal("parts.sqlite");
        config.apply_env_overrides(|key| (key == "PARTS_LOG_LEVEL").then(|| "loud".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/parts.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
