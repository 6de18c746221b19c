//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/mashup/config.toml

pub mod defaults;

use crate::constants;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Everything read from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listen address
    #[serde(default)]
    pub server: ServerConfig,

    /// Places database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Article lookup settings
    #[serde(default)]
    pub news: NewsConfig,

    /// Credentials embedded in served pages
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Where the HTTP server listens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Places database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file holding the `places` table
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// Article lookup settings
///
/// Both URLs are templates; `{geo}` is replaced with the URL-encoded place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Primary lookup URL (empty = not configured)
    #[serde(default)]
    pub url: String,

    /// Tried once when the primary lookup returns no articles (empty = none)
    #[serde(default)]
    pub fallback_url: String,
}

/// Third-party credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Map widget API key
    #[serde(default)]
    pub maps: String,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/mashup`, or the platform equivalent
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// `config.toml` inside [`Config::config_dir`]
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Read `config.toml`, writing one full of defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Write this config back to `config.toml`, creating its directory
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Look up a dotted `section.key` name, rendered as text
    ///
    /// Unknown names give `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["database", "path"] => Some(self.database.path.display().to_string()),

            ["news", "url"] => Some(self.news.url.clone()),
            ["news", "fallback_url"] => Some(self.news.fallback_url.clone()),

            ["api_keys", "maps"] => Some(self.api_keys.maps.clone()),

            _ => None,
        }
    }

    /// Assign a dotted `section.key` name from its text form
    ///
    /// Fails with [`Error::Config`] for unknown names or a port that is not a number.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["database", "path"] => {
                self.database.path = PathBuf::from(value);
            }

            ["news", "url"] => {
                self.news.url = value.to_string();
            }
            ["news", "fallback_url"] => {
                self.news.fallback_url = value.to_string();
            }

            ["api_keys", "maps"] => {
                self.api_keys.maps = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// Every name accepted by [`Config::get`] and [`Config::set`]
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "database.path",
            "news.url",
            "news.fallback_url",
            "api_keys.maps",
        ]
    }

    /// `host:port` for binding
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Map widget API key
    ///
    /// A non-empty `API_KEY` environment variable wins over `api_keys.maps`.
    pub fn maps_api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(constants::env::API_KEY).ok(), &self.api_keys.maps)
    }
}

fn resolve_api_key(from_env: Option<String>, configured: &str) -> Option<String> {
    from_env
        .filter(|key| !key.is_empty())
        .or_else(|| (!configured.is_empty()).then(|| configured.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, PathBuf::from("mashup.db"));
        assert!(config.news.url.is_empty());
        assert!(config.api_keys.maps.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("server.host"), Some("127.0.0.1".to_string()));

        config.set("database.path", "/var/lib/mashup/places.db").unwrap();
        assert_eq!(
            config.get("database.path"),
            Some("/var/lib/mashup/places.db".to_string())
        );

        config.set("server.port", "8080").unwrap();
        assert_eq!(config.server.port, 8080);

        config.set("news.url", "http://localhost:9000/news?geo={geo}").unwrap();
        assert_eq!(config.news.url, "http://localhost:9000/news?geo={geo}");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
        assert_eq!(config.get("server"), None);
    }

    #[test]
    fn test_every_available_key_gets_and_sets() {
        let mut config = Config::default();
        for key in Config::available_keys() {
            let current = config.get(key).unwrap_or_else(|| panic!("{} has no value", key));
            config.set(key, &current).unwrap();
            assert_eq!(config.get(key), Some(current));
        }
        assert!(matches!(config.set("server.port", "x"), Err(Error::Config(_))));
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("server.port", "70000").is_err());
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(resolve_api_key(None, ""), None);
        assert_eq!(resolve_api_key(Some(String::new()), ""), None);
        assert_eq!(resolve_api_key(None, "cfg"), Some("cfg".to_string()));
        assert_eq!(resolve_api_key(Some(String::new()), "cfg"), Some("cfg".to_string()));
        assert_eq!(resolve_api_key(Some("env".to_string()), "cfg"), Some("env".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.database.path = PathBuf::from("/tmp/places.db");
            config.news.fallback_url = "http://localhost/search?q={geo}".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.database.path, PathBuf::from("/tmp/places.db"));
            assert_eq!(loaded.news.fallback_url, "http://localhost/search?q={geo}");
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 9999\n").unwrap();
        assert_eq!(loaded.server.port, 9999);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.database.path, PathBuf::from("mashup.db"));
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[news]"));
        assert!(toml.contains("[api_keys]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_available_keys() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "{} has no getter", key);
        }
    }
}
