//! Configuration file parsing for jllogger
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Configuration file structure (jllogger.toml/yaml/json).
///
/// Every field is optional; unset fields fall back to the defaults in
/// [`ServerConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Address to bind, e.g. "127.0.0.1:8888"
    pub bind: Option<String>,
    /// Base URL of the host
    pub base_url: Option<String>,
    /// Extension segment the route is registered under
    pub url_path: Option<String>,
    /// Directory log files are written to
    pub log_dir: Option<PathBuf>,
    /// Token required on the append route
    pub token: Option<String>,
    /// Allowed CORS origin
    pub cors_origin: Option<String>,
    /// Largest accepted request body in bytes
    pub max_body_bytes: Option<usize>,
}

impl ConfigFile {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::config(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Find and load a config file from a directory, if one exists
    pub fn find_and_load(dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok(Some((config, path)));
            }
        }
        Ok(None)
    }

    /// Resolve into a server config, filling gaps with defaults
    pub fn into_server_config(self) -> ServerConfig {
        let default = ServerConfig::default();
        ServerConfig {
            bind: self.bind.unwrap_or(default.bind),
            base_url: self.base_url.unwrap_or(default.base_url),
            url_path: self.url_path.unwrap_or(default.url_path),
            log_dir: self.log_dir.unwrap_or(default.log_dir),
            token: self.token.filter(|t| !t.is_empty()),
            cors_origin: self.cors_origin,
            max_body_bytes: self.max_body_bytes.unwrap_or(default.max_body_bytes),
        }
    }
}

/// Resolved configuration of the log server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub base_url: String,
    pub url_path: String,
    pub log_dir: PathBuf,
    pub token: Option<String>,
    pub cors_origin: Option<String>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            url_path: DEFAULT_URL_PATH.to_string(),
            log_dir: default_log_dir(),
            token: None,
            cors_origin: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Route the append endpoint is served on
    pub fn log_route(&self) -> String {
        log_route(&self.base_url, &self.url_path)
    }

    /// Route of the health endpoint
    pub fn health_route(&self) -> String {
        url_path_join(&[&self.base_url, "api", "health"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a/jllogger.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
bind = "0.0.0.0:9000"
log_dir = "/var/log/notebooks"
token = "secret"
"#;
        let config = ConfigFile::parse(content, ConfigFormat::Toml)
            .unwrap()
            .into_server_config();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/notebooks"));
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.url_path, "jl-logger");
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = "base_url: /user/alice/\nurl_path: logger\n";
        let config = ConfigFile::parse(yaml, ConfigFormat::Yaml)
            .unwrap()
            .into_server_config();
        assert_eq!(config.log_route(), "/user/alice/logger/LogOutputContent");

        let json = r#"{"cors_origin": "http://example.com"}"#;
        let config = ConfigFile::parse(json, ConfigFormat::Json)
            .unwrap()
            .into_server_config();
        assert_eq!(config.cors_origin.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ConfigFile::parse("rotate = true", ConfigFormat::Toml).is_err());
    }

    #[test]
    fn test_empty_token_means_no_auth() {
        let config = ConfigFile::parse("token = \"\"", ConfigFormat::Toml)
            .unwrap()
            .into_server_config();
        assert!(config.token.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.log_route(), "/jl-logger/LogOutputContent");
        assert_eq!(config.health_route(), "/api/health");
        assert_eq!(config.log_dir, PathBuf::from("jllogger"));
        assert_eq!(config.max_body_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_max_body_bytes_from_file() {
        let config = ConfigFile::parse("max_body_bytes = 4096", ConfigFormat::Toml)
            .unwrap()
            .into_server_config();
        assert_eq!(config.max_body_bytes, 4096);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jllogger.ini");
        std::fs::write(&path, "bind = x").unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigError(ref m) if m.contains("Unsupported")));
    }

    #[test]
    fn test_load_missing() {
        let err = ConfigFile::load(Path::new("/nonexistent/jllogger.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_find_and_load() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigFile::find_and_load(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join("jllogger.yml"), "bind: \"127.0.0.1:1\"\n").unwrap();
        let (config, path) = ConfigFile::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(config.bind.as_deref(), Some("127.0.0.1:1"));
        assert!(path.ends_with("jllogger.yml"));
    }
}
