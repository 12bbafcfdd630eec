//! Serve command implementation

use anyhow::Result;
use jllogger_core::{ConfigFile, ServerConfig};
use tracing::info;

use crate::cli::ServeArgs;

/// Merge the config file (explicit or discovered) with flag/env overrides
pub fn resolve_config(args: ServeArgs) -> Result<ServerConfig> {
    let file = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ConfigFile::load(path)?
        }
        None => match ConfigFile::find_and_load(&std::env::current_dir()?)? {
            Some((file, path)) => {
                info!("Loaded config from {}", path.display());
                file
            }
            None => ConfigFile::default(),
        },
    };

    let mut config = file.into_server_config();

    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(url_path) = args.url_path {
        config.url_path = url_path;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = log_dir;
    }
    if let Some(token) = args.token {
        config.token = Some(token).filter(|t| !t.is_empty());
    }
    if let Some(origin) = args.cors_origin {
        config.cors_origin = Some(origin);
    }
    if let Some(max_body_bytes) = args.max_body_bytes {
        config.max_body_bytes = max_body_bytes;
    }

    Ok(config)
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;
    if config.token.is_none() {
        info!("No token configured, append route is open to all clients");
    }
    jllogger_web::start_server(config).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(config: Option<PathBuf>) -> ServeArgs {
        ServeArgs {
            config,
            bind: None,
            base_url: None,
            url_path: None,
            log_dir: None,
            token: None,
            cors_origin: None,
            max_body_bytes: None,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jllogger.toml");
        std::fs::write(&path, "bind = \"0.0.0.0:1\"\nlog_dir = \"from-file\"\n").unwrap();

        let mut overrides = args(Some(path));
        overrides.log_dir = Some(PathBuf::from("from-flag"));
        overrides.max_body_bytes = Some(1024);
        let config = resolve_config(overrides).unwrap();

        assert_eq!(config.bind, "0.0.0.0:1");
        assert_eq!(config.log_dir, PathBuf::from("from-flag"));
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        assert!(resolve_config(args(Some(PathBuf::from("/nonexistent/jllogger.toml")))).is_err());
    }
}
