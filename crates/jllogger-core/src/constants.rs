//! Constants and default values for jllogger

use std::path::PathBuf;

/// Default log directory, relative to the working directory
pub const LOG_DIR: &str = "jllogger";

/// Extension appended to every log file name
pub const LOG_EXTENSION: &str = "log";

/// Final path component of the append route
pub const LOG_ROUTE: &str = "LogOutputContent";

/// Default extension segment the route is registered under
pub const DEFAULT_URL_PATH: &str = "jl-logger";

/// Default base URL of the host
pub const DEFAULT_BASE_URL: &str = "/";

/// Default bind address for `jllogger serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8888";

/// Default server URL used by `jllogger send`
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8888";

/// Default largest accepted request body (100 MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Default allowed CORS origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8888";

/// Substrings a log filename must not contain
pub const FORBIDDEN_FILENAME_PARTS: &[&str] = &["..", "/", "\\"];

/// Default config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "jllogger.toml",
    "jllogger.yaml",
    "jllogger.yml",
    "jllogger.json",
];

/// Get the default log directory
pub fn default_log_dir() -> PathBuf {
    PathBuf::from(LOG_DIR)
}

/// Join URL path segments the way notebook servers do: exactly one `/`
/// between segments, leading slash of the first segment kept.
pub fn url_path_join(pieces: &[&str]) -> String {
    let Some(first) = pieces.first() else {
        return String::new();
    };
    let last = pieces.last().copied().unwrap_or_default();

    let stripped: Vec<&str> = pieces
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect();

    let mut result = stripped.join("/");
    if first.starts_with('/') {
        result.insert(0, '/');
    }
    if last.ends_with('/') && !result.ends_with('/') {
        result.push('/');
    }
    if result.is_empty() && first.starts_with('/') {
        result.push('/');
    }
    result
}

/// Get the append route for a base URL and extension segment
pub fn log_route(base_url: &str, url_path: &str) -> String {
    url_path_join(&[base_url, url_path, LOG_ROUTE])
}
