//! Core types for jllogger

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{FORBIDDEN_FILENAME_PARTS, LOG_EXTENSION};
use crate::error::{Error, Result};

/// A log file name that passed the traversal check.
///
/// Only the substrings `..`, `/` and `\` are rejected. The check is a plain
/// substring match; no path canonicalization takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogName(String);

impl LogName {
    /// Validate a raw filename
    pub fn parse(raw: &str) -> Result<Self> {
        if FORBIDDEN_FILENAME_PARTS.iter().any(|part| raw.contains(part)) {
            return Err(Error::InvalidFilename(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name on disk, `<name>.log`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, LOG_EXTENSION)
    }
}

impl fmt::Display for LogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LogName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Body of a log append request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRequest {
    pub filename: String,
    #[serde(rename = "logContent")]
    pub log_content: Vec<String>,
}

impl LogRequest {
    pub fn new(filename: impl Into<String>, log_content: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            log_content,
        }
    }

    /// Decode a request from an already-parsed JSON body.
    ///
    /// Missing keys or wrong types surface as `InvalidRequest`.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Validated log name of this request
    pub fn log_name(&self) -> Result<LogName> {
        LogName::parse(&self.filename)
    }
}
