//! Terminal output formatting

use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// JSON wrapper for command results
#[derive(Serialize)]
pub struct ResponseJson<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Print a success message, as JSON if enabled
pub fn print_success_json<T: Serialize>(message: &str, data: Option<T>) {
    if is_json_mode() {
        let response = ResponseJson {
            success: true,
            message: Some(message.to_string()),
            data,
        };
        if let Ok(json) = serde_json::to_string_pretty(&response) {
            println!("{}", json);
        }
    } else {
        print_success(message);
    }
}

/// Print an error message, as JSON if enabled
pub fn print_error_json(message: &str) {
    if is_json_mode() {
        let response: ResponseJson<()> = ResponseJson {
            success: false,
            message: Some(message.to_string()),
            data: None,
        };
        if let Ok(json) = serde_json::to_string_pretty(&response) {
            eprintln!("{}", json);
        }
    } else {
        print_error(message);
    }
}
