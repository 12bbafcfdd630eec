//! Notebook cell output formatting
//!
//! Converts nbformat output objects into the log entries a notebook client
//! sends to the append route.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// First `<strong><a href="https://wandb.ai/...">NAME</a></strong>` in an HTML blob
static WANDB_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<strong><a href="https://wandb\.ai/[^"]*"[^>]*>([^<]*)</a></strong>"#)
        .expect("valid regex")
});

/// nbformat multiline strings may be a single string or a list of fragments
fn multiline_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter_map(Value::as_str)
                .collect::<String>(),
        ),
        _ => None,
    }
}

/// Format a single cell output as a log entry.
///
/// Unsupported output types and results without a `text/plain`
/// representation produce an empty entry.
pub fn format_output(output: &Value) -> String {
    let output_type = output
        .get("output_type")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match output_type {
        "stream" => {
            let text = multiline_text(output.get("text")).unwrap_or_default();
            format!("[{}]\n{}", output_type, text)
        }
        "execute_result" => {
            match multiline_text(output.get("data").and_then(|d| d.get("text/plain"))) {
                Some(text) => format!("[{}]\n{}\n", output_type, text),
                None => String::new(),
            }
        }
        "error" => {
            let evalue = output
                .get("evalue")
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("[{}]\n{}\n", output_type, evalue)
        }
        _ => String::new(),
    }
}

/// Format every output of a cell, preserving order
pub fn format_outputs(outputs: &[Value]) -> Vec<String> {
    outputs.iter().map(format_output).collect()
}

/// Find the W&B run name announced in `display_data` outputs.
///
/// Later outputs win. Returns an empty string when no run link is present.
pub fn extract_wandb_run_name(outputs: &[Value]) -> String {
    let mut run_name = String::new();
    for output in outputs {
        if output.get("output_type").and_then(Value::as_str) != Some("display_data") {
            continue;
        }
        let Some(html) = multiline_text(output.get("data").and_then(|d| d.get("text/html"))) else {
            continue;
        };
        if let Some(caps) = WANDB_RUN_RE.captures(&html) {
            run_name = caps[1].to_string();
        }
    }
    run_name
}
