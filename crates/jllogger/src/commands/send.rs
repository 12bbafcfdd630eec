//! Send command implementation

use anyhow::{bail, Context, Result};
use chrono::Local;
use jllogger_core::output::{extract_wandb_run_name, format_outputs};
use jllogger_core::LogRequest;
use jllogger_web::LogClient;
use serde_json::Value;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::cli::SendArgs;
use crate::output::{print_error_json, print_success_json};

/// Current local time as YYYYMMDDhhmm
fn timestamp_name() -> String {
    Local::now().format("%Y%m%d%H%M").to_string()
}

/// Cell outputs from an nbformat file: either a bare list or a cell object
fn load_outputs(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match value {
        Value::Array(outputs) => Ok(outputs),
        Value::Object(mut cell) => match cell.remove("outputs") {
            Some(Value::Array(outputs)) => Ok(outputs),
            _ => bail!("{} has no \"outputs\" list", path.display()),
        },
        _ => bail!("{} is neither an outputs list nor a cell", path.display()),
    }
}

/// Pick the log name: explicit name, then W&B run name, then a timestamp
pub fn resolve_filename(filename: Option<String>, wandb: bool, outputs: &[Value]) -> String {
    if let Some(name) = filename.filter(|n| !n.is_empty()) {
        return name;
    }
    if wandb {
        let run_name = extract_wandb_run_name(outputs);
        if !run_name.is_empty() {
            return run_name;
        }
    }
    timestamp_name()
}

async fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        collected.push(line);
    }
    Ok(collected)
}

pub async fn execute(args: SendArgs) -> Result<()> {
    let outputs = match &args.outputs {
        Some(path) => load_outputs(path)?,
        None => Vec::new(),
    };

    let lines = if args.outputs.is_some() {
        format_outputs(&outputs)
    } else if !args.lines.is_empty() {
        args.lines
    } else {
        read_stdin_lines().await?
    };

    let filename = resolve_filename(args.filename, args.wandb, &outputs);
    debug!("Sending {} lines as {}.log", lines.len(), filename);

    let client = LogClient::new(args.url, args.token).with_url_path(args.url_path);
    let request = LogRequest::new(filename, lines);

    match client.send(&request).await {
        Ok(()) => {
            print_success_json(
                &format!(
                    "Sent {} lines to {}.log",
                    request.log_content.len(),
                    request.filename
                ),
                Some(serde_json::json!({
                    "filename": request.filename,
                    "lines": request.log_content.len(),
                })),
            );
            Ok(())
        }
        Err(e) => {
            print_error_json(&e.to_string());
            bail!("Failed to send log lines")
        }
    }
}
