//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use jllogger_core::constants;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jllogger")]
#[command(version, about = "Append notebook cell output to log files over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the log append server
    Serve(ServeArgs),

    /// Send log lines to a running server
    Send(SendArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Config file (.toml, .yaml, .yml or .json); defaults to jllogger.* in the working directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "JLLOGGER_BIND")]
    pub bind: Option<String>,

    /// Base URL the route is mounted under
    #[arg(long, env = "JLLOGGER_BASE_URL")]
    pub base_url: Option<String>,

    /// Extension path segment before LogOutputContent
    #[arg(long, env = "JLLOGGER_URL_PATH")]
    pub url_path: Option<String>,

    /// Directory log files are written to
    #[arg(long, env = "JLLOGGER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Token clients must present
    #[arg(long, env = "JLLOGGER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Allowed CORS origin
    #[arg(long, env = "JLLOGGER_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Largest accepted request body in bytes (default 100 MB)
    #[arg(long, env = "JLLOGGER_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Log lines to send; read from stdin when empty and --outputs is not given
    pub lines: Vec<String>,

    /// Server URL
    #[arg(long, env = "JLLOGGER_URL", default_value = constants::DEFAULT_SERVER_URL)]
    pub url: String,

    /// Extension path segment before LogOutputContent
    #[arg(long, default_value = constants::DEFAULT_URL_PATH)]
    pub url_path: String,

    /// Token to authenticate with
    #[arg(long, env = "JLLOGGER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log file name without the .log extension (default: current time, YYYYMMDDhhmm)
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Name the log after the W&B run found in the outputs when no filename is given
    #[arg(long)]
    pub wandb: bool,

    /// nbformat JSON file with cell outputs (a list of outputs or a cell object)
    #[arg(long, conflicts_with = "lines")]
    pub outputs: Option<PathBuf>,
}
