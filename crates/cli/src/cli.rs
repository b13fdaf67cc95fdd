//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};

/// linelog - concurrent line logger
#[derive(Parser, Debug)]
#[command(
    name = "linelog",
    author,
    version,
    about = "Concurrent line logger",
    long_about = "Reads messages from standard input and writes them, timestamped, to a \n\
                  single destination sink. Messages go through either the synchronous \n\
                  write path or the asynchronous dispatch queue; write failures on the \n\
                  asynchronous path are reported on a dedicated error queue."
)]
pub struct Cli {
    /// Log output destination: a file path, or "stdout" for the console
    #[arg(short, long, default_value = "stdout", env = "LINELOG_OUT")]
    pub out: String,

    /// Write messages through the asynchronous dispatch path
    #[arg(long = "async", env = "LINELOG_ASYNC")]
    pub use_async: bool,

    /// Intake queue capacity (0 = default of 1)
    #[arg(long, default_value = "1", env = "LINELOG_MESSAGE_BUFFER")]
    pub message_buffer: usize,

    /// Error queue capacity (0 = default of 1)
    #[arg(long, default_value = "1", env = "LINELOG_ERROR_BUFFER")]
    pub error_buffer: usize,

    /// Maximum concurrent write tasks (0 = default of 4)
    #[arg(long, default_value = "4", env = "LINELOG_WORKERS")]
    pub workers: usize,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "LINELOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic log format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        env = "LINELOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

/// Diagnostic log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}
