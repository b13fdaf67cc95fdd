//! # linelog CLI
//!
//! Command-line entry point.
//!
//! Thin glue around the engine: argument parsing, sink opening, the
//! interactive stdin loop, the error-consumer branch, and graceful
//! shutdown. All the concurrency design lives in the `engine` crate.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::Layer;

use contracts::{EngineConfig, LogSink};
use engine::{Engine, FileSink};

use cli::{Cli, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        out = %cli.out,
        use_async = cli.use_async,
        "linelog starting"
    );

    let config = EngineConfig {
        message_capacity: cli.message_buffer,
        error_capacity: cli.error_buffer,
        max_concurrent_writes: cli.workers,
    };

    let input_rx = spawn_stdin_reader();

    if cli.out.eq_ignore_ascii_case("stdout") {
        run_session(Engine::with_console(config), input_rx, cli.use_async).await
    } else {
        let sink = FileSink::create(&cli.out)
            .with_context(|| format!("unable to open log file '{}'", cli.out))?;
        run_session(Engine::new(sink, config), input_rx, cli.use_async).await
    }
}

/// Feed stdin lines into a channel from a detached thread.
///
/// A blocking stdin read cannot be cancelled; on a detached plain thread
/// it parks without holding up process exit after quit, which a
/// blocking-pool read would.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (input_tx, input_rx) = mpsc::channel::<String>(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if input_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "unable to read input, please try again"),
            }
        }
    });
    input_rx
}

/// Drive one logging session: start the dispatcher, forward input lines,
/// watch the error queue, and shut everything down on quit.
async fn run_session<S: LogSink + Send + 'static>(
    mut engine: Engine<S>,
    mut input_rx: mpsc::Receiver<String>,
    use_async: bool,
) -> Result<()> {
    let intake = engine.intake();
    let mut errors = engine.take_errors().context("error queue already taken")?;
    let counters = engine.counters();
    let dispatcher = engine.start().context("unable to start dispatcher")?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut errors_open = true;

    println!("Welcome to linelog!");
    println!("Enter a message to write to the log, or 'q' to quit.");

    loop {
        tokio::select! {
            maybe_line = input_rx.recv() => match maybe_line {
                Some(line) => {
                    if line.trim().eq_ignore_ascii_case("q") {
                        break;
                    }
                    if use_async {
                        if intake.send(line).await.is_err() {
                            warn!("dispatcher is gone, message dropped");
                            break;
                        }
                    } else if let Err(e) = engine.write(&line).await {
                        error!(error = %e, "unable to write message to log");
                    }
                }
                None => {
                    info!("stdin closed");
                    break;
                }
            },
            maybe_failure = errors.recv(), if errors_open => match maybe_failure {
                Some(failure) => {
                    // Fail-fast on the first reported failure is session
                    // policy; the engine itself never stops on one.
                    error!(
                        message = %failure.message.trim_end(),
                        error = %failure.error,
                        "write failure reported, shutting down"
                    );
                    break;
                }
                None => errors_open = false,
            },
            _ = &mut shutdown => {
                info!("interrupt received, shutting down");
                break;
            },
        }
    }

    // Close the sink first (a no-op for the console), then drain the
    // dispatcher. Matches the interactive quit contract: messages still
    // queued at this point are not flushed.
    if let Err(e) = engine.sink().lock().await.close().await {
        warn!(error = %e, "failed to close log sink");
    }

    engine.stop();
    if let Err(e) = dispatcher.await {
        error!(error = ?e, "dispatcher task panicked");
    }

    let snapshot = counters.snapshot();
    info!(
        dispatched = snapshot.dispatched,
        completed = snapshot.completed_writes,
        failed = snapshot.failed_writes,
        dropped_errors = snapshot.dropped_errors,
        "session finished"
    );

    Ok(())
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else {
        let default_level = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    // Diagnostics go to stderr; stdout may be the log destination itself.
    let fmt_layer = match cli.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
