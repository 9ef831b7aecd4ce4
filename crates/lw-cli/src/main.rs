//! Command-line entry point for logwatch.
//!
//! # Usage
//!
//! ```bash
//! logwatch [OPTIONS] <COMMAND>
//!
//! # Interactive viewer, optionally opening a file right away
//! logwatch watch /var/log/syslog --pattern 'error|fail'
//!
//! # Print the matching lines once
//! logwatch show /var/log/syslog --pattern ERR --format json
//!
//! # Stream new lines to stdout until interrupted
//! logwatch follow /var/log/syslog --pattern ERR
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod output;

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};
use lw_core::{ColorScheme, Config, LineRecord};
use lw_tail::{
    ChannelPresenter, ContentUpdate, Presenter, StatusLevel, TailController, TailService,
    TailUpdate,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::output::{FollowPrinter, ShowReport, write_numbered};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Watch a log file and filter it by a regular expression.
#[derive(Parser)]
#[command(name = "logwatch", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Write logs to this file. The interactive viewer discards them
    /// otherwise.
    #[arg(long, global = true, env = "LOGWATCH_LOG_FILE")]
    log_file: Option<Utf8PathBuf>,

    #[command(flatten)]
    options: ConfigArgs,
}

/// Flags that map onto [`Config`].
#[derive(Args)]
struct ConfigArgs {
    /// Match patterns regardless of letter case.
    #[arg(short = 'i', long, global = true, env = "LOGWATCH_CASE_INSENSITIVE")]
    case_insensitive: bool,

    /// Largest compiled pattern accepted, in bytes.
    #[arg(long, global = true, env = "LOGWATCH_PATTERN_SIZE_LIMIT")]
    pattern_size_limit: Option<usize>,

    /// Refresh once per queued change instead of merging bursts.
    #[arg(long, global = true, env = "LOGWATCH_NO_COALESCE")]
    no_coalesce: bool,

    /// Color scheme for the interactive viewer.
    #[arg(long, global = true, value_enum, env = "LOGWATCH_COLOR_SCHEME")]
    color_scheme: Option<SchemeArg>,

    /// Interval between UI ticks, in milliseconds.
    #[arg(long, global = true, env = "LOGWATCH_TICK_RATE_MS")]
    tick_rate_ms: Option<u64>,

    /// Seconds a status message stays visible.
    #[arg(long, global = true, env = "LOGWATCH_STATUS_TIMEOUT")]
    status_timeout: Option<u64>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer.
    Watch {
        /// Log file to open on start.
        file: Option<Utf8PathBuf>,

        /// Pattern to apply once the file is open.
        #[arg(short, long)]
        pattern: Option<String>,

        /// Do not watch the file; refresh manually with `r`.
        #[arg(long)]
        no_watch: bool,
    },

    /// Print the file, or its matching lines, once.
    Show {
        /// Log file to read.
        file: Utf8PathBuf,

        /// Only print lines matching this pattern.
        #[arg(short, long)]
        pattern: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print new lines as they are written, until interrupted.
    Follow {
        /// Log file to follow.
        file: Utf8PathBuf,

        /// Only print lines matching this pattern.
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

/// Output format for `show`.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Numbered lines.
    Text,
    /// JSON document.
    Json,
}

/// Color scheme names accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Auto,
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Auto => Self::Auto,
            SchemeArg::Light => Self::Light,
            SchemeArg::Dark => Self::Dark,
        }
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Where log records go.
enum LogSink<'a> {
    Stderr,
    File(&'a Utf8Path),
    Discard,
}

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG` if set. Otherwise uses `debug` with `--verbose` and
/// `info` by default, with `notify` held at `warn`.
fn init_tracing(verbose: bool, no_color: bool, sink: &LogSink<'_>) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},mio=warn,notify=warn"))
    });

    let use_ansi = !no_color && std::env::var_os("NO_COLOR").is_none();

    match sink {
        LogSink::Stderr => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(use_ansi)
                    .with_writer(io::stderr),
            )
            .with(filter)
            .init(),
        LogSink::File(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create log file {path}"))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        LogSink::Discard => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::sink))
            .with(filter)
            .init(),
    }
    Ok(())
}

/// Builds a [`Config`] from CLI flags.
///
/// # Errors
///
/// Returns an error if the resulting configuration is invalid.
fn build_config(args: &ConfigArgs) -> color_eyre::Result<Config> {
    let mut config = Config::default();
    config.filter.case_insensitive = args.case_insensitive;
    if let Some(limit) = args.pattern_size_limit {
        config.filter.size_limit_bytes = limit;
    }
    config.watch.coalesce_events = !args.no_coalesce;
    if let Some(scheme) = args.color_scheme {
        config.tui.color_scheme = scheme.into();
    }
    if let Some(tick) = args.tick_rate_ms {
        config.tui.tick_rate_ms = tick;
    }
    if let Some(timeout) = args.status_timeout {
        config.tui.status_timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the interactive viewer.
async fn run_watch(
    mut config: Config,
    file: Option<Utf8PathBuf>,
    pattern: Option<String>,
    no_watch: bool,
    no_color: bool,
) -> color_eyre::Result<()> {
    config.watch.enabled = !no_watch;
    info!(file = ?file, watch = !no_watch, "Starting viewer");

    let launch = lw_tui::Launch {
        file,
        pattern,
        monochrome: no_color || std::env::var_os("NO_COLOR").is_some(),
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = lw_tui::run(config, launch) => {
                result.map_err(|e| eyre!("TUI error: {e}"))?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        lw_tui::run(config, launch)
            .await
            .map_err(|e| eyre!("TUI error: {e}"))?;
    }

    Ok(())
}

/// Presenter for one-shot commands; results are read from the controller.
struct Silent;

impl Presenter for Silent {
    fn on_content_updated(&mut self, update: &ContentUpdate) {
        debug!(lines = update.lines.len(), "Content loaded");
    }

    fn on_status(&mut self, _level: StatusLevel, text: &str) {
        debug!(status = text, "Status");
    }

    fn on_new_match(&mut self, _line: &LineRecord) {}
}

/// Prints the visible lines once.
fn run_show(
    mut config: Config,
    file: &Utf8Path,
    pattern: Option<&str>,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    config.watch.enabled = false;
    let mut controller = TailController::new(&config, Silent, None);

    controller
        .open_file(file)
        .wrap_err_with(|| format!("Failed to open {file}"))?;
    if let Some(raw) = pattern {
        controller.set_filter(raw)?;
    }

    let visible = controller.visible();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => write_numbered(&visible, &mut handle)?,
        OutputFormat::Json => {
            let path = controller
                .target()
                .map_or(file.as_str(), |t| t.path().as_str());
            let pattern = controller.filter().pattern().map(|p| p.as_str());
            let report = ShowReport::new(path, pattern, &visible);
            serde_json::to_writer_pretty(&mut handle, &report)?;
            writeln!(handle)?;
        }
    }

    controller.close();
    Ok(())
}

/// Streams new lines until Ctrl+C or SIGTERM.
async fn run_follow(
    config: Config,
    file: Utf8PathBuf,
    pattern: Option<String>,
) -> color_eyre::Result<()> {
    let (presenter, mut updates) = ChannelPresenter::channel();
    let (handle, service) = TailService::new(&config, presenter);
    let worker = service.spawn();

    info!(%file, "Following");
    handle.open_file(file)?;
    if let Some(raw) = pattern {
        handle.set_filter(raw)?;
    }

    let result = follow_loop(&mut updates).await;

    handle.shutdown();
    worker.await?;
    result
}

async fn follow_loop(updates: &mut lw_tail::EventQueue<TailUpdate>) -> color_eyre::Result<()> {
    let mut printer = FollowPrinter::default();

    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    loop {
        #[cfg(unix)]
        let terminate = sigterm.recv();
        #[cfg(not(unix))]
        let terminate = std::future::pending::<Option<()>>();

        let update = tokio::select! {
            update = updates.recv() => update,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                return Ok(());
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down");
                return Ok(());
            }
        };

        let Some(update) = update else {
            return Ok(());
        };

        if let TailUpdate::Status(StatusLevel::Error, text) = &update {
            if !printer.started() {
                return Err(eyre!("{text}"));
            }
        }

        let stdout = io::stdout();
        let stderr = io::stderr();
        printer.write_update(&update, &mut stdout.lock(), &mut stderr.lock())?;
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let sink = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogSink::File(path),
        (None, Commands::Watch { .. }) => LogSink::Discard,
        (None, _) => LogSink::Stderr,
    };
    init_tracing(cli.verbose, cli.no_color, &sink)?;

    let config = build_config(&cli.options)?;

    match cli.command {
        Commands::Watch {
            file,
            pattern,
            no_watch,
        } => run_watch(config, file, pattern, no_watch, cli.no_color).await,
        Commands::Show {
            file,
            pattern,
            format,
        } => run_show(config, &file, pattern.as_deref(), format),
        Commands::Follow { file, pattern } => run_follow(config, file, pattern).await,
    }
}
