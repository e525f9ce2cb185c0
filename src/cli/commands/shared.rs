//! Shared components for CLI commands
//!
//! This module contains the logging setup, configuration loading, input
//! discovery and reporting helpers used by the command implementations.

use anyhow::{Context, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::services::order_parser::ParseStats;
use crate::cli::args::{Commands, ParseArgs};
use crate::config::Config;

/// Totals reported at the end of a command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Number of report files parsed
    pub files_parsed: usize,
    /// Parse counters summed over every file
    pub totals: ParseStats,
    /// Total processing time
    pub processing_time: Duration,
}

impl CommandStats {
    /// Fold one file's parse counters into the totals
    pub fn record_file(&mut self, stats: &ParseStats) {
        self.files_parsed += 1;
        self.totals.merge(stats);
    }
}

/// Set up structured logging for the selected command
pub fn setup_logging(command: &Commands) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = command.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("order_parser={}", log_level)));

    if command.is_quiet() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, config file, environment, then CLI flags
pub fn load_configuration(args: &ParseArgs) -> Result<Config> {
    let default_config_path = match &args.config_file {
        Some(_) => None,
        None => Config::default_config_path().ok(),
    };

    let config_file = args.config_file.as_deref().or_else(|| {
        default_config_path
            .as_deref()
            .filter(|path| path.exists())
    });

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    let mut config = Config::load_layered(config_file).context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Apply command-line flags on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ParseArgs) {
    if args.pretty {
        config.output.pretty = true;
    }
    if args.no_meta {
        config.parser.include_meta = false;
    }
}

/// Expand the given inputs into report files
///
/// Files named explicitly are always kept; directories are walked recursively
/// and filtered by the configured extensions. The result is sorted and free of
/// duplicates.
pub fn discover_inputs(inputs: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).follow_links(false) {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory {}", input.display()))?;
                let path = entry.path();
                if path.is_file() && config.accepts_input(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }

    files.sort();
    files.dedup();

    debug!("Discovered {} report files", files.len());
    Ok(files)
}

/// Serialize output as compact or pretty JSON
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}

/// Write rendered output to a file, or stdout when no file is given
pub async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{}\n", content))
                .await
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Wrote output to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Resolve once `signal` reports an interrupt
///
/// A signal handler that fails to install is logged and never resolves, so
/// the command it races against runs to completion.
pub async fn wait_for_interrupt<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Print the run summary to stderr so stdout stays valid JSON
pub fn print_summary(stats: &CommandStats) {
    let totals = &stats.totals;

    eprintln!("\n{}", "Parse Summary".bright_green().bold());
    eprintln!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
    eprintln!(
        "  {} {}",
        "Files parsed:".bright_cyan(),
        stats.files_parsed.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        totals.lines_read.to_string().bright_white()
    );
    eprintln!(
        "  {} {} ({} nested, {} cooked)",
        "Records:".bright_cyan(),
        totals.records_emitted.to_string().bright_white().bold(),
        totals.children_attached,
        totals.records_cooked()
    );
    if totals.warnings > 0 {
        eprintln!(
            "  {} {}",
            "Warnings:".bright_cyan(),
            totals.warnings.to_string().bright_yellow()
        );
    }
    if !totals.is_lossless() {
        eprintln!(
            "  {} {}",
            "Dropped (no owner):".bright_cyan(),
            totals.children_dropped.to_string().bright_red().bold()
        );
    }
}
