//! Command-line argument definitions for the order parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the order report parser
///
/// Turns fixed-format order report text into structured JSON records using a
/// declarative field dictionary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "order-parser",
    version,
    about = "Parse fixed-format order reports into structured JSON using a field dictionary",
    long_about = "Parses semi-structured order reports (labelled fields, multi-line values, \
                  embedded tables, location blocks and nested suborders) into JSON records. \
                  Which labels exist, how their values are interpreted and how records nest \
                  is described entirely by a JSON or YAML field dictionary."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one or more reports into JSON
    Parse(ParseArgs),
    /// List the headers a dictionary recognises
    Headers(HeadersArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Field dictionary (JSON, or YAML with a .yaml/.yml extension)
    #[arg(
        short = 'd',
        long = "dictionary",
        value_name = "FILE",
        help = "Field dictionary file (JSON or YAML)"
    )]
    pub dictionary: PathBuf,

    /// Report files or directories to parse
    ///
    /// Directories are walked recursively; only files with one of the
    /// configured input extensions are parsed.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Write JSON to this file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write JSON output to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty", help = "Pretty-print JSON output")]
    pub pretty: bool,

    /// Strip `_meta` warning blocks from the output
    #[arg(long = "no-meta", help = "Omit _meta warning blocks from records")]
    pub no_meta: bool,

    /// Configuration file
    ///
    /// Defaults to order-parser/config.json under the user config directory
    /// when that file exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file (JSON)"
    )]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the headers command
#[derive(Debug, Clone, Parser)]
pub struct HeadersArgs {
    /// Field dictionary (JSON, or YAML with a .yaml/.yml extension)
    #[arg(
        short = 'd',
        long = "dictionary",
        value_name = "FILE",
        help = "Field dictionary file (JSON or YAML)"
    )]
    pub dictionary: PathBuf,

    /// Output format for the header listing
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for the header listing"
    )]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command, panicking if none provided
    ///
    /// `main` shows help and exits before this is reached without a command.
    pub fn get_command(&self) -> &Commands {
        self.command
            .as_ref()
            .expect("Command should be present when called from main")
    }
}

impl Commands {
    /// Log level requested by the subcommand's flags
    pub fn get_log_level(&self) -> &'static str {
        match self {
            Commands::Parse(args) => args.get_log_level(),
            Commands::Headers(args) => verbosity_level(args.verbose),
        }
    }

    /// Whether compact logging was requested
    pub fn is_quiet(&self) -> bool {
        matches!(self, Commands::Parse(args) if args.quiet)
    }
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.dictionary.is_file() {
            return Err(Error::configuration(format!(
                "Dictionary file does not exist: {}",
                self.dictionary.display()
            )));
        }

        for input in &self.inputs {
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the logging level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.inputs.len() > 1
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
