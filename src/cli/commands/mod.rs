//! Command implementations for the order parser CLI
//!
//! Each subcommand lives in its own module; shared logging, configuration and
//! reporting helpers are in `shared`.

pub mod headers;
pub mod parse;
pub mod shared;

pub use shared::{CommandStats, wait_for_interrupt};

use anyhow::Result;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Sets up logging for the selected subcommand and dispatches to its handler:
/// - `parse`: parse reports into JSON
/// - `headers`: list the headers a dictionary recognises
pub async fn run(args: Args) -> Result<CommandStats> {
    let command = args.get_command();
    shared::setup_logging(command)?;

    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::Headers(headers_args) => headers::run_headers(headers_args).await,
    }
}
