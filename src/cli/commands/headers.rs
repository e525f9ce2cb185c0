//! Headers command implementation
//!
//! Lists every header a dictionary recognises together with the types that
//! declare it. Headers claimed by several types can never classify a record on
//! their own and are flagged.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::time::Instant;

use super::shared::{CommandStats, render_json};
use crate::app::services::field_dictionary::FieldDictionary;
use crate::cli::args::{HeadersArgs, OutputFormat};

/// One row of the header listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub header: String,
    pub types: Vec<String>,
    pub ambiguous: bool,
}

/// Build the header listing in dictionary declaration order
pub fn header_entries(dictionary: &FieldDictionary) -> Vec<HeaderEntry> {
    dictionary
        .all_headers()
        .map(|header| {
            let types = dictionary.types_for_header(header).to_vec();
            HeaderEntry {
                header: header.to_string(),
                ambiguous: types.len() > 1,
                types,
            }
        })
        .collect()
}

/// Run the headers command
pub async fn run_headers(args: &HeadersArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let dictionary = FieldDictionary::from_file(&args.dictionary)
        .with_context(|| format!("Failed to load dictionary {}", args.dictionary.display()))?;
    let entries = header_entries(&dictionary);

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&entries, true)?),
        OutputFormat::Text => print_text(&entries, dictionary.record_separator().as_str()),
    }

    Ok(CommandStats {
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn print_text(entries: &[HeaderEntry], separator: &str) {
    let width = entries
        .iter()
        .map(|entry| entry.header.len())
        .max()
        .unwrap_or(0);

    println!("{}", "Dictionary Headers".bright_green().bold());
    println!("  {} {}", "Record separator:".bright_cyan(), separator);
    for entry in entries {
        let header = format!("{:<width$}", entry.header, width = width);
        let types = entry.types.join(", ");
        if entry.ambiguous {
            println!(
                "  {}  {}  {}",
                header.bright_white(),
                types.bright_yellow(),
                "(ambiguous)".bright_red()
            );
        } else {
            println!("  {}  {}", header.bright_white(), types.bright_cyan());
        }
    }

    let ambiguous = entries.iter().filter(|entry| entry.ambiguous).count();
    println!(
        "\n  {} headers, {} ambiguous",
        entries.len().to_string().bright_white().bold(),
        ambiguous
    );
}
