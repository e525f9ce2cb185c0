//! Parse command implementation
//!
//! Loads the dictionary once and parses every input report concurrently,
//! sharing the compiled dictionary between parses.

use anyhow::{Context, Result, bail};
use futures::{StreamExt, stream};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use super::shared::{
    CommandStats, create_progress_bar, discover_inputs, load_configuration, print_summary,
    render_json, write_output,
};
use crate::app::models::StructuredRecord;
use crate::app::services::field_dictionary::FieldDictionary;
use crate::app::services::order_parser::{OrderParser, ParseResult};
use crate::cli::args::ParseArgs;

/// Run the parse command
pub async fn run_parse(args: &ParseArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    args.validate()?;
    let config = load_configuration(args)?;

    let dictionary = FieldDictionary::load(&args.dictionary, &config.parser.default_record_separator)
        .with_context(|| format!("Failed to load dictionary {}", args.dictionary.display()))?;
    let parser = OrderParser::with_config(dictionary, &config.parser)?;

    let files = discover_inputs(&args.inputs, &config)?;
    if files.is_empty() {
        bail!("No report files found in the given inputs");
    }
    info!("Parsing {} report files", files.len());

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Parsing reports"));

    let parsed: Vec<Result<(PathBuf, ParseResult)>> = stream::iter(files)
        .map(|path| {
            let parser = parser.clone();
            async move {
                let result = parser
                    .parse_file(&path)
                    .await
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                Ok::<_, anyhow::Error>((path, result))
            }
        })
        .buffered(config.output.max_concurrent_files)
        .inspect(|_| {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut stats = CommandStats::default();
    let mut outputs: IndexMap<String, Vec<StructuredRecord>> = IndexMap::new();
    for entry in parsed {
        let (path, result) = entry?;
        debug!("{}: {:?}", path.display(), result.stats);
        stats.record_file(&result.stats);
        outputs.insert(path.display().to_string(), result.records);
    }

    let single_file = args.inputs.len() == 1 && args.inputs[0].is_file();
    let rendered = if single_file {
        let records = outputs.into_values().next().unwrap_or_default();
        render_json(&records, config.output.pretty)?
    } else {
        render_json(&outputs, config.output.pretty)?
    };
    write_output(args.output.as_deref(), &rendered).await?;

    stats.processing_time = start_time.elapsed();
    if !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}
