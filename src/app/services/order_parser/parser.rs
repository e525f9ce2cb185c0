//! Order report parser façade
//!
//! Binds a compiled dictionary to its header matcher and runs the scanner over
//! whatever line source the caller has: a string, an async reader, a stream of
//! lines or a file on disk.

use futures::{Stream, StreamExt};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::header_matcher::HeaderMatcher;
use super::scanner::LineScanner;
use super::stats::ParseResult;
use crate::app::services::field_dictionary::FieldDictionary;
use crate::config::ParserConfig;
use crate::{Error, Result};

/// Dictionary-driven parser for order reports
///
/// Cloning is cheap: the dictionary and matcher are shared read-only, so one
/// parser can serve any number of concurrent parses.
#[derive(Debug, Clone)]
pub struct OrderParser {
    dictionary: Arc<FieldDictionary>,
    matcher: Arc<HeaderMatcher>,
    include_meta: bool,
}

impl OrderParser {
    /// Create a parser over a compiled dictionary
    pub fn new(dictionary: FieldDictionary) -> Result<Self> {
        Self::from_shared(Arc::new(dictionary))
    }

    /// Create a parser over a dictionary already shared elsewhere
    pub fn from_shared(dictionary: Arc<FieldDictionary>) -> Result<Self> {
        let matcher = HeaderMatcher::new(dictionary.all_headers())?;
        debug!(
            "Header matcher built over {} headers",
            dictionary.all_headers().count()
        );

        Ok(Self {
            dictionary,
            matcher: Arc::new(matcher),
            include_meta: true,
        })
    }

    /// Create a parser honouring the parser section of the configuration
    pub fn with_config(dictionary: FieldDictionary, config: &ParserConfig) -> Result<Self> {
        Ok(Self::new(dictionary)?.with_include_meta(config.include_meta))
    }

    /// Keep or strip `_meta` warning blocks in the output
    pub fn with_include_meta(mut self, include_meta: bool) -> Self {
        self.include_meta = include_meta;
        self
    }

    pub fn dictionary(&self) -> &FieldDictionary {
        &self.dictionary
    }

    pub fn include_meta(&self) -> bool {
        self.include_meta
    }

    /// Fresh scanner over this parser's dictionary
    pub fn scanner(&self) -> LineScanner<'_> {
        LineScanner::new(&self.dictionary, &self.matcher)
    }

    /// Parse report text held in memory
    pub fn parse_str(&self, input: &str) -> Result<ParseResult> {
        let mut scanner = self.scanner();
        for line in input.lines() {
            scanner.feed_line(line)?;
        }
        self.finish(scanner)
    }

    /// Parse lines read from an async buffered reader until EOF
    pub async fn parse_reader<R>(&self, reader: R) -> Result<ParseResult>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut scanner = self.scanner();
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::io("Failed to read report line", e))?
        {
            scanner.feed_line(&line)?;
        }
        self.finish(scanner)
    }

    /// Parse a stream of lines; the parse resolves when the stream ends
    pub async fn parse_stream<S>(&self, mut lines: S) -> Result<ParseResult>
    where
        S: Stream<Item = io::Result<String>> + Unpin,
    {
        let mut scanner = self.scanner();
        while let Some(line) = lines.next().await {
            let line = line.map_err(|e| Error::io("Failed to read report line", e))?;
            scanner.feed_line(&line)?;
        }
        self.finish(scanner)
    }

    /// Parse a report file
    pub async fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        let file = File::open(path)
            .await
            .map_err(|e| Error::io(format!("Failed to open report {}", path.display()), e))?;

        debug!("Parsing report {}", path.display());
        self.parse_reader(BufReader::new(file)).await
    }

    fn finish(&self, scanner: LineScanner<'_>) -> Result<ParseResult> {
        let mut result = scanner.finish()?;

        if !self.include_meta {
            result.records.iter_mut().for_each(|record| record.strip_meta());
        }

        let stats = &result.stats;
        info!(
            "Parsed {} lines: {} records, {} nested, {} dropped, {} warnings",
            stats.lines_read,
            stats.records_emitted,
            stats.children_attached,
            stats.children_dropped,
            stats.warnings
        );

        Ok(result)
    }
}
