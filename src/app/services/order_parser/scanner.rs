//! Line scanner and multi-line field accumulator
//!
//! The scanner is a two-state machine: either no field is open, or one header
//! is open and collecting text. Continuation lines are newline-joined onto the
//! open field until the next header or record separator closes it.

use super::cook::{Filing, ObjectCook};
use super::header_matcher::{HeaderMatcher, StringRegion};
use super::object_builder::ObjectBuilder;
use super::stats::{ParseResult, ParseStats};
use crate::Result;
use crate::app::services::field_dictionary::FieldDictionary;

/// Header whose value is still being collected
#[derive(Debug)]
struct OpenField {
    header: String,
    value: String,
}

/// Single-pass state for one parse
///
/// Lines are pushed in with [`feed_line`](Self::feed_line); nothing is read by
/// the scanner itself, so any line source can drive it.
#[derive(Debug)]
pub struct LineScanner<'d> {
    dictionary: &'d FieldDictionary,
    matcher: &'d HeaderMatcher,
    cook: ObjectCook<'d>,
    builder: ObjectBuilder,
    open_field: Option<OpenField>,
    stats: ParseStats,
}

impl<'d> LineScanner<'d> {
    pub fn new(dictionary: &'d FieldDictionary, matcher: &'d HeaderMatcher) -> Self {
        Self {
            dictionary,
            matcher,
            cook: ObjectCook::new(dictionary),
            builder: ObjectBuilder::new(),
            open_field: None,
            stats: ParseStats::new(),
        }
    }

    /// Consume one input line, without its `\n` terminator
    ///
    /// A trailing `\r` is dropped, so CRLF text reads the same from every
    /// line source.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        self.stats.lines_read += 1;

        if self.dictionary.is_record_separator(line) {
            return self.finish_record();
        }

        if let Some(open) = self.open_field.as_mut() {
            open.value.push('\n');
        }

        let mut regions = self.matcher.split_by_matches(line).into_iter().peekable();
        while let Some(region) = regions.next() {
            match region {
                StringRegion::Text(text) => match self.open_field.as_mut() {
                    Some(open) => open.value.push_str(text),
                    None if !text.trim().is_empty() => self.builder.ignore_text(text),
                    None => {}
                },
                StringRegion::Header(header) => {
                    self.close_field();
                    let value = regions
                        .next_if(|next| !next.is_header())
                        .map(|next| next.text().to_string())
                        .unwrap_or_default();
                    self.open_field = Some(OpenField {
                        header: header.to_string(),
                        value,
                    });
                }
            }
        }

        Ok(())
    }

    /// Close the open field and the last record, then hand back the output
    pub fn finish(mut self) -> Result<ParseResult> {
        self.finish_record()?;
        Ok(ParseResult {
            records: self.cook.into_records(),
            stats: self.stats,
        })
    }

    /// Counters so far
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    fn close_field(&mut self) {
        if let Some(open) = self.open_field.take() {
            self.builder.store(&open.header, open.value);
        }
    }

    fn finish_record(&mut self) -> Result<()> {
        self.close_field();
        let builder = std::mem::take(&mut self.builder);

        if builder.is_empty() {
            if !builder.meta().is_empty() {
                self.stats.records_discarded += 1;
            }
            return Ok(());
        }

        let warnings = builder.meta().warning_count();
        match self.cook.cook(builder, self.stats.lines_read)? {
            Filing::TopLevel => {
                self.stats.records_emitted += 1;
                self.stats.warnings += warnings;
            }
            Filing::Attached { .. } => {
                self.stats.children_attached += 1;
                self.stats.warnings += warnings;
            }
            Filing::Dropped => self.stats.children_dropped += 1,
        }

        Ok(())
    }
}
