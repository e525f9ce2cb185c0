//! Header matching for report lines
//!
//! All headers known to a dictionary are compiled into one alternation so a
//! line is scanned once, whatever the size of the dictionary.

use regex::Regex;

use crate::{Error, Result};

/// A span of a line, either a recognised header or the text around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringRegion<'a> {
    /// Literal header text
    Header(&'a str),
    /// Free text before, between or after headers
    Text(&'a str),
}

impl<'a> StringRegion<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            StringRegion::Header(text) | StringRegion::Text(text) => text,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, StringRegion::Header(_))
    }
}

/// Compiled alternation of every dictionary header
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    pattern: Option<Regex>,
}

impl HeaderMatcher {
    /// Build a matcher over the given header literals
    ///
    /// Longer headers are tried first, so a header that prefixes another one
    /// never shadows it. Empty headers are ignored.
    pub fn new<'h>(headers: impl IntoIterator<Item = &'h str>) -> Result<Self> {
        let mut headers: Vec<&str> = headers
            .into_iter()
            .filter(|header| !header.is_empty())
            .collect();
        headers.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        headers.dedup();

        if headers.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = headers
            .iter()
            .map(|header| regex::escape(header))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&alternation).map_err(|e| {
            Error::configuration(format!(
                "Failed to compile matcher over {} headers: {}",
                headers.len(),
                e
            ))
        })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Partition `line` into header and free-text regions, left to right
    ///
    /// The regions cover the whole line. A line without any header yields a
    /// single text region holding the full line.
    pub fn split_by_matches<'t>(&self, line: &'t str) -> Vec<StringRegion<'t>> {
        let Some(pattern) = &self.pattern else {
            return vec![StringRegion::Text(line)];
        };

        let mut regions = Vec::new();
        let mut cursor = 0;

        for found in pattern.find_iter(line) {
            if found.start() > cursor {
                regions.push(StringRegion::Text(&line[cursor..found.start()]));
            }
            regions.push(StringRegion::Header(found.as_str()));
            cursor = found.end();
        }

        if cursor < line.len() || regions.is_empty() {
            regions.push(StringRegion::Text(&line[cursor..]));
        }

        regions
    }
}
