//! Parsing statistics and result structures for order report processing
//!
//! This module provides the counters gathered during one parse and the result
//! type bundling them with the produced records.

use serde::{Deserialize, Serialize};

use crate::app::models::StructuredRecord;

/// Parsing result with records and basic statistics
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    /// Top-level records in input order, children nested inside their owners
    pub records: Vec<StructuredRecord>,

    /// Counters gathered during the parse
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of input lines consumed, separators included
    pub lines_read: usize,

    /// Number of records filed at the top level
    pub records_emitted: usize,

    /// Number of records nested under an owner
    pub children_attached: usize,

    /// Number of records dropped because their owner was not found
    pub children_dropped: usize,

    /// Number of captures discarded because they held only free text
    pub records_discarded: usize,

    /// Number of `_meta` warnings attached to produced records
    pub warnings: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that were classified and cooked, wherever they ended up
    pub fn records_cooked(&self) -> usize {
        self.records_emitted + self.children_attached + self.children_dropped
    }

    /// Add another parse's counters into these
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines_read += other.lines_read;
        self.records_emitted += other.records_emitted;
        self.children_attached += other.children_attached;
        self.children_dropped += other.children_dropped;
        self.records_discarded += other.records_discarded;
        self.warnings += other.warnings;
    }

    /// Whether every cooked record made it into the output
    pub fn is_lossless(&self) -> bool {
        self.children_dropped == 0
    }
}
