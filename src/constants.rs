//! Application constants for the order report parser
//!
//! This module contains the default values, reserved keys and processor
//! vocabulary shared between the dictionary loader, the parser and the CLI.

// =============================================================================
// Record Boundaries
// =============================================================================

/// Default record separator: a line made only of one or more underscores
pub const DEFAULT_RECORD_SEPARATOR: &str = r"^_+$";

// =============================================================================
// Reserved Keys
// =============================================================================

/// Key under which per-record warnings are serialized
pub const META_KEY: &str = "_meta";

/// Warning channel for text that no header claims and for overwritten values
pub const IGNORED_TEXT: &str = "ignored_text";

// =============================================================================
// Field Processors
// =============================================================================

/// Processor kind names accepted in `fields_by_header`
pub mod processor_kinds {
    /// Stores the trimmed value under a single field
    pub const TRIMMED: &str = "trimmed";

    /// Scalar value on the first line followed by a column-major table
    pub const FIELD_FOLLOWED_BY_TABLE: &str = "field_followed_by_table";

    /// Location text followed by contact name / telephone blocks
    pub const PRIMARY_SECONDARY_LOCATION: &str = "primary_secondary_location";

    /// All known processor kinds
    pub const ALL: &[&str] = &[TRIMMED, FIELD_FOLLOWED_BY_TABLE, PRIMARY_SECONDARY_LOCATION];
}

/// Option names understood by the processors
pub mod processor_options {
    pub const FIELD: &str = "field";
    pub const TABLE_FIELD: &str = "table_field";
    pub const NUM_COLUMNS: &str = "num_columns";
    pub const CONTACTS_FIELD: &str = "contacts_field";
}

/// Line labels recognised inside location blobs
pub mod location_labels {
    /// Label line opening the location text
    pub const SECONDARY_LOCATION: &str = "Secondary Location";

    /// Prefix of the first contact line; ends the location text
    pub const CONTACT_PREFIX: &str = "Contact ";

    /// Contact name line pattern, capture 1 is the name
    pub const CONTACT_NAME_PATTERN: &str = r"^\s*Contact Name\s*(.*)$";

    /// Telephone line pattern, capture 1 is the number
    pub const TELEPHONE_PATTERN: &str = r"^\s*Telephone\s*(.*)$";
}

// =============================================================================
// CLI Defaults
// =============================================================================

/// File extensions picked up when a directory is given as input
pub const DEFAULT_INPUT_EXTENSIONS: &[&str] = &["txt"];

/// Reports parsed concurrently when several inputs are given
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 8;

/// Application directory name used under the user config directory
pub const CONFIG_DIR_NAME: &str = "order-parser";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the default record separator
pub const ENV_RECORD_SEPARATOR: &str = "ORDER_PARSER_RECORD_SEPARATOR";

/// Environment variable toggling pretty JSON output
pub const ENV_PRETTY: &str = "ORDER_PARSER_PRETTY";

/// Environment variable toggling `_meta` blocks in the output
pub const ENV_INCLUDE_META: &str = "ORDER_PARSER_INCLUDE_META";
