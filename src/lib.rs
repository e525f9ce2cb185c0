//! Order Parser Library
//!
//! A Rust library for turning fixed-format order report text into structured,
//! JSON-serializable records, driven entirely by a declarative field dictionary.
//!
//! This library provides tools for:
//! - Loading and validating field dictionaries (JSON or YAML)
//! - Splitting report lines into known headers and free text
//! - Accumulating multi-line field values across record separators
//! - Rebuilding embedded tables and location/contact blocks
//! - Classifying records by type and nesting child records under their owners
//! - Collecting non-fatal warnings alongside the parsed output

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod field_dictionary;
        pub mod order_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Contact, DictionaryDefinition, FieldValue, Meta, StructuredRecord};
pub use app::services::field_dictionary::FieldDictionary;
pub use app::services::order_parser::{OrderParser, ParseResult, ParseStats};
pub use config::Config;

/// Result type alias for the order parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dictionary loading and report parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Dictionary file could not be decoded
    #[error("Dictionary format error in '{source_name}': {message}")]
    DictionaryFormat {
        source_name: String,
        message: String,
    },

    /// Processor kind named in the dictionary does not exist
    #[error("Unknown processor '{kind}' declared for header '{header}'")]
    UnknownProcessor { kind: String, header: String },

    /// Processor declared without one of its required options
    #[error("Processor '{processor}' for header '{header}' is missing required option '{option}'")]
    MissingOption {
        processor: String,
        header: String,
        option: String,
    },

    /// Processor option present but unusable
    #[error("Processor '{processor}' for header '{header}' has invalid option '{option}': {message}")]
    InvalidOption {
        processor: String,
        header: String,
        option: String,
        message: String,
    },

    /// Record separator pattern did not compile
    #[error("Invalid record separator pattern '{pattern}'")]
    InvalidSeparator {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No captured header identifies a single object type
    #[error("Uncategorizable record ending at line {line}: no single type claims any of {headers:?}")]
    UncategorizableRecord { line: usize, headers: Vec<String> },

    /// Captured headers point at more than one object type
    #[error(
        "Ambiguous record ending at line {line}: header '{header}' identifies '{conflicting_type}' but record was already classified as '{resolved_type}'"
    )]
    AmbiguousRecord {
        line: usize,
        header: String,
        resolved_type: String,
        conflicting_type: String,
    },

    /// Table row lines are not a whole multiple of the column count
    #[error(
        "Malformed table under '{header}': {line_count} lines is not a multiple of {num_columns} columns"
    )]
    MalformedTable {
        header: String,
        line_count: usize,
        num_columns: usize,
    },

    /// Header is not declared for the type a record was classified as
    #[error("Type '{type_name}' declares no field for header '{header}'")]
    FieldLookup { type_name: String, header: String },

    /// Type name not present in the dictionary
    #[error("Unknown object type: {type_name}")]
    UnknownType { type_name: String },

    /// Ownership array collides with an existing non-array field on the owner
    #[error("Cannot nest children under '{field}': owner already holds a non-record value there")]
    NestingConflict { field: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a dictionary format error
    pub fn dictionary_format(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DictionaryFormat {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an unknown processor error
    pub fn unknown_processor(kind: impl Into<String>, header: impl Into<String>) -> Self {
        Self::UnknownProcessor {
            kind: kind.into(),
            header: header.into(),
        }
    }

    /// Create a missing processor option error
    pub fn missing_option(
        processor: impl Into<String>,
        header: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        Self::MissingOption {
            processor: processor.into(),
            header: header.into(),
            option: option.into(),
        }
    }

    /// Create an invalid processor option error
    pub fn invalid_option(
        processor: impl Into<String>,
        header: impl Into<String>,
        option: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            processor: processor.into(),
            header: header.into(),
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record separator error
    pub fn invalid_separator(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidSeparator {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a malformed table error
    pub fn malformed_table(header: impl Into<String>, line_count: usize, num_columns: usize) -> Self {
        Self::MalformedTable {
            header: header.into(),
            line_count,
            num_columns,
        }
    }

    /// Create a field lookup error
    pub fn field_lookup(type_name: impl Into<String>, header: impl Into<String>) -> Self {
        Self::FieldLookup {
            type_name: type_name.into(),
            header: header.into(),
        }
    }

    /// Create an unknown type error
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Whether the error was raised while loading a dictionary or configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::DictionaryFormat { .. }
                | Self::UnknownProcessor { .. }
                | Self::MissingOption { .. }
                | Self::InvalidOption { .. }
                | Self::InvalidSeparator { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
            source: error,
        }
    }
}
