/*!
 * Error types for the pivot-translate library.
 *
 * Most of these never reach a caller: the translation run is best-effort, so
 * unreadable definition sources, bad pattern rules and rejected writes are
 * logged and skipped where they occur. They still get real types so each
 * recovery point is explicit.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a definition source
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The source could not be read from disk
    #[error("Failed to read definition source {path:?}: {source}")]
    Io {
        /// Path of the source
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid UTF-8
    #[error("Definition source {0:?} is not valid UTF-8")]
    Decode(PathBuf),

    /// An entry appeared before the first section header
    #[error("Entry before any section header at line {line}")]
    MissingSectionHeader {
        /// 1-based line number
        line: usize,
    },

    /// A line that is neither a header, an entry nor a continuation
    #[error("Malformed line {line}: {content}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },
}

/// Errors raised while compiling a single pattern rule
#[derive(Error, Debug)]
pub enum PatternError {
    /// The pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as written in the section
        pattern: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// The replacement template cannot be converted
    #[error("Invalid replacement template '{template}': {reason}")]
    InvalidTemplate {
        /// Template text as written in the section
        template: String,
        /// What is wrong with it
        reason: String,
    },
}

/// The host refused a new value for one text leaf
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Write rejected: {0}")]
pub struct WriteRejected(pub String);

impl WriteRejected {
    /// Create a rejection with the given reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Errors reported by the host environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The client session could not be started
    #[error("Could not start client session: {0}")]
    SessionUnavailable(String),

    /// A structural index no longer points at anything
    #[error("Index {index} out of range (size {size})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current size of the collection
        size: usize,
    },

    /// The host could not provide the requested value
    #[error("Host read failed: {0}")]
    ReadFailed(String),
}

/// Failures of the command-line translate workflow
#[derive(Error, Debug)]
pub enum AppError {
    /// A document could not be loaded or written
    #[error("File error: {0}")]
    File(String),

    /// The configuration file could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the host environment
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}
