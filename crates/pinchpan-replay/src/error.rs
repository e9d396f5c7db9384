//! Error types for trace loading and replay.

use pinchpan_core::ConfigError;
use thiserror::Error;

/// Error type for traces.
#[derive(Debug, Error)]
pub enum TraceError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Trace file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Recognizer configuration rejected
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    /// Timestamps went backwards
    #[error("event {index}: timestamp {t} is earlier than {previous}")]
    OutOfOrder {
        /// Position in the event list
        index: usize,
        /// Offending timestamp
        t: u64,
        /// Latest timestamp before it
        previous: u64,
    },

    /// Press or move without a timestamp
    #[error("event {index}: {action} requires a timestamp")]
    MissingTimestamp {
        /// Position in the event list
        index: usize,
        /// Action name
        action: &'static str,
    },

    /// Move, release or capture loss of a pointer that was never pressed
    #[error("event {index}: pointer {pointer} was never pressed")]
    UnknownPointer {
        /// Position in the event list
        index: usize,
        /// Pointer id
        pointer: u32,
    },

    /// NaN or infinite coordinate
    #[error("event {index}: position must be finite")]
    NonFinite {
        /// Position in the event list
        index: usize,
    },
}
