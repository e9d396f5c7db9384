//! Error types for pinchpan-core.

use thiserror::Error;

/// Invalid recognizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A pan gesture needs at least one contact.
    #[error("required_pointers must be at least 1, got {0}")]
    ZeroRequiredPointers(usize),

    /// Primary-only mode can never see more than one contact.
    #[error("primary_only pan cannot require {0} pointers (only one contact is primary)")]
    PrimaryOnlyMultiPointer(usize),
}
