//! Error classification and recovery.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A wire record failed validation.
    Ingress,
    Serialization,
    Configuration,
    Io,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Drop the record and keep consuming the stream.
    SkipRecord,
    CheckConfiguration,
    CheckInput,
}
