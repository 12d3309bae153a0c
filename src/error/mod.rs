//! Error types for turnplan.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all turnplan operations.
///
/// Plan building itself never fails. Errors only arise at the edges: when a
/// wire record is validated into a [`Part`](crate::types::Part), when
/// configuration is loaded, or when the CLI reads its input.
#[derive(Error, Debug)]
pub enum TurnPlanError {
    #[error("Malformed part at position {position}: {reason}")]
    MalformedPart { position: usize, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TurnPlanError {
    /// Create a malformed-part error.
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPart {
            position,
            reason: reason.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPart { .. } => ErrorCategory::Ingress,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) => ErrorCategory::Io,
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the offending record can be skipped and processing continued.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Ingress | ErrorCategory::Serialization
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Ingress | ErrorCategory::Serialization => RecoverySuggestion::SkipRecord,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Io => RecoverySuggestion::CheckInput,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TurnPlanError>;
