use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::draft::ValidationErrors;
use crate::lock::LockError;
use crate::model::{Entity, ParseEnumError};

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    RecordNotFound,
    InvalidStateTransition,
    DuplicateId,
    InvalidEnumValue,
    ValidationFailed,
    EmptySelection,
    CorruptSnapshot,
    SnapshotWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::RecordNotFound => "E2001",
            Self::InvalidStateTransition => "E2002",
            Self::DuplicateId => "E2003",
            Self::InvalidEnumValue => "E2004",
            Self::ValidationFailed => "E2005",
            Self::EmptySelection => "E2006",
            Self::CorruptSnapshot => "E3001",
            Self::SnapshotWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Console not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::RecordNotFound => "Record not found",
            Self::InvalidStateTransition => "Invalid status transition",
            Self::DuplicateId => "Record ID already exists",
            Self::InvalidEnumValue => "Invalid status/priority/type value",
            Self::ValidationFailed => "Form validation failed",
            Self::EmptySelection => "Nothing selected",
            Self::CorruptSnapshot => "Corrupt console snapshot",
            Self::SnapshotWriteFailed => "Snapshot write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `roster init` to create .roster/console.json."),
            Self::ConfigParseError => Some("Fix syntax in .roster/config.toml and retry."),
            Self::RecordNotFound => Some("Check the ID with `roster list <entity>`."),
            Self::InvalidStateTransition => {
                Some("Only the documented lifecycle moves are allowed for each entity.")
            }
            Self::DuplicateId => Some("Pick a different ID or update the existing record."),
            Self::InvalidEnumValue => Some("Use one of the documented literal values."),
            Self::ValidationFailed => Some("Fill in the required fields listed above."),
            Self::EmptySelection => Some("Pass record IDs or use --all-visible with a filter."),
            Self::CorruptSnapshot => {
                Some("Restore .roster/console.json from backup or re-run `roster init --force`.")
            }
            Self::SnapshotWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `roster` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by stores, mutation handlers and snapshot persistence.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: Entity, id: String },

    #[error("{entity} '{id}' already exists")]
    Conflict { entity: Entity, id: String },

    #[error("{entity} '{id}' cannot move from '{from}' to '{to}': {reason}")]
    InvalidTransition {
        entity: Entity,
        id: String,
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("no {entity} records selected for {action}")]
    EmptySelection {
        entity: Entity,
        action: &'static str,
    },

    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),

    #[error("console snapshot not found at {}", .path.display())]
    NotInitialized { path: PathBuf },

    #[error("failed to access snapshot {}: {source}", .path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {}: {source}", .path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl RosterError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::RecordNotFound,
            Self::Conflict { .. } => ErrorCode::DuplicateId,
            Self::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::EmptySelection { .. } => ErrorCode::EmptySelection,
            Self::InvalidValue(_) => ErrorCode::InvalidEnumValue,
            Self::NotInitialized { .. } => ErrorCode::NotInitialized,
            Self::SnapshotIo { .. } => ErrorCode::SnapshotWriteFailed,
            Self::SnapshotParse { .. } => ErrorCode::CorruptSnapshot,
            Self::Lock(err) => err.code(),
        }
    }

    pub(crate) fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
