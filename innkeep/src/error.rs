//! Error types for the innkeep library.
//!
//! Every operation reports failure through [`Error`]. Each variant maps to a
//! stable [`ErrorKind`] tag so callers (and the CLI's exit codes) can branch
//! on the category without matching message text.

use std::fmt;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};
use crate::room::RoomId;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(5)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input rejected before any mutation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The room is already booked for part of the requested interval.
    #[error("room {room} is already booked: {details}")]
    Overlap {
        /// The room that was requested.
        room: RoomId,
        /// Which reservation and dates collide.
        details: String,
    },

    /// The reservation's current status does not allow the requested action.
    #[error("cannot {action} reservation {reservation} while it is {from}")]
    InvalidTransition {
        /// The reservation the action was attempted on.
        reservation: ReservationId,
        /// The status the reservation was in.
        from: ReservationStatus,
        /// The attempted action, e.g. "check in".
        action: String,
    },

    /// Referencing data blocks the operation.
    #[error("conflict: {details}")]
    Conflict {
        /// What blocked the operation.
        details: String,
    },

    /// A multi-entity update failed part way and was rolled back.
    #[error("{operation} failed and was rolled back: {details}")]
    Transaction {
        /// The operation that was being executed.
        operation: String,
        /// The underlying failure.
        details: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Stable category tag for an [`Error`].
///
/// # Examples
///
/// ```
/// use innkeep::{Error, ErrorKind};
///
/// let err = Error::Conflict { details: "room 101 has bookings".into() };
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// assert_eq!(err.kind().to_string(), "conflict");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before mutation.
    Validation,
    /// Double booking.
    Overlap,
    /// Illegal status change.
    InvalidTransition,
    /// Blocked by referencing data.
    Conflict,
    /// Rolled-back multi-entity update.
    Transaction,
    /// Missing resource.
    NotFound,
    /// Store failure.
    Database,
    /// Bad configuration.
    Configuration,
    /// Filesystem failure.
    Io,
    /// Write lock not acquired in time.
    LockTimeout,
}

impl ErrorKind {
    /// Returns the tag as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Overlap => "overlap",
            Self::InvalidTransition => "invalid_transition",
            Self::Conflict => "conflict",
            Self::Transaction => "transaction",
            Self::NotFound => "not_found",
            Self::Database => "database",
            Self::Configuration => "configuration",
            Self::Io => "io",
            Self::LockTimeout => "lock_timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns the stable category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Overlap { .. } => ErrorKind::Overlap,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Transaction { .. } => ErrorKind::Transaction,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) | Self::DatabaseCorruption { .. } => ErrorKind::Database,
            Self::UnsupportedSchemaVersion { .. } | Self::Configuration(_) => {
                ErrorKind::Configuration
            }
            Self::Io(_) => ErrorKind::Io,
            Self::LockTimeout { .. } => ErrorKind::LockTimeout,
        }
    }

    /// Shorthand for building a [`Error::Validation`].
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building a [`Error::NotFound`].
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if the error is a busy/locked database.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Error;
    ///
    /// let err = Error::LockTimeout { seconds: 5 };
    /// assert!(err.is_lock_timeout());
    /// ```
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            Self::LockTimeout { .. } => true,
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

impl From<crate::money::InvalidAmountError> for Error {
    fn from(err: crate::money::InvalidAmountError) -> Self {
        Self::validation("amount", err.to_string())
    }
}

impl From<crate::dates::InvalidStayError> for Error {
    fn from(err: crate::dates::InvalidStayError) -> Self {
        Self::validation(err.field, err.message)
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
