//! Engine errors
//!
//! Cancellation is a value, not an exception: dismissing any prompt surfaces
//! as [`ReconcileError::Cancelled`] and propagates out of the whole pass
//! with `?`. Mutations already applied to the destination map stay in place;
//! callers decide whether anything gets persisted.

use thiserror::Error;

/// Errors that abort a reconciliation or verification pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The user dismissed a prompt or picker.
    #[error("operation cancelled by user")]
    Cancelled,

    /// Remote and local worker runtimes are both known and differ. There is
    /// no override for this one.
    #[error("the remote runtime \"{remote}\" for app \"{app}\" does not match your local runtime \"{local}\"")]
    RuntimeMismatch {
        app: String,
        remote: String,
        local: String,
    },
}

/// Result type for engine operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
