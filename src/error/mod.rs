/*!
 * Error Types
 * Legacy extended-error model, host error translation and the per-process
 * error slot
 */

mod codes;
mod state;
mod translate;

pub use codes::{ErrorAction, ErrorClass, ErrorCode, ErrorLocus, ExtendedError};
pub use state::ErrorState;
pub use translate::{classify, from_io, translate, unmapped_conditions};

use miette::Diagnostic;
use thiserror::Error;

/// File layer operation result
///
/// # Must Use
/// Failures carry the extended error the legacy client will query
pub type FileResult<T> = Result<T, FileError>;

/// Errors returned by file layer operations
///
/// Every variant maps onto exactly one extended error tuple, which is what
/// gets recorded in the process context. `InvariantViolation` marks caller
/// bugs and is reported as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum FileError {
    #[error("{0}")]
    #[diagnostic(code(files::extended_error))]
    Extended(ExtendedError),

    #[error("File changed since last reference: {path}")]
    #[diagnostic(
        code(files::file_changed),
        help("The file was modified after its timestamp was captured. Reopen without verification.")
    )]
    Changed { path: String },

    #[error("Temporary names exhausted for prefix '{prefix}' in {directory}")]
    #[diagnostic(
        code(files::temp_names_exhausted),
        help("Every counter value collided with an existing file. Remove stale temporary files.")
    )]
    TempNamesExhausted { prefix: String, directory: String },

    #[error("Invariant violation: {0}")]
    #[diagnostic(
        code(files::invariant_violation),
        help("A legacy handle was misused. This is a bug in the caller, not an environmental failure.")
    )]
    InvariantViolation(String),
}

impl FileError {
    /// Create an invariant violation
    #[inline]
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Extended error tuple recorded for this failure
    pub fn extended(&self) -> ExtendedError {
        match self {
            Self::Extended(err) => *err,
            Self::Changed { .. } => ExtendedError::FILE_CHANGED,
            Self::TempNamesExhausted { .. } => ExtendedError::TEMP_EXHAUSTED,
            Self::InvariantViolation(_) => ExtendedError::INVALID_HANDLE,
        }
    }

    /// Extended error code of this failure
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.extended().code
    }

    /// Whether the failure signals a caller bug rather than an environmental failure
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

impl From<ExtendedError> for FileError {
    #[inline]
    fn from(err: ExtendedError) -> Self {
        Self::Extended(err)
    }
}

impl From<std::io::Error> for FileError {
    fn from(err: std::io::Error) -> Self {
        Self::Extended(from_io(&err))
    }
}

impl From<nix::errno::Errno> for FileError {
    fn from(errno: nix::errno::Errno) -> Self {
        Self::Extended(translate(errno))
    }
}
