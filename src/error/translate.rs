/*!
 * Error Translator
 * Total mapping from host error conditions to extended error tuples
 */

use super::codes::{ErrorAction, ErrorClass, ErrorCode, ErrorLocus, ExtendedError};
use nix::errno::Errno;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

static UNMAPPED_CONDITIONS: AtomicU64 = AtomicU64::new(0);

/// Look up a host condition in the translation table
///
/// Returns `None` for conditions without a dedicated legacy meaning.
pub fn classify(errno: Errno) -> Option<ExtendedError> {
    use ErrorAction::*;
    use ErrorClass as C;
    use ErrorCode as E;
    use ErrorLocus as L;

    let tuple = match errno {
        Errno::EAGAIN => (E::ShareViolation, C::Temporary, Retry, L::Disk),
        Errno::EBADF => (E::InvalidHandle, C::ProgramError, Abort, L::Disk),
        Errno::ENOSPC => (E::DiskFull, C::MediaError, Abort, L::Disk),
        Errno::EACCES | Errno::EPERM | Errno::EROFS => {
            (E::WriteProtected, C::AccessDenied, Abort, L::Disk)
        }
        Errno::EBUSY => (E::LockViolation, C::AccessDenied, Abort, L::Disk),
        Errno::ENOENT => (E::FileNotFound, C::NotFound, Abort, L::Disk),
        Errno::EISDIR => (E::CanNotMakeDir, C::AccessDenied, Abort, L::Unknown),
        Errno::ENFILE | Errno::EMFILE => (E::NoMoreFiles, C::MediaError, Abort, L::Unknown),
        Errno::EEXIST => (E::FileExists, C::Exists, Abort, L::Disk),
        _ => return None,
    };

    Some(ExtendedError::new(tuple.0, tuple.1, tuple.2, tuple.3))
}

/// Translate a host condition into its extended error tuple
///
/// Never fails: unmapped conditions become a general failure and leave a
/// diagnostic record carrying the host condition.
pub fn translate(errno: Errno) -> ExtendedError {
    classify(errno).unwrap_or_else(|| {
        UNMAPPED_CONDITIONS.fetch_add(1, Ordering::Relaxed);
        error!(
            errno = errno as i32,
            condition = %errno,
            "unknown host error condition, reporting general failure"
        );
        ExtendedError::GENERAL_FAILURE
    })
}

/// Translate a std I/O error through its raw OS error number
pub fn from_io(err: &io::Error) -> ExtendedError {
    match err.raw_os_error() {
        Some(raw) => translate(Errno::from_raw(raw)),
        None => {
            UNMAPPED_CONDITIONS.fetch_add(1, Ordering::Relaxed);
            error!(kind = ?err.kind(), error = %err, "host error without an OS error number");
            ExtendedError::GENERAL_FAILURE
        }
    }
}

/// Number of unmapped host conditions reported since start-up
pub fn unmapped_conditions() -> u64 {
    UNMAPPED_CONDITIONS.load(Ordering::Relaxed)
}
