/*!
 * Error State
 * Most recent failure of a process context
 */

use super::codes::ExtendedError;
use super::FileResult;

/// Single-slot record of the last failure
///
/// Not a stack: only the most recent failure is visible. Successful
/// operations leave it untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorState {
    last: Option<ExtendedError>,
}

impl ErrorState {
    pub const fn new() -> Self {
        Self { last: None }
    }

    #[inline]
    pub fn set(&mut self, err: ExtendedError) {
        self.last = Some(err);
    }

    #[inline]
    pub fn last(&self) -> Option<ExtendedError> {
        self.last
    }

    /// Record the failure of `result`, if any, and hand the result back
    #[inline]
    pub fn record<T>(&mut self, result: FileResult<T>) -> FileResult<T> {
        if let Err(ref err) = result {
            self.set(err.extended());
        }
        result
    }
}
