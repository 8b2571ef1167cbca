/*!
 * Process Context
 * Exclusive owner of one handle table and one error slot
 */

use crate::core::types::{Handle, Pid};
use crate::error::{ErrorState, ExtendedError, FileResult};
use crate::handles::HandleTable;
use std::fs::File;

/// File state of one emulated process
///
/// Created by the lifecycle owner and passed explicitly to every file
/// operation. Exclusive `&mut` access is what serializes operations per
/// process; the context does no locking of its own.
#[derive(Debug)]
pub struct ProcessContext {
    pid: Pid,
    handles: HandleTable<File>,
    errors: ErrorState,
    module_path: Option<String>,
}

impl ProcessContext {
    /// Create a context with the minimum handle table
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            handles: HandleTable::new(),
            errors: ErrorState::new(),
            module_path: None,
        }
    }

    /// Start with `count` handle slots (clamped into the supported range)
    pub fn with_handle_count(mut self, count: usize) -> Self {
        self.handles = HandleTable::with_capacity(count);
        self
    }

    /// Legacy path of the program this process runs, e.g. `C:\APPS\EDIT.EXE`
    ///
    /// Its directory takes part in the OpenFile search order.
    pub fn with_module_path(mut self, path: impl Into<String>) -> Self {
        self.module_path = Some(path.into());
        self
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    /// Most recent failure of any operation on this context
    #[inline]
    pub fn last_error(&self) -> Option<ExtendedError> {
        self.errors.last()
    }

    /// Current handle table size
    #[inline]
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Number of handles currently open
    #[inline]
    pub fn open_handles(&self) -> usize {
        self.handles.open_count()
    }

    #[inline]
    pub fn is_open(&self, handle: Handle) -> bool {
        self.handles.is_open(handle)
    }

    #[inline]
    pub(crate) fn handles(&self) -> &HandleTable<File> {
        &self.handles
    }

    #[inline]
    pub(crate) fn handles_mut(&mut self) -> &mut HandleTable<File> {
        &mut self.handles
    }

    /// Record the failure of `result` in the error slot
    #[inline]
    pub(crate) fn record<T>(&mut self, result: FileResult<T>) -> FileResult<T> {
        self.errors.record(result)
    }

    /// Run `op` against this context and record its failure, if any
    #[inline]
    pub(crate) fn run<T>(&mut self, op: impl FnOnce(&mut Self) -> FileResult<T>) -> FileResult<T> {
        let result = op(self);
        self.record(result)
    }
}
