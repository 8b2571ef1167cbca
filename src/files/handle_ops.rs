/*!
 * Handle Operations
 * Read, write, seek, duplicate, stat and close through legacy handles
 */

use super::manager::{traced, FileManager};
use super::types::FileStat;
use crate::core::limits::{RESERVED_HOST_DESCRIPTORS, SENTINEL};
use crate::core::types::Handle;
use crate::error::{translate, ExtendedError, FileError, FileResult};
use crate::handles::HostDescriptor;
use crate::process::ProcessContext;
use nix::errno::Errno;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use tracing::{debug, error, warn};

/// Seek origins understood by `seek`; anything else seeks from the start
pub const SEEK_CURRENT: u16 = 1;
pub const SEEK_END: u16 = 2;

impl FileManager {
    /// Read up to `buf.len()` bytes; 0 at end of file or for an empty buffer
    pub fn read(&self, ctx: &mut ProcessContext, handle: Handle, buf: &mut [u8]) -> FileResult<usize> {
        traced(ctx, "read", |ctx| {
            let mut file: &File = ctx.handles().lookup(handle)?;
            if buf.is_empty() {
                return Ok(0);
            }
            Ok(file.read(buf)?)
        })
    }

    /// Write `buf` at the current position
    ///
    /// An empty buffer truncates the file at the current position and
    /// returns 0.
    pub fn write(&self, ctx: &mut ProcessContext, handle: Handle, buf: &[u8]) -> FileResult<usize> {
        traced(ctx, "write", |ctx| {
            let mut file: &File = ctx.handles().lookup(handle)?;
            if buf.is_empty() {
                let position = file.stream_position()?;
                debug!(pid = ctx.pid(), handle, position, "truncating at current position");
                file.set_len(position)?;
                return Ok(0);
            }
            Ok(file.write(buf)?)
        })
    }

    /// Move the position of `handle`
    ///
    /// `origin` 1 is relative to the current position, 2 to the end and any
    /// other value to the start. Returns the new absolute position.
    pub fn seek(&self, ctx: &mut ProcessContext, handle: Handle, offset: i64, origin: u16) -> FileResult<u64> {
        traced(ctx, "seek", |ctx| {
            let mut file: &File = ctx.handles().lookup(handle)?;
            let target = match origin {
                SEEK_CURRENT => SeekFrom::Current(offset),
                SEEK_END => SeekFrom::End(offset),
                _ => match u64::try_from(offset) {
                    Ok(position) => SeekFrom::Start(position),
                    Err(_) => return Err(FileError::Extended(translate(Errno::EINVAL))),
                },
            };
            Ok(file.seek(target)?)
        })
    }

    /// Attributes, size and timestamp of an open file
    pub fn fstat(&self, ctx: &mut ProcessContext, handle: Handle) -> FileResult<FileStat> {
        traced(ctx, "fstat", |ctx| {
            let metadata = ctx.handles().lookup(handle)?.metadata()?;
            Ok(self.file_stat(&metadata))
        })
    }

    /// Duplicate `handle` into the lowest free slot
    pub fn dup(&self, ctx: &mut ProcessContext, handle: Handle) -> FileResult<Handle> {
        traced(ctx, "dup", |ctx| {
            let copy = ctx.handles().lookup(handle)?.try_clone()?;
            ctx.handles_mut().allocate(copy)
        })
    }

    /// Make `target` refer to the same open file as `handle`
    ///
    /// A file already open under `target` is closed. Returns `target`.
    pub fn dup2(&self, ctx: &mut ProcessContext, handle: Handle, target: Handle) -> FileResult<Handle> {
        traced(ctx, "dup2", |ctx| {
            let source = ctx.handles().lookup(handle)?;
            if target as usize >= ctx.handle_count() {
                return Err(ExtendedError::INVALID_HANDLE.into());
            }

            let copy = source.try_clone()?;
            if copy.host_fd() >= SENTINEL {
                warn!(pid = ctx.pid(), host_fd = copy.host_fd(), "duplicate does not fit a handle slot");
                return Err(ExtendedError::TOO_MANY_OPEN_FILES.into());
            }

            if let Some(previous) = ctx.handles_mut().install(target, copy)? {
                debug!(pid = ctx.pid(), target, host_fd = previous.host_fd(), "closing replaced descriptor");
            }
            Ok(target)
        })
    }

    /// Close `handle`
    ///
    /// A handle bound to one of the host's standard descriptors is never
    /// closed; trying is an invariant violation.
    pub fn close(&self, ctx: &mut ProcessContext, handle: Handle) -> FileResult<()> {
        traced(ctx, "close", |ctx| {
            let host_fd = ctx.handles().lookup(handle)?.host_fd();
            if host_fd < RESERVED_HOST_DESCRIPTORS {
                error!(pid = ctx.pid(), handle, host_fd, "refusing to close a standard host descriptor");
                return Err(FileError::invariant(format!(
                    "handle {handle} maps to reserved host descriptor {host_fd}"
                )));
            }
            drop(ctx.handles_mut().free(handle)?);
            Ok(())
        })
    }

    /// Resize the handle table of `ctx`; returns the new size
    pub fn resize_handles(&self, ctx: &mut ProcessContext, count: usize) -> FileResult<usize> {
        traced(ctx, "resize_handles", |ctx| ctx.handles_mut().resize(count))
    }
}
