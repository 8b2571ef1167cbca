/*!
 * Legacy Entry Points
 * `_lopen`/`_lcreat` style calls with the argument conventions legacy
 * programs use: mode words, attribute words and 16/32-bit counts
 */

use super::manager::{traced, FileManager};
use super::ops::{CREATE_MODE, CREATE_MODE_READ_ONLY};
use super::types::{AccessMode, Attributes};
use crate::core::types::Handle;
use crate::error::{translate, FileError, FileResult};
use crate::process::ProcessContext;
use nix::errno::Errno;

/// Host mode for a legacy attribute word
#[inline]
fn create_mode(attributes: u16) -> u32 {
    if attributes & Attributes::READ_ONLY.bits() as u16 != 0 {
        CREATE_MODE_READ_ONLY
    } else {
        CREATE_MODE
    }
}

impl FileManager {
    /// `_lopen`: write-only opens truncate the file
    pub fn lopen(&self, ctx: &mut ProcessContext, path: &str, mode: u16) -> FileResult<Handle> {
        let access = AccessMode::from_mode_word(mode);
        traced(ctx, "lopen", |ctx| {
            self.open_path(ctx, path, access, access == AccessMode::Write)
        })
    }

    /// `_lcreat`: create or truncate
    pub fn lcreat(&self, ctx: &mut ProcessContext, path: &str, attributes: u16) -> FileResult<Handle> {
        self.create(ctx, path, create_mode(attributes), false)
    }

    /// Like `_lcreat`, but an existing file is an error
    pub fn lcreat_unique(&self, ctx: &mut ProcessContext, path: &str, attributes: u16) -> FileResult<Handle> {
        self.create(ctx, path, create_mode(attributes), true)
    }

    #[inline]
    pub fn lclose(&self, ctx: &mut ProcessContext, handle: Handle) -> FileResult<()> {
        self.close(ctx, handle)
    }

    /// `_lread`: at most 65535 bytes per call
    pub fn lread(&self, ctx: &mut ProcessContext, handle: Handle, buf: &mut [u8]) -> FileResult<u16> {
        let len = buf.len().min(u16::MAX as usize);
        self.read(ctx, handle, &mut buf[..len]).map(|n| n as u16)
    }

    /// `_lwrite`: at most 65535 bytes per call; an empty buffer truncates
    pub fn lwrite(&self, ctx: &mut ProcessContext, handle: Handle, buf: &[u8]) -> FileResult<u16> {
        let len = buf.len().min(u16::MAX as usize);
        self.write(ctx, handle, &buf[..len]).map(|n| n as u16)
    }

    /// `_hread`: 32-bit count
    pub fn hread(&self, ctx: &mut ProcessContext, handle: Handle, buf: &mut [u8]) -> FileResult<u32> {
        let len = buf.len().min(i32::MAX as usize);
        self.read(ctx, handle, &mut buf[..len]).map(|n| n as u32)
    }

    /// `_hwrite`: 32-bit count; an empty buffer truncates
    pub fn hwrite(&self, ctx: &mut ProcessContext, handle: Handle, buf: &[u8]) -> FileResult<u32> {
        let len = buf.len().min(i32::MAX as usize);
        self.write(ctx, handle, &buf[..len]).map(|n| n as u32)
    }

    /// `_llseek`: 32-bit signed offset and result
    ///
    /// A resulting position past `i32::MAX` fails with the overflow
    /// translation; the host position is left where the seek put it.
    pub fn llseek(&self, ctx: &mut ProcessContext, handle: Handle, offset: i32, origin: u16) -> FileResult<i32> {
        let position = self.seek(ctx, handle, offset as i64, origin)?;
        traced(ctx, "llseek", |_| {
            i32::try_from(position).map_err(|_| FileError::Extended(translate(Errno::EOVERFLOW)))
        })
    }

    /// `SetHandleCount`: returns the table size in effect afterwards
    ///
    /// A refused resize leaves the size unchanged and records the failure
    /// in the context instead of returning it.
    pub fn set_handle_count(&self, ctx: &mut ProcessContext, count: u16) -> u16 {
        match self.resize_handles(ctx, count as usize) {
            Ok(size) => size as u16,
            Err(_) => ctx.handle_count() as u16,
        }
    }
}
