/*!
 * Path Operations
 * Open, create, unlink, directory management and stat by legacy name
 */

use super::manager::{traced, FileManager};
use super::types::{AccessMode, FileStat};
use crate::core::types::Handle;
use crate::error::{ExtendedError, FileResult};
use crate::process::ProcessContext;
use std::fs::{self, DirBuilder};
use std::io::ErrorKind;
use std::os::unix::fs::DirBuilderExt;
use tracing::{debug, info};

/// Host mode of files created without the read-only attribute
pub const CREATE_MODE: u32 = 0o666;
/// Host mode of files created with the read-only attribute
pub const CREATE_MODE_READ_ONLY: u32 = 0o444;

impl FileManager {
    /// Open an existing file or device and allocate a handle for it
    pub fn open(&self, ctx: &mut ProcessContext, path: &str, access: AccessMode) -> FileResult<Handle> {
        traced(ctx, "open", |ctx| self.open_path(ctx, path, access, false))
    }

    pub(super) fn open_path(
        &self,
        ctx: &mut ProcessContext,
        path: &str,
        access: AccessMode,
        truncate: bool,
    ) -> FileResult<Handle> {
        debug!(pid = ctx.pid(), path, ?access, "open");
        let resolver = self.resolver();

        let file = if let Some(device) = resolver.is_device(path) {
            let host = device.host_path.ok_or_else(|| {
                info!(device = device.name, "device has no host counterpart");
                ExtendedError::FILE_NOT_FOUND
            })?;
            access.options(truncate).open(host)?
        } else {
            let resolved = resolver.resolve_existing(path)?;
            self.open_host(&resolved.host_path, access, truncate)?
        };

        ctx.handles_mut().allocate(file)
    }

    /// Create or truncate a file and allocate a handle for it
    ///
    /// `mode` is the host permission mode of a newly created file. With
    /// `exclusive` an existing file is an error instead of being truncated.
    pub fn create(&self, ctx: &mut ProcessContext, path: &str, mode: u32, exclusive: bool) -> FileResult<Handle> {
        traced(ctx, "create", |ctx| {
            debug!(pid = ctx.pid(), path, mode, exclusive, "create");
            let (file, _) = self.create_host(path, mode, exclusive)?;
            ctx.handles_mut().allocate(file)
        })
    }

    /// Remove a file
    pub fn unlink(&self, ctx: &mut ProcessContext, path: &str) -> FileResult<()> {
        traced(ctx, "unlink", |ctx| {
            debug!(pid = ctx.pid(), path, "unlink");
            let resolver = self.resolver();
            if resolver.is_device(path).is_some() {
                return Err(ExtendedError::FILE_NOT_FOUND.into());
            }
            let resolved = resolver.resolve_existing(path)?;
            fs::remove_file(&resolved.host_path)?;
            Ok(())
        })
    }

    /// Remove an empty directory
    pub fn remove_dir(&self, ctx: &mut ProcessContext, path: &str) -> FileResult<()> {
        traced(ctx, "remove_dir", |ctx| {
            debug!(pid = ctx.pid(), path, "remove_dir");
            let resolver = self.resolver();
            if resolver.is_device(path).is_some() {
                return Err(ExtendedError::FILE_NOT_FOUND.into());
            }
            let resolved = resolver.resolve_existing(path)?;
            fs::remove_dir(&resolved.host_path)?;
            Ok(())
        })
    }

    /// Create a directory; an already existing one counts as success
    pub fn make_dir(&self, ctx: &mut ProcessContext, path: &str) -> FileResult<()> {
        traced(ctx, "make_dir", |ctx| {
            debug!(pid = ctx.pid(), path, "make_dir");
            let resolver = self.resolver();
            if resolver.is_device(path).is_some() {
                return Err(ExtendedError::DEVICE_MKDIR.into());
            }
            let resolved = resolver.resolve_for_create(path)?;
            match DirBuilder::new().mode(0o777).create(&resolved.host_path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
                Err(err) => Err(err.into()),
            }
        })
    }

    /// Attributes, size and timestamp of an existing file or directory
    pub fn stat(&self, ctx: &mut ProcessContext, path: &str) -> FileResult<FileStat> {
        traced(ctx, "stat", |_| {
            let resolved = self.resolver().resolve_existing(path)?;
            let metadata = fs::metadata(&resolved.host_path)?;
            Ok(self.file_stat(&metadata))
        })
    }
}
