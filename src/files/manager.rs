/*!
 * File Manager
 * Shared collaborators of every file operation
 */

use super::types::{AccessMode, Attributes, FileStat};
use crate::core::types::Pid;
use crate::error::{ExtendedError, FileResult};
use crate::paths::{
    DateTimeCodec, DeviceTable, DosFileSystem, PathResolver, ResolvedPath,
};
use crate::monitoring::span_operation;
use crate::process::ProcessContext;
use std::fmt;
use std::fs::{File, Metadata, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Source of the first counter tried by temporary name generation
pub type TempSeed = fn() -> u16;

/// Low 16 bits of the wall-clock seconds
pub fn clock_seed() -> u16 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| (elapsed.as_secs() & 0xffff) as u16)
}

/// Legacy file operations over a drive emulation, a device table and a
/// timestamp codec
///
/// The manager is shared and immutable; all per-process state lives in the
/// [`ProcessContext`] passed to each call. Every operation records its
/// failure in that context before returning it.
pub struct FileManager {
    pub(super) dosfs: Arc<dyn DosFileSystem>,
    pub(super) devices: Arc<dyn DeviceTable>,
    pub(super) clock: Arc<dyn DateTimeCodec>,
    pub(super) allow_read_only: bool,
    pub(super) handle_count: usize,
    pub(super) temp_seed: TempSeed,
}

impl FileManager {
    /// Create a context for `pid` sized to the configured handle count
    pub fn new_context(&self, pid: Pid) -> ProcessContext {
        ProcessContext::new(pid).with_handle_count(self.handle_count)
    }

    #[inline]
    pub fn dos_fs(&self) -> &dyn DosFileSystem {
        self.dosfs.as_ref()
    }

    #[inline]
    pub fn allow_read_only(&self) -> bool {
        self.allow_read_only
    }

    #[inline]
    pub(super) fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(self.dosfs.as_ref(), self.devices.as_ref())
    }

    /// Open a host path, retrying read-write as read-only when allowed
    pub(super) fn open_host(&self, path: &Path, access: AccessMode, truncate: bool) -> std::io::Result<File> {
        match access.options(truncate).open(path) {
            Ok(file) => Ok(file),
            Err(err) if access == AccessMode::ReadWrite && self.allow_read_only => {
                let file = File::open(path)?;
                warn!(
                    path = %path.display(),
                    error = %err,
                    "read-write open failed, continuing read-only"
                );
                Ok(file)
            }
            Err(err) => Err(err),
        }
    }

    /// Create `name` on the host without allocating a handle
    ///
    /// Device names cannot be created. With `exclusive` an existing target
    /// fails with FileExists; otherwise it is truncated.
    pub(super) fn create_host(&self, name: &str, mode: u32, exclusive: bool) -> FileResult<(File, ResolvedPath)> {
        let resolver = self.resolver();
        if let Some(device) = resolver.is_device(name) {
            debug!(name, device = device.name, "refusing to create a device");
            return Err(ExtendedError::DEVICE_CREATE.into());
        }

        let resolved = resolver.resolve_for_create(name)?;
        let mut options = OpenOptions::new();
        options.read(true).write(true).mode(mode);
        if exclusive {
            options.create_new(true);
        } else {
            options.create(true).truncate(true);
        }
        let file = options.open(&resolved.host_path)?;
        Ok((file, resolved))
    }

    pub(super) fn file_stat(&self, metadata: &Metadata) -> FileStat {
        let mut attributes = Attributes::ARCHIVE;
        if metadata.is_dir() {
            attributes |= Attributes::DIRECTORY;
        }
        let stamp = self
            .clock
            .to_dos(metadata.modified().unwrap_or(UNIX_EPOCH));

        FileStat {
            attributes,
            size: u32::try_from(metadata.len()).unwrap_or(u32::MAX),
            date: stamp.date,
            time: stamp.time,
        }
    }
}

/// Run `op` inside an operation span, recording its failure in `ctx`
pub(super) fn traced<T>(
    ctx: &mut ProcessContext,
    operation: &'static str,
    op: impl FnOnce(&mut ProcessContext) -> FileResult<T>,
) -> FileResult<T> {
    let span = span_operation(operation, ctx.pid());
    let _entered = span.enter();
    let result = ctx.run(op);
    span.record_result(&result);
    result
}

impl fmt::Debug for FileManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileManager")
            .field("allow_read_only", &self.allow_read_only)
            .field("handle_count", &self.handle_count)
            .finish_non_exhaustive()
    }
}
