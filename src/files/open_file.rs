/*!
 * Composed Open
 * The multi-mode legacy OpenFile call: parse, create, delete, verify,
 * existence checks and searched opens, all reporting through an OfStruct
 */

use super::manager::{traced, FileManager};
use super::ops::CREATE_MODE;
use super::types::{OfStruct, OpenFileMode, OpenFileOutcome};
use crate::core::types::drive_from_letter;
use crate::error::{ExtendedError, FileError, FileResult};
use crate::paths::DriveType;
use crate::process::ProcessContext;
use std::fs::{self, Metadata};
use std::os::unix::fs::MetadataExt;
use tracing::debug;

/// Host modification stamp kept in `OfStruct::timestamp`
fn modification_stamp(metadata: &Metadata) -> u32 {
    metadata.mtime() as u32
}

impl FileManager {
    /// Legacy `OpenFile`
    ///
    /// Mode bits are applied with this precedence: `PARSE`, `CREATE`,
    /// then a search for an existing file followed by `DELETE`, `VERIFY`
    /// (only with `REOPEN`), `EXIST` or a plain open. With `REOPEN` the name
    /// is taken from `ofs.path_name` instead of `name`.
    ///
    /// `ofs.error_code` is cleared on entry and holds the failure code on
    /// return; `ofs.path_name` holds the found path, or on failure the last
    /// path tried.
    pub fn open_file(
        &self,
        ctx: &mut ProcessContext,
        name: &str,
        ofs: &mut OfStruct,
        mode: OpenFileMode,
    ) -> FileResult<OpenFileOutcome> {
        ofs.error_code = 0;
        let result = traced(ctx, "open_file", |ctx| self.compose_open(ctx, name, ofs, mode));
        if let Err(err) = &result {
            ofs.error_code = err.code().value();
        }
        result
    }

    fn compose_open(
        &self,
        ctx: &mut ProcessContext,
        name: &str,
        ofs: &mut OfStruct,
        mode: OpenFileMode,
    ) -> FileResult<OpenFileOutcome> {
        let reopen = mode.contains(OpenFileMode::REOPEN);
        let name = if reopen { ofs.path_name.clone() } else { name.to_string() };
        debug!(pid = ctx.pid(), name = %name, mode = mode.bits(), "open_file");

        if mode.contains(OpenFileMode::PARSE) {
            let dos_name = self.resolver().true_name(&name)?;
            ofs.fixed_disk = self.is_fixed(&dos_name);
            ofs.set_path(&dos_name);
            return Ok(OpenFileOutcome::Parsed);
        }

        if mode.contains(OpenFileMode::CREATE) {
            let (file, resolved) = self.create_host(&name, CREATE_MODE, false)?;
            ofs.fixed_disk = self.is_fixed(&resolved.dos_name);
            ofs.set_path(&resolved.dos_name);
            if let Ok(metadata) = file.metadata() {
                ofs.timestamp = modification_stamp(&metadata);
            }
            return ctx.handles_mut().allocate(file).map(OpenFileOutcome::Opened);
        }

        let mut last_tried = String::new();
        let located = self.resolver().locate_for_open(
            &name,
            mode.contains(OpenFileMode::SEARCH),
            reopen,
            ctx.module_path(),
            &mut last_tried,
        );
        ofs.set_path(&last_tried);
        let resolved = located?;
        ofs.fixed_disk = self.is_fixed(&resolved.dos_name);
        ofs.set_path(&resolved.dos_name);

        if mode.contains(OpenFileMode::DELETE) {
            return match fs::remove_file(&resolved.host_path) {
                Ok(()) => Ok(OpenFileOutcome::Deleted),
                Err(err) => {
                    debug!(path = %resolved.dos_name, error = %err, "delete failed");
                    Err(ExtendedError::FILE_NOT_FOUND.into())
                }
            };
        }

        let file = self
            .open_host(&resolved.host_path, mode.access(), false)
            .map_err(|err| {
                debug!(path = %resolved.dos_name, error = %err, "open failed");
                FileError::from(ExtendedError::FILE_NOT_FOUND)
            })?;

        if let Ok(metadata) = file.metadata() {
            let stamp = modification_stamp(&metadata);
            if reopen && mode.contains(OpenFileMode::VERIFY) && stamp != ofs.timestamp {
                debug!(path = %resolved.dos_name, stamp, expected = ofs.timestamp, "file changed");
                return Err(FileError::Changed {
                    path: resolved.dos_name,
                });
            }
            ofs.timestamp = stamp;
        }

        if mode.contains(OpenFileMode::EXIST) {
            return Ok(OpenFileOutcome::Exists);
        }

        ctx.handles_mut().allocate(file).map(OpenFileOutcome::Opened)
    }

    /// Whether a canonical legacy path lives on a non-removable drive
    fn is_fixed(&self, dos_name: &str) -> bool {
        let drive = dos_name
            .chars()
            .next()
            .filter(|_| dos_name.as_bytes().get(1) == Some(&b':'))
            .and_then(drive_from_letter);
        drive.map_or(true, |drive| self.dosfs.drive_type(drive) != DriveType::Removable)
    }
}
