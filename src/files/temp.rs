/*!
 * Temporary Names
 * `<dir>\<prefix><hex4>.tmp` generation with exclusive-create claiming
 */

use super::manager::{traced, FileManager};
use super::ops::CREATE_MODE;
use super::types::{TempName, TempTarget};
use crate::core::limits::{TEMP_COUNTER_SPACE, TEMP_EXTENSION, TEMP_FORCE_DRIVE, TEMP_PREFIX_LEN};
use crate::error::{ErrorCode, FileError, FileResult};
use crate::paths::join_dos;
use crate::process::ProcessContext;
use tracing::{debug, warn};

/// Try counters from `start` upward, wrapping, until `claim` succeeds
///
/// A FileExists failure moves on to the next counter; any other failure
/// stops the search. Returns `None` once every counter has collided.
pub(crate) fn claim_unique(
    start: u16,
    mut claim: impl FnMut(u16) -> FileResult<()>,
) -> FileResult<Option<u16>> {
    for step in 0..TEMP_COUNTER_SPACE {
        let counter = start.wrapping_add(step as u16);
        match claim(counter) {
            Ok(()) => return Ok(Some(counter)),
            Err(err) if err.code() == ErrorCode::FileExists => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}

fn temp_file_name(base: &str, prefix: &str, counter: u16) -> String {
    format!("{base}{prefix}{counter:04x}.{TEMP_EXTENSION}")
}

impl FileManager {
    /// Generate a temporary file name
    ///
    /// With a non-zero `unique` (masked to 16 bits) the name is only
    /// computed. With zero, counters starting at the configured seed are
    /// claimed by exclusive creation until one succeeds; the claimed file is
    /// left behind, empty, so the name stays reserved.
    pub fn temp_name(
        &self,
        ctx: &mut ProcessContext,
        target: TempTarget,
        prefix: &str,
        unique: u32,
    ) -> FileResult<TempName> {
        traced(ctx, "temp_name", |ctx| {
            let base = match &target {
                TempTarget::TempDirectory => join_dos(&self.dosfs.temp_directory(), ""),
                TempTarget::Drive(letter) => format!("{}:", letter.to_ascii_uppercase()),
                TempTarget::Directory(dir) => join_dos(dir, ""),
            };
            let prefix: String = prefix.chars().take(TEMP_PREFIX_LEN).collect();
            debug!(pid = ctx.pid(), base = %base, prefix = %prefix, unique, "temp_name");

            let counter = if unique != 0 {
                (unique & 0xffff) as u16
            } else {
                let start = (self.temp_seed)();
                let claimed = claim_unique(start, |counter| {
                    let name = temp_file_name(&base, &prefix, counter);
                    self.create_host(&name, CREATE_MODE, true).map(drop)
                })?;
                match claimed {
                    Some(counter) => counter,
                    None => {
                        warn!(base = %base, prefix = %prefix, "every temporary name is taken");
                        return Err(FileError::TempNamesExhausted {
                            prefix,
                            directory: base,
                        });
                    }
                }
            };

            let name = temp_file_name(&base, &prefix, counter);
            let path = self.resolver().true_name(&name).unwrap_or(name);
            Ok(TempName {
                unique: if unique != 0 { unique } else { counter as u32 },
                path,
            })
        })
    }

    /// Legacy `GetTempFileName`: bit 7 of `drive` selects the current
    /// directory of the drive in the low bits, otherwise the temporary
    /// directory is used
    pub fn get_temp_file_name(
        &self,
        ctx: &mut ProcessContext,
        drive: u8,
        prefix: &str,
        unique: u32,
    ) -> FileResult<TempName> {
        let target = if drive & TEMP_FORCE_DRIVE != 0 {
            TempTarget::Drive((drive & !TEMP_FORCE_DRIVE) as char)
        } else {
            TempTarget::TempDirectory
        };
        self.temp_name(ctx, target, prefix, unique)
    }
}
