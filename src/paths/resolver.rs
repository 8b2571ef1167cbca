/*!
 * Path Resolver
 * Legacy path lookup, device detection and the search order used by OpenFile
 */

use super::traits::{Device, DeviceTable, DosFileSystem};
use crate::core::limits::OFS_MAX_PATH;
use crate::error::{ExtendedError, FileResult};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Result of a path lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Canonical legacy path, e.g. `C:\WINDOWS\WIN.INI`
    pub dos_name: String,
    /// Host path used for the actual I/O call
    pub host_path: PathBuf,
}

/// Whether a legacy name carries a drive or directory component
#[inline]
pub fn has_path_component(name: &str) -> bool {
    name.as_bytes().get(1) == Some(&b':') || name.contains(['\\', '/'])
}

/// Strip drive and directories from a legacy name
pub fn bare_name(name: &str) -> &str {
    let name = if name.as_bytes().get(1) == Some(&b':') {
        &name[2..]
    } else {
        name
    };
    let name = name.rsplit('\\').next().unwrap_or(name);
    name.rsplit('/').next().unwrap_or(name)
}

/// Append a file name to a legacy directory
pub fn join_dos(dir: &str, name: &str) -> String {
    if dir.ends_with(['\\', '/']) {
        format!("{dir}{name}")
    } else {
        format!("{dir}\\{name}")
    }
}

/// Borrowed view over the path collaborators
///
/// Cheap to construct per call; holds no state of its own.
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    dosfs: &'a dyn DosFileSystem,
    devices: &'a dyn DeviceTable,
}

impl<'a> PathResolver<'a> {
    pub fn new(dosfs: &'a dyn DosFileSystem, devices: &'a dyn DeviceTable) -> Self {
        Self { dosfs, devices }
    }

    /// Recognize a reserved device name
    #[inline]
    pub fn is_device(&self, name: &str) -> Option<Device> {
        self.devices.lookup(name)
    }

    /// Translate `name` only if its target currently exists
    pub fn resolve_existing(&self, name: &str) -> FileResult<ResolvedPath> {
        self.resolve(name, true)
    }

    /// Translate `name` without requiring the target to exist
    pub fn resolve_for_create(&self, name: &str) -> FileResult<ResolvedPath> {
        self.resolve(name, false)
    }

    /// Canonical legacy form of `name`
    #[inline]
    pub fn true_name(&self, name: &str) -> FileResult<String> {
        self.dosfs.true_name(name, false)
    }

    fn resolve(&self, name: &str, must_exist: bool) -> FileResult<ResolvedPath> {
        let host_path = self.dosfs.unix_name(name, must_exist)?;
        let dos_name = self
            .dosfs
            .true_name(name, false)
            .unwrap_or_else(|_| name.to_string());
        trace!(name, dos_name = %dos_name, host = %host_path.display(), "resolved");
        Ok(ResolvedPath {
            dos_name,
            host_path,
        })
    }

    /// Legacy names tried by `locate_for_open`, in search order
    ///
    /// The first entry is always `name` itself. Directory candidates follow
    /// only when a search applies: with `search_enabled` (and not reopening)
    /// the name is first stripped to its bare file name; otherwise only a
    /// name without drive or directory is searched for.
    pub fn candidates(
        &self,
        name: &str,
        search_enabled: bool,
        reopen: bool,
        module_path: Option<&str>,
    ) -> Vec<String> {
        let mut candidates = vec![name.to_string()];

        let bare = if search_enabled && !reopen {
            bare_name(name)
        } else if has_path_component(name) {
            return candidates;
        } else {
            name
        };
        if bare.is_empty() || bare.len() >= OFS_MAX_PATH {
            return candidates;
        }

        candidates.push(join_dos(&self.dosfs.windows_directory(), bare));
        candidates.push(join_dos(&self.dosfs.system_directory(), bare));
        if let Some(module) = module_path {
            if let Some(split) = module.rfind('\\') {
                candidates.push(format!("{}{}", &module[..=split], bare));
            }
        }
        candidates.extend(
            (0..)
                .map_while(|index| self.dosfs.search_path(index))
                .map(|dir| join_dos(&dir, bare)),
        );
        candidates
    }

    /// Find the file a legacy `OpenFile` call refers to
    ///
    /// Candidates are tried strictly in the order of [`Self::candidates`];
    /// the first one that exists wins. `last_tried` receives each candidate
    /// as it is attempted, so on failure it holds the last one.
    pub fn locate_for_open(
        &self,
        name: &str,
        search_enabled: bool,
        reopen: bool,
        module_path: Option<&str>,
        last_tried: &mut String,
    ) -> FileResult<ResolvedPath> {
        for candidate in self.candidates(name, search_enabled, reopen, module_path) {
            match self.resolve_existing(&candidate) {
                Ok(resolved) => {
                    debug!(name, found = %resolved.dos_name, "located file");
                    *last_tried = candidate;
                    return Ok(resolved);
                }
                Err(err) => {
                    trace!(candidate = %candidate, error = %err, "candidate not found");
                    *last_tried = candidate;
                }
            }
        }

        debug!(name, "file not found in search order");
        Err(ExtendedError::FILE_NOT_FOUND.into())
    }
}
