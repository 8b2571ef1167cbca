/*!
 * Mapped Drives
 * Reference drive emulation: legacy drive letters backed by host directories
 */

use super::traits::{DosFileSystem, DriveType};
use crate::config::Config;
use crate::core::types::{drive_from_letter, drive_letter, DriveNum};
use crate::error::{ExtendedError, FileError, FileResult};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DRIVE_COUNT: usize = 26;

/// One mapped drive
#[derive(Debug, Clone)]
struct Drive {
    root: PathBuf,
    kind: DriveType,
    /// Upper-case components of the current directory
    cwd: Vec<String>,
}

#[derive(Debug)]
struct DriveState {
    drives: Vec<Option<Drive>>,
    current: DriveNum,
}

/// Parsed legacy path: drive plus normalized upper-case components
#[derive(Debug, Clone, PartialEq, Eq)]
struct DosPath {
    drive: DriveNum,
    components: Vec<String>,
}

/// Drive letters mapped onto host directories
///
/// Canonical names are upper case; host lookups match each component
/// case-insensitively, and new final components are created lower case.
#[derive(Debug)]
pub struct MappedDrives {
    state: RwLock<DriveState>,
    windows_dir: String,
    system_dir: String,
    temp_dir: String,
    path: Vec<String>,
}

impl MappedDrives {
    /// Create an emulation with no drives and default directories
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DriveState {
                drives: vec![None; DRIVE_COUNT],
                current: 2,
            }),
            windows_dir: "C:\\WINDOWS".to_string(),
            system_dir: "C:\\WINDOWS\\SYSTEM".to_string(),
            temp_dir: "C:\\TEMP".to_string(),
            path: Vec::new(),
        }
    }

    /// Build the drive map described by `config`
    pub fn from_config(config: &Config) -> Self {
        let mut drives = Self::new()
            .with_windows_directory(&config.windows_directory)
            .with_system_directory(&config.system_directory)
            .with_temp_directory(&config.temp_directory)
            .with_search_path(config.path.iter().cloned());
        for drive in &config.drives {
            drives = drives.with_drive(drive.letter, &drive.root, drive.kind);
        }
        if let Some(num) = drive_from_letter(config.current_drive) {
            drives.state.get_mut().current = num;
        }
        drives
    }

    /// Map `letter` onto the host directory `root`
    pub fn with_drive(self, letter: char, root: impl Into<PathBuf>, kind: DriveType) -> Self {
        if let Some(num) = drive_from_letter(letter) {
            self.state.write().drives[num as usize] = Some(Drive {
                root: root.into(),
                kind,
                cwd: Vec::new(),
            });
        }
        self
    }

    pub fn with_windows_directory(mut self, dir: &str) -> Self {
        self.windows_dir = dir.to_string();
        self
    }

    pub fn with_system_directory(mut self, dir: &str) -> Self {
        self.system_dir = dir.to_string();
        self
    }

    pub fn with_temp_directory(mut self, dir: &str) -> Self {
        self.temp_dir = dir.to_string();
        self
    }

    pub fn with_search_path(mut self, dirs: impl IntoIterator<Item = String>) -> Self {
        self.path = dirs.into_iter().collect();
        self
    }

    /// Select the current drive
    pub fn set_current_drive(&self, letter: char) -> FileResult<()> {
        let num = drive_from_letter(letter).ok_or(FileError::Extended(ExtendedError::INVALID_DRIVE))?;
        let mut state = self.state.write();
        if state.drives[num as usize].is_none() {
            return Err(ExtendedError::INVALID_DRIVE.into());
        }
        state.current = num;
        Ok(())
    }

    /// Change the current directory of the drive named in `dir`
    ///
    /// The directory must exist on the host.
    pub fn set_current_dir(&self, dir: &str) -> FileResult<()> {
        let parsed = self.parse(dir)?;
        let host = self.host_path(&parsed, true)?;
        if !host.is_dir() {
            return Err(ExtendedError::PATH_NOT_FOUND.into());
        }

        let mut state = self.state.write();
        if let Some(drive) = state.drives[parsed.drive as usize].as_mut() {
            drive.cwd = parsed.components;
        }
        Ok(())
    }

    /// Current directory in legacy form
    pub fn current_dir(&self) -> String {
        let state = self.state.read();
        let cwd = state.drives[state.current as usize]
            .as_ref()
            .map(|drive| drive.cwd.clone())
            .unwrap_or_default();
        format_dos(&DosPath {
            drive: state.current,
            components: cwd,
        })
    }

    fn parse(&self, name: &str) -> FileResult<DosPath> {
        let state = self.state.read();
        let (drive, rest) = match name.as_bytes() {
            [letter, b':', ..] => {
                let num = drive_from_letter(*letter as char)
                    .ok_or(FileError::Extended(ExtendedError::INVALID_DRIVE))?;
                (num, &name[2..])
            }
            _ => (state.current, name),
        };

        let mapped = state.drives[drive as usize]
            .as_ref()
            .ok_or(FileError::Extended(ExtendedError::INVALID_DRIVE))?;

        let mut components = if rest.starts_with(['\\', '/']) {
            Vec::new()
        } else {
            mapped.cwd.clone()
        };
        for part in rest.split(['\\', '/']) {
            match part {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                _ => components.push(part.to_ascii_uppercase()),
            }
        }

        Ok(DosPath { drive, components })
    }

    fn host_path(&self, path: &DosPath, must_exist: bool) -> FileResult<PathBuf> {
        let root = {
            let state = self.state.read();
            state.drives[path.drive as usize]
                .as_ref()
                .map(|drive| drive.root.clone())
                .ok_or(FileError::Extended(ExtendedError::INVALID_DRIVE))?
        };

        let mut host = root;
        let last = path.components.len().saturating_sub(1);
        for (index, component) in path.components.iter().enumerate() {
            match find_entry(&host, component) {
                Some(entry) => host.push(entry),
                None if index < last => return Err(ExtendedError::PATH_NOT_FOUND.into()),
                None if must_exist => return Err(ExtendedError::FILE_NOT_FOUND.into()),
                None => host.push(component.to_ascii_lowercase()),
            }
        }

        debug!(drive = %drive_letter(path.drive), host = %host.display(), "mapped legacy path");
        Ok(host)
    }
}

impl Default for MappedDrives {
    fn default() -> Self {
        Self::new()
    }
}

/// Match `component` against the entries of `dir`, ignoring case
fn find_entry(dir: &Path, component: &str) -> Option<String> {
    if fs::symlink_metadata(dir.join(component)).is_ok() {
        return Some(component.to_string());
    }
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .find(|entry| entry.eq_ignore_ascii_case(component))
}

fn format_dos(path: &DosPath) -> String {
    format!(
        "{}:\\{}",
        drive_letter(path.drive),
        path.components.join("\\")
    )
}

impl DosFileSystem for MappedDrives {
    fn unix_name(&self, name: &str, must_exist: bool) -> FileResult<PathBuf> {
        let parsed = self.parse(name)?;
        self.host_path(&parsed, must_exist)
    }

    fn true_name(&self, name: &str, must_exist: bool) -> FileResult<String> {
        let parsed = self.parse(name)?;
        if must_exist {
            self.host_path(&parsed, true)?;
        }
        Ok(format_dos(&parsed))
    }

    fn windows_directory(&self) -> String {
        self.windows_dir.clone()
    }

    fn system_directory(&self) -> String {
        self.system_dir.clone()
    }

    fn temp_directory(&self) -> String {
        self.temp_dir.clone()
    }

    fn search_path(&self, index: usize) -> Option<String> {
        self.path.get(index).cloned()
    }

    fn drive_type(&self, drive: DriveNum) -> DriveType {
        self.state
            .read()
            .drives
            .get(drive as usize)
            .and_then(|slot| slot.as_ref())
            .map_or(DriveType::NoRoot, |drive| drive.kind)
    }
}
