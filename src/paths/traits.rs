/*!
 * Path Collaborators
 * Interfaces the file layer consumes for drive emulation, device names and
 * legacy timestamps
 */

use crate::core::types::DriveNum;
use crate::error::FileResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// Kind of media behind a drive letter
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriveType {
    /// Drive letter not mapped
    NoRoot = 1,
    Removable = 2,
    #[default]
    Fixed = 3,
    Remote = 4,
    CdRom = 5,
    RamDisk = 6,
}

/// Directory and drive emulation
///
/// Translates legacy path syntax into host paths and answers the questions
/// the search order needs. Implementations own the notion of a current drive
/// and current directory.
pub trait DosFileSystem: Send + Sync {
    /// Host path for `name`
    ///
    /// With `must_exist`, fails unless the target currently exists.
    fn unix_name(&self, name: &str, must_exist: bool) -> FileResult<PathBuf>;

    /// Canonical legacy form of `name` (`X:\DIR\FILE.EXT`)
    fn true_name(&self, name: &str, must_exist: bool) -> FileResult<String>;

    /// Install directory in legacy form
    fn windows_directory(&self) -> String;

    /// System directory in legacy form
    fn system_directory(&self) -> String;

    /// Directory for temporary files in legacy form
    fn temp_directory(&self) -> String;

    /// Entry `index` of the search path list, `None` past the end
    fn search_path(&self, index: usize) -> Option<String>;

    /// Media type of `drive`
    fn drive_type(&self, drive: DriveNum) -> DriveType;
}

/// A reserved legacy device name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Upper-case reserved name, e.g. `NUL`
    pub name: &'static str,
    /// Host device to open, `None` when the device is recognized but unsupported
    pub host_path: Option<PathBuf>,
}

impl Device {
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.host_path.is_some()
    }
}

/// Reserved device name table
pub trait DeviceTable: Send + Sync {
    /// Recognize `name` as a device
    fn lookup(&self, name: &str) -> Option<Device>;
}

/// Packed legacy date and time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct DosDateTime {
    pub date: u16,
    pub time: u16,
}

/// Conversion between host timestamps and the packed legacy format
pub trait DateTimeCodec: Send + Sync {
    fn to_dos(&self, time: SystemTime) -> DosDateTime;

    fn from_dos(&self, stamp: DosDateTime) -> SystemTime;
}
