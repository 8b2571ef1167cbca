/*!
 * File Operation Types
 * Access modes, attribute and mode words, OFSTRUCT and temp-name results
 */

use crate::core::limits::OFS_MAX_PATH;
use crate::core::types::Handle;
use bitflags::bitflags;
use serde::Serialize;
use std::fs::OpenOptions;

/// Host access requested by an open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    Read,
    Write,
    ReadWrite,
}

impl AccessMode {
    /// Decode the access bits (low two bits) of a legacy mode word
    #[inline]
    pub const fn from_mode_word(mode: u16) -> Self {
        match mode & 0x3 {
            1 => Self::Write,
            2 => Self::ReadWrite,
            _ => Self::Read,
        }
    }

    pub(crate) fn options(self, truncate: bool) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => {
                options.read(true);
            }
            Self::Write => {
                options.write(true).truncate(truncate);
            }
            Self::ReadWrite => {
                options.read(true).write(true);
            }
        }
        options
    }
}

bitflags! {
    /// Legacy file attribute byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct Attributes: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN = 0x02;
        const SYSTEM = 0x04;
        const LABEL = 0x08;
        const DIRECTORY = 0x10;
        const ARCHIVE = 0x20;
    }
}

/// Result of `stat`/`fstat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileStat {
    pub attributes: Attributes,
    /// Size in bytes, saturated at 32 bits
    pub size: u32,
    /// Packed modification date
    pub date: u16,
    /// Packed modification time
    pub time: u16,
}

bitflags! {
    /// Mode word of the composed `OpenFile` call
    ///
    /// The low two bits select access (see [`AccessMode::from_mode_word`]);
    /// an empty mode opens for reading.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct OpenFileMode: u16 {
        const WRITE = 0x0001;
        const READ_WRITE = 0x0002;
        const SHARE_EXCLUSIVE = 0x0010;
        const SHARE_DENY_WRITE = 0x0020;
        const SHARE_DENY_READ = 0x0030;
        const SHARE_DENY_NONE = 0x0040;
        const PARSE = 0x0100;
        const DELETE = 0x0200;
        /// Same bit as `SEARCH`; it means verify only together with `REOPEN`
        const VERIFY = 0x0400;
        const SEARCH = 0x0400;
        const CANCEL = 0x0800;
        const CREATE = 0x1000;
        const PROMPT = 0x2000;
        const EXIST = 0x4000;
        const REOPEN = 0x8000;
    }
}

impl OpenFileMode {
    #[inline]
    pub fn access(self) -> AccessMode {
        AccessMode::from_mode_word(self.bits())
    }
}

/// Caller-owned record carried across composed opens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfStruct {
    /// Whether the file lives on a non-removable drive
    pub fixed_disk: bool,
    /// Extended error code of the last failure, 0 on success
    pub error_code: u16,
    /// Host modification stamp captured at the last successful open
    pub timestamp: u32,
    /// Last path tried or found, at most 127 characters
    pub path_name: String,
}

impl OfStruct {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `path`, cut to the legacy path capacity
    pub(crate) fn set_path(&mut self, path: &str) {
        self.path_name = path.chars().take(OFS_MAX_PATH - 1).collect();
    }
}

/// What a composed open did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenFileOutcome {
    /// `PARSE`: the record was filled, nothing touched
    Parsed,
    /// `DELETE`: the located file was removed
    Deleted,
    /// `EXIST`: the file was opened and closed again
    Exists,
    /// A handle was allocated
    Opened(Handle),
}

impl OpenFileOutcome {
    pub fn handle(self) -> Option<Handle> {
        match self {
            Self::Opened(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Directory a temporary name is generated in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempTarget {
    /// The configured temporary directory
    TempDirectory,
    /// Current directory of the given drive
    Drive(char),
    /// An explicit legacy directory
    Directory(String),
}

/// Generated temporary name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TempName {
    /// Counter the name was built from (the caller's seed when non-zero)
    pub unique: u32,
    /// Canonical legacy path
    pub path: String,
}
