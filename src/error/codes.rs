/*!
 * Extended Error Tuple
 * The legacy four-field error model: code, class, suggested action, locus
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extended error code
///
/// Discriminants are the numeric values legacy clients compare against.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    FileNotFound = 2,
    PathNotFound = 3,
    TooManyOpenFiles = 4,
    AccessDenied = 5,
    InvalidHandle = 6,
    OutOfMemory = 8,
    InvalidData = 13,
    InvalidDrive = 15,
    NoMoreFiles = 18,
    WriteProtected = 19,
    GeneralFailure = 31,
    ShareViolation = 32,
    LockViolation = 33,
    DiskFull = 39,
    FileExists = 80,
    CanNotMakeDir = 82,
}

impl ErrorCode {
    #[inline]
    pub const fn value(self) -> u16 {
        self as u16
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileNotFound => "file not found",
            Self::PathNotFound => "path not found",
            Self::TooManyOpenFiles => "too many open files",
            Self::AccessDenied => "access denied",
            Self::InvalidHandle => "invalid handle",
            Self::OutOfMemory => "out of memory",
            Self::InvalidData => "invalid data",
            Self::InvalidDrive => "invalid drive",
            Self::NoMoreFiles => "no more files",
            Self::WriteProtected => "write protected",
            Self::GeneralFailure => "general failure",
            Self::ShareViolation => "sharing violation",
            Self::LockViolation => "lock violation",
            Self::DiskFull => "disk full",
            Self::FileExists => "file exists",
            Self::CanNotMakeDir => "cannot make directory",
        }
    }
}

/// Error class
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    OutOfResource = 1,
    Temporary = 2,
    AccessDenied = 3,
    SystemFailure = 6,
    ProgramError = 7,
    NotFound = 8,
    MediaError = 11,
    Exists = 12,
    Unknown = 13,
}

/// Suggested action
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorAction {
    Retry = 1,
    Abort = 4,
}

/// Subsystem the error is associated with
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorLocus {
    Unknown = 1,
    Disk = 2,
    Network = 3,
    Memory = 5,
}

/// Extended error tuple recorded in a process context after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtendedError {
    pub code: ErrorCode,
    pub class: ErrorClass,
    pub action: ErrorAction,
    pub locus: ErrorLocus,
}

impl ExtendedError {
    #[inline]
    pub const fn new(
        code: ErrorCode,
        class: ErrorClass,
        action: ErrorAction,
        locus: ErrorLocus,
    ) -> Self {
        Self {
            code,
            class,
            action,
            locus,
        }
    }

    pub const INVALID_HANDLE: Self = Self::new(
        ErrorCode::InvalidHandle,
        ErrorClass::ProgramError,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const NO_MORE_FILES: Self = Self::new(
        ErrorCode::NoMoreFiles,
        ErrorClass::MediaError,
        ErrorAction::Abort,
        ErrorLocus::Unknown,
    );

    pub const TOO_MANY_OPEN_FILES: Self = Self::new(
        ErrorCode::TooManyOpenFiles,
        ErrorClass::ProgramError,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const OUT_OF_MEMORY: Self = Self::new(
        ErrorCode::OutOfMemory,
        ErrorClass::OutOfResource,
        ErrorAction::Abort,
        ErrorLocus::Memory,
    );

    pub const FILE_NOT_FOUND: Self = Self::new(
        ErrorCode::FileNotFound,
        ErrorClass::NotFound,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const PATH_NOT_FOUND: Self = Self::new(
        ErrorCode::PathNotFound,
        ErrorClass::NotFound,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const INVALID_DRIVE: Self = Self::new(
        ErrorCode::InvalidDrive,
        ErrorClass::NotFound,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const FILE_EXISTS: Self = Self::new(
        ErrorCode::FileExists,
        ErrorClass::Exists,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    /// Creating a file over a reserved device name
    pub const DEVICE_CREATE: Self = Self::new(
        ErrorCode::AccessDenied,
        ErrorClass::NotFound,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    /// Making a directory over a reserved device name
    pub const DEVICE_MKDIR: Self = Self::new(
        ErrorCode::AccessDenied,
        ErrorClass::AccessDenied,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const FILE_CHANGED: Self = Self::new(
        ErrorCode::InvalidData,
        ErrorClass::ProgramError,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const TEMP_EXHAUSTED: Self = Self::new(
        ErrorCode::NoMoreFiles,
        ErrorClass::OutOfResource,
        ErrorAction::Abort,
        ErrorLocus::Disk,
    );

    pub const GENERAL_FAILURE: Self = Self::new(
        ErrorCode::GeneralFailure,
        ErrorClass::SystemFailure,
        ErrorAction::Abort,
        ErrorLocus::Unknown,
    );
}

impl fmt::Display for ExtendedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (code {}, class {:?}, action {:?}, locus {:?})",
            self.code.as_str(),
            self.code.value(),
            self.class,
            self.action,
            self.locus
        )
    }
}
