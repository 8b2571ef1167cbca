/*!
 * Legacy Files Library
 * File-handle virtualization for legacy 16-bit programs: per-process handle
 * tables, legacy path resolution, error translation and the legacy file API
 */

pub mod config;
pub mod core;
pub mod error;
pub mod files;
pub mod handles;
pub mod monitoring;
pub mod paths;
pub mod process;

// Re-exports
pub use config::{Config, ConfigError, DriveConfig};
pub use crate::core::types::{Handle, HostFdNum, Pid};
pub use error::{ErrorCode, ExtendedError, FileError, FileResult};
pub use files::{
    AccessMode, Attributes, FileManager, FileManagerBuilder, FileStat, OfStruct, OpenFileMode,
    OpenFileOutcome, TempName, TempTarget,
};
pub use handles::{HandleTable, HostDescriptor};
pub use monitoring::{init_tracing, span_operation};
pub use paths::{DosFileSystem, DriveType, MappedDrives, PathResolver, StandardDevices, UtcDateCodec};
pub use process::{close_all_handles, ProcessContext, TeardownStats};
