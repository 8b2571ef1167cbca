/*!
 * Path Module
 * Legacy path resolution and the collaborators it consumes
 */

pub mod datetime;
pub mod devices;
pub mod drives;
pub mod resolver;
pub mod traits;

// Re-exports
pub use datetime::UtcDateCodec;
pub use devices::StandardDevices;
pub use drives::MappedDrives;
pub use resolver::{bare_name, has_path_component, join_dos, PathResolver, ResolvedPath};
pub use traits::{DateTimeCodec, Device, DeviceTable, DosDateTime, DosFileSystem, DriveType};
