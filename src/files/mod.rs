/*!
 * File Operations
 * Legacy file calls on top of handle tables, path resolution and error
 * translation
 */

mod handle_ops;
mod legacy;
mod manager;
mod manager_builder;
mod open_file;
mod ops;
mod temp;
mod types;

pub use handle_ops::{SEEK_CURRENT, SEEK_END};
pub use manager::{clock_seed, FileManager, TempSeed};
pub use manager_builder::FileManagerBuilder;
pub use ops::{CREATE_MODE, CREATE_MODE_READ_ONLY};
pub use types::{
    AccessMode, Attributes, FileStat, OfStruct, OpenFileMode, OpenFileOutcome, TempName, TempTarget,
};
