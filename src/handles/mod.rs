/*!
 * Handle Tables
 * Per-process mapping from small legacy handles to host descriptors
 */

mod descriptor;
mod table;

pub use descriptor::HostDescriptor;
pub use table::{clamp_count, HandleTable};
