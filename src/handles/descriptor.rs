/*!
 * Host Descriptors
 * What a handle table slot holds
 */

use crate::core::types::HostFdNum;
use std::fs::File;
use std::os::fd::AsRawFd;

/// An owned host descriptor that can live in a handle table slot
///
/// Dropping the value closes the descriptor, so a table never has to call
/// `close` itself.
pub trait HostDescriptor {
    /// Numeric host descriptor, checked against the slot sentinel
    fn host_fd(&self) -> HostFdNum;
}

impl HostDescriptor for File {
    #[inline]
    fn host_fd(&self) -> HostFdNum {
        self.as_raw_fd()
    }
}
