/*!
 * Core Types
 * Common types used across the file layer
 */

/// Process ID type
pub type Pid = u32;

/// Legacy file handle: a slot index into a process handle table
pub type Handle = u16;

/// Raw host descriptor number
pub type HostFdNum = i32;

/// Legacy DOS drive number (0 = A:, 1 = B:, ...)
pub type DriveNum = u8;

/// Convert a drive letter into a drive number
///
/// Accepts either case; returns `None` for anything outside `A..=Z`.
#[inline]
pub fn drive_from_letter(letter: char) -> Option<DriveNum> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(upper as u8 - b'A')
    } else {
        None
    }
}

/// Convert a drive number back into its upper-case letter
#[inline]
pub fn drive_letter(drive: DriveNum) -> char {
    (b'A' + drive.min(25)) as char
}
