/*!
 * Standard Devices
 * Reference table of reserved legacy device names
 */

use super::resolver::bare_name;
use super::traits::{Device, DeviceTable};
use std::path::PathBuf;

/// Reserved names and the host device backing each, if any
const DEVICES: &[(&str, Option<&str>)] = &[
    ("NUL", Some("/dev/null")),
    ("CON", Some("/dev/tty")),
    ("PRN", None),
    ("AUX", None),
    ("CLOCK$", None),
    ("COM1", None),
    ("COM2", None),
    ("COM3", None),
    ("COM4", None),
    ("LPT1", None),
    ("LPT2", None),
    ("LPT3", None),
];

/// The classic reserved device names
///
/// A name is a device when its base name, extension ignored, matches a
/// reserved name in any case and in any directory (`C:\TMP\nul.txt` is NUL).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDevices;

impl StandardDevices {
    pub const fn new() -> Self {
        Self
    }
}

impl DeviceTable for StandardDevices {
    fn lookup(&self, name: &str) -> Option<Device> {
        let base = bare_name(name);
        let stem = base.split('.').next().unwrap_or(base);

        DEVICES
            .iter()
            .find(|(device, _)| device.eq_ignore_ascii_case(stem))
            .map(|&(device, host)| Device {
                name: device,
                host_path: host.map(PathBuf::from),
            })
    }
}
