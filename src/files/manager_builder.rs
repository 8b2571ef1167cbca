/*!
 * File Manager Builder
 * Builder pattern for FileManager construction
 */

use super::manager::{clock_seed, FileManager, TempSeed};
use crate::config::Config;
use crate::core::limits::MIN_HANDLES;
use crate::handles::clamp_count;
use crate::paths::{DateTimeCodec, DeviceTable, DosFileSystem, MappedDrives, StandardDevices, UtcDateCodec};
use std::sync::Arc;
use tracing::info;

/// Builder for FileManager
pub struct FileManagerBuilder {
    dosfs: Option<Arc<dyn DosFileSystem>>,
    devices: Option<Arc<dyn DeviceTable>>,
    clock: Option<Arc<dyn DateTimeCodec>>,
    allow_read_only: bool,
    handle_count: usize,
    temp_seed: TempSeed,
}

impl FileManagerBuilder {
    pub fn new() -> Self {
        Self {
            dosfs: None,
            devices: None,
            clock: None,
            allow_read_only: false,
            handle_count: MIN_HANDLES,
            temp_seed: clock_seed,
        }
    }

    /// Start from a configuration: its drive map and options
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_dos_fs(Arc::new(MappedDrives::from_config(config)))
            .with_allow_read_only(config.allow_read_only)
            .with_handle_count(config.handle_count)
    }

    pub fn with_dos_fs(mut self, dosfs: Arc<dyn DosFileSystem>) -> Self {
        self.dosfs = Some(dosfs);
        self
    }

    pub fn with_devices(mut self, devices: Arc<dyn DeviceTable>) -> Self {
        self.devices = Some(devices);
        self
    }

    pub fn with_date_codec(mut self, clock: Arc<dyn DateTimeCodec>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Retry failed read-write opens as read-only
    pub fn with_allow_read_only(mut self, allow: bool) -> Self {
        self.allow_read_only = allow;
        self
    }

    /// Initial handle table size of contexts made by the manager
    pub fn with_handle_count(mut self, count: usize) -> Self {
        self.handle_count = clamp_count(count);
        self
    }

    /// Replace the clock-based first counter of temp name generation
    pub fn with_temp_seed(mut self, seed: TempSeed) -> Self {
        self.temp_seed = seed;
        self
    }

    pub fn build(self) -> FileManager {
        info!(
            allow_read_only = self.allow_read_only,
            handle_count = self.handle_count,
            "File manager initialized"
        );

        FileManager {
            dosfs: self.dosfs.unwrap_or_else(|| Arc::new(MappedDrives::new())),
            devices: self.devices.unwrap_or_else(|| Arc::new(StandardDevices::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(UtcDateCodec::new())),
            allow_read_only: self.allow_read_only,
            handle_count: self.handle_count,
            temp_seed: self.temp_seed,
        }
    }
}

impl Default for FileManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FileManager {
    pub fn builder() -> FileManagerBuilder {
        FileManagerBuilder::new()
    }

    pub fn from_config(config: &Config) -> Self {
        FileManagerBuilder::from_config(config).build()
    }
}
