/*!
 * Shared fixture: drive C: mapped onto a scratch directory
 */

#![allow(dead_code)]

use legacy_files::files::FileManagerBuilder;
use legacy_files::{DriveType, FileManager, MappedDrives, ProcessContext};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct Fixture {
    pub root: TempDir,
    pub drives: Arc<MappedDrives>,
    pub manager: FileManager,
    pub ctx: ProcessContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with(|builder| builder)
    }

    /// Fixture whose manager builder is adjusted by `configure`
    pub fn with(configure: impl FnOnce(FileManagerBuilder) -> FileManagerBuilder) -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["windows/system", "temp", "apps", "bin", "work"] {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }

        let drives = Arc::new(
            MappedDrives::new()
                .with_drive('C', root.path(), DriveType::Fixed)
                .with_search_path(["C:\\BIN".to_string()]),
        );
        let manager = configure(FileManager::builder().with_dos_fs(drives.clone())).build();
        let ctx = manager.new_context(100).with_module_path("C:\\APPS\\EDIT.EXE");

        Self {
            root,
            drives,
            manager,
            ctx,
        }
    }

    /// Host path below the drive root
    pub fn host(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &[u8]) {
        fs::write(self.host(relative), contents).unwrap();
    }
}
