/*!
 * Process Teardown Tests
 */

use legacy_files::{close_all_handles, DriveType, FileManager, MappedDrives};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
#[serial]
fn test_teardown_releases_every_handle() {
    let root = TempDir::new().unwrap();
    let manager = FileManager::builder()
        .with_dos_fs(Arc::new(MappedDrives::new().with_drive('C', root.path(), DriveType::Fixed)))
        .with_handle_count(64)
        .build();
    let mut ctx = manager.new_context(42);

    for i in 0..40 {
        manager.lcreat(&mut ctx, &format!("C:\\F{i}.DAT"), 0).unwrap();
    }
    let dup = manager.dup(&mut ctx, 0).unwrap();
    manager.dup2(&mut ctx, 3, 60).unwrap();
    assert_eq!(ctx.open_handles(), 42);

    let stats = close_all_handles(&mut ctx);
    assert_eq!(stats.handles_closed, 42);
    assert_eq!(ctx.open_handles(), 0);
    assert!(!ctx.is_open(dup));
    assert!(!ctx.is_open(60));

    // The table itself survives and is reusable
    assert_eq!(ctx.handle_count(), 64);
    assert_eq!(manager.lcreat(&mut ctx, "C:\\AFTER.DAT", 0).unwrap(), 0);
}

#[test]
fn test_teardown_of_empty_context() {
    let manager = FileManager::builder().build();
    let mut ctx = manager.new_context(1);
    assert_eq!(close_all_handles(&mut ctx).handles_closed, 0);
}
