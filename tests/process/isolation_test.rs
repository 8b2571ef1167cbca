/*!
 * Context Isolation Tests
 */

use legacy_files::{AccessMode, DriveType, ExtendedError, FileManager, MappedDrives};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn manager(root: &TempDir) -> FileManager {
    FileManager::builder()
        .with_dos_fs(Arc::new(MappedDrives::new().with_drive('C', root.path(), DriveType::Fixed)))
        .build()
}

#[test]
fn test_handles_are_per_process() {
    let root = TempDir::new().unwrap();
    let manager = manager(&root);
    let mut first = manager.new_context(1);
    let mut second = manager.new_context(2);

    let a = manager.lcreat(&mut first, "C:\\A.TXT", 0).unwrap();
    let b = manager.lcreat(&mut second, "C:\\B.TXT", 0).unwrap();
    assert_eq!(a, b);

    manager.lwrite(&mut first, a, b"first").unwrap();
    manager.lwrite(&mut second, b, b"second").unwrap();
    assert_eq!(std::fs::read(root.path().join("a.txt")).unwrap(), b"first");
    assert_eq!(std::fs::read(root.path().join("b.txt")).unwrap(), b"second");

    manager.lclose(&mut first, a).unwrap();
    assert!(!first.is_open(a));
    assert!(second.is_open(b));
}

#[test]
fn test_errors_are_per_process() {
    let root = TempDir::new().unwrap();
    let manager = manager(&root);
    let mut failing = manager.new_context(1);
    let mut quiet = manager.new_context(2);

    assert!(manager.open(&mut failing, "C:\\MISSING", AccessMode::Read).is_err());
    assert_eq!(failing.last_error(), Some(ExtendedError::FILE_NOT_FOUND));
    assert_eq!(quiet.last_error(), None);

    manager.lcreat(&mut quiet, "C:\\OK.TXT", 0).unwrap();
    assert_eq!(quiet.last_error(), None);
}

#[test]
fn test_contexts_on_separate_threads() {
    let root = TempDir::new().unwrap();
    let manager = Arc::new(manager(&root));

    let workers: Vec<_> = (0..4u32)
        .map(|pid| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let mut ctx = manager.new_context(pid);
                for i in 0..5 {
                    let name = format!("C:\\P{pid}_{i}.TXT");
                    let handle = manager.lcreat(&mut ctx, &name, 0).unwrap();
                    manager.lwrite(&mut ctx, handle, name.as_bytes()).unwrap();
                }
                ctx.open_handles()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 5);
    }
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 20);
}
