/*!
 * Temporary Name Tests
 */

use crate::fixture::Fixture;
use legacy_files::core::limits::TEMP_FORCE_DRIVE;
use legacy_files::{DosFileSystem, TempTarget};
use pretty_assertions::assert_eq;
use std::fs;

fn seeded() -> Fixture {
    Fixture::with(|builder| builder.with_temp_seed(|| 0x00ff))
}

#[test]
fn test_claims_first_free_counter() {
    let mut fx = seeded();
    let name = fx.manager.temp_name(&mut fx.ctx, TempTarget::TempDirectory, "wrd", 0).unwrap();

    assert_eq!(name.unique, 0x00ff);
    assert_eq!(name.path, "C:\\TEMP\\WRD00FF.TMP");
    let host = fx.drives.unix_name(&name.path, true).unwrap();
    assert_eq!(fs::metadata(host).unwrap().len(), 0);
}

#[test]
fn test_collision_advances_counter() {
    let mut fx = seeded();
    fx.write("temp/abc00ff.tmp", b"taken");
    fx.write("temp/abc0100.tmp", b"taken");

    let name = fx
        .manager
        .temp_name(&mut fx.ctx, TempTarget::Directory("C:\\TEMP".into()), "abc", 0)
        .unwrap();
    assert_eq!(name.unique, 0x0101);
    assert_eq!(name.path, "C:\\TEMP\\ABC0101.TMP");
    assert_eq!(fs::read(fx.host("temp/abc00ff.tmp")).unwrap(), b"taken");
}

#[test]
fn test_consecutive_calls_get_distinct_names() {
    let mut fx = seeded();
    let first = fx.manager.temp_name(&mut fx.ctx, TempTarget::TempDirectory, "~", 0).unwrap();
    let second = fx.manager.temp_name(&mut fx.ctx, TempTarget::TempDirectory, "~", 0).unwrap();
    assert_ne!(first.path, second.path);
    assert_eq!(second.unique, first.unique + 1);
}

#[test]
fn test_given_unique_creates_nothing() {
    let mut fx = seeded();
    let name = fx
        .manager
        .get_temp_file_name(&mut fx.ctx, 0, "prefix", 0xbeef)
        .unwrap();
    assert_eq!(name.unique, 0xbeef);
    assert_eq!(name.path, "C:\\TEMP\\PREBEEF.TMP");
    assert_eq!(fs::read_dir(fx.host("temp")).unwrap().count(), 0);
}

#[test]
fn test_forced_drive_at_drive_root() {
    let mut fx = seeded();
    let name = fx
        .manager
        .get_temp_file_name(&mut fx.ctx, TEMP_FORCE_DRIVE | b'C', "", 0)
        .unwrap();
    assert_eq!(name.path, "C:\\00FF.TMP");
    assert!(fx.host("00ff.tmp").exists());
}

#[test]
fn test_forced_drive_uses_current_directory() {
    let mut fx = seeded();
    fx.drives.set_current_dir("C:\\WORK").unwrap();

    let name = fx
        .manager
        .get_temp_file_name(&mut fx.ctx, TEMP_FORCE_DRIVE | b'C', "x", 0)
        .unwrap();
    assert_eq!(name.path, "C:\\WORK\\X00FF.TMP");
    assert!(fx.host("work/x00ff.tmp").exists());
    assert!(!fx.host("x00ff.tmp").exists());
}
