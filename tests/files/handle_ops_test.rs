/*!
 * Handle Operation Tests
 */

use crate::fixture::Fixture;
use legacy_files::core::limits::MIN_HANDLES;
use legacy_files::files::{SEEK_CURRENT, SEEK_END};
use legacy_files::{AccessMode, ErrorCode, ExtendedError, Handle};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::fs;

#[test]
fn test_create_write_reopen_read() {
    let mut fx = Fixture::new();
    let handle = fx.manager.lcreat(&mut fx.ctx, "C:\\WORK\\NOTES.TXT", 0).unwrap();
    fx.manager.lwrite(&mut fx.ctx, handle, b"line one\r\nline two\r\n").unwrap();
    fx.manager.lclose(&mut fx.ctx, handle).unwrap();
    assert!(!fx.ctx.is_open(handle));

    let handle = fx.manager.open(&mut fx.ctx, "c:\\work\\notes.txt", AccessMode::Read).unwrap();
    let mut buf = vec![0u8; 64];
    let n = fx.manager.lread(&mut fx.ctx, handle, &mut buf).unwrap() as usize;
    assert_eq!(&buf[..n], b"line one\r\nline two\r\n");
    assert_eq!(fx.ctx.last_error(), None);
}

#[test]
fn test_handles_are_lowest_free_slots() {
    let mut fx = Fixture::new();
    let a = fx.manager.lcreat(&mut fx.ctx, "C:\\A.TXT", 0).unwrap();
    let b = fx.manager.lcreat(&mut fx.ctx, "C:\\B.TXT", 0).unwrap();
    let c = fx.manager.lcreat(&mut fx.ctx, "C:\\C.TXT", 0).unwrap();
    assert_eq!((a, b, c), (0, 1, 2));

    fx.manager.lclose(&mut fx.ctx, b).unwrap();
    assert_eq!(fx.manager.dup(&mut fx.ctx, c).unwrap(), 1);
}

#[test]
#[serial]
fn test_table_exhaustion_reports_no_more_files() {
    let mut fx = Fixture::new();
    for i in 0..MIN_HANDLES {
        let handle = fx.manager.lcreat(&mut fx.ctx, &format!("C:\\F{i}.TXT"), 0).unwrap();
        assert_eq!(handle as usize, i);
    }

    let err = fx.manager.lcreat(&mut fx.ctx, "C:\\ONE_MORE.TXT", 0).unwrap_err();
    assert_eq!(err.extended(), ExtendedError::NO_MORE_FILES);
    assert_eq!(fx.ctx.last_error(), Some(ExtendedError::NO_MORE_FILES));
    assert_eq!(fx.ctx.open_handles(), MIN_HANDLES);

    // Growing the table makes room again
    assert_eq!(fx.manager.set_handle_count(&mut fx.ctx, 32), 32);
    assert_eq!(fx.manager.lcreat(&mut fx.ctx, "C:\\ONE_MORE.TXT", 0).unwrap() as usize, MIN_HANDLES);
}

#[test]
#[serial]
fn test_dup_into_full_table_releases_duplicate() {
    let mut fx = Fixture::new();
    for i in 0..MIN_HANDLES {
        fx.manager.lcreat(&mut fx.ctx, &format!("C:\\F{i}.TXT"), 0).unwrap();
    }
    // Host descriptors referring to the file behind handle 0
    let target = fs::canonicalize(fx.host("f0.txt")).unwrap();
    let host_fds = || {
        fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| fs::read_link(entry.ok()?.path()).ok())
            .filter(|link| *link == target)
            .count()
    };

    let before = host_fds();
    assert_eq!(before, 1);
    let err = fx.manager.dup(&mut fx.ctx, 0).unwrap_err();
    assert_eq!(err.extended(), ExtendedError::NO_MORE_FILES);
    assert_eq!(host_fds(), before);
    assert_eq!(fx.ctx.open_handles(), MIN_HANDLES);
}

#[test]
fn test_shrink_over_open_handle_is_refused() {
    let mut fx = Fixture::new();
    fx.manager.set_handle_count(&mut fx.ctx, 64);
    let handle = fx.manager.lcreat(&mut fx.ctx, "C:\\A.TXT", 0).unwrap();
    fx.manager.dup2(&mut fx.ctx, handle, 50).unwrap();

    assert_eq!(fx.manager.set_handle_count(&mut fx.ctx, 40), 64);
    assert_eq!(fx.ctx.last_error().map(|e| e.code), Some(ErrorCode::TooManyOpenFiles));
    assert!(fx.ctx.is_open(50));

    fx.manager.lclose(&mut fx.ctx, 50).unwrap();
    assert_eq!(fx.manager.set_handle_count(&mut fx.ctx, 40), 40);
}

#[test]
fn test_dup2_closes_previous_occupant() {
    let mut fx = Fixture::new();
    let log = fx.manager.lcreat(&mut fx.ctx, "C:\\LOG.TXT", 0).unwrap();
    let other = fx.manager.lcreat(&mut fx.ctx, "C:\\OTHER.TXT", 0).unwrap();

    fx.manager.dup2(&mut fx.ctx, log, other).unwrap();
    fx.manager.lwrite(&mut fx.ctx, other, b"redirected").unwrap();
    fx.manager.lclose(&mut fx.ctx, log).unwrap();
    fx.manager.lclose(&mut fx.ctx, other).unwrap();

    assert_eq!(fs::read(fx.host("log.txt")).unwrap(), b"redirected");
    assert_eq!(fs::read(fx.host("other.txt")).unwrap(), b"");
}

#[test]
fn test_dup2_rejects_target_outside_table() {
    let mut fx = Fixture::new();
    let handle = fx.manager.lcreat(&mut fx.ctx, "C:\\A.TXT", 0).unwrap();
    let outside = fx.ctx.handle_count() as Handle;

    let err = fx.manager.dup2(&mut fx.ctx, handle, outside).unwrap_err();
    assert_eq!(err.extended(), ExtendedError::INVALID_HANDLE);
}

#[test]
fn test_zero_length_write_truncates_at_position() {
    let mut fx = Fixture::new();
    let handle = fx.manager.lcreat(&mut fx.ctx, "C:\\DATA.BIN", 0).unwrap();
    fx.manager.hwrite(&mut fx.ctx, handle, &[0xaa; 1000]).unwrap();

    assert_eq!(fx.manager.llseek(&mut fx.ctx, handle, 250, 0).unwrap(), 250);
    assert_eq!(fx.manager.hwrite(&mut fx.ctx, handle, &[]).unwrap(), 0);
    assert_eq!(fs::metadata(fx.host("data.bin")).unwrap().len(), 250);

    // Position is unchanged, so the next write appends
    fx.manager.hwrite(&mut fx.ctx, handle, b"tail").unwrap();
    assert_eq!(fx.manager.llseek(&mut fx.ctx, handle, 0, SEEK_END).unwrap(), 254);
    assert_eq!(fx.manager.llseek(&mut fx.ctx, handle, -4, SEEK_CURRENT).unwrap(), 250);
}

#[test]
fn test_invalid_handles() {
    let mut fx = Fixture::new();
    let mut buf = [0u8; 4];

    for handle in [3, 19, 200, 0xff] {
        let err = fx.manager.hread(&mut fx.ctx, handle, &mut buf).unwrap_err();
        assert_eq!(err.extended(), ExtendedError::INVALID_HANDLE);
    }

    let err = fx.manager.lclose(&mut fx.ctx, 7).unwrap_err();
    assert_eq!(err.extended(), ExtendedError::INVALID_HANDLE);
    assert!(!err.is_fatal());
    assert_eq!(fx.ctx.last_error(), Some(ExtendedError::INVALID_HANDLE));
}

#[test]
fn test_stat_and_fstat_agree() {
    let mut fx = Fixture::new();
    fx.write("report.dat", &[1u8; 4096]);

    let by_path = fx.manager.stat(&mut fx.ctx, "C:\\REPORT.DAT").unwrap();
    let handle = fx.manager.lopen(&mut fx.ctx, "C:\\REPORT.DAT", 0).unwrap();
    let by_handle = fx.manager.fstat(&mut fx.ctx, handle).unwrap();

    assert_eq!(by_path, by_handle);
    assert_eq!(by_path.size, 4096);
}

#[test]
fn test_directories() {
    let mut fx = Fixture::new();
    fx.manager.make_dir(&mut fx.ctx, "C:\\WORK\\OUT").unwrap();
    fx.manager.make_dir(&mut fx.ctx, "C:\\WORK\\OUT").unwrap();
    assert!(fx.host("work/out").is_dir());

    let err = fx.manager.make_dir(&mut fx.ctx, "C:\\NOPE\\OUT").unwrap_err();
    assert_eq!(err.code(), ErrorCode::PathNotFound);

    fx.manager.remove_dir(&mut fx.ctx, "C:\\WORK\\OUT").unwrap();
    let err = fx.manager.remove_dir(&mut fx.ctx, "C:\\WORK\\OUT").unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileNotFound);
}
