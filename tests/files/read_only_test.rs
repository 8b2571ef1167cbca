/*!
 * Read-Only Fallback Tests
 *
 * A directory cannot be opened for writing by anyone, so it stands in for
 * a file the process may only read.
 */

use crate::fixture::Fixture;
use legacy_files::{AccessMode, ErrorCode};

#[test]
fn test_read_write_open_fails_without_fallback() {
    let mut fx = Fixture::new();
    let err = fx
        .manager
        .open(&mut fx.ctx, "C:\\WORK", AccessMode::ReadWrite)
        .unwrap_err();
    assert_ne!(err.code(), ErrorCode::FileNotFound);
    assert_eq!(fx.ctx.open_handles(), 0);
}

#[test]
fn test_read_write_open_falls_back_to_read_only() {
    let mut fx = Fixture::with(|builder| builder.with_allow_read_only(true));
    let handle = fx
        .manager
        .open(&mut fx.ctx, "C:\\WORK", AccessMode::ReadWrite)
        .unwrap();

    assert!(fx.ctx.is_open(handle));
    assert_eq!(fx.ctx.last_error(), None);
}

#[test]
fn test_write_only_open_never_falls_back() {
    let mut fx = Fixture::with(|builder| builder.with_allow_read_only(true));
    assert!(fx.manager.open(&mut fx.ctx, "C:\\WORK", AccessMode::Write).is_err());
}
