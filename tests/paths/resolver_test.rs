/*!
 * Search Order Tests
 *
 * A scripted drive emulation that knows a fixed set of files, so the
 * candidate order can be checked without touching the host.
 */

use legacy_files::core::types::DriveNum;
use legacy_files::paths::{DeviceTable, DosFileSystem, DriveType, PathResolver, StandardDevices};
use legacy_files::{ErrorCode, ExtendedError, FileResult};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

struct ScriptedFs {
    existing: Vec<&'static str>,
}

impl DosFileSystem for ScriptedFs {
    fn unix_name(&self, name: &str, must_exist: bool) -> FileResult<PathBuf> {
        let canonical = self.true_name(name, false)?;
        if must_exist && !self.existing.contains(&canonical.as_str()) {
            return Err(ExtendedError::FILE_NOT_FOUND.into());
        }
        Ok(PathBuf::from("/scripted").join(canonical.replace('\\', "/").replace(':', "")))
    }

    fn true_name(&self, name: &str, _must_exist: bool) -> FileResult<String> {
        let upper = name.to_ascii_uppercase();
        Ok(if upper.contains(':') {
            upper
        } else {
            format!("C:\\CWD\\{upper}")
        })
    }

    fn windows_directory(&self) -> String {
        "C:\\WIN".into()
    }

    fn system_directory(&self) -> String {
        "C:\\WIN\\SYS".into()
    }

    fn temp_directory(&self) -> String {
        "C:\\TMP".into()
    }

    fn search_path(&self, index: usize) -> Option<String> {
        ["D:\\TOOLS", "E:\\"].get(index).map(|dir| dir.to_string())
    }

    fn drive_type(&self, _drive: DriveNum) -> DriveType {
        DriveType::Fixed
    }
}

fn locate(fs: &ScriptedFs, name: &str, search: bool, reopen: bool) -> (FileResult<String>, String) {
    let devices = StandardDevices::new();
    let resolver = PathResolver::new(fs, &devices as &dyn DeviceTable);
    let mut tried = String::new();
    let found = resolver
        .locate_for_open(name, search, reopen, Some("C:\\PROG\\APP.EXE"), &mut tried)
        .map(|resolved| resolved.dos_name);
    (found, tried)
}

#[test]
fn test_candidate_order() {
    let fs = ScriptedFs { existing: vec![] };
    let devices = StandardDevices::new();
    let resolver = PathResolver::new(&fs, &devices);

    let candidates = resolver.candidates("X.DLL", true, false, Some("C:\\PROG\\APP.EXE"));
    assert_eq!(
        candidates,
        vec![
            "X.DLL",
            "C:\\WIN\\X.DLL",
            "C:\\WIN\\SYS\\X.DLL",
            "C:\\PROG\\X.DLL",
            "D:\\TOOLS\\X.DLL",
            "E:\\X.DLL",
        ]
    );
}

#[test]
fn test_first_existing_candidate_wins() {
    let fs = ScriptedFs {
        existing: vec!["C:\\WIN\\SYS\\X.DLL", "D:\\TOOLS\\X.DLL"],
    };
    let (found, tried) = locate(&fs, "X.DLL", true, false);
    assert_eq!(found.unwrap(), "C:\\WIN\\SYS\\X.DLL");
    assert_eq!(tried, "C:\\WIN\\SYS\\X.DLL");
}

#[test]
fn test_exhausted_search_remembers_last_candidate() {
    let fs = ScriptedFs { existing: vec![] };
    let (found, tried) = locate(&fs, "X.DLL", true, false);
    assert_eq!(found.unwrap_err().code(), ErrorCode::FileNotFound);
    assert_eq!(tried, "E:\\X.DLL");
}

#[test]
fn test_reopen_never_searches() {
    let fs = ScriptedFs {
        existing: vec!["C:\\WIN\\X.DLL"],
    };
    let (found, tried) = locate(&fs, "D:\\OLD\\X.DLL", true, true);
    assert!(found.is_err());
    assert_eq!(tried, "D:\\OLD\\X.DLL");
}

#[test]
fn test_bare_names_are_searched_without_the_flag() {
    let fs = ScriptedFs {
        existing: vec!["C:\\WIN\\X.DLL"],
    };
    let (found, _) = locate(&fs, "X.DLL", false, false);
    assert_eq!(found.unwrap(), "C:\\WIN\\X.DLL");

    let (found, _) = locate(&fs, "C:\\ELSE\\X.DLL", false, false);
    assert!(found.is_err());
}

#[test]
fn test_module_without_directory_is_skipped() {
    let fs = ScriptedFs { existing: vec![] };
    let devices = StandardDevices::new();
    let resolver = PathResolver::new(&fs, &devices);

    let candidates = resolver.candidates("X.DLL", true, false, Some("APP.EXE"));
    assert!(!candidates.iter().any(|c| c.contains("PROG")));
    assert_eq!(candidates.len(), 5);
}
