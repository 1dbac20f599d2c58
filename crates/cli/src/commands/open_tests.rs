use super::*;
use serial_test::serial;
use shelf_engine::AccessHistory;
use shelf_runtime::{HISTORY_DISABLED_ENV, HISTORY_KEY, KeyValueStore};
use std::fs;

fn assert_exit(code: ExitCode, expected: u8) {
    // ExitCode is opaque, compare through Debug.
    assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(expected)));
}

fn global_in(dir: &std::path::Path) -> GlobalArgs {
    GlobalArgs {
        dir: Some(dir.join("files")),
        state_dir: Some(dir.join("state")),
    }
}

fn shelf_with(dir: &std::path::Path, names: &[&str]) -> GlobalArgs {
    let global = global_in(dir);
    let files = dir.join("files");
    fs::create_dir_all(&files).expect("create shelf");
    for name in names {
        fs::write(files.join(name), name.as_bytes()).expect("write file");
    }
    global
}

fn open(global: &GlobalArgs, id: &str) -> ExitCode {
    run(global, OpenArgs { id: id.to_owned() })
}

fn stored_ids(global: &GlobalArgs) -> Vec<String> {
    let store = global.store().expect("store");
    AccessHistory::new(store)
        .history()
        .into_iter()
        .map(|r| r.file_id)
        .collect()
}

#[test]
#[serial]
fn open_records_access_for_listed_file() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = shelf_with(tmp.path(), &["report.pdf", "notes.txt"]);

    assert_exit(open(&global, "report.pdf"), 0);
    assert_exit(open(&global, "notes.txt"), 0);
    assert_exit(open(&global, "report.pdf"), 0);

    assert_eq!(stored_ids(&global), ["report.pdf", "notes.txt"]);
}

#[test]
#[serial]
fn open_unknown_id_fails_without_recording() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = shelf_with(tmp.path(), &["report.pdf"]);

    assert_exit(open(&global, "missing.pdf"), 1);

    let store = global.store().expect("store");
    assert!(
        store.get(HISTORY_KEY).expect("get").is_none(),
        "nothing should be written for an unknown id"
    );
}

#[test]
#[serial]
fn open_without_shelf_directory_is_an_error() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = global_in(tmp.path());

    assert_exit(open(&global, "report.pdf"), 2);
    assert!(stored_ids(&global).is_empty());
}

#[test]
#[serial]
fn open_with_history_disabled_still_succeeds() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = shelf_with(tmp.path(), &["report.pdf"]);

    unsafe { std::env::set_var(HISTORY_DISABLED_ENV, "0") };
    let code = open(&global, "report.pdf");
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };

    assert_exit(code, 0);
    assert!(stored_ids(&global).is_empty(), "disabled history must not record");
}
