use super::*;
use serial_test::serial;
use shelf_engine::AccessHistory;
use shelf_runtime::{HISTORY_DISABLED_ENV, HISTORY_KEY, KeyValueStore};

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

fn seed(global: &GlobalArgs) {
    global
        .store()
        .expect("store")
        .set(
            HISTORY_KEY,
            r#"[{"fileId":"c.txt","lastAccessed":3000},
                {"fileId":"b.txt","lastAccessed":2000},
                {"fileId":"a.txt","lastAccessed":1000}]"#,
        )
        .expect("seed history");
}

#[test]
#[serial]
fn clear_leaves_an_empty_log() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = global_in(tmp.path());
    seed(&global);

    let code = run(
        &global,
        HistoryArgs {
            limit: 20,
            clear: true,
        },
    );
    assert_exit(code, 0);

    let history = AccessHistory::new(global.store().expect("store"));
    assert!(history.history().is_empty());
    assert!(history.store().get(HISTORY_KEY).expect("get").is_none());
}

#[test]
#[serial]
fn clear_on_empty_history_succeeds() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = global_in(tmp.path());

    let code = run(
        &global,
        HistoryArgs {
            limit: 20,
            clear: true,
        },
    );
    assert_exit(code, 0);
}

#[test]
#[serial]
fn listing_with_small_limit_keeps_the_log() {
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = global_in(tmp.path());
    seed(&global);

    let code = run(
        &global,
        HistoryArgs {
            limit: 1,
            clear: false,
        },
    );
    assert_exit(code, 0);

    let history = AccessHistory::new(global.store().expect("store"));
    assert_eq!(history.count(), 3, "printing must not modify the log");
}

#[test]
#[serial]
fn disabled_history_is_not_cleared() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let global = global_in(tmp.path());
    seed(&global);

    unsafe { std::env::set_var(HISTORY_DISABLED_ENV, "false") };
    let code = run(
        &global,
        HistoryArgs {
            limit: 20,
            clear: true,
        },
    );
    unsafe { std::env::remove_var(HISTORY_DISABLED_ENV) };

    assert_exit(code, 0);
    let history = AccessHistory::new(global.store().expect("store"));
    assert_eq!(history.count(), 3);
}
