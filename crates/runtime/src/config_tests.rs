use super::*;
use serial_test::serial;

#[test]
#[serial]
fn history_disabled_parses_env_values() {
    let cases: &[(Option<&str>, bool)] = &[
        (None, false),
        (Some("0"), true),
        (Some("false"), true),
        (Some("FALSE"), true),
        (Some("1"), false),
        (Some("true"), false),
        (Some(""), false),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { env::set_var(HISTORY_DISABLED_ENV, v) },
            None => unsafe { env::remove_var(HISTORY_DISABLED_ENV) },
        }

        assert_eq!(
            history_disabled(),
            *expected,
            "{HISTORY_DISABLED_ENV}={:?} should yield disabled={}",
            value,
            expected
        );
    }

    unsafe { env::remove_var(HISTORY_DISABLED_ENV) };
}

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    unsafe { env::set_var(STATE_DIR_ENV, "/tmp/shelf-state") };
    assert_eq!(state_dir(), Some(PathBuf::from("/tmp/shelf-state")));

    unsafe { env::remove_var(STATE_DIR_ENV) };
    unsafe { env::set_var("XDG_STATE_HOME", "/tmp/xdg-state") };
    assert_eq!(state_dir(), Some(PathBuf::from("/tmp/xdg-state/shelf")));

    unsafe { env::remove_var("XDG_STATE_HOME") };
}

#[test]
#[serial]
fn shelf_dir_falls_back_to_xdg_data_home() {
    unsafe { env::set_var(SHELF_DIR_ENV, "/srv/docs") };
    assert_eq!(default_shelf_dir(), PathBuf::from("/srv/docs"));

    unsafe { env::remove_var(SHELF_DIR_ENV) };
    unsafe { env::set_var("XDG_DATA_HOME", "/tmp/xdg-data") };
    assert_eq!(
        default_shelf_dir(),
        PathBuf::from("/tmp/xdg-data/shelf/files")
    );

    unsafe { env::remove_var("XDG_DATA_HOME") };
}
