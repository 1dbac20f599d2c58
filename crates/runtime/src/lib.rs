mod config;
pub mod logging;
pub mod store;

pub use config::{
    HISTORY_DISABLED_ENV, HISTORY_KEY, MAX_HISTORY_ENTRIES, MAX_RECENT_FILES, PREFERENCES_KEY,
    PROGRAM_NAME, SHELF_DIR_ENV, STATE_DIR_ENV, default_shelf_dir, history_disabled, state_dir,
};

pub use logging::init;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
