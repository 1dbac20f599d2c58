use std::{collections::HashMap, sync::Mutex, thread};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelf_fs::{FileLister, FileRecord};
use shelf_runtime::{
    HISTORY_KEY, KeyValueStore, MAX_HISTORY_ENTRIES, MAX_RECENT_FILES, StoreError,
};

/// One "file was opened" entry of the access log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    #[serde(rename = "fileId")]
    pub file_id: String,

    /// Milliseconds since the Unix epoch. Entries whose stored timestamp was
    /// missing or malformed decode as `i64::MIN`.
    #[serde(rename = "lastAccessed")]
    pub last_accessed: i64,
}

impl AccessRecord {
    pub fn new(file_id: impl Into<String>, last_accessed: i64) -> Self {
        Self {
            file_id: file_id.into(),
            last_accessed,
        }
    }

    pub fn now(file_id: impl Into<String>) -> Self {
        Self::new(file_id, Utc::now().timestamp_millis())
    }

    pub fn accessed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_accessed)
    }
}

/// Decode a stored log.
///
/// A document that is not a JSON array yields `None`. Inside an array,
/// elements without a string `fileId` are dropped and unusable timestamps
/// fall back to `i64::MIN`, so one bad entry never costs the whole log.
fn decode_history(raw: &str) -> Option<Vec<AccessRecord>> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            debug!("[history] stored log is not an array: {other}");
            return None;
        }
        Err(e) => {
            debug!("[history] stored log is not valid JSON: {e}");
            return None;
        }
    };

    let records = items
        .iter()
        .filter_map(|item| {
            let Some(file_id) = item.get("fileId").and_then(Value::as_str) else {
                debug!("[history] skipping entry without fileId: {item}");
                return None;
            };

            let last_accessed = match item.get("lastAccessed") {
                Some(Value::Number(n)) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                    .unwrap_or(i64::MIN),
                _ => i64::MIN,
            };

            Some(AccessRecord::new(file_id, last_accessed))
        })
        .collect();

    Some(records)
}

/// Keep listed files that appear in `history`, most recently accessed first,
/// capped at `limit`. Ties keep listing order.
pub fn select_recent(
    files: Vec<FileRecord>,
    history: &[AccessRecord],
    limit: usize,
) -> Vec<FileRecord> {
    let mut accessed: HashMap<&str, i64> = HashMap::with_capacity(history.len());
    for record in history {
        // The log is most-recent-first; the first entry for an id wins.
        accessed
            .entry(record.file_id.as_str())
            .or_insert(record.last_accessed);
    }

    let mut recent: Vec<(i64, FileRecord)> = files
        .into_iter()
        .filter_map(|f| accessed.get(f.id.as_str()).map(|&ts| (ts, f)))
        .collect();

    recent.sort_by(|(a, _), (b, _)| b.cmp(a));
    recent.truncate(limit);
    recent.into_iter().map(|(_, f)| f).collect()
}

/// Durable, bounded, most-recent-first log of file accesses.
pub struct AccessHistory<S> {
    store: S,
    /// Serialises read-modify-write cycles of `record_access`.
    writer: Mutex<()>,
}

impl<S: KeyValueStore> AccessHistory<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `file_id` to the front of the log with the current time.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn record_access(&self, file_id: &str) {
        self.record(AccessRecord::now(file_id));
    }

    fn record(&self, record: AccessRecord) {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());

        // A store that cannot be read is left alone rather than overwritten
        // with a one-entry log. Corrupt contents are replaced.
        let mut entries = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => decode_history(&raw).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    "[history] failed to load history, dropping access to {}: {e}",
                    record.file_id
                );
                return;
            }
        };

        entries.retain(|e| e.file_id != record.file_id);
        entries.insert(0, record);
        entries.truncate(MAX_HISTORY_ENTRIES);

        if let Err(e) = self.persist(&entries) {
            warn!("[history] failed to save history: {e}");
        }
    }

    fn persist(&self, entries: &[AccessRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &raw)
    }

    /// The persisted log, most-recent-first. Empty when absent or unreadable.
    pub fn history(&self) -> Vec<AccessRecord> {
        match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => decode_history(&raw).unwrap_or_else(|| {
                warn!("[history] stored history is corrupt, treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("[history] failed to load history: {e}");
                Vec::new()
            }
        }
    }

    pub fn count(&self) -> usize {
        self.history().len()
    }

    /// Listed files that have been opened, most recent first, at most
    /// [`MAX_RECENT_FILES`] of them.
    ///
    /// The listing and the log are read concurrently. A listing failure
    /// yields an empty result.
    pub fn recent_files<L>(&self, lister: &L) -> Vec<FileRecord>
    where
        L: FileLister + ?Sized,
    {
        let (listing, history) = thread::scope(|s| {
            let listing = s.spawn(|| lister.list_files());
            let history = self.history();
            (listing.join(), history)
        });

        let files = match listing {
            Ok(Ok(files)) => files,
            Ok(Err(e)) => {
                warn!("[history] failed to list files: {e}");
                return Vec::new();
            }
            Err(_) => {
                warn!("[history] file listing panicked");
                return Vec::new();
            }
        };

        select_recent(files, &history, MAX_RECENT_FILES)
    }

    /// Drop the whole log.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
