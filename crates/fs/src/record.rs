use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mime::determine_file_type;

/// Metadata for one file on the shelf.
///
/// Built fresh by every listing and never mutated afterwards; a record is only
/// meaningful until the next listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Stable identifier, the file name. Unique within one directory.
    pub id: String,
    /// Display name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// MIME-like classification derived from the extension
    #[serde(rename = "type")]
    pub file_type: String,
    /// Location handle, the full path
    pub uri: String,
}

impl FileRecord {
    /// Build a record for `name` located at `path`.
    pub fn new(name: impl Into<String>, path: &Path, size: u64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            file_type: determine_file_type(&name).to_owned(),
            uri: path.to_string_lossy().into_owned(),
            name,
            size,
        }
    }
}
