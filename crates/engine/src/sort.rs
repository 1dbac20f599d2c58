use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shelf_fs::FileRecord;

/// Field and direction a file listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    TypeAsc,
    TypeDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::SizeAsc,
        SortKey::SizeDesc,
        SortKey::TypeAsc,
        SortKey::TypeDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::SizeAsc => "size_asc",
            SortKey::SizeDesc => "size_desc",
            SortKey::TypeAsc => "type_asc",
            SortKey::TypeDesc => "type_desc",
        }
    }

    /// Human readable label for menus and help output.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A to Z)",
            SortKey::NameDesc => "Name (Z to A)",
            SortKey::SizeAsc => "Size (smallest first)",
            SortKey::SizeDesc => "Size (largest first)",
            SortKey::TypeAsc => "Type (A to Z)",
            SortKey::TypeDesc => "Type (Z to A)",
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SortKey::NameDesc | SortKey::SizeDesc | SortKey::TypeDesc
        )
    }

    /// Parse a loosely typed key. Unknown values yield `None`, which callers
    /// treat as "keep listing order".
    pub fn parse_lenient(s: &str) -> Option<SortKey> {
        s.trim().parse().ok()
    }

    fn compare(self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let ord = match self {
            SortKey::NameAsc | SortKey::NameDesc => collate(&a.name, &b.name),
            SortKey::SizeAsc | SortKey::SizeDesc => a.size.cmp(&b.size),
            SortKey::TypeAsc | SortKey::TypeDesc => collate(&a.file_type, &b.file_type),
        };

        if self.is_descending() {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort key: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_owned()))
    }
}

/// Case-insensitive ordering with a case-sensitive tie-break, so that
/// `"apple" < "Banana" < "banana"` holds and equal names stay equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Return a copy of `files` ordered by `key`.
///
/// Uses a stable sort: records that compare equal keep their input order
/// in both ascending and descending modes.
pub fn sort_files(files: &[FileRecord], key: SortKey) -> Vec<FileRecord> {
    let mut sorted = files.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Like [`sort_files`], but `None` (an unrecognised key) echoes the input.
pub fn sort_files_by(files: &[FileRecord], key: Option<SortKey>) -> Vec<FileRecord> {
    match key {
        Some(key) => sort_files(files, key),
        None => files.to_vec(),
    }
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
