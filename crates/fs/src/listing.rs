use std::{
    fs::{self, DirEntry, read_dir},
    io::Result,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use shelf_runtime::default_shelf_dir;

use crate::record::FileRecord;

/// Source of the live file listing.
pub trait FileLister: Send + Sync {
    fn list_files(&self) -> Result<Vec<FileRecord>>;
}

/// Lists the regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirLister {
    dir: PathBuf,
}

impl DirLister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lister over the default shelf directory.
    pub fn from_env() -> Self {
        Self::new(default_shelf_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileLister for DirLister {
    fn list_files(&self) -> Result<Vec<FileRecord>> {
        list_files(&self.dir)
    }
}

impl<F> FileLister for F
where
    F: Fn() -> Result<Vec<FileRecord>> + Send + Sync,
{
    fn list_files(&self) -> Result<Vec<FileRecord>> {
        self()
    }
}

/// Read `dir` and build a record for every regular file in it.
///
/// Sub-directories, special files and non UTF-8 names are skipped, as are
/// entries that disappear between `read_dir` and the metadata lookup.
/// Records come back in directory order.
pub fn list_files(dir: &Path) -> Result<Vec<FileRecord>> {
    let mut files = Vec::new();

    for entry_res in read_dir(dir)? {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[list] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match inspect_entry(&entry) {
            Ok(Some(record)) => files.push(record),
            Ok(None) => {}
            Err(e) => {
                debug!("[list] skipping {:?}: {e}", entry.path());
            }
        }
    }

    Ok(files)
}

fn inspect_entry(entry: &DirEntry) -> Result<Option<FileRecord>> {
    let path = entry.path();

    // Follow symlinks so a link to a file is listed like the file itself.
    let metadata = fs::metadata(&path)?;
    if !metadata.is_file() {
        return Ok(None);
    }

    let name_os = entry.file_name();
    let name = match name_os.to_str() {
        Some(s) => s.to_owned(),
        None => return Ok(None),
    };

    Ok(Some(FileRecord::new(name, &path, metadata.len())))
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
