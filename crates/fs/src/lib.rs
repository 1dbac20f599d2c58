mod listing;
mod mime;
mod record;

pub use listing::{DirLister, FileLister, list_files};
pub use mime::{DEFAULT_FILE_TYPE, ViewerKind, determine_file_type};
pub use record::FileRecord;
