mod history;
mod prefs;
mod sort;

pub use history::{AccessHistory, AccessRecord, select_recent};
pub use prefs::{
    EpubViewerPatch, EpubViewerSettings, ImageViewerPatch, ImageViewerSettings, PdfViewerPatch,
    PdfViewerSettings, Preferences, PreferencesStore, TextViewerPatch, TextViewerSettings, Theme,
    is_valid_zoom,
};
pub use sort::{SortKey, UnknownSortKey, collate, sort_files, sort_files_by};
