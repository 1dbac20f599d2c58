use serde::Serialize;

/// Classification used for files with an unknown or missing extension.
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// Extension (lowercase, no dot) to MIME type.
const MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("pdf", "application/pdf"),
    ("epub", "application/epub+zip"),
    ("zip", "application/zip"),
];

/// Classify a file by the extension after its last `.`.
///
/// A name without a dot is treated as if the whole name were the extension,
/// so `txt` classifies as `text/plain`.
pub fn determine_file_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_FILE_TYPE)
}

/// Viewer able to render a given file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerKind {
    Text,
    Image,
    Pdf,
    Epub,
    Archive,
    Unsupported,
}

impl ViewerKind {
    pub fn from_file_type(file_type: &str) -> Self {
        match file_type {
            "text/plain" => ViewerKind::Text,
            "application/pdf" => ViewerKind::Pdf,
            "application/epub+zip" => ViewerKind::Epub,
            "application/zip" => ViewerKind::Archive,
            t if t.starts_with("image/") => ViewerKind::Image,
            _ => ViewerKind::Unsupported,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewerKind::Text => "text",
            ViewerKind::Image => "image",
            ViewerKind::Pdf => "pdf",
            ViewerKind::Epub => "epub",
            ViewerKind::Archive => "archive",
            ViewerKind::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
#[path = "mime_tests.rs"]
mod tests;
