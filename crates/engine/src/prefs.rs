use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use shelf_runtime::{KeyValueStore, PREFERENCES_KEY, StoreError};

use crate::sort::SortKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextViewerSettings {
    pub font_size: u32,
    pub font_family: String,
    pub theme: Theme,
}

impl Default for TextViewerSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "System".to_owned(),
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PdfViewerSettings {
    #[serde(deserialize_with = "lenient_zoom")]
    pub default_zoom: f64,
    pub page_spacing: u32,
}

impl Default for PdfViewerSettings {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            page_spacing: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageViewerSettings {
    #[serde(deserialize_with = "lenient_zoom")]
    pub default_zoom: f64,
    pub enable_double_tap_zoom: bool,
}

impl Default for ImageViewerSettings {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            enable_double_tap_zoom: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpubViewerSettings {
    pub font_size: u32,
    pub font_family: String,
    pub theme: Theme,
}

impl Default for EpubViewerSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "System".to_owned(),
            theme: Theme::Light,
        }
    }
}

/// All user preferences, stored as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,

    /// Sort applied to listings when none is given. Keys this version does
    /// not know (e.g. retired date sorts) fall back to the default.
    #[serde(rename = "defaultSortOption", deserialize_with = "lenient_sort_key")]
    pub default_sort: SortKey,

    pub text_viewer: TextViewerSettings,
    pub pdf_viewer: PdfViewerSettings,
    pub image_viewer: ImageViewerSettings,
    pub epub_viewer: EpubViewerSettings,
}

fn lenient_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(SortKey::parse_lenient)
        .unwrap_or_default())
}

/// Zoom factors must be finite and positive. Anything else cannot be
/// stored as a JSON number.
pub fn is_valid_zoom(zoom: f64) -> bool {
    zoom.is_finite() && zoom > 0.0
}

const DEFAULT_ZOOM: f64 = 1.0;

fn lenient_zoom<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|z| is_valid_zoom(*z)).unwrap_or(DEFAULT_ZOOM))
}

fn checked_zoom(zoom: f64) -> Option<f64> {
    if is_valid_zoom(zoom) {
        Some(zoom)
    } else {
        warn!("[prefs] ignoring invalid zoom factor {zoom}");
        None
    }
}

// Patches: every `Some` field overwrites, every `None` field is left alone.

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TextViewerPatch {
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub theme: Option<Theme>,
}

impl TextViewerPatch {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.font_family.is_none() && self.theme.is_none()
    }

    fn apply(self, settings: &mut TextViewerSettings) {
        if let Some(v) = self.font_size {
            settings.font_size = v;
        }
        if let Some(v) = self.font_family {
            settings.font_family = v;
        }
        if let Some(v) = self.theme {
            settings.theme = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PdfViewerPatch {
    pub default_zoom: Option<f64>,
    pub page_spacing: Option<u32>,
}

impl PdfViewerPatch {
    pub fn is_empty(&self) -> bool {
        self.default_zoom.is_none() && self.page_spacing.is_none()
    }

    fn apply(self, settings: &mut PdfViewerSettings) {
        if let Some(v) = self.default_zoom.and_then(checked_zoom) {
            settings.default_zoom = v;
        }
        if let Some(v) = self.page_spacing {
            settings.page_spacing = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ImageViewerPatch {
    pub default_zoom: Option<f64>,
    pub enable_double_tap_zoom: Option<bool>,
}

impl ImageViewerPatch {
    pub fn is_empty(&self) -> bool {
        self.default_zoom.is_none() && self.enable_double_tap_zoom.is_none()
    }

    fn apply(self, settings: &mut ImageViewerSettings) {
        if let Some(v) = self.default_zoom.and_then(checked_zoom) {
            settings.default_zoom = v;
        }
        if let Some(v) = self.enable_double_tap_zoom {
            settings.enable_double_tap_zoom = v;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EpubViewerPatch {
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub theme: Option<Theme>,
}

impl EpubViewerPatch {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.font_family.is_none() && self.theme.is_none()
    }

    fn apply(self, settings: &mut EpubViewerSettings) {
        if let Some(v) = self.font_size {
            settings.font_size = v;
        }
        if let Some(v) = self.font_family {
            settings.font_family = v;
        }
        if let Some(v) = self.theme {
            settings.theme = v;
        }
    }
}

/// In-memory preferences kept in sync with a key-value store.
///
/// Every mutation updates memory first and then persists; persistence
/// failures are logged and do not roll the in-memory value back.
pub struct PreferencesStore<S> {
    store: S,
    current: Mutex<Preferences>,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    /// Load stored preferences, falling back to defaults when they are
    /// missing or unreadable.
    pub fn load(store: S) -> Self {
        let current = match store.get(PREFERENCES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("[prefs] stored preferences are invalid, using defaults: {e}");
                Preferences::default()
            }),
            Ok(None) => {
                debug!("[prefs] no stored preferences, using defaults");
                Preferences::default()
            }
            Err(e) => {
                warn!("[prefs] failed to load preferences, using defaults: {e}");
                Preferences::default()
            }
        };

        Self {
            store,
            current: Mutex::new(current),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self) -> Preferences {
        self.lock().clone()
    }

    pub fn set_dark_mode(&self, value: bool) {
        self.update(|p| p.dark_mode = value);
    }

    pub fn set_default_sort(&self, value: SortKey) {
        self.update(|p| p.default_sort = value);
    }

    pub fn update_text_viewer(&self, patch: TextViewerPatch) {
        self.update(|p| patch.apply(&mut p.text_viewer));
    }

    pub fn update_pdf_viewer(&self, patch: PdfViewerPatch) {
        self.update(|p| patch.apply(&mut p.pdf_viewer));
    }

    pub fn update_image_viewer(&self, patch: ImageViewerPatch) {
        self.update(|p| patch.apply(&mut p.image_viewer));
    }

    pub fn update_epub_viewer(&self, patch: EpubViewerPatch) {
        self.update(|p| patch.apply(&mut p.epub_viewer));
    }

    pub fn reset(&self) {
        self.update(|p| *p = Preferences::default());
    }

    fn lock(&self) -> MutexGuard<'_, Preferences> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn update(&self, f: impl FnOnce(&mut Preferences)) {
        let mut current = self.lock();
        f(&mut current);

        // Persist under the lock so concurrent updates reach the store in
        // the order they were applied.
        if let Err(e) = self.persist(&current) {
            warn!("[prefs] failed to save preferences: {e}");
        }
    }

    fn persist(&self, prefs: &Preferences) -> Result<(), StoreError> {
        let raw = serde_json::to_string(prefs)?;
        self.store.set(PREFERENCES_KEY, &raw)
    }
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
