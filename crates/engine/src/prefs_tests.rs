use super::*;
use serde_json::{Value, json};
use shelf_runtime::{FileStore, MemoryStore};

fn stored(prefs: &PreferencesStore<MemoryStore>) -> Value {
    let raw = prefs
        .store()
        .get(PREFERENCES_KEY)
        .expect("get")
        .expect("preferences persisted");
    serde_json::from_str(&raw).expect("valid json")
}

fn seeded(raw: &str) -> PreferencesStore<MemoryStore> {
    let store = MemoryStore::new();
    store.set(PREFERENCES_KEY, raw).expect("seed");
    PreferencesStore::load(store)
}

#[test]
fn defaults_match_documented_values() {
    let p = Preferences::default();

    assert!(!p.dark_mode);
    assert_eq!(p.default_sort, SortKey::NameAsc);
    assert_eq!(p.text_viewer.font_size, 16);
    assert_eq!(p.text_viewer.font_family, "System");
    assert_eq!(p.text_viewer.theme, Theme::Light);
    assert_eq!(p.pdf_viewer.default_zoom, 1.0);
    assert_eq!(p.pdf_viewer.page_spacing, 8);
    assert_eq!(p.image_viewer.default_zoom, 1.0);
    assert!(p.image_viewer.enable_double_tap_zoom);
    assert_eq!(p.epub_viewer, EpubViewerSettings::default());
}

#[test]
fn load_without_stored_value_uses_defaults() {
    let prefs = PreferencesStore::load(MemoryStore::new());
    assert_eq!(prefs.get(), Preferences::default());
}

#[test]
fn load_invalid_document_uses_defaults() {
    for raw in ["not json", "[]", r#"{"darkMode":"yes"}"#] {
        assert_eq!(seeded(raw).get(), Preferences::default(), "raw {raw:?}");
    }
}

#[test]
fn load_fills_missing_fields_with_defaults() {
    let prefs = seeded(r#"{"darkMode":true,"textViewer":{"fontSize":20}}"#);
    let p = prefs.get();

    assert!(p.dark_mode);
    assert_eq!(p.text_viewer.font_size, 20);
    assert_eq!(p.text_viewer.font_family, "System");
    assert_eq!(p.pdf_viewer, PdfViewerSettings::default());
}

#[test]
fn unknown_default_sort_falls_back() {
    let cases: &[(&str, SortKey)] = &[
        (r#"{"defaultSortOption":"size_desc"}"#, SortKey::SizeDesc),
        (r#"{"defaultSortOption":"date_desc"}"#, SortKey::NameAsc),
        (r#"{"defaultSortOption":null}"#, SortKey::NameAsc),
    ];

    for (raw, expected) in cases {
        assert_eq!(seeded(raw).get().default_sort, *expected, "raw {raw}");
    }
}

#[test]
fn setters_update_memory_and_persist() {
    let prefs = PreferencesStore::load(MemoryStore::new());

    prefs.set_dark_mode(true);
    prefs.set_default_sort(SortKey::TypeDesc);

    let p = prefs.get();
    assert!(p.dark_mode);
    assert_eq!(p.default_sort, SortKey::TypeDesc);

    let doc = stored(&prefs);
    assert_eq!(doc["darkMode"], true);
    assert_eq!(doc["defaultSortOption"], "type_desc");
    assert_eq!(doc["textViewer"]["fontFamily"], "System");
}

#[test]
fn patches_only_touch_given_fields() {
    let prefs = PreferencesStore::load(MemoryStore::new());

    prefs.update_text_viewer(TextViewerPatch {
        font_size: Some(22),
        ..Default::default()
    });
    prefs.update_pdf_viewer(PdfViewerPatch {
        page_spacing: Some(0),
        ..Default::default()
    });
    prefs.update_image_viewer(ImageViewerPatch {
        enable_double_tap_zoom: Some(false),
        ..Default::default()
    });
    prefs.update_epub_viewer(EpubViewerPatch {
        theme: Some(Theme::Sepia),
        font_family: Some("Serif".to_owned()),
        ..Default::default()
    });

    let p = prefs.get();
    assert_eq!(p.text_viewer.font_size, 22);
    assert_eq!(p.text_viewer.font_family, "System");
    assert_eq!(p.pdf_viewer.page_spacing, 0);
    assert_eq!(p.pdf_viewer.default_zoom, 1.0);
    assert!(!p.image_viewer.enable_double_tap_zoom);
    assert_eq!(p.image_viewer.default_zoom, 1.0);
    assert_eq!(p.epub_viewer.theme, Theme::Sepia);
    assert_eq!(p.epub_viewer.font_family, "Serif");
    assert_eq!(p.epub_viewer.font_size, 16);

    let reloaded = PreferencesStore::load(prefs.store());
    assert_eq!(reloaded.get(), p);
}

#[test]
fn patches_reject_unknown_keys() {
    let ok: TextViewerPatch = serde_json::from_value(json!({"theme": "dark"})).expect("valid");
    assert_eq!(ok.theme, Some(Theme::Dark));
    assert!(!ok.is_empty());

    assert!(serde_json::from_value::<TextViewerPatch>(json!({"autoOpenLastFile": true})).is_err());
    assert!(serde_json::from_value::<PdfViewerPatch>(json!({"rotation": 90})).is_err());
    assert!(TextViewerPatch::default().is_empty());
}

#[test]
fn reset_restores_defaults() {
    let prefs = seeded(r#"{"darkMode":true,"defaultSortOption":"size_asc"}"#);
    prefs.reset();

    assert_eq!(prefs.get(), Preferences::default());
    assert_eq!(stored(&prefs)["darkMode"], false);
}

#[test]
fn failed_persist_keeps_in_memory_value() {
    struct Unwritable;

    impl KeyValueStore for Unwritable {
        fn get(&self, _key: &str) -> shelf_runtime::store::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> shelf_runtime::store::Result<()> {
            Err(StoreError::InvalidKey(key.to_owned()))
        }

        fn remove(&self, _key: &str) -> shelf_runtime::store::Result<()> {
            Ok(())
        }
    }

    let prefs = PreferencesStore::load(Unwritable);
    prefs.set_dark_mode(true);
    assert!(prefs.get().dark_mode);
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let prefs = PreferencesStore::load(FileStore::new(dir.path()));
    prefs.set_default_sort(SortKey::SizeDesc);

    let reloaded = PreferencesStore::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.get().default_sort, SortKey::SizeDesc);
}

#[test]
fn invalid_zoom_is_ignored_and_other_settings_survive_reload() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let prefs = PreferencesStore::load(FileStore::new(dir.path()));
    prefs.set_dark_mode(true);
    prefs.update_text_viewer(TextViewerPatch {
        font_size: Some(22),
        ..Default::default()
    });

    for zoom in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -2.0] {
        prefs.update_pdf_viewer(PdfViewerPatch {
            default_zoom: Some(zoom),
            ..Default::default()
        });
        prefs.update_image_viewer(ImageViewerPatch {
            default_zoom: Some(zoom),
            ..Default::default()
        });
    }

    let current = prefs.get();
    assert_eq!(current.pdf_viewer.default_zoom, 1.0);
    assert_eq!(current.image_viewer.default_zoom, 1.0);

    let reloaded = PreferencesStore::load(FileStore::new(dir.path())).get();
    assert!(reloaded.dark_mode, "dark mode lost after reload");
    assert_eq!(reloaded.text_viewer.font_size, 22);
    assert_eq!(reloaded.pdf_viewer.default_zoom, 1.0);
}

#[test]
fn valid_zoom_in_patch_is_applied() {
    let prefs = PreferencesStore::load(MemoryStore::new());
    prefs.update_pdf_viewer(PdfViewerPatch {
        default_zoom: Some(1.5),
        ..Default::default()
    });
    assert_eq!(prefs.get().pdf_viewer.default_zoom, 1.5);
}

#[test]
fn null_zoom_in_stored_document_keeps_the_rest() {
    let prefs = seeded(
        r#"{"darkMode":true,"pdfViewer":{"defaultZoom":null,"pageSpacing":12},
            "imageViewer":{"defaultZoom":-1.0}}"#,
    );

    let current = prefs.get();
    assert!(current.dark_mode);
    assert_eq!(current.pdf_viewer.default_zoom, 1.0);
    assert_eq!(current.pdf_viewer.page_spacing, 12);
    assert_eq!(current.image_viewer.default_zoom, 1.0);
}

#[test]
fn zoom_validity() {
    for (zoom, valid) in [
        (1.0, true),
        (0.25, true),
        (0.0, false),
        (-1.0, false),
        (f64::NAN, false),
        (f64::INFINITY, false),
    ] {
        assert_eq!(is_valid_zoom(zoom), valid, "zoom {zoom}");
    }
}
