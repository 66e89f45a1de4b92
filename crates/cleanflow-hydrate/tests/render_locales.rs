//! Integration test: load the shipped `locales/` packs and render them into
//! the standard page.

use std::path::PathBuf;

use cleanflow_core::{LanguageCode, LanguageTable, DEFAULT_PREFERENCE_KEY};
use cleanflow_hydrate::{
    HydrationEngine, JsonFilePreferenceStore, MemoryDocument, PreferenceStore, RenderTarget,
    Selector, SELECTOR_ID,
};
use cleanflow_pack::{FsPackSource, PackStore};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

async fn shipped_engine() -> HydrationEngine {
    let store = PackStore::new(FsPackSource::new(repo_root().join("locales"), "translation.json"));
    let table = LanguageTable::default();
    let loaded = store.load_all(table.as_slice()).await;
    HydrationEngine::from_loaded(table, loaded)
}

#[tokio::test]
async fn test_every_language_renders_fully() {
    let engine = shipped_engine().await;
    for &code in LanguageCode::all() {
        let mut doc = MemoryDocument::page(4);
        engine.render(engine.pack(code), code, &mut doc);

        assert_eq!(doc.root_attribute("lang"), Some(code.as_str()));
        assert_eq!(doc.root_attribute("dir"), Some(code.direction().as_str()));
        assert_eq!(doc.text_of("brand-text"), Some("CleanFlow"));

        let body = doc.body();
        let empty_items = doc
            .query_all(body, Selector::ItemText)
            .into_iter()
            .filter(|&e| doc.element(e).unwrap().text.is_empty())
            .count();
        assert_eq!(empty_items, 0, "{code}: unrendered checklist items");
    }
}

#[tokio::test]
async fn test_selector_uses_each_language_own_name() {
    let engine = shipped_engine().await;
    let mut doc = MemoryDocument::page(4);
    engine.render(engine.pack(LanguageCode::Ru), LanguageCode::Ru, &mut doc);

    let options = doc.options_of(SELECTOR_ID);
    let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["he", "en", "ru", "ar", "zh", "hi"]);
    assert_eq!(options[1].label, "English");
    assert_eq!(options[0].label, "עברית");
    assert!(options[2].selected);
    assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
}

#[tokio::test]
async fn test_language_choice_survives_restart() {
    let engine = shipped_engine().await;
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("prefs.json");

    let mut prefs = JsonFilePreferenceStore::new(&prefs_path);
    let mut doc = MemoryDocument::page(4);
    let mut context = engine.startup(&prefs, &mut doc);
    assert_eq!(context.current(), LanguageCode::He);

    engine
        .change_language(&mut context, "ar", &mut prefs, &mut doc)
        .unwrap();
    assert_eq!(doc.root_attribute("dir"), Some("rtl"));
    assert_eq!(
        prefs.get(DEFAULT_PREFERENCE_KEY).unwrap().as_deref(),
        Some("ar")
    );

    let reopened = JsonFilePreferenceStore::new(&prefs_path);
    let mut fresh = MemoryDocument::page(4);
    let restarted = engine.startup(&reopened, &mut fresh);
    assert_eq!(restarted.current(), LanguageCode::Ar);
    assert_eq!(fresh, doc);
}

#[tokio::test]
async fn test_missing_pack_is_logged_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let en = dir.path().join("en");
    std::fs::create_dir_all(&en).unwrap();
    std::fs::copy(
        repo_root().join("locales/en/translation.json"),
        en.join("translation.json"),
    )
    .unwrap();

    let store = PackStore::new(FsPackSource::new(dir.path(), "translation.json"));
    let table = LanguageTable::default();
    let loaded = store.load_all(table.as_slice()).await;
    let engine = HydrationEngine::from_loaded(table.clone(), loaded);
    assert!(engine.pack(LanguageCode::En).is_some());
    assert!(engine.pack(LanguageCode::He).is_none());

    let mut doc = MemoryDocument::page(4);
    let before = doc.clone();
    engine.render(engine.pack(LanguageCode::He), LanguageCode::He, &mut doc);
    assert_eq!(doc, before);

    engine.render(engine.pack(LanguageCode::En), LanguageCode::En, &mut doc);
    let labels: Vec<_> = doc.options_of(SELECTOR_ID).iter().map(|o| o.label.clone()).collect();
    assert_eq!(labels, ["he", "English", "ru", "ar", "zh", "hi"]);
}
