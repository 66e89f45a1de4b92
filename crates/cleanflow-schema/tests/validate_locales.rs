//! Integration test: validate the shipped `locales/` packs, then damaged
//! copies of them in a temporary directory.

use std::path::{Path, PathBuf};

use cleanflow_core::{LanguageCode, LanguageTable};
use cleanflow_pack::{FsPackSource, PackStore};
use cleanflow_schema::{validate_all, FindingKind};
use serde_json::Value;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn copy_locales(to: &Path) {
    let from = repo_root().join("locales");
    for code in LanguageCode::all() {
        let dir = to.join(code.as_str());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::copy(
            from.join(code.as_str()).join("translation.json"),
            dir.join("translation.json"),
        )
        .unwrap();
    }
}

fn edit_pack(root: &Path, code: LanguageCode, edit: impl FnOnce(&mut Value)) {
    let path = root.join(code.as_str()).join("translation.json");
    let mut value: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    edit(&mut value);
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

#[tokio::test]
async fn test_shipped_locales_are_clean() {
    let store = PackStore::new(FsPackSource::new(repo_root().join("locales"), "translation.json"));
    let outcome = validate_all(&store, &LanguageTable::default()).await;

    assert!(outcome.passed(), "shipped packs have errors:\n{}", outcome.report);
    assert!(
        outcome.report.is_empty(),
        "shipped packs have warnings:\n{}",
        outcome.report
    );
    assert_eq!(outcome.languages.len(), 6);
}

#[tokio::test]
async fn test_damaged_copy_reports_each_problem() {
    let dir = tempfile::tempdir().unwrap();
    copy_locales(dir.path());

    edit_pack(dir.path(), LanguageCode::Ru, |v| {
        v["footer"].as_object_mut().unwrap().remove("note");
    });
    edit_pack(dir.path(), LanguageCode::Zh, |v| {
        v["brand"] = Value::String(String::new());
    });
    edit_pack(dir.path(), LanguageCode::Ar, |v| {
        v["meta"]["code"] = Value::String("he".into());
    });
    std::fs::remove_file(dir.path().join("hi/translation.json")).unwrap();
    std::fs::write(dir.path().join("he/translation.json"), "{ \"meta\": ").unwrap();

    let store = PackStore::new(FsPackSource::new(dir.path(), "translation.json"));
    let outcome = validate_all(&store, &LanguageTable::default()).await;
    assert!(!outcome.passed());
    assert_eq!(outcome.exit_code(), 1);

    let kinds = |code| {
        outcome
            .report
            .for_language(code)
            .map(|f| f.kind)
            .collect::<Vec<_>>()
    };
    assert_eq!(kinds(LanguageCode::He), [FindingKind::InvalidEncoding]);
    assert_eq!(kinds(LanguageCode::Hi), [FindingKind::NotFound]);
    assert_eq!(kinds(LanguageCode::Ar), [FindingKind::Structural]);
    assert_eq!(kinds(LanguageCode::Ru), [FindingKind::MissingTranslation]);
    // An empty brand is both missing and blank.
    assert_eq!(kinds(LanguageCode::Zh), [FindingKind::Structural, FindingKind::EmptyValue]);
    assert!(outcome.report.for_language(LanguageCode::En).next().is_none());
}

#[tokio::test]
async fn test_warnings_alone_keep_exit_code_zero() {
    let dir = tempfile::tempdir().unwrap();
    copy_locales(dir.path());
    edit_pack(dir.path(), LanguageCode::He, |v| {
        v["sections"]["daily"]["items"][0] = Value::String(String::new());
        v["sections"]["weekly"].as_object_mut().unwrap().remove("note");
    });

    let store = PackStore::new(FsPackSource::new(dir.path(), "translation.json"));
    let outcome = validate_all(&store, &LanguageTable::default()).await;
    assert!(outcome.passed());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.report.warning_count(), 2);
    assert!(outcome
        .report
        .findings()
        .iter()
        .any(|f| f.message == "empty string at sections.daily.items.0"));
}
