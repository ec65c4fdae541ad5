//! Legacy tutorial migration through the async store
//!
//! ## What These Tests Verify
//!
//! - Legacy records are converted and written back under the current key
//! - Migration happens once; later reads come from the current record
//! - Missing and corrupt records fall back without persisting anything
//! - Profiles are independent

use cardforge_core::storage::database_path;
use cardforge_core::{GameProfile, LocalStore, Partition, TutorialEditor, TutorialPage};
use tempfile::tempdir;

const LEGACY_CORE: &str = r#"[
    { "titulo1": "A", "texto1": "B" },
    { "titulo1": "Turns", "titulo2": "Order", "texto1": "Clockwise.", "texto2": "", "imagem": "/models/tutorial/turns.png" }
]"#;

fn fallback() -> Vec<TutorialPage> {
    vec![TutorialPage::blank()]
}

#[tokio::test]
async fn test_legacy_record_migrates_on_first_load() {
    tracing_subscriber::fmt()
        .with_env_filter("cardforge_core=debug")
        .try_init()
        .ok();

    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    store
        .put(Partition::Tutorials, "core", LEGACY_CORE.as_bytes().to_vec())
        .await;

    let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].titles.len(), 1);
    assert_eq!(pages[0].titles[0].text, "A");
    assert_eq!(pages[0].descriptions.len(), 1);
    assert_eq!(pages[0].descriptions[0].text, "B");
    assert_eq!(pages[1].titles.len(), 2);
    assert_eq!(pages[1].descriptions.len(), 1);
    assert_eq!(
        pages[1].background_path.as_deref(),
        Some("/models/tutorial/turns.png")
    );

    let storage = store.storage().unwrap();
    assert!(storage.is_tutorial_migrated(GameProfile::Core).unwrap());
    assert!(store.get(Partition::Tutorials, "pages/core").await.is_some());
}

#[tokio::test]
async fn test_edits_after_migration_win() {
    let temp_dir = tempdir().unwrap();
    let db_path = database_path(temp_dir.path());
    {
        let store = LocalStore::open(&db_path);
        store
            .put(Partition::Tutorials, "core", LEGACY_CORE.as_bytes().to_vec())
            .await;

        let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
        let mut editor = TutorialEditor::new(GameProfile::Core, pages);
        editor.add_page();
        assert!(
            store
                .save_tutorial(GameProfile::Core, editor.pages().to_vec())
                .await
        );
    }

    // Reopen: the edited current record is read, the legacy one is ignored
    let store = LocalStore::open(&db_path);
    let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
    assert_eq!(pages.len(), 3);
}

#[tokio::test]
async fn test_missing_profile_returns_fallback_unsaved() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));

    let pages = store.load_tutorial(GameProfile::Expansion, fallback()).await;
    assert_eq!(pages, fallback());
    assert!(store
        .storage()
        .unwrap()
        .keys(Partition::Tutorials)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_profiles_are_independent() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    store
        .put(Partition::Tutorials, "core", LEGACY_CORE.as_bytes().to_vec())
        .await;

    let mut page = TutorialPage::blank();
    page.titles[0].text = "Expansion intro".to_string();
    store
        .save_tutorial(GameProfile::Expansion, vec![page.clone()])
        .await;

    assert_eq!(
        store.load_tutorial(GameProfile::Expansion, fallback()).await,
        vec![page]
    );
    assert_eq!(
        store.load_tutorial(GameProfile::Core, fallback()).await.len(),
        2
    );
}

#[tokio::test]
async fn test_corrupt_legacy_record_falls_back() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    store
        .put(Partition::Tutorials, "core", b"{ not json".to_vec())
        .await;

    let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
    assert_eq!(pages, fallback());
    assert!(store.get(Partition::Tutorials, "pages/core").await.is_none());
}

#[tokio::test]
async fn test_current_pages_missing_descriptions_are_kept() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let stored = r#"[
        { "titles": [{ "text": "Kept A" }], "descriptions": [{ "text": "x" }] },
        { "titles": [{ "text": "Page two" }] }
    ]"#;
    store
        .put(Partition::Tutorials, "pages/core", stored.as_bytes().to_vec())
        .await;

    let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].titles[0].text, "Kept A");
    assert_eq!(pages[1].titles[0].text, "Page two");
    assert_eq!(pages[1].descriptions.len(), 1);
}

#[tokio::test]
async fn test_legacy_page_without_first_title_migrates() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let legacy = r#"[
        { "titulo1": "Welcome", "texto1": "Hi" },
        { "titulo2": "", "texto1": "Only text" }
    ]"#;
    store
        .put(Partition::Tutorials, "core", legacy.as_bytes().to_vec())
        .await;

    let pages = store.load_tutorial(GameProfile::Core, fallback()).await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].titles[0].text, "Welcome");
    assert_eq!(pages[1].titles[0].text, "");
    assert_eq!(pages[1].descriptions[0].text, "Only text");
    assert!(store
        .storage()
        .unwrap()
        .is_tutorial_migrated(GameProfile::Core)
        .unwrap());
}
