//! Card workspace lifecycle against a real database
//!
//! ## What These Tests Verify
//!
//! - Save, reopen and edit round trips including artwork
//! - Delete removes the card and its overlay
//! - Saving without artwork clears a stale overlay
//! - Import appends exactly N cards with fresh ids, or nothing at all
//! - Imported cards keep their file order after a reopen

use cardforge_core::export::cards_to_json;
use cardforge_core::storage::database_path;
use cardforge_core::{CardWorkspace, ForgeError, LocalStore};
use tempfile::tempdir;

#[tokio::test]
async fn test_save_reload_and_edit() {
    let temp_dir = tempdir().unwrap();
    let db_path = database_path(temp_dir.path());

    let id = {
        let mut workspace = CardWorkspace::load(LocalStore::open(&db_path)).await;
        workspace.editor.set_title("Ember");
        workspace.editor.set_overlay(Some("data:image/webp;base64,AAAA".to_string()));
        assert!(workspace.save().await);
        workspace.editor.form().id
    };

    let mut workspace = CardWorkspace::load(LocalStore::open(&db_path)).await;
    assert_eq!(workspace.editor.saved().len(), 1);
    assert!(workspace.editor.overlay().is_none());

    workspace.open_for_edit(id).await.unwrap();
    assert_eq!(workspace.editor.form().title, "Ember");
    assert_eq!(
        workspace.editor.overlay(),
        Some("data:image/webp;base64,AAAA")
    );
    assert_eq!(workspace.editor.editing(), Some(id));
}

#[tokio::test]
async fn test_delete_removes_overlay() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let mut workspace = CardWorkspace::load(store.clone()).await;

    workspace.editor.set_title("Doomed");
    workspace.editor.set_overlay(Some("data:art".to_string()));
    workspace.save().await;
    let id = workspace.editor.form().id;

    assert!(workspace.delete(id).await);
    assert!(workspace.editor.saved().is_empty());
    assert_eq!(store.load_overlay(id).await, None);
    assert!(store.load_cards().await.iter().all(|c| c.id != id));
}

#[tokio::test]
async fn test_clearing_artwork_deletes_overlay() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let mut workspace = CardWorkspace::load(store.clone()).await;

    workspace.editor.set_overlay(Some("data:art".to_string()));
    workspace.save().await;
    let id = workspace.editor.form().id;

    workspace.editor.set_overlay(None);
    workspace.save().await;
    assert_eq!(store.load_overlay(id).await, None);
}

#[tokio::test]
async fn test_open_unknown_card() {
    let temp_dir = tempdir().unwrap();
    let mut workspace = CardWorkspace::load(LocalStore::open(database_path(temp_dir.path()))).await;
    let missing = cardforge_core::CardId::new();
    assert!(matches!(
        workspace.open_for_edit(missing).await,
        Err(ForgeError::CardNotFound(_))
    ));
}

#[tokio::test]
async fn test_import_appends_n_fresh_cards() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let mut workspace = CardWorkspace::load(store.clone()).await;

    workspace.editor.set_title("Existing");
    workspace.save().await;
    let backup = cards_to_json(workspace.editor.saved()).unwrap();
    let existing_id = workspace.editor.saved()[0].id;

    let json = format!(
        "[{}, {}, {}]",
        backup.trim().trim_start_matches('[').trim_end_matches(']'),
        r#"{ "title": "Second" }"#,
        r#"{ "title": "Third", "template": "water" }"#
    );
    assert_eq!(workspace.import_json(&json).await.unwrap(), 3);

    let saved = workspace.editor.saved();
    assert_eq!(saved.len(), 4);
    assert_eq!(saved.iter().filter(|c| c.id == existing_id).count(), 1);
    assert_eq!(store.load_cards().await.len(), 4);
}

#[tokio::test]
async fn test_import_order_survives_reopen() {
    let temp_dir = tempdir().unwrap();
    let db_path = database_path(temp_dir.path());

    let entries: Vec<String> = (0..40)
        .map(|i| format!(r#"{{ "title": "c{:02}" }}"#, i))
        .collect();
    let json = format!("[{}]", entries.join(", "));

    let in_memory: Vec<String> = {
        let mut workspace = CardWorkspace::load(LocalStore::open(&db_path)).await;
        assert_eq!(workspace.import_json(&json).await.unwrap(), 40);
        workspace.editor.saved().iter().map(|c| c.title.clone()).collect()
    };

    let workspace = CardWorkspace::load(LocalStore::open(&db_path)).await;
    let reloaded: Vec<String> = workspace.editor.saved().iter().map(|c| c.title.clone()).collect();
    assert_eq!(reloaded, in_memory);
    assert_eq!(reloaded[0], "c00");
    assert_eq!(reloaded[39], "c39");
}

#[tokio::test]
async fn test_malformed_import_changes_nothing() {
    let temp_dir = tempdir().unwrap();
    let store = LocalStore::open(database_path(temp_dir.path()));
    let mut workspace = CardWorkspace::load(store.clone()).await;
    workspace.save().await;

    let result = workspace
        .import_json(r#"[{ "title": "ok" }, { "title": 42 }]"#)
        .await;
    assert!(matches!(result, Err(ForgeError::MalformedImport(_))));
    assert_eq!(workspace.editor.saved().len(), 1);
    assert_eq!(store.load_cards().await.len(), 1);
}
