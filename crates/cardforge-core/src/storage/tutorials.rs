//! Tutorial page storage and legacy migration.
//!
//! ## Keys
//!
//! - `pages/<profile>`: current format, a JSON list of pages
//! - `<profile>`: legacy format written by earlier versions, a JSON list of
//!   fixed-slot pages
//!
//! ## Migration
//!
//! Reading a profile prefers the current key. When only the legacy key is
//! present, its pages are converted and written back under the current key
//! in the same transaction that records a migration flag. From then on the
//! current key wins, so each legacy record is migrated at most once. The
//! legacy record itself is left untouched.

use crate::error::ForgeError;
use crate::types::tutorial::decode_pages;
use crate::types::{GameProfile, TutorialPage};
use redb::{ReadableTable, TableDefinition};

use super::{Storage, TUTORIALS_TABLE};

/// Flag table to track migration status (value: unix timestamp, LE bytes)
pub(crate) const MIGRATION_FLAGS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("migration_flags");

fn migration_flag_key(profile: GameProfile) -> String {
    format!("tutorial_legacy/{}", profile.key())
}

/// Outcome of reading a profile's pages
#[derive(Debug, Clone, PartialEq)]
pub enum TutorialLoad {
    /// Current-format record found (pages normalized)
    Current(Vec<TutorialPage>),
    /// Legacy record found, converted and written back
    Migrated(Vec<TutorialPage>),
    /// Nothing stored for this profile
    Missing,
}

impl TutorialLoad {
    /// Pages to edit, or `fallback` when nothing usable is stored.
    ///
    /// The fallback is never persisted here.
    pub fn into_pages_or(self, fallback: Vec<TutorialPage>) -> Vec<TutorialPage> {
        match self {
            TutorialLoad::Current(pages) | TutorialLoad::Migrated(pages) if !pages.is_empty() => {
                pages
            }
            _ => fallback,
        }
    }
}

impl Storage {
    /// Save the full page list of a profile in the current format.
    pub fn save_tutorial(&self, profile: GameProfile, pages: &[TutorialPage]) -> Result<(), ForgeError> {
        let data = serde_json::to_vec(pages)?;
        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut table = write_txn.open_table(TUTORIALS_TABLE)?;
            table.insert(profile.pages_key().as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Read a profile's pages, migrating a legacy record if that is all there is.
    pub fn load_tutorial(&self, profile: GameProfile) -> Result<TutorialLoad, ForgeError> {
        let current_key = profile.pages_key();

        let legacy_bytes = {
            let db = self.db_handle();
            let db_guard = db.read();
            let read_txn = db_guard.begin_read()?;
            let table = read_txn.open_table(TUTORIALS_TABLE)?;

            if let Some(v) = table.get(current_key.as_str())? {
                return Ok(TutorialLoad::Current(decode_pages(v.value())?));
            }
            match table.get(profile.key())? {
                Some(v) => v.value().to_vec(),
                None => return Ok(TutorialLoad::Missing),
            }
        };

        let pages = decode_pages(&legacy_bytes)?;
        self.write_migrated(profile, &pages)
    }

    fn write_migrated(
        &self,
        profile: GameProfile,
        pages: &[TutorialPage],
    ) -> Result<TutorialLoad, ForgeError> {
        let current_key = profile.pages_key();
        let data = serde_json::to_vec(pages)?;

        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut table = write_txn.open_table(TUTORIALS_TABLE)?;

            // Another writer may have saved the current format in between.
            let existing = table.get(current_key.as_str())?.map(|v| v.value().to_vec());
            if let Some(existing) = existing {
                drop(table);
                write_txn.abort()?;
                return Ok(TutorialLoad::Current(decode_pages(&existing)?));
            }

            table.insert(current_key.as_str(), data.as_slice())?;

            let mut flags = write_txn.open_table(MIGRATION_FLAGS_TABLE)?;
            let timestamp = chrono::Utc::now().timestamp().to_le_bytes();
            flags.insert(migration_flag_key(profile).as_str(), timestamp.as_slice())?;
        }
        write_txn.commit()?;

        tracing::info!(
            profile = profile.key(),
            pages = pages.len(),
            "Migrated legacy tutorial pages"
        );
        Ok(TutorialLoad::Migrated(pages.to_vec()))
    }

    /// Check if the legacy record of a profile has been migrated
    pub fn is_tutorial_migrated(&self, profile: GameProfile) -> Result<bool, ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let read_txn = db_guard.begin_read()?;

        match read_txn.open_table(MIGRATION_FLAGS_TABLE) {
            Ok(table) => Ok(table.get(migration_flag_key(profile).as_str())?.is_some()),
            Err(_) => Ok(false), // Table doesn't exist, not migrated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{database_path, Partition};
    use crate::types::TextBlock;
    use tempfile::tempdir;

    const LEGACY: &str = r#"[
        { "titulo1": "Welcome", "texto1": "Draw a card.", "imagem": "/models/tutorial/1.png" },
        { "titulo1": "Combat", "titulo2": "Damage", "texto1": "Roll.", "texto2": "" }
    ]"#;

    #[test]
    fn test_missing_profile() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();

        assert_eq!(storage.load_tutorial(GameProfile::Core).unwrap(), TutorialLoad::Missing);
        // Nothing was written
        assert!(storage.keys(Partition::Tutorials).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_current() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();

        let mut page = TutorialPage::blank();
        page.titles[0] = TextBlock::with_text("Hello");
        storage.save_tutorial(GameProfile::Core, &[page.clone()]).unwrap();

        assert_eq!(
            storage.load_tutorial(GameProfile::Core).unwrap(),
            TutorialLoad::Current(vec![page])
        );
        assert_eq!(
            storage.load_tutorial(GameProfile::Expansion).unwrap(),
            TutorialLoad::Missing
        );
    }

    #[test]
    fn test_legacy_record_is_migrated_once() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();
        storage.put(Partition::Tutorials, "core", LEGACY.as_bytes()).unwrap();

        assert!(!storage.is_tutorial_migrated(GameProfile::Core).unwrap());

        let pages = match storage.load_tutorial(GameProfile::Core).unwrap() {
            TutorialLoad::Migrated(pages) => pages,
            other => panic!("expected migration, got {:?}", other),
        };
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].titles.len(), 1);
        assert_eq!(pages[0].titles[0].text, "Welcome");
        assert_eq!(pages[0].background_path.as_deref(), Some("/models/tutorial/1.png"));
        assert_eq!(pages[1].titles.len(), 2);
        assert_eq!(pages[1].descriptions.len(), 1);

        assert!(storage.is_tutorial_migrated(GameProfile::Core).unwrap());
        assert!(storage.get(Partition::Tutorials, "pages/core").unwrap().is_some());
        // Legacy record is left in place
        assert!(storage.get(Partition::Tutorials, "core").unwrap().is_some());

        // Second read comes from the current format
        assert_eq!(
            storage.load_tutorial(GameProfile::Core).unwrap(),
            TutorialLoad::Current(pages)
        );
    }

    #[test]
    fn test_current_record_wins_over_legacy() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();
        storage.put(Partition::Tutorials, "core", LEGACY.as_bytes()).unwrap();
        storage.save_tutorial(GameProfile::Core, &[TutorialPage::blank()]).unwrap();

        assert_eq!(
            storage.load_tutorial(GameProfile::Core).unwrap(),
            TutorialLoad::Current(vec![TutorialPage::blank()])
        );
        assert!(!storage.is_tutorial_migrated(GameProfile::Core).unwrap());
    }

    #[test]
    fn test_current_record_with_legacy_pages_is_normalized() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();
        let mixed = r#"[
            { "titles": [], "descriptions": [{ "text": "kept" }] },
            { "titulo1": "Old" }
        ]"#;
        storage.put(Partition::Tutorials, "pages/expansion", mixed.as_bytes()).unwrap();

        let TutorialLoad::Current(pages) = storage.load_tutorial(GameProfile::Expansion).unwrap()
        else {
            panic!("expected current record");
        };
        assert_eq!(pages[0].titles.len(), 1);
        assert_eq!(pages[0].descriptions[0].text, "kept");
        assert_eq!(pages[1].titles[0].text, "Old");
        assert_eq!(pages[1].descriptions.len(), 1);
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();
        storage.put(Partition::Tutorials, "core", br#"{"nope": true}"#).unwrap();

        assert!(matches!(
            storage.load_tutorial(GameProfile::Core),
            Err(ForgeError::RecordShape(_))
        ));
        assert!(!storage.is_tutorial_migrated(GameProfile::Core).unwrap());
    }

    #[test]
    fn test_into_pages_or() {
        let fallback = vec![TutorialPage::blank()];
        assert_eq!(TutorialLoad::Missing.into_pages_or(fallback.clone()), fallback);
        assert_eq!(
            TutorialLoad::Current(vec![]).into_pages_or(fallback.clone()),
            fallback
        );
    }
}
