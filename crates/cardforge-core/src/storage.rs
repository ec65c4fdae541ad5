//! Persistent storage using redb.
//!
//! This module is the only place that talks to the storage engine. It
//! provides:
//! - Four named partitions (overlays, cards, decks, tutorials)
//! - Uniform per-partition `get` / `put` / `delete` / `clear` primitives,
//!   each running in its own transaction
//! - Typed card, deck and tutorial operations (see submodules)
//! - A schema version recorded on open
//!
//! Callers that must never fail go through [`crate::store::LocalStore`].

use crate::error::ForgeError;
use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Submodules
mod cards;
mod decks;
mod tutorials;

pub use tutorials::TutorialLoad;

use tutorials::MIGRATION_FLAGS_TABLE;

/// Schema version written by this build
pub const SCHEMA_VERSION: u64 = 2;

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "cardforge.redb";

const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");
const SCHEMA_VERSION_KEY: &str = "schema_version";

const OVERLAYS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("overlays");
const CARDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cards");
const DECKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("decks");
const TUTORIALS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("tutorials");

/// Path of the database file for a data directory
pub fn database_path(data_dir: impl AsRef<Path>) -> PathBuf {
    data_dir.as_ref().join(DATABASE_FILE)
}

/// Independently addressable named collection within the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Card id -> overlay artwork data URI
    Overlays,
    /// Card id -> card record
    Cards,
    /// Deck id -> deck record
    Decks,
    /// Profile key -> tutorial page list
    Tutorials,
}

impl Partition {
    pub const ALL: [Partition; 4] = [
        Partition::Overlays,
        Partition::Cards,
        Partition::Decks,
        Partition::Tutorials,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Partition::Overlays => "overlays",
            Partition::Cards => "cards",
            Partition::Decks => "decks",
            Partition::Tutorials => "tutorials",
        }
    }

    fn table(&self) -> TableDefinition<'static, &'static str, &'static [u8]> {
        match self {
            Partition::Overlays => OVERLAYS_TABLE,
            Partition::Cards => CARDS_TABLE,
            Partition::Decks => DECKS_TABLE,
            Partition::Tutorials => TUTORIALS_TABLE,
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Open (creating on first use) the database at `path`.
    ///
    /// This will:
    /// - Create the parent directory if it doesn't exist
    /// - Create every partition that is missing, leaving existing data alone
    /// - Record [`SCHEMA_VERSION`] if the stored version is older
    ///
    /// Opening an already-current database is a no-op apart from the open itself.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ForgeError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            for partition in Partition::ALL {
                let _ = write_txn.open_table(partition.table())?;
            }
            let _ = write_txn.open_table(MIGRATION_FLAGS_TABLE)?;

            let mut meta = write_txn.open_table(META_TABLE)?;
            let stored = meta.get(SCHEMA_VERSION_KEY)?.map(|v| v.value());
            match stored {
                Some(version) if version >= SCHEMA_VERSION => {}
                previous => {
                    tracing::info!(
                        from = ?previous,
                        to = SCHEMA_VERSION,
                        "Upgrading storage schema version"
                    );
                    meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION)?;
                }
            }
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    /// Get a reference to the shared database handle
    pub fn db_handle(&self) -> Arc<RwLock<Database>> {
        self.db.clone()
    }

    /// Schema version recorded in the database
    pub fn schema_version(&self) -> Result<u64, ForgeError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let meta = read_txn.open_table(META_TABLE)?;
        Ok(meta.get(SCHEMA_VERSION_KEY)?.map(|v| v.value()).unwrap_or(0))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Partition Primitives
    // ═══════════════════════════════════════════════════════════════════════

    /// Read one value. Returns `None` if the key is absent.
    pub fn get(&self, partition: Partition, key: &str) -> Result<Option<Vec<u8>>, ForgeError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(partition.table())?;

        Ok(table.get(key)?.map(|v| v.value().to_vec()))
    }

    /// Write one value, replacing any previous value for the key.
    pub fn put(&self, partition: Partition, key: &str, value: &[u8]) -> Result<(), ForgeError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(partition.table())?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove one key. Returns `Ok(())` even if the key doesn't exist.
    pub fn delete(&self, partition: Partition, key: &str) -> Result<(), ForgeError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(partition.table())?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove every key of a partition. Returns the number of removed entries.
    pub fn clear(&self, partition: Partition) -> Result<usize, ForgeError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(partition.table())?;
            let keys = {
                let mut keys = Vec::new();
                for entry in table.iter()? {
                    let (key, _) = entry?;
                    keys.push(key.value().to_string());
                }
                keys
            };
            for key in &keys {
                table.remove(key.as_str())?;
            }
            removed = keys.len();
        }
        write_txn.commit()?;
        Ok(removed)
    }

    /// All keys of a partition, in key order.
    pub fn keys(&self, partition: Partition) -> Result<Vec<String>, ForgeError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(partition.table())?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_can_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("test.redb"));
        assert!(storage.is_ok());
    }

    #[test]
    fn test_storage_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested/path/to/test.redb");
        let storage = Storage::open(&db_path);
        assert!(storage.is_ok());
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_records_schema_version() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = database_path(temp_dir.path());
        {
            let storage = Storage::open(&db_path).unwrap();
            storage.put(Partition::Decks, "d1", b"deck").unwrap();
        }
        let storage = Storage::open(&db_path).unwrap();
        assert_eq!(
            storage.get(Partition::Decks, "d1").unwrap(),
            Some(b"deck".to_vec())
        );
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_upgrade_from_older_version() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = database_path(temp_dir.path());

        // A version-1 database only had the tutorials table.
        {
            let db = Database::create(&db_path).unwrap();
            let txn = db.begin_write().unwrap();
            {
                let mut meta = txn.open_table(META_TABLE).unwrap();
                meta.insert(SCHEMA_VERSION_KEY, 1u64).unwrap();
                let mut tutorials = txn.open_table(TUTORIALS_TABLE).unwrap();
                tutorials.insert("core", b"[]".as_slice()).unwrap();
            }
            txn.commit().unwrap();
        }

        let storage = Storage::open(&db_path).unwrap();
        assert_eq!(storage.schema_version().unwrap(), SCHEMA_VERSION);
        assert_eq!(
            storage.get(Partition::Tutorials, "core").unwrap(),
            Some(b"[]".to_vec())
        );
        for partition in Partition::ALL {
            assert!(storage.keys(partition).is_ok(), "{} missing", partition);
        }
    }

    #[test]
    fn test_put_get_delete() {
        let (storage, _temp) = create_test_storage();

        storage.put(Partition::Overlays, "k", b"v1").unwrap();
        storage.put(Partition::Overlays, "k", b"v2").unwrap();
        assert_eq!(
            storage.get(Partition::Overlays, "k").unwrap(),
            Some(b"v2".to_vec())
        );

        storage.delete(Partition::Overlays, "k").unwrap();
        assert_eq!(storage.get(Partition::Overlays, "k").unwrap(), None);

        // Deleting again is fine
        storage.delete(Partition::Overlays, "k").unwrap();
    }

    #[test]
    fn test_partitions_are_independent() {
        let (storage, _temp) = create_test_storage();

        storage.put(Partition::Cards, "same", b"card").unwrap();
        storage.put(Partition::Overlays, "same", b"overlay").unwrap();

        assert_eq!(
            storage.get(Partition::Cards, "same").unwrap(),
            Some(b"card".to_vec())
        );
        storage.clear(Partition::Cards).unwrap();
        assert_eq!(storage.get(Partition::Cards, "same").unwrap(), None);
        assert_eq!(
            storage.get(Partition::Overlays, "same").unwrap(),
            Some(b"overlay".to_vec())
        );
    }

    #[test]
    fn test_clear_counts_entries() {
        let (storage, _temp) = create_test_storage();
        for key in ["a", "b", "c"] {
            storage.put(Partition::Decks, key, b"x").unwrap();
        }
        assert_eq!(storage.clear(Partition::Decks).unwrap(), 3);
        assert!(storage.keys(Partition::Decks).unwrap().is_empty());
        assert_eq!(storage.clear(Partition::Decks).unwrap(), 0);
    }
}
