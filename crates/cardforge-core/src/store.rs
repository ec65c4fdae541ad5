//! Non-fatal async facade over [`Storage`].
//!
//! The editors persist through `LocalStore`. Every operation:
//! - runs on the blocking pool so the UI thread never waits on disk
//! - logs failures and publishes a [`StoreWarning`]
//! - resolves to a no-op / empty result instead of an error
//!
//! When the database cannot be opened the store runs in memory-only mode:
//! reads are empty, writes are dropped, and the reason is reported once.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::ForgeResult;
use crate::storage::{Partition, Storage};
use crate::types::{CardDesign, CardId, DeckDesign, DeckId, GameProfile, TutorialPage};

/// User-visible, non-fatal persistence problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWarning {
    /// No persistence in this environment; editing continues in memory
    Unavailable(String),
    /// A single operation failed (quota, lock, corrupt record, ...)
    OperationFailed {
        operation: &'static str,
        message: String,
    },
}

impl std::fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreWarning::Unavailable(reason) => {
                write!(f, "Local storage unavailable, changes will not be kept: {}", reason)
            }
            StoreWarning::OperationFailed { operation, message } => {
                write!(f, "Could not {}: {}", operation, message)
            }
        }
    }
}

/// Handle to local persistence; cheap to clone.
#[derive(Clone)]
pub struct LocalStore {
    storage: Option<Storage>,
    unavailable: Option<Arc<str>>,
    warnings: broadcast::Sender<StoreWarning>,
}

impl LocalStore {
    /// Open the database at `path`, falling back to memory-only mode.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Storage::open(path) {
            Ok(storage) => {
                debug!(path = %path.display(), "Local store opened");
                Self::with_storage(storage)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Local store unavailable, running in memory only");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn with_storage(storage: Storage) -> Self {
        let (warnings, _) = broadcast::channel(16);
        Self {
            storage: Some(storage),
            unavailable: None,
            warnings,
        }
    }

    /// Memory-only store: every read is empty, every write is dropped.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let (warnings, _) = broadcast::channel(16);
        Self {
            storage: None,
            unavailable: Some(Arc::from(reason.into())),
            warnings,
        }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    /// Why persistence is unavailable, reported once at startup.
    pub fn unavailable_warning(&self) -> Option<StoreWarning> {
        self.unavailable
            .as_ref()
            .map(|reason| StoreWarning::Unavailable(reason.to_string()))
    }

    /// Subscribe to operation warnings.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreWarning> {
        self.warnings.subscribe()
    }

    /// Underlying storage, when available.
    pub fn storage(&self) -> Option<&Storage> {
        self.storage.as_ref()
    }

    async fn run<T, F>(&self, operation: &'static str, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&Storage) -> ForgeResult<T> + Send + 'static,
    {
        let storage = self.storage.clone()?;

        let message = match tokio::task::spawn_blocking(move || f(&storage)).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };

        warn!(operation, error = %message, "Storage operation failed");
        // No subscribers is fine: the warning is already logged.
        let _ = self
            .warnings
            .send(StoreWarning::OperationFailed { operation, message });
        None
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Partition Primitives
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn get(&self, partition: Partition, key: &str) -> Option<Vec<u8>> {
        let key = key.to_string();
        self.run("read from storage", move |s| s.get(partition, &key))
            .await
            .flatten()
    }

    /// Returns `true` when the value was written.
    pub async fn put(&self, partition: Partition, key: &str, value: Vec<u8>) -> bool {
        let key = key.to_string();
        self.run("write to storage", move |s| s.put(partition, &key, &value))
            .await
            .is_some()
    }

    pub async fn delete(&self, partition: Partition, key: &str) -> bool {
        let key = key.to_string();
        self.run("delete from storage", move |s| s.delete(partition, &key))
            .await
            .is_some()
    }

    pub async fn clear(&self, partition: Partition) -> bool {
        self.run("clear storage", move |s| s.clear(partition))
            .await
            .is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Cards
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn load_cards(&self) -> Vec<CardDesign> {
        self.run("load saved cards", |s| s.list_cards())
            .await
            .unwrap_or_default()
    }

    pub async fn load_overlay(&self, id: CardId) -> Option<String> {
        self.run("load card artwork", move |s| s.load_overlay(&id))
            .await
            .flatten()
    }

    /// Upsert a card and write (or clear) its overlay.
    pub async fn save_card(&self, card: CardDesign, overlay: Option<String>) -> bool {
        self.run("save card", move |s| s.save_card(&card, overlay.as_deref()))
            .await
            .is_some()
    }

    /// Remove a card, its overlay, and its deck references.
    pub async fn delete_card(&self, id: CardId) -> bool {
        self.run("delete card", move |s| {
            s.delete_card(&id)?;
            s.forget_card_in_decks(&id)?;
            Ok(())
        })
        .await
        .is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Decks
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn load_decks(&self) -> Vec<DeckDesign> {
        self.run("load decks", |s| s.list_decks())
            .await
            .unwrap_or_default()
    }

    pub async fn save_deck(&self, deck: DeckDesign) -> bool {
        self.run("save deck", move |s| s.save_deck(&deck))
            .await
            .is_some()
    }

    pub async fn delete_deck(&self, id: DeckId) -> bool {
        self.run("delete deck", move |s| s.delete_deck(&id))
            .await
            .is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Tutorials
    // ═══════════════════════════════════════════════════════════════════════

    /// Pages of `profile`, migrating legacy data on the way.
    ///
    /// Returns `fallback` unmodified (and unsaved) when nothing usable is stored.
    pub async fn load_tutorial(
        &self,
        profile: GameProfile,
        fallback: Vec<TutorialPage>,
    ) -> Vec<TutorialPage> {
        match self
            .run("load tutorial pages", move |s| s.load_tutorial(profile))
            .await
        {
            Some(load) => load.into_pages_or(fallback),
            None => fallback,
        }
    }

    pub async fn save_tutorial(&self, profile: GameProfile, pages: Vec<TutorialPage>) -> bool {
        self.run("save tutorial pages", move |s| s.save_tutorial(profile, &pages))
            .await
            .is_some()
    }
}
