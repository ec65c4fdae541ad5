//! Card and overlay storage.
//!
//! Cards live in the `cards` partition as JSON, keyed by card id. The
//! overlay artwork of a card lives in the `overlays` partition under the
//! same key. Save and delete touch both partitions in one transaction so a
//! card never exists without a defined overlay state.

use crate::error::ForgeError;
use crate::types::{CardDesign, CardId, StoredCard};
use redb::ReadableTable;

use super::{Storage, CARDS_TABLE, OVERLAYS_TABLE};

impl Storage {
    /// Upsert a card together with its overlay.
    ///
    /// `overlay: None` removes any overlay previously stored for the card.
    pub fn save_card(&self, card: &CardDesign, overlay: Option<&str>) -> Result<(), ForgeError> {
        let data = serde_json::to_vec(card)?;
        let key = card.id.to_key();

        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut cards = write_txn.open_table(CARDS_TABLE)?;
            let mut overlays = write_txn.open_table(OVERLAYS_TABLE)?;

            cards.insert(key.as_str(), data.as_slice())?;
            match overlay.filter(|o| !o.is_empty()) {
                Some(uri) => {
                    overlays.insert(key.as_str(), uri.as_bytes())?;
                }
                None => {
                    overlays.remove(key.as_str())?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load a single card by id.
    ///
    /// Returns `None` if no card with the given id exists.
    pub fn load_card(&self, id: &CardId) -> Result<Option<CardDesign>, ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let read_txn = db_guard.begin_read()?;
        let table = read_txn.open_table(CARDS_TABLE)?;

        match table.get(id.to_key().as_str())? {
            Some(v) => {
                let stored: StoredCard = serde_json::from_slice(v.value())?;
                Ok(Some(stored.resolve()))
            }
            None => Ok(None),
        }
    }

    /// Load all cards in creation order.
    ///
    /// Records that cannot be decoded are skipped with a warning rather than
    /// hiding every other card.
    pub fn list_cards(&self) -> Result<Vec<CardDesign>, ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let read_txn = db_guard.begin_read()?;
        let table = read_txn.open_table(CARDS_TABLE)?;

        let mut cards = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            match serde_json::from_slice::<StoredCard>(value.value()) {
                Ok(stored) => cards.push(stored.resolve()),
                Err(e) => {
                    tracing::warn!(key = key.value(), error = %e, "Skipping undecodable card record");
                }
            }
        }
        Ok(cards)
    }

    /// Delete a card and its overlay.
    pub fn delete_card(&self, id: &CardId) -> Result<(), ForgeError> {
        let key = id.to_key();

        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut cards = write_txn.open_table(CARDS_TABLE)?;
            let mut overlays = write_txn.open_table(OVERLAYS_TABLE)?;

            cards.remove(key.as_str())?;
            overlays.remove(key.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load the overlay artwork of a card.
    pub fn load_overlay(&self, id: &CardId) -> Result<Option<String>, ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let read_txn = db_guard.begin_read()?;
        let table = read_txn.open_table(OVERLAYS_TABLE)?;

        match table.get(id.to_key().as_str())? {
            Some(v) => {
                let uri = String::from_utf8(v.value().to_vec())
                    .map_err(|e| ForgeError::Serialization(e.to_string()))?;
                Ok(Some(uri))
            }
            None => Ok(None),
        }
    }
}
