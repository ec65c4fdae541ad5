//! Deck storage (reserved partition).

use crate::error::ForgeError;
use crate::types::{CardId, DeckDesign, DeckId};
use redb::ReadableTable;

use super::{Storage, DECKS_TABLE};

impl Storage {
    /// Save a deck, overwriting any deck with the same id.
    pub fn save_deck(&self, deck: &DeckDesign) -> Result<(), ForgeError> {
        let data = serde_json::to_vec(deck)?;
        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut table = write_txn.open_table(DECKS_TABLE)?;
            table.insert(deck.id.to_key().as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Load all decks.
    pub fn list_decks(&self) -> Result<Vec<DeckDesign>, ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let read_txn = db_guard.begin_read()?;
        let table = read_txn.open_table(DECKS_TABLE)?;

        let mut decks = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            decks.push(serde_json::from_slice(value.value())?);
        }
        Ok(decks)
    }

    pub fn delete_deck(&self, id: &DeckId) -> Result<(), ForgeError> {
        let db = self.db_handle();
        let db_guard = db.read();
        let write_txn = db_guard.begin_write()?;
        {
            let mut table = write_txn.open_table(DECKS_TABLE)?;
            table.remove(id.to_key().as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a deleted card from every deck that references it.
    ///
    /// Returns the number of decks that changed.
    pub fn forget_card_in_decks(&self, card: &CardId) -> Result<usize, ForgeError> {
        let mut changed = 0;
        for mut deck in self.list_decks()? {
            if deck.forget_card(card) {
                self.save_deck(&deck)?;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database_path;
    use tempfile::tempdir;

    #[test]
    fn test_deck_roundtrip_and_forget() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::open(database_path(temp_dir.path())).unwrap();

        let card = CardId::new();
        let mut deck = DeckDesign::new("Starter");
        deck.card_ids.push(card);
        storage.save_deck(&deck).unwrap();

        assert_eq!(storage.list_decks().unwrap(), vec![deck.clone()]);
        assert_eq!(storage.forget_card_in_decks(&card).unwrap(), 1);
        assert!(storage.list_decks().unwrap()[0].card_ids.is_empty());

        storage.delete_deck(&deck.id).unwrap();
        assert!(storage.list_decks().unwrap().is_empty());
    }
}
