//! Deck Design - a named selection of cards
//!
//! The deck partition is reserved: records keep a stable shape so a future
//! deck builder can read them, but no editor writes decks yet.

use serde::{Deserialize, Serialize};

use super::{CardId, DeckId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckDesign {
    pub id: DeckId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl DeckDesign {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DeckId::new(),
            name: name.into(),
            card_ids: Vec::new(),
        }
    }

    /// Drop references to a card that no longer exists.
    pub fn forget_card(&mut self, id: &CardId) -> bool {
        let before = self.card_ids.len();
        self.card_ids.retain(|c| c != id);
        before != self.card_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forget_card() {
        let mut deck = DeckDesign::new("Starter");
        let keep = CardId::new();
        let drop = CardId::new();
        deck.card_ids = vec![keep, drop];

        assert!(deck.forget_card(&drop));
        assert_eq!(deck.card_ids, vec![keep]);
        assert!(!deck.forget_card(&drop));
    }
}
