//! Core types for cardforge

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use ulid::{Generator, Ulid};

pub mod card;
pub mod deck;
pub mod image;
pub mod tutorial;

pub use card::{CardDesign, CardLayout, PartialCardLayout, Placement, SecondaryIcon, StoredCard};
pub use deck::DeckDesign;
pub use image::ImageSource;
pub use tutorial::{
    BlockEdit, GameProfile, LegacyTutorialPage, PageNumberStyle, StoredPage, TextAlign, TextBlock,
    TutorialPage,
};

// Shared so ids minted within one millisecond still increase.
static ID_GENERATOR: Mutex<Generator> = parking_lot::const_mutex(Generator::new());

/// Next ULID, strictly greater than every one handed out before.
fn next_ulid() -> Ulid {
    ID_GENERATOR.lock().generate().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ULID generator overflowed within one millisecond");
        Ulid::new()
    })
}

/// Unique identifier for a card design
///
/// Uses monotonic ULIDs so that ids sort by creation order, which keeps the
/// card partition in creation order when iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub Ulid);

impl CardId {
    /// Create a new CardId with current timestamp
    pub fn new() -> Self {
        Self(next_ulid())
    }

    /// Storage key for this card
    pub fn to_key(&self) -> String {
        self.0.to_string()
    }

    /// Parse from string representation
    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        let ulid = Ulid::from_string(s)?;
        Ok(Self(ulid))
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub Ulid);

impl DeckId {
    /// Create a new DeckId with current timestamp
    pub fn new() -> Self {
        Self(next_ulid())
    }

    /// Storage key for this deck
    pub fn to_key(&self) -> String {
        self.0.to_string()
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deck_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_unique() {
        assert_ne!(CardId::new(), CardId::new());
    }

    #[test]
    fn test_card_id_key_roundtrip() {
        let id = CardId::new();
        let parsed = CardId::from_string(&id.to_key()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_card_id_rejects_garbage() {
        assert!(CardId::from_string("not-a-ulid").is_err());
    }

    #[test]
    fn test_card_ids_sort_by_creation() {
        let first = CardId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = CardId::new();
        assert!(first.to_key() < second.to_key());
    }

    #[test]
    fn test_card_ids_increase_within_a_millisecond() {
        let ids: Vec<CardId> = (0..200).map(|_| CardId::new()).collect();
        assert!(ids.windows(2).all(|pair| pair[0].to_key() < pair[1].to_key()));
    }

    #[test]
    fn test_deck_id_display() {
        let id = DeckId::new();
        assert!(id.to_string().starts_with("deck_"));
    }
}
