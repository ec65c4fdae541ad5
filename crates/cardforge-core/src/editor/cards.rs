//! Card editing: the form, its artwork, and the saved card list.
//!
//! Operations that also touch the store are split in two: the editor state
//! changes right away, and the returned future performs the write. The
//! future owns everything it needs, so callers may drop their borrow of the
//! editor before awaiting it.

use std::future::Future;

use crate::error::{ForgeError, ForgeResult};
use crate::export;
use crate::store::LocalStore;
use crate::templates::{self, CardTemplate};
use crate::types::{CardDesign, CardId, SecondaryIcon};

/// In-memory card editing state
#[derive(Debug, Clone, PartialEq)]
pub struct CardEditor {
    form: CardDesign,
    overlay: Option<String>,
    saved: Vec<CardDesign>,
    editing: Option<CardId>,
}

impl Default for CardEditor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CardEditor {
    /// Start with a blank form over the given saved cards.
    pub fn new(saved: Vec<CardDesign>) -> Self {
        Self {
            form: CardDesign::new(templates::default_template()),
            overlay: None,
            saved,
            editing: None,
        }
    }

    pub fn form(&self) -> &CardDesign {
        &self.form
    }

    /// Direct access for layout fine-tuning
    pub fn form_mut(&mut self) -> &mut CardDesign {
        &mut self.form
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub fn saved(&self) -> &[CardDesign] {
        &self.saved
    }

    /// Id of the saved card loaded in the form, if any
    pub fn editing(&self) -> Option<CardId> {
        self.editing
    }

    pub fn replace_saved(&mut self, saved: Vec<CardDesign>) {
        self.saved = saved;
    }

    /// Reset the form to a blank card of `template`.
    pub fn new_card(&mut self, template: &CardTemplate) {
        self.form = CardDesign::new(template);
        self.overlay = None;
        self.editing = None;
    }

    /// Bind the form to another template, re-copying its layout.
    ///
    /// An accent colour still at the old template's default follows the new
    /// template. Returns `false` for an unknown template id.
    pub fn set_template(&mut self, id: &str) -> bool {
        let Some(template) = templates::find(id) else {
            return false;
        };
        if self.form.accent_color == self.form.bound_template().accent {
            self.form.accent_color = template.accent.to_string();
        }
        self.form.apply_template(template);
        true
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn set_icon(&mut self, src: impl Into<String>) {
        self.form.icon = src.into();
    }

    pub fn set_secondary_icon(&mut self, icon: Option<SecondaryIcon>) {
        self.form.secondary_icon = icon;
    }

    pub fn set_accent_color(&mut self, color: impl Into<String>) {
        self.form.accent_color = color.into();
    }

    pub fn set_number_label(&mut self, label: impl Into<String>) {
        self.form.number_label = label.into();
    }

    /// Add the skill if missing, remove it otherwise.
    pub fn toggle_skill(&mut self, skill: &str) {
        if let Some(pos) = self.form.skills.iter().position(|s| s == skill) {
            self.form.skills.remove(pos);
        } else {
            self.form.skills.push(skill.to_string());
        }
    }

    pub fn set_overlay(&mut self, overlay: Option<String>) {
        self.overlay = overlay.filter(|o| !o.is_empty());
    }

    /// Upsert the form into the saved list.
    ///
    /// Returns the card and overlay to persist.
    pub fn commit(&mut self) -> (CardDesign, Option<String>) {
        self.form.touch();
        let card = self.form.clone();

        match self.saved.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => self.saved.push(card.clone()),
        }
        self.editing = Some(card.id);

        (card, self.overlay.clone())
    }

    /// Load a saved card and its artwork into the form.
    pub fn begin_edit(&mut self, card: CardDesign, overlay: Option<String>) {
        self.editing = Some(card.id);
        self.form = card;
        self.set_overlay(overlay);
    }

    /// Drop a card from the saved list, resetting the form if it was open.
    ///
    /// Returns `false` if no such card was saved.
    pub fn remove(&mut self, id: CardId) -> bool {
        let before = self.saved.len();
        self.saved = self.saved.iter().filter(|c| c.id != id).cloned().collect();

        if self.editing == Some(id) || self.form.id == id {
            let template = self.form.bound_template();
            self.new_card(template);
        }
        self.saved.len() != before
    }

    /// Append imported cards under fresh ids; returns the appended cards.
    pub fn import(&mut self, cards: Vec<CardDesign>) -> Vec<CardDesign> {
        let fresh: Vec<CardDesign> = cards.into_iter().map(CardDesign::with_fresh_id).collect();
        self.saved.extend(fresh.iter().cloned());
        fresh
    }

    /// Commit the form; the returned future persists it with its artwork.
    ///
    /// The in-memory list is updated even when persistence fails.
    pub fn commit_to(&mut self, store: &LocalStore) -> impl Future<Output = bool> + 'static {
        let (card, overlay) = self.commit();
        let store = store.clone();
        async move { store.save_card(card, overlay).await }
    }

    /// Drop a card from the list; the returned future deletes it, its
    /// overlay and its deck references from the store.
    pub fn delete_from(
        &mut self,
        store: &LocalStore,
        id: CardId,
    ) -> impl Future<Output = bool> + 'static {
        self.remove(id);
        let store = store.clone();
        async move {
            let deleted = store.delete_card(id).await;
            if deleted {
                tracing::info!(%id, "Deleted card");
            }
            deleted
        }
    }

    /// Append the cards of a JSON backup under fresh ids; the returned
    /// future saves them in file order and yields how many were appended.
    ///
    /// A malformed document is rejected before anything changes.
    pub fn import_json_into(
        &mut self,
        store: &LocalStore,
        text: &str,
    ) -> ForgeResult<impl Future<Output = usize> + 'static> {
        let cards = export::cards_from_json(text)?;
        let appended = self.import(cards);
        let store = store.clone();
        Ok(async move {
            let count = appended.len();
            for card in appended {
                store.save_card(card, None).await;
            }
            tracing::info!(cards = count, "Imported cards");
            count
        })
    }
}

/// A [`CardEditor`] wired to local persistence
#[derive(Clone)]
pub struct CardWorkspace {
    pub editor: CardEditor,
    store: LocalStore,
}

impl CardWorkspace {
    /// Load saved cards from the store.
    pub async fn load(store: LocalStore) -> Self {
        let saved = store.load_cards().await;
        tracing::debug!(cards = saved.len(), "Loaded saved cards");
        Self {
            editor: CardEditor::new(saved),
            store,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Commit the form and persist it with its artwork.
    ///
    /// The in-memory list is updated even when persistence fails.
    pub async fn save(&mut self) -> bool {
        self.editor.commit_to(&self.store).await
    }

    /// Open a saved card, fetching its artwork.
    pub async fn open_for_edit(&mut self, id: CardId) -> ForgeResult<()> {
        let card = self
            .editor
            .saved()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ForgeError::CardNotFound(id.to_string()))?;
        let overlay = self.store.load_overlay(id).await;
        self.editor.begin_edit(card, overlay);
        Ok(())
    }

    /// Delete from memory, the card partition and the overlay partition.
    pub async fn delete(&mut self, id: CardId) -> bool {
        self.editor.delete_from(&self.store, id).await
    }

    /// Import a JSON backup. Nothing changes if the document is malformed.
    pub async fn import_json(&mut self, text: &str) -> ForgeResult<usize> {
        let pending = self.editor.import_json_into(&self.store, text)?;
        Ok(pending.await)
    }
}
