//! Shared state for cardforge components.
//!
//! The App component provides the store, the icon catalog, the editors and a
//! notice list via `use_context_provider`; children pick them up with the
//! `use_*` hooks below.
//!
//! ## Usage
//!
//! ```ignore
//! let store = use_store();
//! let mut editor = use_card_editor();
//!
//! let (card, overlay) = editor.write().commit();
//! spawn(async move {
//!     store.save_card(card, overlay).await;
//! });
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use cardforge_core::{CardEditor, IconCatalog, LocalStore, SvgRasterizer, TutorialEditor};
use dioxus::prelude::*;

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Get the public assets directory.
pub fn get_assets_dir() -> PathBuf {
    crate::get_assets_dir()
}

/// Inline icon ids mapped to their public `src`, for `[id]` description tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineIcons(pub HashMap<String, String>);

/// User-visible messages (storage warnings, export results).
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub is_error: bool,
}

pub fn use_store() -> LocalStore {
    use_context::<LocalStore>()
}

pub fn use_catalog() -> IconCatalog {
    use_context::<IconCatalog>()
}

pub fn use_inline_icons() -> Signal<InlineIcons> {
    use_context::<Signal<InlineIcons>>()
}

pub fn use_card_editor() -> Signal<CardEditor> {
    use_context::<Signal<CardEditor>>()
}

/// Which persisted state has finished loading from the store.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Loaded {
    pub cards: bool,
    pub tutorial: bool,
}

pub fn use_loaded() -> Signal<Loaded> {
    use_context::<Signal<Loaded>>()
}

pub fn use_tutorial_editor() -> Signal<TutorialEditor> {
    use_context::<Signal<TutorialEditor>>()
}

pub fn use_notices() -> Signal<Vec<Notice>> {
    use_context::<Signal<Vec<Notice>>>()
}

/// Push a notice onto the banner.
pub fn notify(mut notices: Signal<Vec<Notice>>, text: impl Into<String>, is_error: bool) {
    let id = notices.peek().iter().map(|n| n.id + 1).max().unwrap_or(0);
    notices.write().push(Notice {
        id,
        text: text.into(),
        is_error,
    });
}

/// Rasterizer for PNG exports, resolving assets and inline icons.
pub fn rasterizer(icons: &InlineIcons) -> SvgRasterizer {
    SvgRasterizer::new(get_assets_dir()).with_icons(icons.0.clone())
}
