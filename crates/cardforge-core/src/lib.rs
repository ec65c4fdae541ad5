//! cardforge Core Library
//!
//! Local-first composition of trading cards and illustrated tutorial pages.
//!
//! ## Overview
//!
//! Users design cards (title, description, icons, artwork over a template
//! background) and multi-page tutorials, preview them live, keep them in a
//! local database, and export them as PNG images, JSON backups and zip
//! archives. Nothing leaves the machine.
//!
//! ## Core Principles
//!
//! - **Local-first**: everything persists to an embedded redb file
//! - **Never fatal**: storage failures warn and the editor keeps working in memory
//! - **One rendering path**: preview and export share the same SVG composition
//!
//! ## Quick Start
//!
//! ```ignore
//! use cardforge_core::{storage::database_path, CardWorkspace, LocalStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = LocalStore::open(database_path("~/.cardforge"));
//!     let mut workspace = CardWorkspace::load(store).await;
//!
//!     workspace.editor.set_title("Ember");
//!     workspace.editor.set_description("Deal **2** damage [fire]");
//!     workspace.save().await;
//!
//!     for card in workspace.editor.saved() {
//!         println!("{} ({})", card.title, card.template);
//!     }
//! }
//! ```

pub mod catalog;
pub mod compose;
pub mod convert;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod export;
pub mod inline;
pub mod render;
pub mod storage;
pub mod store;
pub mod templates;
pub mod types;

// Re-exports
pub use catalog::{CatalogError, CatalogResponse, IconCatalog, IconEntry};
pub use compose::Hrefs;
pub use debounce::Debouncer;
pub use editor::{CardEditor, CardWorkspace, TutorialEditor};
pub use error::{ForgeError, ForgeResult};
pub use export::{ArchiveReport, CardExport};
pub use render::{Renderer, SvgRasterizer};
pub use storage::{Partition, Storage, TutorialLoad};
pub use store::{LocalStore, StoreWarning};
pub use templates::CardTemplate;
pub use types::{
    BlockEdit, CardDesign, CardId, CardLayout, DeckDesign, DeckId, GameProfile, ImageSource,
    PageNumberStyle, PartialCardLayout, Placement, SecondaryIcon, TextAlign, TextBlock,
    TutorialPage,
};
