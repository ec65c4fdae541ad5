//! UI Components for cardforge.

mod card_form;
mod icon_picker;
pub mod images;
mod nav_header;
mod notice_stack;
mod preview;
mod saved_cards;
mod text_block_editor;

pub use card_form::CardForm;
pub use icon_picker::IconPicker;
pub use images::ImageUpload;
pub use nav_header::{NavHeader, NavLocation};
pub use notice_stack::NoticeStack;
pub use preview::{CardPreview, PagePreview};
pub use saved_cards::SavedCards;
pub use text_block_editor::{PageNumberEditor, TextBlockEditor};
