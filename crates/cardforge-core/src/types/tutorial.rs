//! Tutorial pages and the text blocks positioned on them.
//!
//! ## Page shapes
//!
//! Pages are stored in one of two shapes:
//!
//! - **current**: ordered `titles` / `descriptions` block lists plus a
//!   page-number descriptor
//! - **legacy**: exactly two title slots (`titulo1`, `titulo2`) and two text
//!   slots (`texto1`, `texto2`), no positions
//!
//! [`StoredPage`] decodes either shape; [`StoredPage::normalize`] produces the
//! current shape. Nothing outside the storage layer ever sees a legacy page.
//!
//! Shape detection and decoding happen per page: one unreadable page is
//! dropped with a warning, the rest of the list survives.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::ImageSource;
use crate::error::ForgeError;

/// Horizontal alignment of a text block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Center,
    #[default]
    Left,
}

fn default_font_size() -> f32 {
    1.0
}

/// A positioned run of text; used for both titles and descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    /// Percent from the top of the page
    #[serde(default)]
    pub top: f32,
    /// Percent from the left of the page
    #[serde(default)]
    pub left: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self {
            text: String::new(),
            top: 0.0,
            left: 0.0,
            font_size: 1.0,
            width: None,
            line_height: None,
            color: None,
            shadow: false,
            align: TextAlign::Left,
        }
    }
}

impl TextBlock {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn placed(text: String, top: f32, left: f32, font_size: f32) -> Self {
        Self {
            text,
            top,
            left,
            font_size,
            ..Self::default()
        }
    }

    /// Apply one field edit.
    pub fn apply(&mut self, edit: BlockEdit) {
        match edit {
            BlockEdit::Text(text) => self.text = text,
            BlockEdit::Top(top) => self.top = top,
            BlockEdit::Left(left) => self.left = left,
            BlockEdit::FontSize(size) => self.font_size = size,
            BlockEdit::Width(width) => self.width = width,
            BlockEdit::LineHeight(lh) => self.line_height = lh,
            BlockEdit::Color(color) => self.color = color,
            BlockEdit::Shadow(shadow) => self.shadow = shadow,
            BlockEdit::Align(align) => self.align = align,
        }
    }
}

/// A single field edit on a [`TextBlock`]
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEdit {
    Text(String),
    Top(f32),
    Left(f32),
    FontSize(f32),
    Width(Option<f32>),
    LineHeight(Option<f32>),
    Color(Option<String>),
    Shadow(bool),
    Align(TextAlign),
}

/// How page numbers are drawn; shared by every page of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageNumberStyle {
    pub top: f32,
    pub left: f32,
    pub font_size: f32,
    pub align: TextAlign,
    pub visible: bool,
}

impl Default for PageNumberStyle {
    fn default() -> Self {
        Self {
            top: 94.0,
            left: 92.0,
            font_size: 1.2,
            align: TextAlign::Center,
            visible: true,
        }
    }
}

/// One page of a tutorial, in the current shape.
///
/// `titles` and `descriptions` always hold at least one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialPage {
    /// Static asset path of the background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_path: Option<String>,
    /// Uploaded background, re-encoded as a data URI; wins over the path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_blob: Option<String>,
    #[serde(default)]
    pub titles: Vec<TextBlock>,
    #[serde(default)]
    pub descriptions: Vec<TextBlock>,
    #[serde(default)]
    pub page_number: PageNumberStyle,
}

impl TutorialPage {
    /// Empty page with one default title and one default description.
    pub fn blank() -> Self {
        Self {
            background_path: None,
            background_blob: None,
            titles: vec![TextBlock::default()],
            descriptions: vec![TextBlock::default()],
            page_number: PageNumberStyle::default(),
        }
    }

    /// Background to draw, preferring the embedded blob.
    pub fn background(&self) -> Option<ImageSource> {
        self.background_blob
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(|b| ImageSource::DataUri(b.to_string()))
            .or_else(|| {
                self.background_path
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .map(|p| ImageSource::AssetPath(p.to_string()))
            })
    }

    /// Enforce the non-empty block list invariant. Idempotent.
    pub fn normalized(mut self) -> Self {
        if self.titles.is_empty() {
            self.titles.push(TextBlock::default());
        }
        if self.descriptions.is_empty() {
            self.descriptions.push(TextBlock::default());
        }
        self
    }
}

impl Default for TutorialPage {
    fn default() -> Self {
        Self::blank()
    }
}

/// Fixed-slot page shape written by earlier versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTutorialPage {
    #[serde(default)]
    pub titulo1: String,
    #[serde(default)]
    pub titulo2: String,
    #[serde(default)]
    pub texto1: String,
    #[serde(default)]
    pub texto2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem: Option<String>,
}

// Positions given to the fixed legacy slots.
const LEGACY_TITLE_SLOTS: [(f32, f32, f32); 2] = [(6.0, 8.0, 2.4), (16.0, 8.0, 1.6)];
const LEGACY_TEXT_SLOTS: [(f32, f32, f32); 2] = [(58.0, 8.0, 1.1), (76.0, 8.0, 1.1)];

impl LegacyTutorialPage {
    /// Field-by-field conversion into the current shape.
    ///
    /// Slot 1 always becomes the first element; slot 2 becomes a second
    /// element only when it is non-empty.
    pub fn into_current(self) -> TutorialPage {
        let LegacyTutorialPage {
            titulo1,
            titulo2,
            texto1,
            texto2,
            imagem,
        } = self;

        TutorialPage {
            background_path: imagem.filter(|p| !p.is_empty()),
            background_blob: None,
            titles: slots_to_blocks(titulo1, titulo2, LEGACY_TITLE_SLOTS),
            descriptions: slots_to_blocks(texto1, texto2, LEGACY_TEXT_SLOTS),
            page_number: PageNumberStyle::default(),
        }
    }
}

fn slots_to_blocks(first: String, second: String, slots: [(f32, f32, f32); 2]) -> Vec<TextBlock> {
    let (top, left, size) = slots[0];
    let mut blocks = vec![TextBlock::placed(first, top, left, size)];
    if !second.trim().is_empty() {
        let (top, left, size) = slots[1];
        blocks.push(TextBlock::placed(second, top, left, size));
    }
    blocks
}

// Keys that identify each page shape.
const CURRENT_KEYS: [&str; 2] = ["titles", "descriptions"];
const LEGACY_KEYS: [&str; 4] = ["titulo1", "titulo2", "texto1", "texto2"];

/// A page as decoded at the storage boundary.
///
/// Detection is structural: a page carrying `titles` or `descriptions` is
/// current; otherwise a page carrying any of the fixed slots is legacy.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPage {
    Current(TutorialPage),
    Legacy(LegacyTutorialPage),
}

impl<'de> Deserialize<'de> for StoredPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let object = value
            .as_object()
            .ok_or_else(|| D::Error::custom("tutorial page is not an object"))?;

        if CURRENT_KEYS.iter().any(|k| object.contains_key(*k)) {
            serde_json::from_value(value)
                .map(StoredPage::Current)
                .map_err(D::Error::custom)
        } else if LEGACY_KEYS.iter().any(|k| object.contains_key(*k)) {
            serde_json::from_value(value)
                .map(StoredPage::Legacy)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom("tutorial page matches neither page shape"))
        }
    }
}

impl StoredPage {
    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredPage::Legacy(_))
    }

    pub fn normalize(self) -> TutorialPage {
        match self {
            StoredPage::Current(page) => page.normalized(),
            StoredPage::Legacy(page) => page.into_current(),
        }
    }
}

/// Decode a stored page list of either shape, normalizing every page.
///
/// Unreadable pages are skipped. The record is rejected only when it is not
/// a list, or when it has pages and none of them could be read.
pub fn decode_pages(bytes: &[u8]) -> Result<Vec<TutorialPage>, ForgeError> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|e| ForgeError::RecordShape(e.to_string()))?;
    let total = raw.len();

    let mut pages = Vec::with_capacity(total);
    let mut last_error = None;
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<StoredPage>(value) {
            Ok(page) => pages.push(page.normalize()),
            Err(e) => {
                tracing::warn!(page = index, error = %e, "Skipping unreadable tutorial page");
                last_error = Some(e.to_string());
            }
        }
    }

    match last_error {
        Some(error) if pages.is_empty() => Err(ForgeError::RecordShape(error)),
        _ => Ok(pages),
    }
}

/// One of the two tutorial content sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameProfile {
    Core,
    Expansion,
}

impl GameProfile {
    pub const ALL: [GameProfile; 2] = [GameProfile::Core, GameProfile::Expansion];

    /// Bare key; also the key under which the legacy format was stored.
    pub fn key(&self) -> &'static str {
        match self {
            GameProfile::Core => "core",
            GameProfile::Expansion => "expansion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameProfile::Core => "Core game",
            GameProfile::Expansion => "Expansion",
        }
    }

    /// Key of the current-format page list.
    pub fn pages_key(&self) -> String {
        format!("pages/{}", self.key())
    }
}

impl std::str::FromStr for GameProfile {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(GameProfile::Core),
            "expansion" => Ok(GameProfile::Expansion),
            other => Err(ForgeError::UnknownProfile(other.to_string())),
        }
    }
}

impl std::fmt::Display for GameProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block() {
        let block = TextBlock::default();
        assert_eq!(block.text, "");
        assert_eq!((block.top, block.left), (0.0, 0.0));
        assert_eq!(block.font_size, 1.0);
        assert!(!block.shadow);
        assert_eq!(block.align, TextAlign::Left);
    }

    #[test]
    fn test_legacy_minimal_page() {
        let json = r#"{ "titulo1": "A", "texto1": "B" }"#;
        let page = serde_json::from_str::<StoredPage>(json).unwrap();
        assert!(page.is_legacy());

        let page = page.normalize();
        assert_eq!(page.titles.len(), 1);
        assert_eq!(page.titles[0].text, "A");
        assert_eq!(page.descriptions.len(), 1);
        assert_eq!(page.descriptions[0].text, "B");
    }

    #[test]
    fn test_legacy_second_slots_kept_when_filled() {
        let legacy = LegacyTutorialPage {
            titulo1: "Setup".to_string(),
            titulo2: "Players".to_string(),
            texto1: "Shuffle.".to_string(),
            texto2: "Deal five.".to_string(),
            imagem: Some("/models/tutorial/setup.png".to_string()),
        };
        let page = legacy.into_current();
        assert_eq!(page.titles.len(), 2);
        assert_eq!(page.descriptions.len(), 2);
        assert_eq!(page.titles[1].text, "Players");
        assert!(page.titles[0].top < page.titles[1].top);
        assert_eq!(
            page.background(),
            Some(ImageSource::AssetPath("/models/tutorial/setup.png".to_string()))
        );
    }

    #[test]
    fn test_legacy_empty_first_slot_still_yields_one_block() {
        let legacy = LegacyTutorialPage {
            titulo1: String::new(),
            titulo2: "   ".to_string(),
            texto1: String::new(),
            texto2: String::new(),
            imagem: None,
        };
        let page = legacy.into_current();
        assert_eq!(page.titles.len(), 1);
        assert_eq!(page.descriptions.len(), 1);
    }

    #[test]
    fn test_current_page_detected() {
        let json = r#"{ "titles": [{"text": "Hi"}], "descriptions": [] }"#;
        let page = serde_json::from_str::<StoredPage>(json).unwrap();
        assert!(!page.is_legacy());
        let page = page.normalize();
        assert_eq!(page.titles[0].text, "Hi");
        assert_eq!(page.descriptions.len(), 1);
        assert_eq!(page.page_number, PageNumberStyle::default());
    }

    #[test]
    fn test_unknown_shape_rejected() {
        assert!(serde_json::from_str::<StoredPage>(r#"{ "foo": 1 }"#).is_err());
        assert!(serde_json::from_str::<StoredPage>(r#""page""#).is_err());
        assert!(decode_pages(br#"[{ "foo": 1 }]"#).is_err());
        assert!(decode_pages(br#"{ "titles": [] }"#).is_err());
    }

    #[test]
    fn test_current_page_missing_a_list_is_repaired() {
        let json = br#"[
            { "titles": [{"text": "Kept A"}], "descriptions": [{"text": "x"}] },
            { "titles": [{"text": "Page two"}] },
            { "descriptions": [{"text": "Only text"}] }
        ]"#;
        let pages = decode_pages(json).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].titles[0].text, "Kept A");
        assert_eq!(pages[1].titles[0].text, "Page two");
        assert_eq!(pages[1].descriptions, vec![TextBlock::default()]);
        assert_eq!(pages[2].titles, vec![TextBlock::default()]);
        assert_eq!(pages[2].descriptions[0].text, "Only text");
    }

    #[test]
    fn test_legacy_page_without_first_title() {
        let json = r#"{ "titulo2": "", "texto1": "Only text" }"#;
        let page = serde_json::from_str::<StoredPage>(json).unwrap();
        assert!(page.is_legacy());

        let page = page.normalize();
        assert_eq!(page.titles.len(), 1);
        assert_eq!(page.titles[0].text, "");
        assert_eq!(page.descriptions[0].text, "Only text");
    }

    #[test]
    fn test_unreadable_page_skipped_rest_kept() {
        let json = br#"[
            { "titulo1": "Welcome", "texto1": "Hi" },
            { "unrelated": true },
            { "titles": "not a list" },
            { "titles": [{"text": "Current"}], "descriptions": [] }
        ]"#;
        let pages = decode_pages(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].titles[0].text, "Welcome");
        assert_eq!(pages[1].titles[0].text, "Current");
    }

    #[test]
    fn test_empty_list_decodes_empty() {
        assert!(decode_pages(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_idempotent() {
        let page = TutorialPage {
            titles: vec![],
            descriptions: vec![TextBlock::with_text("x")],
            ..TutorialPage::blank()
        };
        let once = page.normalized();
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blob_beats_path() {
        let page = TutorialPage {
            background_path: Some("/models/tutorial/a.png".to_string()),
            background_blob: Some("data:image/webp;base64,AAAA".to_string()),
            ..TutorialPage::blank()
        };
        assert_eq!(page.background().unwrap().image_type(), "data-uri");
    }

    #[test]
    fn test_block_edit() {
        let mut block = TextBlock::default();
        block.apply(BlockEdit::Text("Hello".to_string()));
        block.apply(BlockEdit::Align(TextAlign::Center));
        block.apply(BlockEdit::Width(Some(40.0)));
        assert_eq!(block.text, "Hello");
        assert_eq!(block.align, TextAlign::Center);
        assert_eq!(block.width, Some(40.0));
    }

    #[test]
    fn test_profile_keys() {
        assert_eq!(GameProfile::Core.pages_key(), "pages/core");
        assert_eq!("Expansion".parse::<GameProfile>().unwrap(), GameProfile::Expansion);
        assert!("other".parse::<GameProfile>().is_err());
    }
}
