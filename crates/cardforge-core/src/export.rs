//! Card backup, import and image export.
//!
//! - JSON backup holds editable fields only: no ids, timestamps, or artwork
//! - Import is all-or-nothing and assigns fresh ids
//! - Archives render cards one at a time; failures are skipped and counted

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ForgeError, ForgeResult};
use crate::render::Renderer;
use crate::templates;
use crate::types::{CardDesign, CardId, PartialCardLayout, SecondaryIcon, TutorialPage};

/// Editable fields of a card, as written to and read from a JSON backup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardExport {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_icon: Option<SecondaryIcon>,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub number_label: String,
    #[serde(default)]
    pub layout: PartialCardLayout,
}

impl From<&CardDesign> for CardExport {
    fn from(card: &CardDesign) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            template: card.template.clone(),
            icon: card.icon.clone(),
            secondary_icon: card.secondary_icon.clone(),
            accent_color: card.accent_color.clone(),
            skills: card.skills.clone(),
            number_label: card.number_label.clone(),
            layout: card.layout.into(),
        }
    }
}

impl CardExport {
    /// New card with a fresh id, completed from its template
    pub fn into_card(self) -> CardDesign {
        let template = templates::find_or_default(&self.template);
        let mut card = CardDesign::new(template);
        card.title = self.title;
        card.description = self.description;
        card.icon = self.icon;
        card.secondary_icon = self.secondary_icon;
        if !self.accent_color.is_empty() {
            card.accent_color = self.accent_color;
        }
        card.skills = self.skills;
        card.number_label = self.number_label;
        card.layout = self.layout.resolve(&template.layout);
        card
    }
}

/// Serialize saved cards as a pretty JSON array.
pub fn cards_to_json(cards: &[CardDesign]) -> ForgeResult<String> {
    let exports: Vec<CardExport> = cards.iter().map(CardExport::from).collect();
    Ok(serde_json::to_string_pretty(&exports)?)
}

/// Parse a JSON backup into new cards.
///
/// The whole document must be a valid array of cards; otherwise nothing is
/// imported.
pub fn cards_from_json(text: &str) -> ForgeResult<Vec<CardDesign>> {
    let exports: Vec<CardExport> =
        serde_json::from_str(text).map_err(|e| ForgeError::MalformedImport(e.to_string()))?;
    Ok(exports.into_iter().map(CardExport::into_card).collect())
}

/// Render a single card for download.
pub fn render_card_png(
    card: &CardDesign,
    overlay: Option<&str>,
    renderer: &dyn Renderer,
) -> ForgeResult<Vec<u8>> {
    renderer.render_card_png(card, overlay)
}

/// Result of a batch export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub bytes: Vec<u8>,
    pub rendered: usize,
    pub skipped: usize,
}

/// Zip one PNG per card, named after the card title.
pub fn build_card_archive(
    cards: &[CardDesign],
    overlays: &HashMap<CardId, String>,
    renderer: &dyn Renderer,
) -> ForgeResult<ArchiveReport> {
    let entries = cards.iter().map(|card| {
        let overlay = overlays.get(&card.id).map(String::as_str);
        (card.file_stem(), renderer.render_card_png(card, overlay))
    });
    let report = write_archive(entries)?;
    tracing::info!(
        rendered = report.rendered,
        skipped = report.skipped,
        "Built card archive"
    );
    Ok(report)
}

/// Zip one PNG per tutorial page, numbered from 1.
pub fn build_page_archive(
    pages: &[TutorialPage],
    renderer: &dyn Renderer,
) -> ForgeResult<ArchiveReport> {
    let entries = pages.iter().enumerate().map(|(index, page)| {
        (
            format!("page-{:02}", index + 1),
            renderer.render_page_png(page, index),
        )
    });
    let report = write_archive(entries)?;
    tracing::info!(
        rendered = report.rendered,
        skipped = report.skipped,
        "Built tutorial archive"
    );
    Ok(report)
}

/// Entries are consumed lazily so only one rendered image is held at a time.
fn write_archive(
    entries: impl Iterator<Item = (String, ForgeResult<Vec<u8>>)>,
) -> ForgeResult<ArchiveReport> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut used = HashSet::new();
    let mut rendered = 0;
    let mut skipped = 0;

    for (stem, result) in entries {
        let png = match result {
            Ok(png) => png,
            Err(e) => {
                tracing::warn!(name = %stem, error = %e, "Skipping entry that failed to render");
                skipped += 1;
                continue;
            }
        };

        let name = unique_name(&stem, &mut used);
        writer.start_file(name.as_str(), options)?;
        writer.write_all(&png)?;
        rendered += 1;
    }

    let bytes = writer.finish()?.into_inner();
    Ok(ArchiveReport {
        bytes,
        rendered,
        skipped,
    })
}

fn unique_name(stem: &str, used: &mut HashSet<String>) -> String {
    let mut name = format!("{}.png", stem);
    let mut n = 2;
    while used.contains(&name) {
        name = format!("{}-{}.png", stem, n);
        n += 1;
    }
    used.insert(name.clone());
    name
}
