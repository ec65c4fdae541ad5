//! Tutorial page editing.
//!
//! Every structural edit rebuilds the page list rather than mutating pages
//! in place, so a previously handed-out snapshot never changes under the
//! caller. Invariants kept by every operation:
//! - at least one page, and each page has at least one title and one description
//! - the active index is in range
//! - all pages share one page-number style

use crate::types::{BlockEdit, GameProfile, PageNumberStyle, TextBlock, TutorialPage};

const NEW_BLOCK_STEP: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TutorialEditor {
    profile: GameProfile,
    pages: Vec<TutorialPage>,
    active: usize,
}

impl TutorialEditor {
    pub fn new(profile: GameProfile, pages: Vec<TutorialPage>) -> Self {
        let mut editor = Self {
            profile,
            pages: Vec::new(),
            active: 0,
        };
        editor.switch_profile(profile, pages);
        editor
    }

    pub fn profile(&self) -> GameProfile {
        self.profile
    }

    pub fn pages(&self) -> &[TutorialPage] {
        &self.pages
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &TutorialPage {
        &self.pages[self.active]
    }

    /// Style shared by every page of the profile
    pub fn page_number(&self) -> PageNumberStyle {
        self.pages
            .first()
            .map(|p| p.page_number)
            .unwrap_or_default()
    }

    /// Replace the pages with those of another profile and select the first.
    pub fn switch_profile(&mut self, profile: GameProfile, pages: Vec<TutorialPage>) {
        let mut pages: Vec<TutorialPage> = pages.into_iter().map(TutorialPage::normalized).collect();
        if pages.is_empty() {
            pages.push(TutorialPage::blank());
        }
        self.profile = profile;
        self.pages = pages;
        self.active = 0;
    }

    pub fn select_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.active = index;
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pages
    // ═══════════════════════════════════════════════════════════════════════

    /// Append a blank page and select it.
    pub fn add_page(&mut self) {
        let page = TutorialPage {
            page_number: self.page_number(),
            ..TutorialPage::blank()
        };
        self.pages = self.pages.iter().cloned().chain(std::iter::once(page)).collect();
        self.active = self.pages.len() - 1;
    }

    /// Remove a page. The last remaining page is never removed.
    pub fn remove_page(&mut self, index: usize) {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return;
        }
        self.pages = self
            .pages
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| p.clone())
            .collect();
        if self.active > index || self.active >= self.pages.len() {
            self.active = self.active.saturating_sub(1);
        }
    }

    /// Apply a style to every page.
    pub fn set_page_number(&mut self, style: PageNumberStyle) {
        self.pages = self
            .pages
            .iter()
            .map(|p| TutorialPage {
                page_number: style,
                ..p.clone()
            })
            .collect();
    }

    pub fn set_background_path(&mut self, path: Option<String>) {
        let path = path.filter(|p| !p.is_empty());
        self.rebuild_active(|page| TutorialPage {
            background_path: path,
            ..page
        });
    }

    /// Uploaded background; takes precedence over the path.
    pub fn set_background_blob(&mut self, blob: Option<String>) {
        let blob = blob.filter(|b| !b.is_empty());
        self.rebuild_active(|page| TutorialPage {
            background_blob: blob,
            ..page
        });
    }

    pub fn clear_background(&mut self) {
        self.rebuild_active(|page| TutorialPage {
            background_path: None,
            background_blob: None,
            ..page
        });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Blocks
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_title(&mut self) {
        self.rebuild_active(|page| TutorialPage {
            titles: with_appended(&page.titles),
            ..page
        });
    }

    /// No-op on the last title of the page.
    pub fn remove_title(&mut self, index: usize) {
        self.rebuild_active(|page| TutorialPage {
            titles: without(&page.titles, index),
            ..page
        });
    }

    pub fn add_description(&mut self) {
        self.rebuild_active(|page| TutorialPage {
            descriptions: with_appended(&page.descriptions),
            ..page
        });
    }

    /// No-op on the last description of the page.
    pub fn remove_description(&mut self, index: usize) {
        self.rebuild_active(|page| TutorialPage {
            descriptions: without(&page.descriptions, index),
            ..page
        });
    }

    pub fn update_title(&mut self, index: usize, edit: BlockEdit) {
        self.rebuild_active(|page| TutorialPage {
            titles: edited(&page.titles, index, edit),
            ..page
        });
    }

    pub fn update_description(&mut self, index: usize, edit: BlockEdit) {
        self.rebuild_active(|page| TutorialPage {
            descriptions: edited(&page.descriptions, index, edit),
            ..page
        });
    }

    fn rebuild_active(&mut self, f: impl FnOnce(TutorialPage) -> TutorialPage) {
        let active = self.active;
        let mut f = Some(f);
        self.pages = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                if i == active {
                    if let Some(f) = f.take() {
                        return f(page.clone());
                    }
                }
                page.clone()
            })
            .collect();
    }
}

/// New block placed just below the last one
fn with_appended(blocks: &[TextBlock]) -> Vec<TextBlock> {
    let block = match blocks.last() {
        Some(last) => TextBlock {
            text: String::new(),
            top: (last.top + NEW_BLOCK_STEP).min(90.0),
            ..last.clone()
        },
        None => TextBlock::default(),
    };
    blocks.iter().cloned().chain(std::iter::once(block)).collect()
}

fn without(blocks: &[TextBlock], index: usize) -> Vec<TextBlock> {
    if blocks.len() <= 1 || index >= blocks.len() {
        return blocks.to_vec();
    }
    blocks
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, b)| b.clone())
        .collect()
}

fn edited(blocks: &[TextBlock], index: usize, edit: BlockEdit) -> Vec<TextBlock> {
    let mut edit = Some(edit);
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let mut block = block.clone();
            if i == index {
                if let Some(edit) = edit.take() {
                    block.apply(edit);
                }
            }
            block
        })
        .collect()
}
