//! Property-based tests for tutorial page normalization and editing
//!
//! Uses proptest to verify the page invariants that must survive any stored
//! record and any sequence of editor operations.

use cardforge_core::inline;
use cardforge_core::types::tutorial::{decode_pages, LegacyTutorialPage, StoredPage};
use cardforge_core::{BlockEdit, GameProfile, TextBlock, TutorialEditor, TutorialPage};
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Strategy Generators
// ============================================================================

fn short_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,*\\[\\]]{0,40}").expect("valid regex")
}

fn block_strategy() -> impl Strategy<Value = TextBlock> {
    (short_text_strategy(), 0.0f32..100.0, 0.0f32..100.0, 0.5f32..4.0, any::<bool>()).prop_map(
        |(text, top, left, font_size, shadow)| TextBlock {
            text,
            top,
            left,
            font_size,
            shadow,
            ..TextBlock::default()
        },
    )
}

/// Current-format pages, including ones with empty block lists
fn page_strategy() -> impl Strategy<Value = TutorialPage> {
    (
        prop::collection::vec(block_strategy(), 0..4),
        prop::collection::vec(block_strategy(), 0..4),
    )
        .prop_map(|(titles, descriptions)| TutorialPage {
            titles,
            descriptions,
            ..TutorialPage::blank()
        })
}

fn legacy_strategy() -> impl Strategy<Value = LegacyTutorialPage> {
    (
        short_text_strategy(),
        short_text_strategy(),
        short_text_strategy(),
        short_text_strategy(),
    )
        .prop_map(|(titulo1, titulo2, texto1, texto2)| LegacyTutorialPage {
            titulo1,
            titulo2,
            texto1,
            texto2,
            imagem: None,
        })
}

/// Operations that can be performed on a TutorialEditor
#[derive(Debug, Clone)]
enum EditOp {
    AddPage,
    RemovePage(usize),
    SelectPage(usize),
    AddTitle,
    RemoveTitle(usize),
    AddDescription,
    RemoveDescription(usize),
    EditTitle(usize, String),
}

fn edit_ops_strategy(max_ops: usize) -> impl Strategy<Value = Vec<EditOp>> {
    prop::collection::vec(
        prop_oneof![
            2 => Just(EditOp::AddPage),
            2 => (0..6usize).prop_map(EditOp::RemovePage),
            1 => (0..6usize).prop_map(EditOp::SelectPage),
            2 => Just(EditOp::AddTitle),
            2 => (0..6usize).prop_map(EditOp::RemoveTitle),
            2 => Just(EditOp::AddDescription),
            2 => (0..6usize).prop_map(EditOp::RemoveDescription),
            1 => (0..6usize, short_text_strategy()).prop_map(|(i, t)| EditOp::EditTitle(i, t)),
        ],
        0..max_ops,
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Normalizing an already normalized page changes nothing
    #[test]
    fn normalize_is_idempotent(page in page_strategy()) {
        let once = page.normalized();
        let twice = once.clone().normalized();
        prop_assert_eq!(once, twice);
    }

    /// Normalized pages always have a title and a description
    #[test]
    fn normalized_lists_are_non_empty(page in page_strategy()) {
        let page = page.normalized();
        prop_assert!(!page.titles.is_empty());
        prop_assert!(!page.descriptions.is_empty());
    }

    /// Legacy pages convert to one or two blocks per list, slot 1 first
    #[test]
    fn legacy_conversion_shape(legacy in legacy_strategy()) {
        let first_title = legacy.titulo1.clone();
        let has_second = !legacy.titulo2.trim().is_empty();
        let page = legacy.into_current();

        prop_assert_eq!(&page.titles[0].text, &first_title);
        prop_assert_eq!(page.titles.len(), if has_second { 2 } else { 1 });
        prop_assert!(!page.descriptions.is_empty() && page.descriptions.len() <= 2);
    }

    /// Stored records decode through the tagged step and stay stable on re-encode
    #[test]
    fn decode_reencode_is_stable(pages in prop::collection::vec(page_strategy(), 1..4)) {
        let bytes = serde_json::to_vec(&pages).unwrap();
        let decoded = decode_pages(&bytes).unwrap();
        let again = decode_pages(&serde_json::to_vec(&decoded).unwrap()).unwrap();
        prop_assert_eq!(decoded, again);
    }

    /// A legacy page is always detected as legacy
    #[test]
    fn legacy_is_detected(legacy in legacy_strategy()) {
        let json = serde_json::to_string(&legacy).unwrap();
        let stored: StoredPage = serde_json::from_str(&json).unwrap();
        prop_assert!(stored.is_legacy());
    }

    /// No sequence of edits breaks the editor invariants
    #[test]
    fn editor_invariants_hold(ops in edit_ops_strategy(40)) {
        let mut editor = TutorialEditor::new(GameProfile::Core, vec![TutorialPage::blank()]);
        for op in ops {
            match op {
                EditOp::AddPage => editor.add_page(),
                EditOp::RemovePage(i) => editor.remove_page(i),
                EditOp::SelectPage(i) => editor.select_page(i),
                EditOp::AddTitle => editor.add_title(),
                EditOp::RemoveTitle(i) => editor.remove_title(i),
                EditOp::AddDescription => editor.add_description(),
                EditOp::RemoveDescription(i) => editor.remove_description(i),
                EditOp::EditTitle(i, text) => editor.update_title(i, BlockEdit::Text(text)),
            }

            prop_assert!(!editor.pages().is_empty());
            prop_assert!(editor.active_index() < editor.pages().len());
            for page in editor.pages() {
                prop_assert!(!page.titles.is_empty());
                prop_assert!(!page.descriptions.is_empty());
                prop_assert_eq!(page.page_number, editor.page_number());
            }
        }
    }

    /// Inline parsing never loses text when no markup applies
    #[test]
    fn inline_plain_text_preserved(text in "[a-zA-Z0-9 .,]{0,80}") {
        let segments = inline::parse(&text, &HashMap::new());
        let joined: String = segments
            .iter()
            .map(|s| match s {
                inline::Inline::Text(t) => t.clone(),
                other => panic!("unexpected segment {:?}", other),
            })
            .collect();
        prop_assert_eq!(joined, text);
    }
}
