//! Live previews.
//!
//! Both previews embed the same SVG documents that export rasterizes.

use cardforge_core::compose::{compose_card_svg, compose_page_svg};
use cardforge_core::{templates, CardDesign, Hrefs, TutorialPage};
use dioxus::prelude::*;

use crate::context::use_inline_icons;

#[component]
pub fn CardPreview(card: CardDesign, overlay: Option<String>) -> Element {
    let icons = use_inline_icons();
    let template = templates::find_or_default(&card.template);
    let svg = compose_card_svg(
        &card,
        overlay.as_deref(),
        template,
        &icons.read().0,
        Hrefs::Preview,
    );

    rsx! {
        div { class: "preview preview--card", dangerous_inner_html: "{svg}" }
    }
}

#[component]
pub fn PagePreview(page: TutorialPage, index: usize) -> Element {
    let svg = compose_page_svg(&page, index, Hrefs::Preview);

    rsx! {
        div { class: "preview preview--page", dangerous_inner_html: "{svg}" }
    }
}
