//! Saved Cards Component
//!
//! Lists saved cards; each can be opened in the form or deleted.

use cardforge_core::{inline, templates, CardId};
use dioxus::prelude::*;

use crate::context::{
    notify, use_card_editor, use_inline_icons, use_loaded, use_notices, use_store,
};

#[component]
pub fn SavedCards() -> Element {
    let mut editor = use_card_editor();
    let loaded = use_loaded();
    let store = use_store();
    let notices = use_notices();
    let icons = use_inline_icons();

    let saved = editor.read().saved().to_vec();
    let excerpts: Vec<String> = {
        let icons = icons.read();
        saved
            .iter()
            .map(|card| inline::to_html(&inline::parse(&card.description, &icons.0)))
            .collect()
    };
    let editing = editor.read().editing();

    let open_store = store.clone();
    let open_card = move |id: CardId| {
        let store = open_store.clone();
        spawn(async move {
            let card = editor.peek().saved().iter().find(|c| c.id == id).cloned();
            let Some(card) = card else {
                notify(notices, format!("Card not found: {}", id), true);
                return;
            };
            let overlay = store.load_overlay(id).await;
            editor.write().begin_edit(card, overlay);
        });
    };

    let delete_card = move |id: CardId| {
        let pending = editor.write().delete_from(&store, id);
        spawn(async move {
            if !pending.await {
                notify(notices, format!("Could not delete {} from storage", id), true);
            }
        });
    };

    rsx! {
        div { class: "panel",
            h2 { class: "panel__title", "Saved cards ({saved.len()})" }

            if !loaded().cards {
                p { class: "panel__empty", "Loading..." }
            } else if saved.is_empty() {
                p { class: "panel__empty", "No saved cards yet." }
            }

            ul { class: "saved-list",
                for (card, excerpt) in saved.into_iter().zip(excerpts) {
                    li {
                        key: "{card.id}",
                        class: if editing == Some(card.id) { "saved-item saved-item--active" } else { "saved-item" },
                        style: "--accent: {card.accent_color}",
                        div { class: "saved-item__text",
                            span { class: "saved-item__title",
                                if card.title.trim().is_empty() { "(untitled)" } else { "{card.title}" }
                            }
                            if !excerpt.is_empty() {
                                span { class: "saved-item__excerpt", dangerous_inner_html: "{excerpt}" }
                            }
                        }
                        span { class: "saved-item__template",
                            {templates::find_or_default(&card.template).label}
                        }
                        button {
                            class: "btn btn--small",
                            onclick: {
                                let open_card = open_card.clone();
                                move |_| open_card(card.id)
                            },
                            "Edit"
                        }
                        button {
                            class: "btn btn--small btn--danger",
                            onclick: {
                                let mut delete_card = delete_card.clone();
                                move |_| delete_card(card.id)
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
