//! Card Form Component
//!
//! Every editable field of the card in the editor. Changes go straight to the
//! shared [`CardEditor`](cardforge_core::CardEditor) signal, so the preview
//! follows each keystroke.

use cardforge_core::{convert, templates, IconEntry, SecondaryIcon};
use dioxus::prelude::*;

use crate::components::{IconPicker, ImageUpload};
use crate::context::use_card_editor;

/// Skills offered as toggles
const SKILLS: &[&str] = &["burn", "haste", "shield", "heal", "draw", "stealth", "freeze"];

#[component]
pub fn CardForm() -> Element {
    let mut editor = use_card_editor();

    let card = editor.read().form().clone();
    let has_overlay = editor.read().overlay().is_some();
    let secondary_src = card
        .secondary_icon
        .as_ref()
        .map(|s| s.src.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "panel",
            h2 { class: "panel__title",
                if editor.read().editing().is_some() { "Edit card" } else { "New card" }
            }

            div { class: "form-field",
                label { "Template" }
                select {
                    value: "{card.template}",
                    onchange: move |evt: FormEvent| {
                        editor.write().set_template(&evt.value());
                    },
                    for template in templates::TEMPLATES {
                        option {
                            key: "{template.id}",
                            value: "{template.id}",
                            selected: template.id == card.template,
                            "{template.label}"
                        }
                    }
                }
            }

            div { class: "form-field",
                label { "Title" }
                input {
                    r#type: "text",
                    value: "{card.title}",
                    oninput: move |evt: FormEvent| editor.write().set_title(evt.value()),
                }
            }

            div { class: "form-field",
                label { "Description" }
                textarea {
                    value: "{card.description}",
                    oninput: move |evt: FormEvent| editor.write().set_description(evt.value()),
                }
                span { class: "hint", "**bold** and [icon-id] are supported" }
            }

            div { class: "form-row",
                div { class: "form-field",
                    label { "Accent" }
                    input {
                        r#type: "color",
                        value: "{card.accent_color}",
                        oninput: move |evt: FormEvent| editor.write().set_accent_color(evt.value()),
                    }
                }
                div { class: "form-field",
                    label { "Number" }
                    input {
                        r#type: "text",
                        value: "{card.number_label}",
                        oninput: move |evt: FormEvent| editor.write().set_number_label(evt.value()),
                    }
                }
            }

            div { class: "form-field",
                label { "Skills" }
                div { class: "skill-chips",
                    for skill in SKILLS {
                        button {
                            key: "{skill}",
                            class: if card.skills.iter().any(|s| s == *skill) { "skill-chip skill-chip--on" } else { "skill-chip" },
                            onclick: move |_| editor.write().toggle_skill(skill),
                            "{skill}"
                        }
                    }
                }
            }

            div { class: "form-field",
                label { "Icon" }
                IconPicker {
                    selected: card.icon.clone(),
                    on_select: move |entry: IconEntry| editor.write().set_icon(entry.src),
                }
            }

            div { class: "form-field",
                label { "Secondary icon" }
                IconPicker {
                    selected: secondary_src,
                    allow_none: true,
                    on_select: move |entry: IconEntry| {
                        let icon = (!entry.src.is_empty()).then(|| SecondaryIcon {
                            src: entry.src,
                            catalog_id: entry.id,
                        });
                        editor.write().set_secondary_icon(icon);
                    },
                }
            }

            div { class: "form-field",
                label { "Artwork" }
                div { class: "form-row",
                    ImageUpload {
                        bounds: convert::OVERLAY_BOUNDS,
                        label: "Upload artwork".to_string(),
                        on_upload: move |data_uri: String| editor.write().set_overlay(Some(data_uri)),
                    }
                    if has_overlay {
                        button {
                            class: "btn btn--small btn--danger",
                            onclick: move |_| editor.write().set_overlay(None),
                            "Remove"
                        }
                    }
                }
            }
        }
    }
}
