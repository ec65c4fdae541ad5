//! Icon Picker Component
//!
//! Browses one folder of the icon catalog and reports the chosen entry.

use cardforge_core::IconEntry;
use dioxus::prelude::*;

use crate::context::use_catalog;

#[component]
pub fn IconPicker(
    /// Catalog folder listed initially, relative to models/icons
    #[props(default)]
    folder: String,
    /// `src` of the currently selected icon
    #[props(default)]
    selected: String,
    on_select: EventHandler<IconEntry>,
    /// Offer a "None" tile that reports an empty entry
    #[props(default = false)]
    allow_none: bool,
) -> Element {
    let catalog = use_catalog();
    let mut path = use_signal(|| folder.clone());
    let mut entries: Signal<Vec<IconEntry>> = use_signal(Vec::new);
    let mut error = use_signal(|| Option::<String>::None);

    // Reload whenever the folder changes
    use_effect(move || {
        let folder = path();
        let catalog = catalog.clone();
        spawn(async move {
            let listing = tokio::task::spawn_blocking(move || catalog.list(&folder)).await;
            match listing {
                Ok(Ok(list)) => {
                    error.set(None);
                    entries.set(list);
                }
                Ok(Err(e)) => {
                    error.set(Some(e.to_string()));
                    entries.set(Vec::new());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    rsx! {
        div { class: "icon-picker",
            input {
                r#type: "text",
                placeholder: "Folder (e.g. elements)",
                value: "{path}",
                onchange: move |evt: FormEvent| path.set(evt.value()),
            }

            if let Some(err) = error() {
                div { class: "image-upload__error", "{err}" }
            }

            div { class: "icon-grid",
                if allow_none {
                    button {
                        class: if selected.is_empty() { "icon-tile icon-tile--selected" } else { "icon-tile" },
                        title: "None",
                        onclick: move |_| on_select.call(IconEntry {
                            id: String::new(),
                            label: String::new(),
                            description: String::new(),
                            src: String::new(),
                        }),
                        "∅"
                    }
                }
                if entries.read().is_empty() {
                    span { class: "hint", "No icons in this folder" }
                }
                for entry in entries() {
                    button {
                        key: "{entry.src}",
                        class: if entry.src == selected { "icon-tile icon-tile--selected" } else { "icon-tile" },
                        title: "{entry.label}",
                        onclick: {
                            let entry = entry.clone();
                            move |_| on_select.call(entry.clone())
                        },
                        img { src: "{entry.src}", alt: "{entry.label}" }
                    }
                }
            }
        }
    }
}
