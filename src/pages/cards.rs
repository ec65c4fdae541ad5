//! Card designer - form, live preview, saved list and exports.

use std::collections::HashMap;

use cardforge_core::export;
use dioxus::prelude::*;

use crate::components::{CardForm, CardPreview, NavHeader, NavLocation, NoticeStack, SavedCards};
use crate::context::{
    notify, rasterizer, use_card_editor, use_inline_icons, use_notices, use_store,
};
use crate::dialogs;

/// Card designer page component.
#[component]
pub fn Cards() -> Element {
    let mut editor = use_card_editor();
    let store = use_store();
    let icons = use_inline_icons();
    let notices = use_notices();
    let mut busy = use_signal(|| false);

    let card = editor.read().form().clone();
    let overlay = editor.read().overlay().map(str::to_string);

    let new_card = move |_| {
        let template = editor.peek().form().bound_template();
        editor.write().new_card(template);
    };

    // Commit the form; persistence runs in the background
    let save_store = store.clone();
    let save_card = move |_| {
        let title = editor.peek().form().title.clone();
        let pending = editor.write().commit_to(&save_store);
        spawn(async move {
            if pending.await {
                tracing::info!(title = %title, "Saved card");
                notify(notices, format!("Saved \"{}\"", title), false);
            }
        });
    };

    let download_png = move |_| {
        let card = editor.peek().form().clone();
        let overlay = editor.peek().overlay().map(str::to_string);
        let icons = icons.peek().clone();
        busy.set(true);
        spawn(async move {
            let name = format!("{}.png", card.file_stem());
            let rendered = tokio::task::spawn_blocking(move || {
                export::render_card_png(&card, overlay.as_deref(), &rasterizer(&icons))
            })
            .await;
            match rendered {
                Ok(Ok(bytes)) => match dialogs::save_file(name, "PNG image", &["png"], bytes).await {
                    Ok(Some(path)) => notify(notices, format!("Saved {}", path.display()), false),
                    Ok(None) => {}
                    Err(e) => notify(notices, e, true),
                },
                Ok(Err(e)) => notify(notices, format!("Render failed: {}", e), true),
                Err(e) => notify(notices, format!("Render task failed: {}", e), true),
            }
            busy.set(false);
        });
    };

    let export_json = move |_| {
        let saved = editor.peek().saved().to_vec();
        spawn(async move {
            let json = match export::cards_to_json(&saved) {
                Ok(json) => json,
                Err(e) => {
                    notify(notices, format!("Export failed: {}", e), true);
                    return;
                }
            };
            match dialogs::save_file("cards.json".to_string(), "JSON", &["json"], json.into_bytes()).await {
                Ok(Some(_)) => notify(notices, format!("Exported {} cards", saved.len()), false),
                Ok(None) => {}
                Err(e) => notify(notices, e, true),
            }
        });
    };

    let import_store = store.clone();
    let import_json = move |_| {
        let store = import_store.clone();
        spawn(async move {
            let Some(path) = dialogs::pick_file("Import cards", "JSON", &["json"]).await else {
                return;
            };
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    notify(notices, format!("Could not read {}: {}", path.display(), e), true);
                    return;
                }
            };
            // Reject the whole document before touching saved cards
            let pending = match editor.write().import_json_into(&store, &text) {
                Ok(pending) => pending,
                Err(e) => {
                    notify(notices, e.to_string(), true);
                    return;
                }
            };
            let count = pending.await;
            notify(notices, format!("Imported {} cards", count), false);
        });
    };

    let archive_store = store.clone();
    let export_archive = move |_| {
        let store = archive_store.clone();
        let saved = editor.peek().saved().to_vec();
        let icons = icons.peek().clone();
        busy.set(true);
        spawn(async move {
            let mut overlays = HashMap::new();
            for card in &saved {
                if let Some(overlay) = store.load_overlay(card.id).await {
                    overlays.insert(card.id, overlay);
                }
            }
            let built = tokio::task::spawn_blocking(move || {
                export::build_card_archive(&saved, &overlays, &rasterizer(&icons))
            })
            .await;
            match built {
                Ok(Ok(report)) => {
                    let summary = format!(
                        "Rendered {} cards ({} skipped)",
                        report.rendered, report.skipped
                    );
                    match dialogs::save_file("cards.zip".to_string(), "Zip archive", &["zip"], report.bytes).await {
                        Ok(Some(_)) => notify(notices, summary, report.skipped > 0),
                        Ok(None) => {}
                        Err(e) => notify(notices, e, true),
                    }
                }
                Ok(Err(e)) => notify(notices, format!("Archive failed: {}", e), true),
                Err(e) => notify(notices, format!("Archive task failed: {}", e), true),
            }
            busy.set(false);
        });
    };

    rsx! {
        NavHeader { current: NavLocation::Cards }

        main { class: "workbench",
            CardForm {}

            section { class: "page-stage",
                div { class: "toolbar",
                    button { class: "btn", onclick: new_card, "New" }
                    button { class: "btn btn--primary", onclick: save_card, "Save" }
                    button { class: "btn", disabled: busy(), onclick: download_png, "Download PNG" }
                    button { class: "btn", onclick: export_json, "Export JSON" }
                    button { class: "btn", onclick: import_json, "Import JSON" }
                    button { class: "btn", disabled: busy(), onclick: export_archive, "Export all (zip)" }
                }
                CardPreview { card, overlay }
            }

            SavedCards {}
        }

        NoticeStack {}
    }
}
