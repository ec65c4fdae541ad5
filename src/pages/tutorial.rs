//! Tutorial page editor - pages, text blocks, backgrounds and page numbers.
//!
//! Every edit is persisted after a quiet period; a burst of keystrokes ends
//! up as one write.

use std::sync::Arc;

use cardforge_core::{
    convert, export, BlockEdit, Debouncer, GameProfile, PageNumberStyle, Renderer, TutorialEditor,
    TutorialPage,
};
use dioxus::prelude::*;

use crate::components::{
    ImageUpload, NavHeader, NavLocation, NoticeStack, PageNumberEditor, PagePreview,
    TextBlockEditor,
};
use crate::context::{
    notify, rasterizer, use_inline_icons, use_loaded, use_notices, use_store,
    use_tutorial_editor, Loaded,
};
use crate::dialogs;

/// One debouncer per profile, so switching profiles never drops a pending save.
#[derive(Default)]
struct PendingSaves {
    core: Debouncer,
    expansion: Debouncer,
}

impl PendingSaves {
    fn of(&self, profile: GameProfile) -> &Debouncer {
        match profile {
            GameProfile::Core => &self.core,
            GameProfile::Expansion => &self.expansion,
        }
    }
}

/// Apply `f` to the editor and mark the pages dirty.
fn edit(
    mut editor: Signal<TutorialEditor>,
    mut revision: Signal<u64>,
    f: impl FnOnce(&mut TutorialEditor),
) {
    f(&mut *editor.write());
    revision += 1;
}

/// Pages are written back only once they came from the store and were edited.
fn needs_save(revision: u64, loaded: Loaded) -> bool {
    revision > 0 && loaded.tutorial
}

fn parse_profile(value: &str) -> GameProfile {
    value.parse().unwrap_or(GameProfile::Core)
}

/// Tutorial editor page component.
#[component]
pub fn Tutorial() -> Element {
    let mut editor = use_tutorial_editor();
    let store = use_store();
    let icons = use_inline_icons();
    let notices = use_notices();
    let loaded = use_loaded();
    let revision = use_signal(|| 0u64);
    let mut busy = use_signal(|| false);
    let saves = use_hook(|| Arc::new(PendingSaves::default()));

    // Debounced persistence of edited pages
    let save_store = store.clone();
    use_effect(move || {
        if !needs_save(revision(), *loaded.peek()) {
            return;
        }
        let (profile, pages) = {
            let editor = editor.peek();
            (editor.profile(), editor.pages().to_vec())
        };
        let store = save_store.clone();
        saves.of(profile).schedule(async move {
            if store.save_tutorial(profile, pages).await {
                tracing::debug!(%profile, "Saved tutorial pages");
            }
        });
    });

    let switch_store = store.clone();
    let switch_profile = move |evt: FormEvent| {
        let profile = parse_profile(&evt.value());
        let store = switch_store.clone();
        spawn(async move {
            let pages = store.load_tutorial(profile, vec![TutorialPage::blank()]).await;
            tracing::info!(%profile, pages = pages.len(), "Switched tutorial profile");
            editor.write().switch_profile(profile, pages);
        });
    };

    let export_pages = move |_| {
        let (profile, pages) = {
            let editor = editor.peek();
            (editor.profile(), editor.pages().to_vec())
        };
        let icons = icons.peek().clone();
        busy.set(true);
        spawn(async move {
            let built = tokio::task::spawn_blocking(move || {
                export::build_page_archive(&pages, &rasterizer(&icons))
            })
            .await;
            match built {
                Ok(Ok(report)) => {
                    let name = format!("tutorial-{}.zip", profile);
                    let summary = format!(
                        "Rendered {} pages ({} skipped)",
                        report.rendered, report.skipped
                    );
                    match dialogs::save_file(name, "Zip archive", &["zip"], report.bytes).await {
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

    let download_page = move |_| {
        let (index, page) = {
            let editor = editor.peek();
            (editor.active_index(), editor.active_page().clone())
        };
        let icons = icons.peek().clone();
        busy.set(true);
        spawn(async move {
            let rendered = tokio::task::spawn_blocking(move || {
                rasterizer(&icons).render_page_png(&page, index)
            })
            .await;
            match rendered {
                Ok(Ok(bytes)) => {
                    let name = format!("page-{:02}.png", index + 1);
                    match dialogs::save_file(name, "PNG image", &["png"], bytes).await {
                        Ok(Some(path)) => notify(notices, format!("Saved {}", path.display()), false),
                        Ok(None) => {}
                        Err(e) => notify(notices, e, true),
                    }
                }
                Ok(Err(e)) => notify(notices, format!("Render failed: {}", e), true),
                Err(e) => notify(notices, format!("Render task failed: {}", e), true),
            }
            busy.set(false);
        });
    };

    // Edits made before the stored pages arrive would be replaced by them
    if !loaded().tutorial {
        return rsx! {
            NavHeader { current: NavLocation::Tutorial }
            main { class: "workbench workbench--wide",
                p { class: "panel__empty", "Loading tutorial..." }
            }
            NoticeStack {}
        };
    }

    let state = editor.read();
    let profile = state.profile();
    let page_count = state.pages().len();
    let active = state.active_index();
    let page = state.active_page().clone();
    let page_number = state.page_number();
    drop(state);

    let background_path = page.background_path.clone().unwrap_or_default();
    let has_blob = page.background_blob.as_deref().is_some_and(|b| !b.is_empty());
    let title_count = page.titles.len();
    let description_count = page.descriptions.len();

    rsx! {
        NavHeader { current: NavLocation::Tutorial }

        main { class: "workbench workbench--wide",
            div { class: "panel",
                h2 { class: "panel__title", "Tutorial" }

                div { class: "form-field",
                    label { "Profile" }
                    select {
                        onchange: switch_profile,
                        for option_profile in GameProfile::ALL {
                            option {
                                key: "{option_profile}",
                                value: "{option_profile}",
                                selected: option_profile == profile,
                                {option_profile.label()}
                            }
                        }
                    }
                }

                div { class: "form-field",
                    label { "Background" }
                    input {
                        r#type: "text",
                        placeholder: "/models/tutorial/page.png",
                        value: "{background_path}",
                        onchange: move |evt: FormEvent| {
                            let value = evt.value().trim().to_string();
                            let path = (!value.is_empty()).then_some(value);
                            edit(editor, revision, |e| e.set_background_path(path));
                        },
                    }
                    div { class: "form-row",
                        ImageUpload {
                            bounds: convert::BACKGROUND_BOUNDS,
                            label: "Upload background".to_string(),
                            on_upload: move |data_uri: String| {
                                edit(editor, revision, |e| e.set_background_blob(Some(data_uri)));
                            },
                        }
                        button {
                            class: "btn btn--small btn--danger",
                            disabled: background_path.is_empty() && !has_blob,
                            onclick: move |_| edit(editor, revision, |e| e.clear_background()),
                            "Clear"
                        }
                    }
                    if has_blob {
                        span { class: "hint", "Uploaded image overrides the path" }
                    }
                }

                for (i, block) in page.titles.iter().cloned().enumerate() {
                    TextBlockEditor {
                        key: "title-{active}-{i}",
                        label: format!("Title {}", i + 1),
                        block,
                        removable: title_count > 1,
                        multiline: false,
                        on_edit: move |change: BlockEdit| edit(editor, revision, |e| e.update_title(i, change)),
                        on_remove: move |_: ()| edit(editor, revision, |e| e.remove_title(i)),
                    }
                }
                button {
                    class: "btn btn--small",
                    onclick: move |_| edit(editor, revision, |e| e.add_title()),
                    "+ Title"
                }

                for (i, block) in page.descriptions.iter().cloned().enumerate() {
                    TextBlockEditor {
                        key: "description-{active}-{i}",
                        label: format!("Description {}", i + 1),
                        block,
                        removable: description_count > 1,
                        multiline: true,
                        on_edit: move |change: BlockEdit| edit(editor, revision, |e| e.update_description(i, change)),
                        on_remove: move |_: ()| edit(editor, revision, |e| e.remove_description(i)),
                    }
                }
                button {
                    class: "btn btn--small",
                    onclick: move |_| edit(editor, revision, |e| e.add_description()),
                    "+ Description"
                }

                PageNumberEditor {
                    style: page_number,
                    on_change: move |style: PageNumberStyle| edit(editor, revision, |e| e.set_page_number(style)),
                }
            }

            section { class: "page-stage",
                div { class: "toolbar",
                    div { class: "page-tabs",
                        for i in 0..page_count {
                            button {
                                key: "{i}",
                                class: if i == active { "page-tab page-tab--active" } else { "page-tab" },
                                onclick: move |_| editor.write().select_page(i),
                                "{i + 1}"
                            }
                        }
                    }
                    button {
                        class: "btn",
                        onclick: move |_| edit(editor, revision, |e| e.add_page()),
                        "Add page"
                    }
                    button {
                        class: "btn btn--danger",
                        disabled: page_count <= 1,
                        onclick: move |_| edit(editor, revision, |e| e.remove_page(active)),
                        "Remove page"
                    }
                    button { class: "btn", disabled: busy(), onclick: download_page, "Download PNG" }
                    button { class: "btn", disabled: busy(), onclick: export_pages, "Export all (zip)" }
                }
                PagePreview { page: page.clone(), index: active }
            }
        }

        NoticeStack {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_save_before_tutorial_loaded() {
        let loading = Loaded {
            cards: true,
            tutorial: false,
        };
        assert!(!needs_save(3, loading));
    }

    #[test]
    fn test_no_save_without_edits() {
        let ready = Loaded {
            cards: true,
            tutorial: true,
        };
        assert!(!needs_save(0, ready));
        assert!(needs_save(1, ready));
    }

    #[test]
    fn test_parse_profile_defaults_to_core() {
        assert_eq!(parse_profile("expansion"), GameProfile::Expansion);
        assert_eq!(parse_profile("bogus"), GameProfile::Core);
    }
}
