use std::collections::HashMap;

use cardforge_core::storage::database_path;
use cardforge_core::{
    CardEditor, GameProfile, IconCatalog, LocalStore, TutorialEditor, TutorialPage,
};
use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use crate::context::{get_assets_dir, get_data_dir, notify, InlineIcons, Loaded, Notice};
use crate::pages::{Cards, Tutorial};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Card designer
/// - `/tutorial` - Tutorial page editor
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Cards {},
    #[route("/tutorial")]
    Tutorial {},
}

/// Root application component.
///
/// Provides global styles, the store, the editors and routing.
#[component]
pub fn App() -> Element {
    let store = use_hook(|| LocalStore::open(database_path(get_data_dir())));
    let catalog = use_hook(|| IconCatalog::from_assets_dir(get_assets_dir()));

    let mut card_editor = use_signal(|| CardEditor::new(Vec::new()));
    let mut loaded = use_signal(Loaded::default);
    let mut tutorial_editor =
        use_signal(|| TutorialEditor::new(GameProfile::Core, vec![TutorialPage::blank()]));
    let mut inline_icons = use_signal(InlineIcons::default);
    let notices: Signal<Vec<Notice>> = use_signal(Vec::new);

    use_context_provider(|| store.clone());
    use_context_provider(|| catalog.clone());
    use_context_provider(|| card_editor);
    use_context_provider(|| loaded);
    use_context_provider(|| tutorial_editor);
    use_context_provider(|| inline_icons);
    use_context_provider(|| notices);

    // Load persisted state on mount
    let init_store = store.clone();
    let init_catalog = catalog.clone();
    use_effect(move || {
        let store = init_store.clone();
        let catalog = init_catalog.clone();
        spawn(async move {
            if let Some(warning) = store.unavailable_warning() {
                notify(notices, warning.to_string(), true);
            }

            let cards = store.load_cards().await;
            tracing::info!("Loaded {} saved cards", cards.len());
            card_editor.write().replace_saved(cards);
            loaded.write().cards = true;

            // The tutorial editor stays read-only until this replaces its pages
            let profile = tutorial_editor.peek().profile();
            let pages = store.load_tutorial(profile, vec![TutorialPage::blank()]).await;
            tutorial_editor.write().switch_profile(profile, pages);
            loaded.write().tutorial = true;

            let icons = tokio::task::spawn_blocking(move || catalog.list(""))
                .await
                .ok()
                .and_then(|listing| listing.ok())
                .unwrap_or_default();
            let map: HashMap<String, String> =
                icons.into_iter().map(|entry| (entry.id, entry.src)).collect();
            inline_icons.set(InlineIcons(map));
        });
    });

    // Surface storage warnings as notices
    let warn_store = store.clone();
    use_effect(move || {
        let mut warnings = warn_store.subscribe();
        spawn(async move {
            loop {
                match warnings.recv().await {
                    Ok(warning) => notify(notices, warning.to_string(), true),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Dropped storage warnings");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
