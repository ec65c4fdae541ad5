//! Image Upload Component
//!
//! File picker that re-encodes the chosen image as a WebP data URI.

use cardforge_core::convert;
use dioxus::prelude::*;

use crate::dialogs;

/// Image upload button
///
/// # Examples
///
/// ```rust
/// rsx! {
///     ImageUpload {
///         bounds: convert::OVERLAY_BOUNDS,
///         on_upload: move |data_uri| {
///             editor.write().set_overlay(Some(data_uri));
///         },
///     }
/// }
/// ```
#[component]
pub fn ImageUpload(
    /// Largest width and height kept; bigger images are downscaled
    bounds: (u32, u32),
    /// Callback with the data URI on successful conversion
    on_upload: EventHandler<String>,
    /// Optional button label
    #[props(default = "Upload Image".to_string())]
    label: String,
) -> Element {
    let mut converting = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_upload = move |_| {
        converting.set(true);
        error.set(None);

        spawn(async move {
            let Some(path) = dialogs::pick_file(
                "Select Image",
                "images",
                &["png", "jpg", "jpeg", "webp", "gif", "bmp"],
            )
            .await
            else {
                // User cancelled
                converting.set(false);
                return;
            };

            let (max_width, max_height) = bounds;
            let result = tokio::task::spawn_blocking(move || {
                convert::file_to_webp_data_uri(&path, max_width, max_height)
            })
            .await;

            match result {
                Ok(Ok(data_uri)) => on_upload.call(data_uri),
                Ok(Err(e)) => error.set(Some(format!("Failed to convert image: {}", e))),
                Err(e) => error.set(Some(format!("Conversion task failed: {}", e))),
            }
            converting.set(false);
        });
    };

    rsx! {
        div { class: "image-upload",
            button {
                class: "image-upload-btn",
                onclick: handle_upload,
                disabled: converting(),
                if converting() {
                    "Converting..."
                } else {
                    "{label}"
                }
            }

            if let Some(err) = error() {
                div { class: "image-upload__error", "{err}" }
            }
        }
    }
}
