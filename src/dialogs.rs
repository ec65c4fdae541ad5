//! Native file dialogs, run off the UI thread.

use std::path::PathBuf;

use rfd::FileDialog;

/// Ask for a file to open. `None` when the user cancels.
pub async fn pick_file(title: &'static str, filter: &'static str, extensions: &'static [&'static str]) -> Option<PathBuf> {
    tokio::task::spawn_blocking(move || {
        FileDialog::new()
            .add_filter(filter, extensions)
            .set_title(title)
            .pick_file()
    })
    .await
    .ok()
    .flatten()
}

/// Ask where to save `bytes`, then write them.
///
/// Returns the chosen path, `Ok(None)` when the user cancels.
pub async fn save_file(
    suggested_name: String,
    filter: &'static str,
    extensions: &'static [&'static str],
    bytes: Vec<u8>,
) -> Result<Option<PathBuf>, String> {
    let chosen = tokio::task::spawn_blocking(move || {
        FileDialog::new()
            .add_filter(filter, extensions)
            .set_file_name(suggested_name)
            .save_file()
    })
    .await
    .map_err(|e| e.to_string())?;

    let Some(path) = chosen else {
        return Ok(None);
    };

    let target = path.clone();
    tokio::task::spawn_blocking(move || std::fs::write(&target, bytes))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| format!("Could not write {}: {}", path.display(), e))?;

    tracing::info!(path = %path.display(), "Saved export");
    Ok(Some(path))
}
