//! Icon catalog - lists icon images shipped under the public assets folder.
//!
//! A catalog query names a folder relative to the icons root (e.g. `elements`)
//! and returns one entry per image file in it. Queries are confined to the
//! root: parent segments, absolute paths and symlinks escaping it are rejected.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ForgeError;

/// Public URL prefix under which the icons root is served
pub const ICONS_PUBLIC_PREFIX: &str = "/models/icons";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog path: {0}")]
    InvalidPath(String),

    #[error("Failed to read icon folder: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CatalogError> for ForgeError {
    fn from(err: CatalogError) -> Self {
        ForgeError::Catalog(err.to_string())
    }
}

/// One icon in a catalog folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconEntry {
    pub id: String,
    pub label: String,
    pub description: String,
    pub src: String,
}

#[derive(Debug, Clone)]
pub struct IconCatalog {
    root: PathBuf,
}

impl IconCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Catalog rooted at `<assets_dir>/models/icons`
    pub fn from_assets_dir(assets_dir: impl AsRef<Path>) -> Self {
        Self::new(assets_dir.as_ref().join("models").join("icons"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the icons of a folder, sorted by filename.
    ///
    /// A folder that does not exist yields an empty list.
    pub fn list(&self, path: &str) -> Result<Vec<IconEntry>, CatalogError> {
        let relative = validate_relative(path)?;
        let dir = self.root.join(&relative);

        if !dir.is_dir() {
            tracing::debug!(path, "Icon folder not found");
            return Ok(Vec::new());
        }

        // Symlinks inside the root may still point outside of it
        let canonical_root = self.root.canonicalize()?;
        let canonical_dir = dir.canonicalize()?;
        if !canonical_dir.starts_with(&canonical_root) {
            return Err(CatalogError::InvalidPath(path.to_string()));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !is_image_file(&name) {
                continue;
            }
            names.push(name);
        }
        names.sort();

        let folder = public_folder(&relative);
        Ok(names
            .into_iter()
            .map(|name| {
                let id = file_stem(&name).to_string();
                let src = if folder.is_empty() {
                    format!("{}/{}", ICONS_PUBLIC_PREFIX, name)
                } else {
                    format!("{}/{}/{}", ICONS_PUBLIC_PREFIX, folder, name)
                };
                IconEntry {
                    label: label_from_stem(&id),
                    id,
                    description: String::new(),
                    src,
                }
            })
            .collect())
    }
}

fn validate_relative(path: &str) -> Result<PathBuf, CatalogError> {
    let normalized = path.trim().replace('\\', "/");
    if normalized.starts_with('/') {
        return Err(CatalogError::InvalidPath(path.to_string()));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(CatalogError::InvalidPath(path.to_string()));
            }
        }
    }
    Ok(relative)
}

fn public_folder(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// `fire-bolt_2` -> `Fire Bolt 2`
pub fn label_from_stem(stem: &str) -> String {
    stem.split(|c| c == '-' || c == '_' || c == ' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// HTTP-shaped result of a catalog query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

impl CatalogResponse {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Answer a catalog query the way the `/api/icons?path=` endpoint does.
///
/// - 200 with a JSON array of entries
/// - 400 when `path` is missing or rejected
/// - 500 when the folder cannot be read
pub fn handle_query(catalog: &IconCatalog, path: Option<&str>) -> CatalogResponse {
    let Some(path) = path else {
        return CatalogResponse::error(400, "missing path parameter");
    };

    match catalog.list(path) {
        Ok(entries) => match serde_json::to_string(&entries) {
            Ok(body) => CatalogResponse { status: 200, body },
            Err(e) => CatalogResponse::error(500, &e.to_string()),
        },
        Err(CatalogError::InvalidPath(p)) => {
            tracing::warn!(path = %p, "Rejected icon catalog path");
            CatalogResponse::error(400, "invalid path")
        }
        Err(CatalogError::Io(e)) => {
            tracing::warn!(path, error = %e, "Icon catalog listing failed");
            CatalogResponse::error(500, "failed to list icons")
        }
    }
}
