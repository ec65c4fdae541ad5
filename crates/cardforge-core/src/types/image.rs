//! Image Source Type - where a piece of artwork comes from
//!
//! Artwork is either a static asset shipped with the app (`/models/...`)
//! or an uploaded image re-encoded into a data URI.

use serde::{Deserialize, Serialize};

/// Image reference used by cards and tutorial pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Public asset path, e.g. "/models/cards/fire.png"
    AssetPath(String),

    /// Base64 data URI
    /// Format: "data:image/webp;base64,..."
    DataUri(String),
}

impl ImageSource {
    /// Classify a raw `src` string
    pub fn from_src(src: &str) -> Self {
        if src.starts_with("data:") {
            ImageSource::DataUri(src.to_string())
        } else {
            ImageSource::AssetPath(src.to_string())
        }
    }

    /// Check if image data is available
    pub fn is_available(&self) -> bool {
        match self {
            ImageSource::AssetPath(path) => !path.is_empty(),
            ImageSource::DataUri(uri) => !uri.is_empty(),
        }
    }

    /// Get a descriptive string for the image type
    pub fn image_type(&self) -> &'static str {
        match self {
            ImageSource::AssetPath(_) => "asset",
            ImageSource::DataUri(_) => "data-uri",
        }
    }

    /// Raw `src` value
    pub fn as_src(&self) -> &str {
        match self {
            ImageSource::AssetPath(s) | ImageSource::DataUri(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path_available() {
        let img = ImageSource::AssetPath("/models/cards/fire.png".to_string());
        assert!(img.is_available());
        assert_eq!(img.image_type(), "asset");
    }

    #[test]
    fn test_empty_asset_not_available() {
        let img = ImageSource::AssetPath(String::new());
        assert!(!img.is_available());
    }

    #[test]
    fn test_from_src_classifies() {
        assert_eq!(
            ImageSource::from_src("data:image/webp;base64,AAAA").image_type(),
            "data-uri"
        );
        assert_eq!(ImageSource::from_src("/models/icons/a.png").image_type(), "asset");
    }
}
