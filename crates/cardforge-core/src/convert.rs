//! Image conversion - uploaded artwork to embeddable WebP data URIs.

use std::io::Cursor;

use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::{ForgeError, ForgeResult};

/// Bounds for card overlay artwork (the card canvas)
pub const OVERLAY_BOUNDS: (u32, u32) = (750, 1050);

/// Bounds for tutorial page backgrounds
pub const BACKGROUND_BOUNDS: (u32, u32) = (1920, 1080);

const WEBP_PREFIX: &str = "data:image/webp;base64,";

/// Decode `bytes`, fit into `max_width` x `max_height`, and re-encode as a
/// lossless WebP data URI.
///
/// Aspect ratio is preserved and images are never upscaled.
pub fn to_webp_data_uri(bytes: &[u8], max_width: u32, max_height: u32) -> ForgeResult<String> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let img = if width > max_width || height > max_height {
        img.resize(max_width, max_height, FilterType::Lanczos3)
    } else {
        img
    };
    tracing::debug!(
        from = ?(width, height),
        to = ?img.dimensions(),
        "Converting image to WebP"
    );

    let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
    let mut buffer = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut buffer), ImageFormat::WebP)?;

    Ok(format!(
        "{}{}",
        WEBP_PREFIX,
        base64::engine::general_purpose::STANDARD.encode(&buffer)
    ))
}

/// Read an image file and convert it with [`to_webp_data_uri`].
pub fn file_to_webp_data_uri(
    path: impl AsRef<std::path::Path>,
    max_width: u32,
    max_height: u32,
) -> ForgeResult<String> {
    let bytes = std::fs::read(path)?;
    to_webp_data_uri(&bytes, max_width, max_height)
}

/// Payload bytes of a base64 data URI.
pub fn decode_data_uri(uri: &str) -> ForgeResult<Vec<u8>> {
    let (_, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or_else(|| ForgeError::Image("not a base64 data URI".to_string()))?;

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| ForgeError::Image(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 20, 255]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn decoded_dimensions(uri: &str) -> (u32, u32) {
        let bytes = decode_data_uri(uri).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::WebP)
            .unwrap()
            .dimensions()
    }

    #[test]
    fn test_downscales_preserving_aspect() {
        let uri = to_webp_data_uri(&png_bytes(200, 100), 50, 50).unwrap();
        assert!(uri.starts_with("data:image/webp;base64,"));
        assert_eq!(decoded_dimensions(&uri), (50, 25));
    }

    #[test]
    fn test_never_upscales() {
        let uri = to_webp_data_uri(&png_bytes(30, 20), OVERLAY_BOUNDS.0, OVERLAY_BOUNDS.1).unwrap();
        assert_eq!(decoded_dimensions(&uri), (30, 20));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            to_webp_data_uri(b"not an image", 10, 10),
            Err(ForgeError::Image(_))
        ));
    }

    #[test]
    fn test_decode_data_uri() {
        assert_eq!(decode_data_uri("data:text/plain;base64,aGk=").unwrap(), b"hi");
        assert!(decode_data_uri("/models/a.png").is_err());
    }
}
