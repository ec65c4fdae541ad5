//! Rasterization of composed SVG documents to PNG.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::compose::{self, Hrefs};
use crate::error::{ForgeError, ForgeResult};
use crate::types::{CardDesign, TutorialPage};

// Avoid pathological allocations from a bad scale factor
const MAX_DIM: u32 = 8_192;

/// Produces PNG bytes for cards and tutorial pages.
pub trait Renderer: Send + Sync {
    fn render_card_png(&self, card: &CardDesign, overlay: Option<&str>) -> ForgeResult<Vec<u8>>;

    fn render_page_png(&self, page: &TutorialPage, index: usize) -> ForgeResult<Vec<u8>>;
}

/// resvg-backed renderer. Asset paths resolve against `assets_dir`.
pub struct SvgRasterizer {
    assets_dir: PathBuf,
    icons: HashMap<String, String>,
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f32,
}

impl SvgRasterizer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!(faces = fontdb.faces().count(), "Loaded system fonts");

        Self {
            assets_dir: assets_dir.into(),
            icons: HashMap::new(),
            fontdb: Arc::new(fontdb),
            scale: 1.0,
        }
    }

    /// Inline icon ids available to card descriptions
    pub fn with_icons(mut self, icons: HashMap<String, String>) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Rasterize an SVG document to PNG bytes.
    pub fn rasterize(&self, svg: &str) -> ForgeResult<Vec<u8>> {
        let opts = usvg::Options {
            resources_dir: Some(self.assets_dir.clone()),
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts).map_err(|e| ForgeError::Render(e.to_string()))?;

        let size = tree.size();
        let width = (size.width() * self.scale).ceil() as u32;
        let height = (size.height() * self.scale).ceil() as u32;
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return Err(ForgeError::Render(format!(
                "invalid raster size {}x{}",
                width, height
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| ForgeError::Render("failed to allocate pixmap".to_string()))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia stores premultiplied alpha; PNG wants straight alpha
        let mut img = RgbaImage::new(width, height);
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut buffer = Vec::new();
        DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(buffer)
    }
}

impl Renderer for SvgRasterizer {
    fn render_card_png(&self, card: &CardDesign, overlay: Option<&str>) -> ForgeResult<Vec<u8>> {
        let svg = compose::compose_card_svg(
            card,
            overlay,
            card.bound_template(),
            &self.icons,
            Hrefs::Raster,
        );
        self.rasterize(&svg)
    }

    fn render_page_png(&self, page: &TutorialPage, index: usize) -> ForgeResult<Vec<u8>> {
        let svg = compose::compose_page_svg(page, index, Hrefs::Raster);
        self.rasterize(&svg)
    }
}
