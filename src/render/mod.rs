//! Rendering module
//!
//! Template → label markup → page layout → PDF or PNG.

pub mod fonts;
pub mod layout;
pub mod markup;
pub mod pdf;
pub mod raster;
pub mod template;

use std::path::{Path, PathBuf};

use image::RgbImage;

pub use fonts::{LabelFace, LabelFonts};
pub use layout::{Align, Element, PageLayout};
pub use markup::{parse_markup, Block, LabelDocument, MarkupError, Weight};
pub use pdf::write_pdf;
pub use raster::{content_bounds, rasterize, trim_trailing_whitespace, LABEL_DPI, TRIM_PADDING_PX};
pub use template::{LabelTemplate, TemplateContext};

use crate::error::LabelResult;

/// Turns label markup into documents
///
/// Font paths named in the markup are resolved against `asset_base` for
/// both output formats.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    asset_base: PathBuf,
}

impl DocumentRenderer {
    pub fn new(asset_base: impl Into<PathBuf>) -> Self {
        Self {
            asset_base: asset_base.into(),
        }
    }

    /// Lay out markup as an in-memory page
    pub fn render_page(&self, markup: &str) -> LabelResult<PageLayout> {
        Ok(parse_markup(markup)?.layout())
    }

    /// Lay out markup and write it straight to a PDF file
    pub fn write_pdf(&self, markup: &str, title: &str, path: &Path) -> LabelResult<()> {
        let page = self.render_page(markup)?;
        let fonts = LabelFonts::load(&self.asset_base, &page);
        write_pdf(&page, &fonts, title, path)
    }

    /// Paint a page into a bitmap with the page's label fonts
    pub fn rasterize(&self, page: &PageLayout, dpi: f32) -> LabelResult<RgbImage> {
        let fonts = LabelFonts::load(&self.asset_base, page);
        rasterize(page, &fonts, dpi)
    }
}
