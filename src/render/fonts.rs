//! Label fonts
//!
//! TrueType faces named by the markup's `font` and `font-bold` directives,
//! resolved against the asset base path. Both backends use the same faces:
//! the PDF writer embeds the bytes and the rasterizer draws the glyphs.
//! A face that is missing or unreadable is skipped with a warning and the
//! backend falls back to its own sans-serif.

use std::path::Path;

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};
use tracing::{debug, warn};

use super::layout::{text_width_mm, PageLayout, PT_TO_MM};
use super::markup::Weight;

/// A TrueType face loaded from disk
pub struct LabelFace {
    bytes: Vec<u8>,
    font: Font<'static>,
}

impl LabelFace {
    /// Parse font data, `None` if it is not a usable TrueType face
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        let font = Font::try_from_vec(bytes.clone())?;
        Some(Self { bytes, font })
    }

    /// Raw font file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    // rusttype scales to the ascent-descent height; labels size fonts by em
    fn scale(&self, size: f32) -> Scale {
        let v = self.font.v_metrics_unscaled();
        let units_per_em = f32::from(self.font.units_per_em()).max(1.0);
        Scale::uniform(size * (v.ascent - v.descent) / units_per_em)
    }

    /// Advance width of `text` at an em size of `size`, in the same unit
    pub fn advance_width(&self, text: &str, size: f32) -> f32 {
        self.font
            .layout(text, self.scale(size), point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Draw black text with its baseline starting at `(x, baseline)` pixels
    pub fn draw(&self, img: &mut RgbImage, text: &str, x: f32, baseline: f32, size_px: f32) {
        for glyph in self.font.layout(text, self.scale(size_px), point(x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                    return;
                }
                let dst = img.get_pixel_mut(px as u32, py as u32);
                let keep = 1.0 - coverage.clamp(0.0, 1.0);
                *dst = Rgb(dst.0.map(|c| (f32::from(c) * keep) as u8));
            });
        }
    }
}

/// Regular and bold faces for one page
#[derive(Default)]
pub struct LabelFonts {
    regular: Option<LabelFace>,
    bold: Option<LabelFace>,
}

impl LabelFonts {
    /// Load the faces a layout names, relative to `asset_base`
    pub fn load(asset_base: &Path, layout: &PageLayout) -> Self {
        Self {
            regular: load_face(asset_base, layout.font_regular.as_deref()),
            bold: load_face(asset_base, layout.font_bold.as_deref()),
        }
    }

    pub fn face(&self, weight: Weight) -> Option<&LabelFace> {
        match weight {
            Weight::Regular => self.regular.as_ref(),
            Weight::Bold => self.bold.as_ref(),
        }
    }

    /// Width of `text` in millimetres
    ///
    /// Measured with the loaded face when there is one, otherwise estimated
    /// from average Helvetica metrics.
    pub fn text_width_mm(&self, text: &str, size_pt: f32, weight: Weight) -> f32 {
        match self.face(weight) {
            Some(face) => face.advance_width(text, size_pt) * PT_TO_MM,
            None => text_width_mm(text, size_pt),
        }
    }
}

fn load_face(asset_base: &Path, requested: Option<&str>) -> Option<LabelFace> {
    let path = asset_base.join(requested?);
    match std::fs::read(&path) {
        Ok(bytes) => {
            let face = LabelFace::from_bytes(bytes);
            match &face {
                Some(_) => debug!(font = %path.display(), "Loaded font"),
                None => warn!(font = %path.display(), "Not a TrueType font, using fallback"),
            }
            face
        }
        Err(e) => {
            warn!(font = %path.display(), error = %e, "Font not found, using fallback");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::parse_markup;

    #[test]
    fn test_missing_fonts_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let layout = parse_markup("page 50 50\nfont fonts/missing.ttf\nfont-bold fonts/missing-bold.ttf")
            .unwrap()
            .layout();

        let fonts = LabelFonts::load(dir.path(), &layout);
        assert!(fonts.face(Weight::Regular).is_none());
        assert!(fonts.face(Weight::Bold).is_none());
        assert_eq!(
            fonts.text_width_mm("Sodium", 8.0, Weight::Bold),
            text_width_mm("Sodium", 8.0)
        );
    }

    #[test]
    fn test_invalid_font_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        let layout = parse_markup("page 50 50\nfont broken.ttf").unwrap().layout();

        let fonts = LabelFonts::load(dir.path(), &layout);
        assert!(fonts.face(Weight::Regular).is_none());
    }

    #[test]
    fn test_no_font_directives_load_nothing() {
        let layout = parse_markup("page 50 50\ntitle Hi").unwrap().layout();
        let fonts = LabelFonts::load(Path::new("/nonexistent"), &layout);
        assert!(fonts.face(Weight::Regular).is_none());
        assert!(fonts.face(Weight::Bold).is_none());
    }
}
