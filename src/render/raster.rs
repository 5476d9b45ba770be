//! Raster output
//!
//! Paints a [`PageLayout`] into an RGB bitmap and trims the blank space
//! below the content. Rules, and text without a loaded label face, go through
//! the plotters bitmap backend; text with a label face is drawn from its
//! glyph outlines so PNG labels use the same fonts as PDF labels.

use image::imageops;
use image::RgbImage;

use super::fonts::LabelFonts;
use super::layout::{baseline_mm, Align, Element, PageLayout};
use super::markup::Weight;
use crate::error::{LabelError, LabelResult};

/// Resolution labels are rasterized at
pub const LABEL_DPI: f32 = 300.0;

/// Blank rows kept under the content when trimming
pub const TRIM_PADDING_PX: u32 = 10;

const WHITE_PIXEL: [u8; 3] = [255, 255, 255];

fn mm_to_px(mm: f32, dpi: f32) -> i32 {
    (mm / 25.4 * dpi).round() as i32
}

fn pt_to_px(pt: f32, dpi: f32) -> f64 {
    f64::from(pt / 72.0 * dpi)
}

/// Draw the layout at the given resolution
///
/// Text whose weight has no face in `fonts` is drawn with the system
/// `sans-serif` family.
pub fn rasterize(layout: &PageLayout, fonts: &LabelFonts, dpi: f32) -> LabelResult<RgbImage> {
    use plotters::prelude::*;
    use plotters::style::text_anchor::{HPos, Pos, VPos};

    let width = mm_to_px(layout.width_mm, dpi).max(1) as u32;
    let height = mm_to_px(layout.height_mm, dpi).max(1) as u32;

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| LabelError::Raster(e.to_string()))?;

        for element in &layout.elements {
            match element {
                Element::Text {
                    text,
                    x_mm,
                    top_mm,
                    size_pt,
                    weight,
                    align,
                } => {
                    if fonts.face(*weight).is_some() {
                        continue;
                    }
                    let style = match weight {
                        Weight::Regular => FontStyle::Normal,
                        Weight::Bold => FontStyle::Bold,
                    };
                    let hpos = match align {
                        Align::Left => HPos::Left,
                        Align::Right => HPos::Right,
                    };
                    let font = ("sans-serif", pt_to_px(*size_pt, dpi))
                        .into_font()
                        .style(style)
                        .color(&BLACK)
                        .pos(Pos::new(hpos, VPos::Top));
                    let anchor = (mm_to_px(*x_mm, dpi), mm_to_px(*top_mm, dpi));

                    root.draw(&Text::new(text.as_str(), anchor, font))
                        .map_err(|e| LabelError::Raster(e.to_string()))?;
                }
                Element::Rule {
                    x0_mm,
                    x1_mm,
                    y_mm,
                    thickness_pt,
                } => {
                    let thickness = (pt_to_px(*thickness_pt, dpi).round() as i32).max(1);
                    let top = mm_to_px(*y_mm, dpi) - thickness / 2;
                    root.draw(&Rectangle::new(
                        [
                            (mm_to_px(*x0_mm, dpi), top),
                            (mm_to_px(*x1_mm, dpi), top + thickness),
                        ],
                        BLACK.filled(),
                    ))
                    .map_err(|e| LabelError::Raster(e.to_string()))?;
                }
            }
        }

        root.present().map_err(|e| LabelError::Raster(e.to_string()))?;
    }

    let mut img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| LabelError::Raster("Failed to create image from buffer".to_string()))?;

    for element in &layout.elements {
        let Element::Text {
            text,
            x_mm,
            top_mm,
            size_pt,
            weight,
            align,
        } = element
        else {
            continue;
        };
        let Some(face) = fonts.face(*weight) else {
            continue;
        };
        let size_px = pt_to_px(*size_pt, dpi) as f32;
        let anchor = mm_to_px(*x_mm, dpi) as f32;
        let x = match align {
            Align::Left => anchor,
            Align::Right => anchor - face.advance_width(text, size_px),
        };
        let baseline = mm_to_px(baseline_mm(*top_mm, *size_pt), dpi) as f32;
        face.draw(&mut img, text, x, baseline, size_px);
    }

    Ok(img)
}

/// Bounding box of all non-white pixels
///
/// Returned as `(left, top, right, bottom)` with exclusive right and bottom
/// edges, or `None` for a blank image.
pub fn content_bounds(img: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0 == WHITE_PIXEL {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
        });
    }

    bounds
}

/// Crop away blank rows below the content, keeping `padding` rows
///
/// The full width is kept. A blank image is returned unchanged.
pub fn trim_trailing_whitespace(img: RgbImage, padding: u32) -> RgbImage {
    match content_bounds(&img) {
        Some((_, _, _, bottom)) => {
            let height = bottom.saturating_add(padding).min(img.height());
            imageops::crop_imm(&img, 0, 0, img.width(), height).to_image()
        }
        None => img,
    }
}
