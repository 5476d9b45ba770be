//! PDF output
//!
//! Draws a [`PageLayout`] onto a single printpdf page.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::*;
use tracing::debug;

use super::fonts::LabelFonts;
use super::layout::{baseline_mm, Align, Element, PageLayout};
use super::markup::Weight;
use crate::error::{LabelError, LabelResult};

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Embed the label face for `weight`, or fall back to a built-in font
fn page_font(
    doc: &PdfDocumentReference,
    fonts: &LabelFonts,
    weight: Weight,
) -> LabelResult<IndirectFontRef> {
    let font = match (fonts.face(weight), weight) {
        (Some(face), _) => {
            debug!(?weight, "Embedding font");
            doc.add_external_font(face.bytes())
        }
        (None, Weight::Regular) => doc.add_builtin_font(BuiltinFont::Helvetica),
        (None, Weight::Bold) => doc.add_builtin_font(BuiltinFont::HelveticaBold),
    };
    font.map_err(|e| LabelError::Pdf(e.to_string()))
}

/// Render the layout and save it to `path`
///
/// Right-aligned text is measured with the same face that gets embedded, so
/// value columns line up for TrueType fonts as well as the built-ins.
pub fn write_pdf(layout: &PageLayout, fonts: &LabelFonts, title: &str, path: &Path) -> LabelResult<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        title,
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        "Label",
    );

    let regular = page_font(&doc, fonts, Weight::Regular)?;
    let bold = page_font(&doc, fonts, Weight::Bold)?;

    let layer = doc.get_page(page1).get_layer(layer1);
    layer.set_fill_color(black());
    layer.set_outline_color(black());
    let page_height = layout.height_mm;

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
                let x = match align {
                    Align::Left => *x_mm,
                    Align::Right => x_mm - fonts.text_width_mm(text, *size_pt, *weight),
                };
                let y = page_height - baseline_mm(*top_mm, *size_pt);
                let face = match weight {
                    Weight::Regular => &regular,
                    Weight::Bold => &bold,
                };
                layer.use_text(text.as_str(), *size_pt, Mm(x), Mm(y), face);
            }
            Element::Rule {
                x0_mm,
                x1_mm,
                y_mm,
                thickness_pt,
            } => {
                let y = Mm(page_height - y_mm);
                layer.set_outline_thickness(*thickness_pt);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x0_mm), y), false),
                        (Point::new(Mm(*x1_mm), y), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| LabelError::Pdf(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::parse_markup;

    #[test]
    fn test_write_pdf_with_builtin_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.pdf");
        let layout = parse_markup(
            "page 88.9 177.8\nfont fonts/missing.ttf\ntitle Nutrition Facts\nrule 8\nrow-bold Calories | 210\ntext Ingredients: oats",
        )
        .unwrap()
        .layout();
        let fonts = LabelFonts::load(dir.path(), &layout);

        write_pdf(&layout, &fonts, "Oats", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("label.pdf");
        let layout = parse_markup("page 50 50\ntitle Hi").unwrap().layout();

        let result = write_pdf(&layout, &LabelFonts::default(), "Hi", &path);
        assert!(matches!(result, Err(LabelError::Io(_))));
    }
}
