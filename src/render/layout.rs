//! Page layout
//!
//! Places markup blocks on the page top-down. Both the PDF writer and the
//! rasterizer paint from the same [`PageLayout`].

use super::markup::{Block, LabelDocument, Weight};

/// Points to millimetres
pub const PT_TO_MM: f32 = 0.352_778;

const MARGIN_MM: f32 = 4.0;
const INDENT_MM: f32 = 3.0;
const TITLE_PT: f32 = 22.0;
const ROW_PT: f32 = 8.0;
const TEXT_PT: f32 = 7.0;
const LINE_SPACING: f32 = 1.25;
const ASCENT: f32 = 0.8;
// Average Helvetica glyph width as a fraction of the font size
const AVG_CHAR_WIDTH: f32 = 0.52;
const RULE_PADDING_MM: f32 = 0.6;

/// Horizontal anchor of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A positioned drawing primitive; coordinates are millimetres from the
/// top-left corner of the page
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        x_mm: f32,
        top_mm: f32,
        size_pt: f32,
        weight: Weight,
        align: Align,
    },
    Rule {
        x0_mm: f32,
        x1_mm: f32,
        y_mm: f32,
        thickness_pt: f32,
    },
}

/// A fully placed page
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub font_regular: Option<String>,
    pub font_bold: Option<String>,
    pub elements: Vec<Element>,
}

/// Approximate rendered width of a string in millimetres
///
/// Uses average Helvetica metrics. Wrapping always uses this estimate; the
/// backends measure right-aligned text with the label face when one is
/// loaded (see [`super::fonts::LabelFonts::text_width_mm`]).
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_CHAR_WIDTH * PT_TO_MM
}

/// Baseline of a text element whose box starts at `top_mm`
pub fn baseline_mm(top_mm: f32, size_pt: f32) -> f32 {
    top_mm + size_pt * ASCENT * PT_TO_MM
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * LINE_SPACING * PT_TO_MM
}

/// Greedy word wrap to a maximum width
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if text_width_mm(&candidate, size_pt) > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

impl LabelDocument {
    /// Place every block on the page
    ///
    /// Content that runs past the bottom edge is still emitted; the
    /// backends clip it.
    pub fn layout(&self) -> PageLayout {
        let left = MARGIN_MM;
        let right = self.width_mm - MARGIN_MM;
        let content_width = right - left;
        let mut y = MARGIN_MM;
        let mut elements = Vec::new();

        for block in &self.blocks {
            match block {
                Block::Title(text) => {
                    elements.push(Element::Text {
                        text: text.clone(),
                        x_mm: left,
                        top_mm: y,
                        size_pt: TITLE_PT,
                        weight: Weight::Bold,
                        align: Align::Left,
                    });
                    y += line_height_mm(TITLE_PT);
                }
                Block::Rule(thickness_pt) => {
                    let thickness_mm = thickness_pt * PT_TO_MM;
                    y += RULE_PADDING_MM;
                    elements.push(Element::Rule {
                        x0_mm: left,
                        x1_mm: right,
                        y_mm: y + thickness_mm / 2.0,
                        thickness_pt: *thickness_pt,
                    });
                    y += thickness_mm + RULE_PADDING_MM;
                }
                Block::Row {
                    left: label,
                    right: value,
                    weight,
                    indent,
                } => {
                    let x = if *indent { left + INDENT_MM } else { left };
                    if !label.is_empty() {
                        elements.push(Element::Text {
                            text: label.clone(),
                            x_mm: x,
                            top_mm: y,
                            size_pt: ROW_PT,
                            weight: *weight,
                            align: Align::Left,
                        });
                    }
                    if !value.is_empty() {
                        elements.push(Element::Text {
                            text: value.clone(),
                            x_mm: right,
                            top_mm: y,
                            size_pt: ROW_PT,
                            weight: *weight,
                            align: Align::Right,
                        });
                    }
                    y += line_height_mm(ROW_PT);
                }
                Block::Text { text, weight } => {
                    for line in wrap_text(text, TEXT_PT, content_width) {
                        elements.push(Element::Text {
                            text: line,
                            x_mm: left,
                            top_mm: y,
                            size_pt: TEXT_PT,
                            weight: *weight,
                            align: Align::Left,
                        });
                        y += line_height_mm(TEXT_PT);
                    }
                }
                Block::Gap(mm) => y += mm,
            }
        }

        PageLayout {
            width_mm: self.width_mm,
            height_mm: self.height_mm,
            font_regular: self.font_regular.clone(),
            font_bold: self.font_bold.clone(),
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup::parse_markup;

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "rolled oats, carrot, potato, zucchini, spinach, salt";
        let lines = wrap_text(text, TEXT_PT, 30.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, TEXT_PT) <= 30.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", TEXT_PT, 30.0).is_empty());
    }

    #[test]
    fn test_layout_moves_down_the_page() {
        let doc = parse_markup("page 80 150\ntitle Nutrition Facts\nrule 8\nrow-bold Calories | 210\ngap 2\nrow Fat | 3%").unwrap();
        let layout = doc.layout();

        assert_eq!(layout.elements.len(), 6);
        let tops: Vec<f32> = layout
            .elements
            .iter()
            .map(|e| match e {
                Element::Text { top_mm, .. } => *top_mm,
                Element::Rule { y_mm, .. } => *y_mm,
            })
            .collect();
        assert!(tops.windows(2).all(|w| w[0] <= w[1]));

        match &layout.elements[3] {
            Element::Text { align, x_mm, .. } => {
                assert_eq!(*align, Align::Right);
                assert_eq!(*x_mm, 80.0 - MARGIN_MM);
            }
            other => panic!("expected right-aligned value, got {:?}", other),
        }
    }

    #[test]
    fn test_row_with_empty_side_emits_one_element() {
        let layout = parse_markup("page 80 150\nrow Amount per serving |").unwrap().layout();
        assert_eq!(layout.elements.len(), 1);

        let layout = parse_markup("page 80 150\nrow-bold | % Daily Value*").unwrap().layout();
        assert!(matches!(
            &layout.elements[..],
            [Element::Text { align: Align::Right, .. }]
        ));
    }
}
