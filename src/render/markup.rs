//! Label markup parser
//!
//! The label template renders to a small line-oriented layout language.
//! Each non-blank line is one directive:
//!
//! ```text
//! page 88.9 177.8
//! font fonts/LabelSans.ttf
//! font-bold fonts/LabelSans-Bold.ttf
//! title Nutrition Facts
//! rule 8
//! row-bold Calories | 210
//! row-indent Saturated Fat 1g | 5%
//! text Ingredients: rolled oats, carrot
//! gap 2
//! # comment
//! ```

use thiserror::Error;

/// Markup parse errors, reported with 1-based line numbers
#[derive(Debug, Error, PartialEq)]
pub enum MarkupError {
    #[error("line {line}: unknown directive '{directive}'")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: '{directive}' expects 'left | right'")]
    MissingSeparator { line: usize, directive: String },

    #[error("line {line}: page size must be two positive numbers")]
    InvalidPageSize { line: usize },

    #[error("markup has no page directive")]
    MissingPage,
}

/// Font weight of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One layout directive
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    /// Horizontal rule, thickness in points
    Rule(f32),
    Row {
        left: String,
        right: String,
        weight: Weight,
        indent: bool,
    },
    Text {
        text: String,
        weight: Weight,
    },
    /// Vertical space in millimetres
    Gap(f32),
}

/// Parsed label markup
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDocument {
    pub width_mm: f32,
    pub height_mm: f32,
    pub font_regular: Option<String>,
    pub font_bold: Option<String>,
    pub blocks: Vec<Block>,
}

/// Parse label markup into a document
pub fn parse_markup(markup: &str) -> Result<LabelDocument, MarkupError> {
    let mut page: Option<(f32, f32)> = None;
    let mut font_regular = None;
    let mut font_bold = None;
    let mut blocks = Vec::new();

    for (idx, raw) in markup.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (directive, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((d, r)) => (d, r.trim()),
            None => (trimmed, ""),
        };

        match directive {
            "page" => {
                let mut parts = rest.split_whitespace();
                let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err(MarkupError::InvalidPageSize { line });
                };
                let width = parse_number(w, line)?;
                let height = parse_number(h, line)?;
                if width <= 0.0 || height <= 0.0 {
                    return Err(MarkupError::InvalidPageSize { line });
                }
                page = Some((width, height));
            }
            "font" => font_regular = non_empty(rest),
            "font-bold" => font_bold = non_empty(rest),
            "title" => blocks.push(Block::Title(rest.to_string())),
            "rule" => blocks.push(Block::Rule(parse_number(rest, line)?)),
            "gap" => blocks.push(Block::Gap(parse_number(rest, line)?)),
            "row" | "row-bold" | "row-indent" => {
                let (left, right) = rest.split_once('|').ok_or_else(|| MarkupError::MissingSeparator {
                    line,
                    directive: directive.to_string(),
                })?;
                blocks.push(Block::Row {
                    left: left.trim().to_string(),
                    right: right.trim().to_string(),
                    weight: if directive == "row-bold" { Weight::Bold } else { Weight::Regular },
                    indent: directive == "row-indent",
                });
            }
            "text" | "text-bold" => blocks.push(Block::Text {
                text: rest.to_string(),
                weight: if directive == "text-bold" { Weight::Bold } else { Weight::Regular },
            }),
            other => {
                return Err(MarkupError::UnknownDirective {
                    line,
                    directive: other.to_string(),
                })
            }
        }
    }

    let (width_mm, height_mm) = page.ok_or(MarkupError::MissingPage)?;

    Ok(LabelDocument {
        width_mm,
        height_mm,
        font_regular,
        font_bold,
        blocks,
    })
}

fn parse_number(value: &str, line: usize) -> Result<f32, MarkupError> {
    value.trim().parse::<f32>().map_err(|_| MarkupError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let doc = parse_markup(
            "# label\n\
             page 88.9 177.8\n\
             font fonts/Sans.ttf\n\
             title Nutrition Facts\n\
             rule 8\n\
             row-bold Calories | 210\n\
             row-indent Saturated Fat 1g | 5%\n\
             row Sodium 500mg | 22%\n\
             \n\
             gap 1.5\n\
             text Ingredients: oats, carrot\n",
        )
        .unwrap();

        assert_eq!(doc.width_mm, 88.9);
        assert_eq!(doc.height_mm, 177.8);
        assert_eq!(doc.font_regular.as_deref(), Some("fonts/Sans.ttf"));
        assert_eq!(doc.font_bold, None);
        assert_eq!(doc.blocks.len(), 7);
        assert_eq!(doc.blocks[0], Block::Title("Nutrition Facts".to_string()));
        assert_eq!(doc.blocks[1], Block::Rule(8.0));
        assert_eq!(
            doc.blocks[2],
            Block::Row {
                left: "Calories".to_string(),
                right: "210".to_string(),
                weight: Weight::Bold,
                indent: false,
            }
        );
        assert_eq!(
            doc.blocks[3],
            Block::Row {
                left: "Saturated Fat 1g".to_string(),
                right: "5%".to_string(),
                weight: Weight::Regular,
                indent: true,
            }
        );
        assert_eq!(doc.blocks[5], Block::Gap(1.5));
    }

    #[test]
    fn test_text_keeps_pipes() {
        let doc = parse_markup("page 50 50\ntext a | b").unwrap();
        assert_eq!(
            doc.blocks[0],
            Block::Text {
                text: "a | b".to_string(),
                weight: Weight::Regular,
            }
        );
    }

    #[test]
    fn test_unknown_directive_reports_line() {
        let err = parse_markup("page 50 50\n\nbanner hello").unwrap_err();
        assert_eq!(
            err,
            MarkupError::UnknownDirective {
                line: 3,
                directive: "banner".to_string(),
            }
        );
    }

    #[test]
    fn test_row_without_separator() {
        let err = parse_markup("page 50 50\nrow Calories 210").unwrap_err();
        assert!(matches!(err, MarkupError::MissingSeparator { line: 2, .. }));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            parse_markup("page 50 50\nrule thick"),
            Err(MarkupError::InvalidNumber { line: 2, .. })
        ));
        assert_eq!(
            parse_markup("page 50"),
            Err(MarkupError::InvalidPageSize { line: 1 })
        );
        assert_eq!(
            parse_markup("page 0 50"),
            Err(MarkupError::InvalidPageSize { line: 1 })
        );
    }

    #[test]
    fn test_missing_page() {
        assert_eq!(parse_markup("title Hello"), Err(MarkupError::MissingPage));
    }
}
