//! Label template rendering
//!
//! Compiles the label template with [upon] once and renders it per view.
//! Templates see these values:
//!
//! | Variable           | Type             | Description                          |
//! |--------------------|------------------|--------------------------------------|
//! | `ingredients_text` | `String`         | Ingredient names, heaviest first     |
//! | `n`                | map of numbers   | Nutrition facts for this variant     |
//! | `font_path`        | `String`         | Base directory for fonts and assets  |
//! | `full_name`        | `String`         | Recipe display name                  |
//! | `short_name`       | `Option<String>` | Short recipe name                    |
//! | `serving_size`     | `Option<String>` | Serving size line                    |
//!
//! `n.key` is a strict lookup and fails the render when the recipe does not
//! define `key`. `n?.key` yields nothing instead, which `fixed` prints as an
//! empty string.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use upon::{Engine, Template};

use crate::error::{LabelError, LabelResult};
use crate::models::{LabelView, Nutrition};

/// Values handed to the template for one label
#[derive(Debug, Serialize)]
pub struct TemplateContext<'a> {
    pub ingredients_text: &'a str,
    pub n: &'a Nutrition,
    pub font_path: &'a str,
    pub full_name: &'a str,
    pub short_name: Option<&'a str>,
    pub serving_size: Option<&'a str>,
}

impl<'a> TemplateContext<'a> {
    pub fn from_view(view: &'a LabelView, font_path: &'a str) -> Self {
        Self {
            ingredients_text: &view.ingredients_text,
            n: &view.nutrition,
            font_path,
            full_name: &view.recipe_name,
            short_name: view.short_name.as_deref(),
            serving_size: view.serving_size.as_deref(),
        }
    }
}

/// A compiled label template
pub struct LabelTemplate {
    engine: Engine<'static>,
    template: Template<'static>,
}

impl LabelTemplate {
    /// Compile template source, failing early on syntax errors
    pub fn compile(source: impl Into<String>) -> LabelResult<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let source: String = source.into();
        let template = engine.compile(source)?;
        Ok(Self { engine, template })
    }

    /// Read and compile a template file
    pub fn from_file(path: &Path) -> LabelResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| LabelError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(template = %path.display(), "Compiling label template");
        Self::compile(source)
    }

    /// Render label markup for one view
    pub fn render(&self, context: &TemplateContext<'_>) -> LabelResult<String> {
        let markup = self.template.render(&self.engine, context).to_string()?;
        Ok(markup)
    }
}

/// Number formatting for label values
mod addons {
    use std::fmt::Write;
    use upon::{fmt as upon_fmt, Engine, Value};

    /// Round to one decimal place and drop a trailing `.0`
    pub(crate) fn format_amount(value: f64) -> String {
        let rounded = (value * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{}", rounded as i64)
        } else {
            format!("{:.1}", rounded)
        }
    }

    fn fixed_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::Float(n) => write!(f, "{}", format_amount(*n))?,
            Value::None => {}
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `fixed` formatter on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("fixed", fixed_formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::SaltLevel;

    fn view() -> LabelView {
        LabelView {
            recipe_name: "Carrot Soup".to_string(),
            short_name: None,
            serving_size: Some("1 cup (240g)".to_string()),
            servings: 24,
            salt_level: SaltLevel::StandardSalt,
            ingredients_text: "carrot, onion, salt".to_string(),
            nutrition: [
                ("calories", 95.0),
                ("sodium_mg", 1114.0),
                ("sodium_dv", 48.0),
                ("total_fat_g", 2.345),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_render_substitutes_values() {
        let template = LabelTemplate::compile(
            "title {{ full_name }}\n\
             {% if short_name %}text {{ short_name }}\n{% endif %}\
             row Sodium {{ n.sodium_mg|fixed }}mg | {{ n.sodium_dv|fixed }}%\n\
             row Fat {{ n.total_fat_g|fixed }}g |\n\
             text {{ ingredients_text }}\n\
             font {{ font_path }}/fonts/Sans.ttf",
        )
        .unwrap();

        let v = view();
        let markup = template
            .render(&TemplateContext::from_view(&v, "/srv/assets"))
            .unwrap();

        assert_eq!(
            markup,
            "title Carrot Soup\n\
             row Sodium 1114mg | 48%\n\
             row Fat 2.3g |\n\
             text carrot, onion, salt\n\
             font /srv/assets/fonts/Sans.ttf"
        );
    }

    #[test]
    fn test_strict_lookup_of_missing_key_is_an_error() {
        let template = LabelTemplate::compile("row Fiber {{ n.dietary_fiber_g }}g |").unwrap();
        let v = view();
        let result = template.render(&TemplateContext::from_view(&v, "."));
        assert!(matches!(result, Err(LabelError::Template(_))));
    }

    #[test]
    fn test_optional_lookup_of_missing_key_renders_blank() {
        let template = LabelTemplate::compile(
            "row Fiber {{ n?.dietary_fiber_g|fixed }}g | {{ n?.dietary_fiber_dv|fixed }}%\n\
             row Calories | {{ n?.calories|fixed }}",
        )
        .unwrap();
        let v = view();
        let markup = template.render(&TemplateContext::from_view(&v, ".")).unwrap();
        assert_eq!(markup, "row Fiber g | %\nrow Calories | 95");
    }

    #[test]
    fn test_bundled_template_renders_sparse_nutrition() {
        use crate::models::Recipe;
        use crate::render::parse_markup;
        use crate::variants::VariantExpander;

        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let template = LabelTemplate::from_file(&root.join("templates/label.tpl")).unwrap();
        let recipe: Recipe = serde_json::from_str(
            r#"{"name": "Soup", "ingredients": [{"name": "a", "weight": 1}], "nutrition": {"sodium_mg": 500}}"#,
        )
        .unwrap();

        for view in VariantExpander::default().expand(&recipe) {
            let markup = template
                .render(&TemplateContext::from_view(&view, "."))
                .unwrap();
            assert!(markup.contains("row-bold Sodium 500mg | 22%"));
            assert!(markup.contains("row-bold Calories | \n"));
            parse_markup(&markup).unwrap();
        }
    }

    #[test]
    fn test_syntax_error_fails_at_compile() {
        assert!(matches!(
            LabelTemplate::compile("title {{ full_name"),
            Err(LabelError::Template(_))
        ));
    }

    #[test]
    fn test_missing_template_file() {
        let result = LabelTemplate::from_file(Path::new("/nonexistent/label.tpl"));
        assert!(matches!(result, Err(LabelError::ReadFile { .. })));
    }

    #[test]
    fn test_bundled_template_renders_sample_data() {
        use crate::batch::load_records;
        use crate::models::Recipe;
        use crate::render::parse_markup;
        use crate::variants::VariantExpander;

        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let template = LabelTemplate::from_file(&root.join("templates/label.tpl")).unwrap();
        let expander = VariantExpander::default();

        for record in load_records(&root.join("data.json")).unwrap() {
            let recipe: Recipe = serde_json::from_value(record).unwrap();
            for view in expander.expand(&recipe) {
                let markup = template
                    .render(&TemplateContext::from_view(&view, root.to_str().unwrap()))
                    .unwrap();
                let doc = parse_markup(&markup).unwrap();
                assert_eq!(doc.width_mm, 88.9);
                assert!(markup.contains(&view.ingredients_text));
                assert!(markup.contains(&format!("{} servings per container", view.servings)));
            }
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(addons::format_amount(210.0), "210");
        assert_eq!(addons::format_amount(2.345), "2.3");
        assert_eq!(addons::format_amount(0.04), "0");
        assert_eq!(addons::format_amount(7.96), "8");
    }
}
