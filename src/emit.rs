//! Label emission
//!
//! Renders one label view through the template and document backends and
//! writes the artifact under a deterministic file name.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::LabelResult;
use crate::models::LabelView;
use crate::render::{
    trim_trailing_whitespace, DocumentRenderer, LabelTemplate, TemplateContext, LABEL_DPI,
    TRIM_PADDING_PX,
};

/// File-name-safe form of a recipe name: spaces become underscores and
/// parentheses are dropped
pub fn safe_file_stem(recipe_name: &str) -> String {
    recipe_name.replace(' ', "_").replace(['(', ')'], "")
}

/// `{stem}_{servings}sv_{salt_level}.{ext}`
pub fn label_file_name(view: &LabelView, format: OutputFormat) -> String {
    format!(
        "{}_{}sv_{}.{}",
        safe_file_stem(&view.recipe_name),
        view.servings,
        view.salt_level,
        format.extension()
    )
}

/// Something that turns a label view into an artifact
pub trait Emit {
    /// Write the artifact for `view`, returning where it went
    fn emit(&self, view: &LabelView) -> LabelResult<PathBuf>;
}

/// Writes labels as PDF or trimmed PNG files
pub struct LabelEmitter {
    template: LabelTemplate,
    renderer: DocumentRenderer,
    output_dir: PathBuf,
    font_path: String,
    format: OutputFormat,
}

impl LabelEmitter {
    pub fn new(
        template: LabelTemplate,
        asset_dir: &Path,
        output_dir: impl Into<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        Self {
            template,
            renderer: DocumentRenderer::new(asset_dir),
            output_dir: output_dir.into(),
            font_path: asset_dir.display().to_string(),
            format,
        }
    }
}

impl Emit for LabelEmitter {
    fn emit(&self, view: &LabelView) -> LabelResult<PathBuf> {
        let path = self.output_dir.join(label_file_name(view, self.format));
        let markup = self
            .template
            .render(&TemplateContext::from_view(view, &self.font_path))?;

        match self.format {
            OutputFormat::Pdf => {
                self.renderer.write_pdf(&markup, &view.recipe_name, &path)?;
            }
            OutputFormat::Png => {
                let page = self.renderer.render_page(&markup)?;
                let img = self.renderer.rasterize(&page, LABEL_DPI)?;
                let img = trim_trailing_whitespace(img, TRIM_PADDING_PX);
                img.save_with_format(&path, ImageFormat::Png)?;
            }
        }

        debug!(path = %path.display(), "Wrote label");
        Ok(path)
    }
}
