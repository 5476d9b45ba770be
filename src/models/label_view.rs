//! Label view model
//!
//! Render-ready data for one (recipe, serving count, salt level) variant.

use serde::Serialize;

use super::Nutrition;
use crate::variants::SaltLevel;

/// Everything the emitter needs to produce one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelView {
    pub recipe_name: String,
    pub short_name: Option<String>,
    pub serving_size: Option<String>,
    pub servings: u32,
    pub salt_level: SaltLevel,
    pub ingredients_text: String,
    pub nutrition: Nutrition,
}
