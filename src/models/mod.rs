//! Data models
//!
//! Input records and the derived per-variant label data.

mod label_view;
pub mod nutrition;
mod recipe;

pub use label_view::LabelView;
pub use nutrition::Nutrition;
pub use recipe::{Ingredient, Recipe, RecipeConfig};
