//! Recipe model
//!
//! A recipe record as read from the input file.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// A single ingredient with its batch weight in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, weight: Option<f64>) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Weight used for ordering; missing weights sort as zero
    pub fn sort_weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }
}

/// Per-recipe generation options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub has_salt_variants: bool,
}

/// A recipe with its ingredients and base nutrition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub config: RecipeConfig,
}

impl Recipe {
    /// Create a recipe with no ingredients or nutrition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            serving_size: None,
            ingredients: Vec::new(),
            nutrition: Nutrition::new(),
            config: RecipeConfig::default(),
        }
    }
}
