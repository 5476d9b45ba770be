//! Variant expansion
//!
//! Expands one recipe into a label view per serving count and salt level,
//! recomputing sodium figures and ingredient order for each.

use std::cmp::Ordering;

use tracing::debug;

use super::profiles::{LabelMatrix, SaltProfile};
use crate::models::nutrition::{SERVINGS_PER_CONTAINER, SODIUM_DV, SODIUM_MG};
use crate::models::{Ingredient, LabelView, Recipe};

/// Sodium daily value reference intake in milligrams
pub const SODIUM_DAILY_VALUE_MG: f64 = 2300.0;

/// Name of the synthetic ingredient appended for salted variants
pub const SALT_INGREDIENT: &str = "salt";

/// Percent daily value for a sodium amount, rounded half-to-even
pub fn sodium_daily_value(sodium_mg: f64) -> f64 {
    (sodium_mg / SODIUM_DAILY_VALUE_MG * 100.0).round_ties_even()
}

/// Join ingredient names heaviest first
///
/// The sort is stable, so ingredients of equal weight keep their input
/// order. Missing weights count as zero, and `-0.0` ties with `0.0`.
pub fn ingredients_text(ingredients: &[Ingredient]) -> String {
    let mut sorted: Vec<&Ingredient> = ingredients.iter().collect();
    sorted.sort_by(|a, b| {
        b.sort_weight()
            .partial_cmp(&a.sort_weight())
            .unwrap_or(Ordering::Equal)
    });
    sorted
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Expands recipes across a [`LabelMatrix`]
#[derive(Debug, Clone, Default)]
pub struct VariantExpander {
    matrix: LabelMatrix,
}

impl VariantExpander {
    pub fn new(matrix: LabelMatrix) -> Self {
        Self { matrix }
    }

    /// Produce every label view for a recipe
    ///
    /// Serving counts form the outer loop and salt levels the inner one.
    pub fn expand(&self, recipe: &Recipe) -> Vec<LabelView> {
        let profiles = self.matrix.profiles_for(recipe.config.has_salt_variants);
        let mut views = Vec::with_capacity(self.matrix.serving_counts.len() * profiles.len());

        for &servings in &self.matrix.serving_counts {
            for profile in &profiles {
                views.push(Self::build_view(recipe, servings, profile));
            }
        }

        debug!(recipe = %recipe.name, variants = views.len(), "Expanded recipe");
        views
    }

    fn build_view(recipe: &Recipe, servings: u32, profile: &SaltProfile) -> LabelView {
        let mut nutrition = recipe.nutrition.clone();
        nutrition.set(SERVINGS_PER_CONTAINER, f64::from(servings));

        let sodium_mg = nutrition.get_or_zero(SODIUM_MG) + profile.sodium_mg_added;
        nutrition.set(SODIUM_MG, sodium_mg);
        nutrition.set(SODIUM_DV, sodium_daily_value(sodium_mg));

        let mut ingredients = recipe.ingredients.clone();
        if profile.salt_weight_g_per_batch > 0.0 {
            ingredients.push(Ingredient::new(
                SALT_INGREDIENT,
                Some(profile.salt_weight_g_per_batch),
            ));
        }

        LabelView {
            recipe_name: recipe.name.clone(),
            short_name: recipe.short_name.clone(),
            serving_size: recipe.serving_size.clone(),
            servings,
            salt_level: profile.level,
            ingredients_text: ingredients_text(&ingredients),
            nutrition,
        }
    }
}
