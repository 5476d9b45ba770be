//! Variant generation module
//!
//! Expands recipes into per-variant label views.

pub mod expander;
pub mod profiles;

pub use expander::{ingredients_text, sodium_daily_value, VariantExpander};
pub use profiles::{
    LabelMatrix, SaltLevel, SaltProfile, DEFAULT_SALT_PROFILES, DEFAULT_SERVING_COUNTS,
    REFERENCE_BATCH_SERVINGS,
};
