//! Nutrition facts mapping
//!
//! Holds the per-recipe nutrition values keyed by fact name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key for the serving count printed on the label
pub const SERVINGS_PER_CONTAINER: &str = "servings_per_container";
/// Key for sodium in milligrams
pub const SODIUM_MG: &str = "sodium_mg";
/// Key for sodium as a percent of the daily value
pub const SODIUM_DV: &str = "sodium_dv";

/// Nutritional facts, keyed by name (calories, total_fat_g, sodium_mg, ...)
///
/// Keys the input does not provide are simply absent; callers decide the
/// default at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nutrition(BTreeMap<String, f64>);

impl Nutrition {
    /// Create an empty set of facts
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value if present
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Get a value, treating a missing key as zero
    pub fn get_or_zero(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    /// Set (or overwrite) a value
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Nutrition {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
