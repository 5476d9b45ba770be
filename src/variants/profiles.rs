//! Salt levels and the static label matrix
//!
//! Fixed configuration tables injected into the expander.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serving counts every recipe is labeled for
pub const DEFAULT_SERVING_COUNTS: [u32; 3] = [5, 24, 48];

/// Servings in the reference batch the salt weights are measured against
pub const REFERENCE_BATCH_SERVINGS: u32 = 48;

/// Named salt level of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaltLevel {
    #[serde(rename = "noSalt")]
    NoSalt,
    #[serde(rename = "standardSalt")]
    StandardSalt,
    #[serde(rename = "highSalt")]
    HighSalt,
}

impl SaltLevel {
    /// Name used in output file names
    pub fn as_str(&self) -> &'static str {
        match self {
            SaltLevel::NoSalt => "noSalt",
            SaltLevel::StandardSalt => "standardSalt",
            SaltLevel::HighSalt => "highSalt",
        }
    }
}

impl fmt::Display for SaltLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sodium and salt-weight delta applied for one salt level
///
/// `salt_weight_g_per_batch` is measured for a batch of
/// [`REFERENCE_BATCH_SERVINGS`] and is added to the ingredient list as-is for
/// every serving count. It is not rescaled for 5 or 24 servings; whoever owns
/// recipe accuracy should confirm this before changing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaltProfile {
    pub level: SaltLevel,
    pub sodium_mg_added: f64,
    pub salt_weight_g_per_batch: f64,
}

impl SaltProfile {
    pub const fn new(level: SaltLevel, sodium_mg_added: f64, salt_weight_g_per_batch: f64) -> Self {
        Self {
            level,
            sodium_mg_added,
            salt_weight_g_per_batch,
        }
    }
}

/// Default salt profile table
pub const DEFAULT_SALT_PROFILES: [SaltProfile; 3] = [
    SaltProfile::new(SaltLevel::NoSalt, 0.0, 0.0),
    SaltProfile::new(SaltLevel::StandardSalt, 614.0, 76.0),
    SaltProfile::new(SaltLevel::HighSalt, 1228.0, 152.0),
];

/// Serving counts and salt profiles a recipe expands across
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMatrix {
    pub serving_counts: Vec<u32>,
    pub salt_profiles: Vec<SaltProfile>,
}

impl LabelMatrix {
    pub fn new(serving_counts: Vec<u32>, salt_profiles: Vec<SaltProfile>) -> Self {
        Self {
            serving_counts,
            salt_profiles,
        }
    }

    /// Look up the profile for a level
    pub fn profile(&self, level: SaltLevel) -> Option<&SaltProfile> {
        self.salt_profiles.iter().find(|p| p.level == level)
    }

    /// Profiles that apply to a recipe
    ///
    /// Recipes without salt variants only get the no-salt profile. A table
    /// without a no-salt entry falls back to a zero profile.
    pub fn profiles_for(&self, has_salt_variants: bool) -> Vec<SaltProfile> {
        if has_salt_variants {
            self.salt_profiles.clone()
        } else {
            vec![self
                .profile(SaltLevel::NoSalt)
                .copied()
                .unwrap_or(SaltProfile::new(SaltLevel::NoSalt, 0.0, 0.0))]
        }
    }
}

impl Default for LabelMatrix {
    fn default() -> Self {
        Self::new(DEFAULT_SERVING_COUNTS.to_vec(), DEFAULT_SALT_PROFILES.to_vec())
    }
}
