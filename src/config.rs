use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::models::AgeBand;

/// Tolerated drift before the weight sum is reported as skewed
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Tuning knobs for the matching engine
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub weights: MatchingWeights,
    #[serde(default)]
    pub penalties: SafetyPenalties,
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_max_age_difference_months")]
    pub max_age_difference_months: f64,
    #[serde(default = "default_min_overall_score")]
    pub min_overall_score: f64,
}

/// Relative weight of each compatibility factor, expected to sum to 1.0
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingWeights {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.interests + self.age + self.distance + self.availability + self.safety
    }
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            age: default_age_weight(),
            distance: default_distance_weight(),
            availability: default_availability_weight(),
            safety: default_safety_weight(),
        }
    }
}

fn default_interests_weight() -> f64 { 0.45 }
fn default_age_weight() -> f64 { 0.20 }
fn default_distance_weight() -> f64 { 0.15 }
fn default_availability_weight() -> f64 { 0.15 }
fn default_safety_weight() -> f64 { 0.05 }

/// Deductions from the 100-point safety scale, as fractions of the scale
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SafetyPenalties {
    #[serde(default = "default_pet_allergy_penalty")]
    pub pet_allergy_conflict: f64,
    #[serde(default = "default_smoking_penalty")]
    pub smoking_concern: f64,
    #[serde(default = "default_screen_time_penalty")]
    pub screen_time_mismatch: f64,
}

impl Default for SafetyPenalties {
    fn default() -> Self {
        Self {
            pet_allergy_conflict: default_pet_allergy_penalty(),
            smoking_concern: default_smoking_penalty(),
            screen_time_mismatch: default_screen_time_penalty(),
        }
    }
}

fn default_pet_allergy_penalty() -> f64 { 0.5 }
fn default_smoking_penalty() -> f64 { 0.3 }
fn default_screen_time_penalty() -> f64 { 0.2 }

fn default_radius_km() -> f64 { 8.0 }
fn default_max_age_difference_months() -> f64 { 24.0 }
fn default_min_overall_score() -> f64 { 30.0 }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchingWeights::default(),
            penalties: SafetyPenalties::default(),
            default_radius_km: default_radius_km(),
            max_age_difference_months: default_max_age_difference_months(),
            min_overall_score: default_min_overall_score(),
        }
    }
}

impl MatchingConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PLAYCONNECT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables
            // e.g., PLAYCONNECT__WEIGHTS__INTERESTS -> weights.interests
            .add_source(
                Environment::with_prefix("PLAYCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PLAYCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Startup check that the factor weights still sum to 1.0
    ///
    /// Advisory only. Scoring always proceeds with the supplied weights and
    /// never renormalizes, so a skewed sum shifts every overall score.
    pub fn validate_weights(&self) -> bool {
        let total = self.weights.sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(
                "matching weights sum to {:.3} instead of 1.0; overall scores will be skewed",
                total
            );
            return false;
        }
        true
    }
}

/// Age bands a child of the given band may be matched with
///
/// Each band is compatible with itself and its immediate neighbors, truncated
/// at the infant and teen ends.
pub fn compatible_bands(band: AgeBand) -> &'static [AgeBand] {
    use AgeBand::*;

    match band {
        Infant0To12M => &[Infant0To12M, Toddler13To24M],
        Toddler13To24M => &[Infant0To12M, Toddler13To24M, Toddler2To3Y],
        Toddler2To3Y => &[Toddler13To24M, Toddler2To3Y, Preschool4To5Y],
        Preschool4To5Y => &[Toddler2To3Y, Preschool4To5Y, SchoolAge6To8Y],
        SchoolAge6To8Y => &[Preschool4To5Y, SchoolAge6To8Y, SchoolAge9To12Y],
        SchoolAge9To12Y => &[SchoolAge6To8Y, SchoolAge9To12Y, Teen13Plus],
        Teen13Plus => &[SchoolAge9To12Y, Teen13Plus],
    }
}
