//! PlayConnect Match - compatibility scoring engine for the PlayConnect playdate platform
//!
//! This library scores pairs of child profiles across five weighted factors
//! (shared interests, age proximity, distance, availability overlap, safety
//! compatibility) and explains every score it produces. It performs no I/O;
//! the surrounding platform hydrates profiles and persists nothing from here.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use config::{compatible_bands, MatchingConfig, MatchingWeights, SafetyPenalties};
pub use core::{
    availability::{suggested_slots, SlotError, SuggestedSlot},
    compute_match,
    geo::{fuzzy_distance, haversine_distance},
    Matcher,
};
pub use models::{
    AgeBand, AvailabilitySlot, Child, ChildInterest, DayOfWeek, Household, Interest, MatchFactor,
    MatchResult, ProficiencyLevel, ScoreBreakdown, ScreenTimePolicy,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let distance = haversine_distance(37.7749, -122.4194, 37.7749, -122.4194);
        assert_eq!(distance, 0.0);
        assert_eq!(AgeBand::from_months(54), AgeBand::Preschool4To5Y);
    }
}
