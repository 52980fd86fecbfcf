// Model exports
pub mod domain;

pub use domain::{
    AgeBand, AvailabilitySlot, Child, ChildInterest, DayOfWeek, Household, Interest, MatchFactor,
    MatchResult, ProficiencyLevel, ScoreBreakdown, ScreenTimePolicy,
};
