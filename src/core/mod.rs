// Core algorithm exports
pub mod availability;
pub mod geo;
pub mod matcher;
pub mod scoring;

pub use availability::{
    ad_hoc_overlap, format_time_range, is_valid_time_format, overlap_to_score,
    recurring_overlap_minutes, suggested_slots, time_overlap_minutes, validate_slot, SlotError,
    SuggestedSlot,
};
pub use geo::{
    coarse_location, distance_to_score, fuzzy_distance, haversine_distance, is_within_radius,
};
pub use matcher::Matcher;
pub use scoring::compute_match;
