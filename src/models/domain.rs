use serde::{Deserialize, Serialize};

/// Child profile with household, interests and availability data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "ageInMonths")]
    pub age_in_months: u32,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub household: Household,
    #[serde(default)]
    pub interests: Vec<ChildInterest>,
    #[serde(rename = "availabilitySlots", default)]
    pub availability_slots: Vec<AvailabilitySlot>,
}

impl Child {
    /// Age band derived from the age in months; never stored independently
    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_months(self.age_in_months)
    }
}

/// Household attributes shared by every child living in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "matchRadiusKm")]
    pub match_radius_km: f64,
    #[serde(rename = "hasPets", default)]
    pub has_pets: bool,
    #[serde(rename = "petTypes", default)]
    pub pet_types: Vec<String>,
    #[serde(rename = "smokingHousehold", default)]
    pub smoking_household: bool,
    #[serde(rename = "screenTimePolicy", default)]
    pub screen_time_policy: Option<ScreenTimePolicy>,
}

impl Household {
    /// Helper to get both coordinates, or None when either is missing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Helper to get the screen time policy, defaulting to moderate
    pub fn screen_time(&self) -> ScreenTimePolicy {
        self.screen_time_policy.unwrap_or(ScreenTimePolicy::Moderate)
    }
}

/// Catalog interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    pub id: String,
    pub name: String,
}

/// Association between a child and a catalog interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildInterest {
    #[serde(rename = "interestId")]
    pub interest_id: String,
    pub interest: Interest,
    #[serde(default)]
    pub level: Option<ProficiencyLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenTimePolicy {
    Limited,
    Moderate,
    Unrestricted,
}

/// Developmental age band, ordered youngest to oldest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "INFANT_0_12M")]
    Infant0To12M,
    #[serde(rename = "TODDLER_13_24M")]
    Toddler13To24M,
    #[serde(rename = "TODDLER_2_3Y")]
    Toddler2To3Y,
    #[serde(rename = "PRESCHOOL_4_5Y")]
    Preschool4To5Y,
    #[serde(rename = "SCHOOL_AGE_6_8Y")]
    SchoolAge6To8Y,
    #[serde(rename = "SCHOOL_AGE_9_12Y")]
    SchoolAge9To12Y,
    #[serde(rename = "TEEN_13_PLUS")]
    Teen13Plus,
}

impl AgeBand {
    /// Maps an age in months onto its band
    pub fn from_months(age_in_months: u32) -> AgeBand {
        match age_in_months {
            0..=12 => AgeBand::Infant0To12M,
            13..=24 => AgeBand::Toddler13To24M,
            25..=47 => AgeBand::Toddler2To3Y,
            48..=71 => AgeBand::Preschool4To5Y,
            72..=107 => AgeBand::SchoolAge6To8Y,
            108..=155 => AgeBand::SchoolAge9To12Y,
            _ => AgeBand::Teen13Plus,
        }
    }
}

/// Weekly or one-off time window a child is free for playdates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilitySlot {
    #[serde(rename_all = "camelCase")]
    Recurring {
        day_of_week: DayOfWeek,
        start_time: String,
        end_time: String,
    },
    #[serde(rename_all = "camelCase")]
    AdHoc {
        start_date_time: chrono::DateTime<chrono::Utc>,
        end_date_time: chrono::DateTime<chrono::Utc>,
    },
}

impl AvailabilitySlot {
    pub fn is_recurring(&self) -> bool {
        matches!(self, AvailabilitySlot::Recurring { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Days after Monday, for dating a weekly slot inside a Monday-start week
    pub fn offset_from_monday(&self) -> i64 {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

/// The five compatibility factors a match score is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFactor {
    #[serde(rename = "Shared Interests")]
    SharedInterests,
    #[serde(rename = "Age Compatibility")]
    AgeCompatibility,
    #[serde(rename = "Distance")]
    Distance,
    #[serde(rename = "Availability Overlap")]
    AvailabilityOverlap,
    #[serde(rename = "Safety Compatibility")]
    SafetyCompatibility,
}

impl MatchFactor {
    pub fn label(&self) -> &'static str {
        match self {
            MatchFactor::SharedInterests => "Shared Interests",
            MatchFactor::AgeCompatibility => "Age Compatibility",
            MatchFactor::Distance => "Distance",
            MatchFactor::AvailabilityOverlap => "Availability Overlap",
            MatchFactor::SafetyCompatibility => "Safety Compatibility",
        }
    }

    /// Renders this factor's clause for the match explanation sentence
    pub fn explanation_clause(&self, details: &str) -> String {
        match self {
            MatchFactor::SharedInterests => format!("they share interests ({})", details),
            MatchFactor::AgeCompatibility => format!("they're close in age ({})", details),
            MatchFactor::Distance => format!("they live nearby ({})", details),
            MatchFactor::AvailabilityOverlap => {
                format!("they have overlapping availability ({})", details)
            }
            MatchFactor::SafetyCompatibility => details.to_string(),
        }
    }
}

impl std::fmt::Display for MatchFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One factor's contribution to an overall score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factor: MatchFactor,
    pub weight: f64,
    #[serde(rename = "rawScore")]
    pub raw_score: f64,
    #[serde(rename = "weightedScore")]
    pub weighted_score: f64,
    pub details: String,
}

impl ScoreBreakdown {
    pub fn new(factor: MatchFactor, weight: f64, raw_score: f64, details: String) -> Self {
        Self {
            factor,
            weight,
            raw_score,
            weighted_score: raw_score * weight,
            details,
        }
    }
}

/// Scored compatibility result for a pair of children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "childId")]
    pub child_id: String,
    #[serde(rename = "matchedChildId")]
    pub matched_child_id: String,
    #[serde(rename = "overallScore")]
    pub overall_score: u32,
    pub breakdown: Vec<ScoreBreakdown>,
    pub explanation: String,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "availableMinutes")]
    pub available_minutes: u32,
}
