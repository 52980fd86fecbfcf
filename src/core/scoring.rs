use std::collections::HashSet;

use crate::config::{compatible_bands, MatchingConfig, SafetyPenalties};
use crate::core::availability::{overlap_to_score, recurring_overlap_minutes};
use crate::core::geo::{distance_to_score, haversine_distance};
use crate::models::{
    Child, Household, MatchFactor, MatchResult, ScoreBreakdown, ScreenTimePolicy,
};

/// Compute the compatibility score (0-100) for a pair of children
///
/// Scoring formula:
/// score = (
///     interest_score * 0.45 +      # Jaccard similarity over interest ids
///     age_score * 0.20 +           # Band gate, then exponential decay
///     distance_score * 0.15 +      # Haversine + exponential decay
///     availability_score * 0.15 +  # Weekly overlap against a 3h ideal
///     safety_score * 0.05          # 100 minus house-rule penalties
/// )
///
/// Each factor lands in the breakdown with its weight, raw and weighted
/// scores, and a human-readable detail line.
pub fn compute_match(subject: &Child, candidate: &Child, config: &MatchingConfig) -> MatchResult {
    let weights = &config.weights;

    // 1. Interests (Jaccard similarity)
    let (interest_score, interest_details, shared_interests) =
        calculate_interest_score(subject, candidate);

    // 2. Age (proximity with decay)
    let (age_score, age_details) =
        calculate_age_score(subject, candidate, config.max_age_difference_months);

    // 3. Distance (geographic proximity)
    let (distance_score, distance_details, distance_km) =
        calculate_distance_score(&subject.household, &candidate.household);

    // 4. Availability (weekly time overlap)
    let (availability_score, availability_details, available_minutes) =
        calculate_availability_score(subject, candidate);

    // 5. Safety (house rules compatibility)
    let (safety_score, safety_details) =
        calculate_safety_score(subject, candidate, &config.penalties);

    let breakdown = vec![
        ScoreBreakdown::new(
            MatchFactor::SharedInterests,
            weights.interests,
            interest_score,
            interest_details,
        ),
        ScoreBreakdown::new(
            MatchFactor::AgeCompatibility,
            weights.age,
            age_score,
            age_details,
        ),
        ScoreBreakdown::new(
            MatchFactor::Distance,
            weights.distance,
            distance_score,
            distance_details,
        ),
        ScoreBreakdown::new(
            MatchFactor::AvailabilityOverlap,
            weights.availability,
            availability_score,
            availability_details,
        ),
        ScoreBreakdown::new(
            MatchFactor::SafetyCompatibility,
            weights.safety,
            safety_score,
            safety_details,
        ),
    ];

    let overall_score = breakdown
        .iter()
        .map(|entry| entry.weighted_score)
        .sum::<f64>()
        .round() as u32;

    let explanation = generate_explanation(&breakdown, &subject.first_name, &candidate.first_name);

    MatchResult {
        child_id: subject.id.clone(),
        matched_child_id: candidate.id.clone(),
        overall_score,
        breakdown,
        explanation,
        shared_interests,
        distance_km,
        available_minutes,
    }
}

/// Jaccard similarity over the two children's interest-id sets, times 100
fn calculate_interest_score(subject: &Child, candidate: &Child) -> (f64, String, Vec<String>) {
    let subject_ids: HashSet<&str> = subject
        .interests
        .iter()
        .map(|entry| entry.interest_id.as_str())
        .collect();
    let candidate_ids: HashSet<&str> = candidate
        .interests
        .iter()
        .map(|entry| entry.interest_id.as_str())
        .collect();

    let intersection = subject_ids.intersection(&candidate_ids).count();
    let union = subject_ids.union(&candidate_ids).count();

    let score = if union > 0 {
        intersection as f64 / union as f64 * 100.0
    } else {
        0.0
    };

    // Shared ids in the subject's association order, duplicates collapsed
    let mut shared_interest_ids: Vec<String> = Vec::new();
    for entry in &subject.interests {
        if candidate_ids.contains(entry.interest_id.as_str())
            && !shared_interest_ids.contains(&entry.interest_id)
        {
            shared_interest_ids.push(entry.interest_id.clone());
        }
    }

    let details = if intersection > 0 {
        let shared_names: Vec<&str> = subject
            .interests
            .iter()
            .filter(|entry| candidate_ids.contains(entry.interest_id.as_str()))
            .map(|entry| entry.interest.name.as_str())
            .collect();
        format!("{} shared interests: {}", intersection, shared_names.join(", "))
    } else {
        "No shared interests".to_string()
    };

    (score, details, shared_interest_ids)
}

/// Age proximity with exponential decay, gated by band compatibility
fn calculate_age_score(
    subject: &Child,
    candidate: &Child,
    max_age_difference_months: f64,
) -> (f64, String) {
    let age_diff_months = subject.age_in_months.abs_diff(candidate.age_in_months);

    if !compatible_bands(subject.age_band()).contains(&candidate.age_band()) {
        return (
            0.0,
            format!("Age bands not compatible ({} months apart)", age_diff_months),
        );
    }

    // Exponential decay: score = 100 * e^(-k * diff)
    let decay_rate = -(0.1_f64.ln()) / max_age_difference_months;
    let score = 100.0 * (-decay_rate * f64::from(age_diff_months)).exp();

    let years = age_diff_months / 12;
    let months = age_diff_months % 12;
    let age_desc = if years > 0 {
        format!("{}y {}m", years, months)
    } else {
        format!("{}m", months)
    };

    (
        score.min(100.0).max(0.0),
        format!("{} age difference", age_desc),
    )
}

/// Geographic proximity, degrading to zero when a coordinate is missing
fn calculate_distance_score(subject: &Household, candidate: &Household) -> (f64, String, f64) {
    let (Some((lat1, lon1)), Some((lat2, lon2))) = (subject.coordinates(), candidate.coordinates())
    else {
        return (0.0, "Location not available".to_string(), 0.0);
    };

    let distance_km = haversine_distance(lat1, lon1, lat2, lon2);
    let max_radius = subject.match_radius_km.max(candidate.match_radius_km);
    let score = distance_to_score(distance_km, max_radius);

    (score, format!("{:.1} km away", distance_km), distance_km)
}

/// Weekly recurring-slot overlap converted to a score
fn calculate_availability_score(subject: &Child, candidate: &Child) -> (f64, String, u32) {
    let overlap_minutes =
        recurring_overlap_minutes(&subject.availability_slots, &candidate.availability_slots);

    let score = overlap_to_score(overlap_minutes);

    let hours = overlap_minutes / 60;
    let mins = overlap_minutes % 60;
    let time_desc = if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    };

    (
        score,
        format!("{} overlapping availability per week", time_desc),
        overlap_minutes,
    )
}

/// House-rule compatibility: independent deductions from a 100-point scale
fn calculate_safety_score(
    subject: &Child,
    candidate: &Child,
    penalties: &SafetyPenalties,
) -> (f64, String) {
    let mut score = 100.0;
    let mut issues: Vec<&str> = Vec::new();

    let home_a = &subject.household;
    let home_b = &candidate.household;

    // Pet allergies, checked in both directions
    if home_a.has_pets
        && candidate
            .allergies
            .iter()
            .any(|allergy| home_a.pet_types.contains(&allergy.to_lowercase()))
    {
        score -= penalties.pet_allergy_conflict * 100.0;
        issues.push("Pet allergy concern");
    }
    if home_b.has_pets
        && subject
            .allergies
            .iter()
            .any(|allergy| home_b.pet_types.contains(&allergy.to_lowercase()))
    {
        score -= penalties.pet_allergy_conflict * 100.0;
        issues.push("Pet allergy concern");
    }

    // Smoking
    if home_a.smoking_household || home_b.smoking_household {
        score -= penalties.smoking_concern * 100.0;
        issues.push("Smoking household");
    }

    // Screen time policy mismatch; only the extremes conflict
    let policies = (home_a.screen_time(), home_b.screen_time());
    if matches!(
        policies,
        (ScreenTimePolicy::Limited, ScreenTimePolicy::Unrestricted)
            | (ScreenTimePolicy::Unrestricted, ScreenTimePolicy::Limited)
    ) {
        score -= penalties.screen_time_mismatch * 100.0;
        issues.push("Different screen time policies");
    }

    let details = if issues.is_empty() {
        "No safety concerns".to_string()
    } else {
        issues.join(", ")
    };

    (score.max(0.0), details)
}

/// Render the breakdown into one human-readable sentence
///
/// Takes the three highest weighted factors, keeps those with a raw score
/// above 30, and joins their clauses. The stored breakdown keeps its fixed
/// factor order; only a local view is sorted here.
fn generate_explanation(
    breakdown: &[ScoreBreakdown],
    subject_name: &str,
    candidate_name: &str,
) -> String {
    let mut ranked: Vec<&ScoreBreakdown> = breakdown.iter().collect();
    ranked.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let reasons: Vec<String> = ranked
        .iter()
        .take(3)
        .filter(|entry| entry.raw_score > 30.0)
        .map(|entry| entry.factor.explanation_clause(&entry.details))
        .collect();

    if reasons.is_empty() {
        return format!(
            "{} and {} don't have strong compatibility factors.",
            subject_name, candidate_name
        );
    }

    let reasons_text = if reasons.len() > 1 {
        format!(
            "{}, and {}",
            reasons[..reasons.len() - 1].join(", "),
            reasons[reasons.len() - 1]
        )
    } else {
        reasons[0].clone()
    };

    format!("Great match because {}.", reasons_text)
}
