/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Convert a distance into a 0-100 proximity score
///
/// Exponential falloff calibrated so the score is exactly 10 at the edge of
/// the allowed radius. Anything beyond the radius scores 0.
#[inline]
pub fn distance_to_score(distance_km: f64, max_radius_km: f64) -> f64 {
    if distance_km > max_radius_km {
        return 0.0;
    }

    let decay_rate = -(0.1_f64.ln()) / max_radius_km;
    let score = 100.0 * (-decay_rate * distance_km).exp();

    score.min(100.0).max(0.0)
}

/// Check if two points are within a given radius of each other
#[inline]
pub fn is_within_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> bool {
    haversine_distance(lat1, lon1, lat2, lon2) <= radius_km
}

/// Bucket an exact distance into a privacy-preserving display string
pub fn fuzzy_distance(distance_km: f64) -> &'static str {
    if distance_km < 1.0 {
        "Less than 1 km away"
    } else if distance_km < 3.0 {
        "About 2 km away"
    } else if distance_km < 6.0 {
        "About 5 km away"
    } else if distance_km < 10.0 {
        "Within 10 km"
    } else if distance_km < 20.0 {
        "Within 20 km"
    } else {
        "Over 20 km away"
    }
}

/// City-level location string shown instead of an exact address
///
/// The country is appended only when it differs from US.
pub fn coarse_location(city: &str, state: Option<&str>, country: &str) -> String {
    let mut parts = vec![city];
    if let Some(state) = state {
        parts.push(state);
    }
    if !country.is_empty() && country != "US" {
        parts.push(country);
    }
    parts.join(", ")
}
