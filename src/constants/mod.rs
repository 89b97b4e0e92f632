//! Constants module for spherical Earth calculations

use std::f64::consts::PI;

// Earth model
/// Earth's authalic (volumetric) radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.76;

// Unit conversions
/// Meters in one statute mile
pub const MILE_TO_METERS: f64 = 1609.344;
/// Meters to feet conversion factor
pub const METERS_TO_FEET: f64 = 3.2808399;
/// Meters to miles conversion factor
pub const METERS_TO_MILES: f64 = 0.000621371192;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Tolerances
/// Coordinates with |lat| or |lon| at or below this are treated as uninitialized
pub const VALIDITY_THRESHOLD_DEG: f64 = 0.0001;
/// Two coordinates closer than this in both axes have no defined bearing
pub const COINCIDENT_DEG: f64 = 0.00001;
/// Half-width of each compass bucket (an exact split would be 22.5)
pub const BEARING_BAND_DEG: f64 = 30.0;
/// Slack (miles) allowed when testing whether a point lies inside a circle
pub const CIRCLE_CONTAINMENT_EPSILON: f64 = 1e-15;
/// Additional slack as a fraction of the radius, above the rounding of `acos`
/// for co-circular points
pub const CIRCLE_CONTAINMENT_RELATIVE: f64 = 1e-11;

/// Convert kilometers to statute miles
pub fn kilometers_to_miles(km: f64) -> f64 {
    km * 1000.0 / MILE_TO_METERS
}

/// Convert statute miles to kilometers
pub fn miles_to_kilometers(miles: f64) -> f64 {
    miles * MILE_TO_METERS * 0.001
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kilometer_round_trip() {
        assert_relative_eq!(kilometers_to_miles(1.609344), 1.0, epsilon = 1e-12);
        assert_relative_eq!(miles_to_kilometers(kilometers_to_miles(50.0)), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_meter_factors_agree() {
        assert_relative_eq!(METERS_TO_MILES * MILE_TO_METERS, 1.0, epsilon = 1e-9);
    }
}
