//! Coordinate representations
//!
//! - [`geo_coordinate`]: degree based latitude/longitude values
//! - [`sphere_vector`]: the unit vector form all angular math runs in
//! - [`format`]: text rendering under an explicit [`CoordinateFormat`]

pub mod format;
pub mod geo_coordinate;
pub mod sphere_vector;

pub use format::{CoordinateFormat, DistanceUnit};
pub use geo_coordinate::{Direction, GeoCoordinate, SegmentDistance};
pub use sphere_vector::SphereVector;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_coordinate_vector_conversions() {
        let coord = GeoCoordinate::new(-12.5, 130.8);

        let vector: SphereVector = coord.into();
        assert_abs_diff_eq!(vector.to_vector3().norm(), 1.0, epsilon = 1e-15);

        let back: GeoCoordinate = vector.into();
        assert_abs_diff_eq!(back.latitude(), -12.5, epsilon = 1e-12);
        assert_abs_diff_eq!(back.longitude(), 130.8, epsilon = 1e-12);
    }

    #[test]
    fn test_air_distance_agrees_between_types() {
        // London to Paris, roughly 213 miles
        let london = GeoCoordinate::new(51.5074, -0.1278);
        let paris = GeoCoordinate::new(48.8566, 2.3522);

        let miles = london.air_distance(&paris);
        assert!((miles - 213.0).abs() < 2.0, "distance {}", miles);
        assert_eq!(miles, london.to_vector().air_distance(&paris.to_vector()));
    }
}
