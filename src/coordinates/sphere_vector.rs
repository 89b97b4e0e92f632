//! # Unit Sphere Vector Module
//!
//! This module provides the 3D unit vector representation that every spherical
//! calculation in the crate is carried out in. Geographic coordinates are
//! lifted onto the unit sphere, combined with dot and cross products, rotated,
//! and projected back to latitude/longitude at the end.
//!
//! ## Coordinate System Convention
//!
//! The axes follow a map-oriented convention,
//! which differs from the usual astronomical one:
//! - **Y-axis**: Points toward latitude 0°, longitude 0°
//! - **X-axis**: Points toward latitude 0°, longitude 90°E
//! - **Z-axis**: Points toward the north pole (latitude 90°)
//!
//! so that `x = sin(lon)cos(lat)`, `y = cos(lon)cos(lat)`, `z = sin(lat)`.
//!
//! ## Degenerate Inputs
//!
//! Cross products and midpoints are renormalized to unit length. When the raw
//! result has zero magnitude (coincident or antipodal inputs) there is no
//! meaningful direction and the operation returns
//! [`GeoError::DegenerateInput`](crate::GeoError::DegenerateInput).
//!
//! ## Examples
//!
//! ```rust
//! use spheregeo::coordinates::sphere_vector::SphereVector;
//!
//! let origin = SphereVector::from_degrees(0.0, 0.0);
//! let north_pole = SphereVector::from_degrees(90.0, 0.0);
//!
//! // Perpendicular vectors
//! assert!(origin.angle_cosine(&north_pole).abs() < 1e-15);
//!
//! // Quarter of a great circle
//! let miles = origin.air_distance(&north_pole);
//! assert!((miles - 3958.76 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! ```

use nalgebra::{Matrix3, Vector3};
use std::fmt;

use super::geo_coordinate::{GeoCoordinate, SegmentDistance};
use crate::constants::{DEG2RAD, EARTH_RADIUS_MILES, RAD2DEG};
use crate::errors::{degenerate, Result};

/// A point on the unit sphere
///
/// Values are immutable; every operation returns a new vector. Equality is an
/// exact component comparison with no tolerance, which is what the hull and
/// equidistant point code rely on to detect repeated inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereVector {
    x: f64,
    y: f64,
    z: f64,
}

impl SphereVector {
    /// Creates a vector directly from Cartesian components
    ///
    /// The components are stored as given; callers are responsible for
    /// passing a unit-length vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spheregeo::coordinates::sphere_vector::SphereVector;
    ///
    /// let v = SphereVector::new(0.0, 1.0, 0.0);
    /// assert_eq!(v.y(), 1.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        SphereVector { x, y, z }
    }

    /// Projects a latitude/longitude pair in degrees onto the unit sphere
    ///
    /// # Mathematical Conversion
    ///
    /// - `x = sin(lon) * cos(lat)`
    /// - `y = cos(lon) * cos(lat)`
    /// - `z = sin(lat)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spheregeo::coordinates::sphere_vector::SphereVector;
    ///
    /// let east = SphereVector::from_degrees(0.0, 90.0);
    /// assert!((east.x() - 1.0).abs() < 1e-15);
    /// assert!(east.y().abs() < 1e-15);
    /// assert!(east.z().abs() < 1e-15);
    /// ```
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        let lat = latitude * DEG2RAD;
        let lon = longitude * DEG2RAD;
        let cos_lat = lat.cos();

        SphereVector {
            x: lon.sin() * cos_lat,
            y: lon.cos() * cos_lat,
            z: lat.sin(),
        }
    }

    /// Projects a [`GeoCoordinate`] onto the unit sphere
    pub fn from_coordinate(coord: &GeoCoordinate) -> Self {
        Self::from_degrees(coord.latitude(), coord.longitude())
    }

    /// Converts back to latitude/longitude in degrees
    ///
    /// Latitude is `asin(z)`, longitude `atan2(x, y)`. At the poles, where
    /// longitude is undefined, it is reported as 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spheregeo::coordinates::sphere_vector::SphereVector;
    ///
    /// let pole = SphereVector::new(0.0, 0.0, 1.0).to_coordinate();
    /// assert_eq!(pole.latitude(), 90.0);
    /// assert_eq!(pole.longitude(), 0.0);
    /// ```
    pub fn to_coordinate(&self) -> GeoCoordinate {
        let latitude = self.z.clamp(-1.0, 1.0).asin() * RAD2DEG;

        let longitude = if self.x.hypot(self.y) == 0.0 {
            0.0
        } else {
            self.x.atan2(self.y) * RAD2DEG
        };

        GeoCoordinate::new(latitude, longitude)
    }

    /// X-component (toward longitude 90°E on the equator)
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-component (toward latitude 0°, longitude 0°)
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z-component (toward the north pole)
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Raw dot product without clamping
    pub fn dot(&self, other: &SphereVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cosine of the angle between two unit vectors
    ///
    /// The dot product is clamped to `[-1, 1]` so that floating point
    /// overshoot never pushes `acos` out of its domain.
    pub fn angle_cosine(&self, other: &SphereVector) -> f64 {
        self.dot(other).clamp(-1.0, 1.0)
    }

    /// Angle between two unit vectors in radians, in `[0, π]`
    pub fn angle(&self, other: &SphereVector) -> f64 {
        self.angle_cosine(other).acos()
    }

    /// Great-circle distance in miles on the authalic Earth sphere
    pub fn air_distance(&self, other: &SphereVector) -> f64 {
        self.angle(other) * EARTH_RADIUS_MILES
    }

    /// The point on the opposite side of the sphere
    pub fn antipode(&self) -> SphereVector {
        SphereVector::new(-self.x, -self.y, -self.z)
    }

    /// Normalized cross product `a × b`
    ///
    /// This is the pole of the great circle through `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` when `a` and `b` coincide or are antipodal,
    /// since the raw product then has zero magnitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spheregeo::coordinates::sphere_vector::SphereVector;
    ///
    /// let a = SphereVector::from_degrees(0.0, 0.0);
    /// let b = SphereVector::from_degrees(0.0, 90.0);
    /// let pole = SphereVector::cross_product(&a, &b).unwrap();
    /// assert!((pole.z().abs() - 1.0).abs() < 1e-15);
    ///
    /// assert!(SphereVector::cross_product(&a, &a).is_err());
    /// ```
    pub fn cross_product(a: &SphereVector, b: &SphereVector) -> Result<SphereVector> {
        let raw = a.to_vector3().cross(&b.to_vector3());

        raw.try_normalize(0.0)
            .map(Self::from_vector3)
            .ok_or_else(|| {
                degenerate(format!(
                    "cross product of {} and {} has zero magnitude",
                    a, b
                ))
            })
    }

    /// Normalized midpoint of the shorter arc between `a` and `b`
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` when `a` and `b` are antipodal.
    pub fn midpoint(a: &SphereVector, b: &SphereVector) -> Result<SphereVector> {
        (a.to_vector3() + b.to_vector3())
            .try_normalize(0.0)
            .map(Self::from_vector3)
            .ok_or_else(|| degenerate(format!("midpoint of antipodal {} and {}", a, b)))
    }

    /// Spherical circumcenter of three points
    ///
    /// Intersects the perpendicular bisector planes of `(a, b)` and `(a, c)`.
    /// Of the two antipodal intersections, the one on the same hemisphere as
    /// `a` is returned.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` if any two of the points coincide, or if the
    /// bisector planes cannot be intersected.
    pub fn equidistant_point(
        a: &SphereVector,
        b: &SphereVector,
        c: &SphereVector,
    ) -> Result<SphereVector> {
        if a == b || b == c || a == c {
            return Err(degenerate("cannot calculate equidistant point of repeated vertices"));
        }

        let plane1 = Self::bisector_plane(a, b)?;
        let plane2 = Self::bisector_plane(a, c)?;

        let eq_point = Self::cross_product(&plane1, &plane2)?;

        if eq_point.angle_cosine(a) < 0.0 {
            Ok(eq_point.antipode())
        } else {
            Ok(eq_point)
        }
    }

    /// Normal of the great circle that bisects the arc `a`-`b` at right angles
    fn bisector_plane(a: &SphereVector, b: &SphereVector) -> Result<SphereVector> {
        let mid = Self::midpoint(a, b)?;
        let pole = Self::cross_product(a, b)?;
        Self::cross_product(&mid, &pole)
    }

    /// Rotates the frame so that `reference` moves to latitude 0°, longitude 0°
    ///
    /// The rotation is applied in two stages: first around the polar axis by
    /// the negated longitude, then a tilt by the negated latitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spheregeo::coordinates::GeoCoordinate;
    /// use spheregeo::coordinates::sphere_vector::SphereVector;
    ///
    /// let paris = GeoCoordinate::new(48.8566, 2.3522);
    /// let moved = SphereVector::from_coordinate(&paris).rotate_to_center(&paris);
    /// assert!((moved.y() - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate_to_center(&self, reference: &GeoCoordinate) -> SphereVector {
        let gamma = -reference.longitude() * DEG2RAD;
        let theta = -reference.latitude() * DEG2RAD;

        let rotation = tilt(theta) * polar_rotation(gamma);
        Self::from_vector3(rotation * self.to_vector3())
    }

    /// Inverse of [`rotate_to_center`](Self::rotate_to_center)
    ///
    /// Takes a vector expressed in the frame centred on `reference` back to
    /// the global frame: tilt by the latitude first, then rotate around the
    /// polar axis by the longitude.
    pub fn rotate_from_center(&self, reference: &GeoCoordinate) -> SphereVector {
        let gamma = reference.longitude() * DEG2RAD;
        let theta = reference.latitude() * DEG2RAD;

        let rotation = polar_rotation(gamma) * tilt(theta);
        Self::from_vector3(rotation * self.to_vector3())
    }

    /// Distance from this point to the great-circle segment `a`-`b`
    ///
    /// Projects the point onto the plane of the great circle through `a` and
    /// `b`, giving the foot `T`. The point falls within the finite segment iff
    /// `T` is angularly closer to both endpoints than they are to each other.
    /// The returned distance is always the distance to `T`; the closest point
    /// is reported only when it lies within the segment.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` if `a` and `b` coincide or are antipodal, or if this
    /// point is a pole of their great circle.
    pub fn distance_to_great_circle_segment(
        &self,
        a: &SphereVector,
        b: &SphereVector,
    ) -> Result<SegmentDistance> {
        let g = Self::cross_product(a, b)?;
        let f = Self::cross_product(self, &g)?;
        let t = Self::cross_product(&g, &f)?;

        let distance_miles = self.air_distance(&t);

        let within_segment = t.lies_between(a, b);

        Ok(SegmentDistance {
            distance_miles,
            within_segment,
            closest: within_segment.then(|| t.to_coordinate()),
        })
    }

    /// Whether this point is strictly closer to both `a` and `b` than they
    /// are to each other
    ///
    /// For a point on the great circle through `a` and `b` this holds exactly
    /// when it lies inside the shorter arc between them.
    pub fn lies_between(&self, a: &SphereVector, b: &SphereVector) -> bool {
        let cos_ab = a.angle_cosine(b);
        cos_ab < self.angle_cosine(a) && cos_ab < self.angle_cosine(b)
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3 without renormalizing
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        SphereVector {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl fmt::Display for SphereVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl From<GeoCoordinate> for SphereVector {
    fn from(coord: GeoCoordinate) -> Self {
        SphereVector::from_coordinate(&coord)
    }
}

impl From<SphereVector> for GeoCoordinate {
    fn from(vector: SphereVector) -> Self {
        vector.to_coordinate()
    }
}

/// Whether every point lies on the same side of the great circle with pole `pole`
///
/// The side is the sign of the dot product with the pole. Points exactly on
/// the great circle (dot product of zero) do not count either way.
pub fn all_on_one_side<'a, I>(pole: &SphereVector, points: I) -> bool
where
    I: IntoIterator<Item = &'a SphereVector>,
{
    let mut first_side: Option<bool> = None;

    for point in points {
        let value = point.dot(pole);
        if value == 0.0 {
            continue;
        }

        let positive = value > 0.0;
        match first_side {
            None => first_side = Some(positive),
            Some(side) if side != positive => return false,
            Some(_) => {}
        }
    }

    true
}

// Stage one: rotate around the polar (z) axis
fn polar_rotation(gamma: f64) -> Matrix3<f64> {
    let (s, c) = gamma.sin_cos();
    Matrix3::new(
        c, s, 0.0, //
        -s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

// Stage two: tilt in the y/z plane, x unchanged
fn tilt(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::GeoError;
    use rstest::rstest;

    #[test]
    fn test_projection_axes() {
        let origin = SphereVector::from_degrees(0.0, 0.0);
        assert_abs_diff_eq!(origin.x(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(origin.y(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(origin.z(), 0.0, epsilon = 1e-15);

        let north = SphereVector::from_degrees(90.0, 0.0);
        assert_abs_diff_eq!(north.z(), 1.0, epsilon = 1e-15);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(45.0, 45.0)]
    #[case(-33.8688, 151.2093)]
    #[case(64.1466, -21.9426)]
    #[case(-89.5, 179.5)]
    #[case(89.5, -179.5)]
    fn test_round_trip(#[case] lat: f64, #[case] lon: f64) {
        let back = SphereVector::from_degrees(lat, lon).to_coordinate();
        assert_abs_diff_eq!(back.latitude(), lat, epsilon = 1e-9);
        assert_abs_diff_eq!(back.longitude(), lon, epsilon = 1e-9);
    }

    #[test]
    fn test_pole_longitude_is_zero() {
        let south = SphereVector::new(0.0, 0.0, -1.0).to_coordinate();
        assert_eq!(south.latitude(), -90.0);
        assert_eq!(south.longitude(), 0.0);
    }

    #[test]
    fn test_angle_cosine_is_clamped() {
        let overshoot = SphereVector::new(1.0 + 1e-12, 0.0, 0.0);
        let x_axis = SphereVector::new(1.0, 0.0, 0.0);
        assert_eq!(overshoot.angle_cosine(&x_axis), 1.0);
        assert_eq!(overshoot.angle(&x_axis), 0.0);

        let opposite = SphereVector::new(-1.0 - 1e-12, 0.0, 0.0);
        assert_eq!(opposite.angle_cosine(&x_axis), -1.0);
    }

    #[test]
    fn test_air_distance_one_degree() {
        let a = SphereVector::from_degrees(0.0, 0.0);
        let b = SphereVector::from_degrees(1.0, 0.0);
        let expected = EARTH_RADIUS_MILES * DEG2RAD;
        assert_abs_diff_eq!(a.air_distance(&b), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_cross_product_is_unit_and_perpendicular() {
        let a = SphereVector::from_degrees(10.0, 20.0);
        let b = SphereVector::from_degrees(-5.0, 40.0);
        let c = SphereVector::cross_product(&a, &b).unwrap();

        assert_abs_diff_eq!(c.to_vector3().norm(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c.dot(&a), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c.dot(&b), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_cross_product_degenerate() {
        let a = SphereVector::new(0.0, 1.0, 0.0);

        let same = SphereVector::cross_product(&a, &a);
        assert!(matches!(same, Err(GeoError::DegenerateInput(_))));

        let opposite = SphereVector::cross_product(&a, &a.antipode());
        assert!(matches!(opposite, Err(GeoError::DegenerateInput(_))));
    }

    #[test]
    fn test_midpoint() {
        let a = SphereVector::from_degrees(0.0, 10.0);
        let b = SphereVector::from_degrees(0.0, 20.0);
        let m = SphereVector::midpoint(&a, &b).unwrap().to_coordinate();
        assert_abs_diff_eq!(m.latitude(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.longitude(), 15.0, epsilon = 1e-12);

        assert!(SphereVector::midpoint(&a, &a.antipode()).is_err());
    }

    #[test]
    fn test_equidistant_point_is_equidistant() {
        let a = SphereVector::from_degrees(40.0, -74.0);
        let b = SphereVector::from_degrees(41.5, -72.0);
        let c = SphereVector::from_degrees(39.0, -71.5);
        let e = SphereVector::equidistant_point(&a, &b, &c).unwrap();

        let da = e.air_distance(&a);
        assert_abs_diff_eq!(e.air_distance(&b), da, epsilon = 1e-7);
        assert_abs_diff_eq!(e.air_distance(&c), da, epsilon = 1e-7);
        // Chosen on the same hemisphere as the inputs
        assert!(e.angle_cosine(&a) > 0.0);
    }

    #[test]
    fn test_equidistant_point_rejects_repeats() {
        let a = SphereVector::from_degrees(40.0, -74.0);
        let b = SphereVector::from_degrees(41.5, -72.0);
        let result = SphereVector::equidistant_point(&a, &b, &a);
        assert!(matches!(result, Err(GeoError::DegenerateInput(_))));
    }

    #[rstest]
    #[case(48.8566, 2.3522)]
    #[case(-41.2865, 174.7762)]
    #[case(21.3069, -157.8583)]
    fn test_rotate_to_center_and_back(#[case] lat: f64, #[case] lon: f64) {
        let reference = GeoCoordinate::new(lat, lon);

        let centered = SphereVector::from_coordinate(&reference).rotate_to_center(&reference);
        assert_abs_diff_eq!(centered.x(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centered.y(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(centered.z(), 0.0, epsilon = 1e-12);

        let other = SphereVector::from_degrees(10.0, 20.0);
        let back = other.rotate_to_center(&reference).rotate_from_center(&reference);
        assert_abs_diff_eq!(back.x(), other.x(), epsilon = 1e-12);
        assert_abs_diff_eq!(back.y(), other.y(), epsilon = 1e-12);
        assert_abs_diff_eq!(back.z(), other.z(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_preserves_angles() {
        let reference = GeoCoordinate::new(35.0, 139.0);
        let a = SphereVector::from_degrees(34.0, 135.5);
        let b = SphereVector::from_degrees(43.0, 141.3);

        let before = a.angle(&b);
        let after = a
            .rotate_to_center(&reference)
            .angle(&b.rotate_to_center(&reference));
        assert_abs_diff_eq!(before, after, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to_segment_within() {
        // Segment along the equator, point one degree north of its middle
        let a = SphereVector::from_degrees(0.0, 10.0);
        let b = SphereVector::from_degrees(0.0, 20.0);
        let p = SphereVector::from_degrees(1.0, 15.0);

        let result = p.distance_to_great_circle_segment(&a, &b).unwrap();
        assert!(result.within_segment);
        assert_abs_diff_eq!(result.distance_miles, EARTH_RADIUS_MILES * DEG2RAD, epsilon = 1e-8);

        let closest = result.closest.unwrap();
        assert_abs_diff_eq!(closest.latitude(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(closest.longitude(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_to_segment_outside() {
        let a = SphereVector::from_degrees(0.0, 10.0);
        let b = SphereVector::from_degrees(0.0, 20.0);
        let p = SphereVector::from_degrees(2.0, 30.0);

        let result = p.distance_to_great_circle_segment(&a, &b).unwrap();
        assert!(!result.within_segment);
        assert!(result.closest.is_none());
        // Still the distance to the full great circle
        assert_abs_diff_eq!(
            result.distance_miles,
            2.0 * EARTH_RADIUS_MILES * DEG2RAD,
            epsilon = 1e-8
        );
    }

    #[rstest]
    #[case(11.0, true)]
    #[case(10.0, false)]
    #[case(9.0, false)]
    #[case(13.0, false)]
    fn test_lies_between_on_the_equator(#[case] lon: f64, #[case] expected: bool) {
        let a = SphereVector::from_degrees(0.0, 10.0);
        let b = SphereVector::from_degrees(0.0, 12.0);
        assert_eq!(SphereVector::from_degrees(0.0, lon).lies_between(&a, &b), expected);
    }
}
