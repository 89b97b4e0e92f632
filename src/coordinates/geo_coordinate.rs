//! Geographic coordinates in decimal degrees
//!
//! [`GeoCoordinate`] is the value type callers work with. Anything involving
//! angles between points is delegated to [`SphereVector`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::format::{format_coordinate, CoordinateFormat};
use super::sphere_vector::{all_on_one_side, SphereVector};
use crate::constants::{
    BEARING_BAND_DEG, COINCIDENT_DEG, DEG2RAD, EARTH_RADIUS_MILES, RAD2DEG, TAU,
    VALIDITY_THRESHOLD_DEG,
};
use crate::errors::{degenerate, Result};
use crate::LonLat;

/// A latitude/longitude position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

/// Eight-way compass classification of a bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    /// Either endpoint is invalid, or the endpoints coincide
    Unknown,
}

/// Result of a point-to-great-circle-segment query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance {
    /// Distance in miles from the point to the great circle through the segment
    pub distance_miles: f64,
    /// Whether the perpendicular foot falls between the segment endpoints
    pub within_segment: bool,
    /// The perpendicular foot on the great circle
    pub closest: Option<GeoCoordinate>,
}

impl GeoCoordinate {
    /// Create from latitude and longitude in degrees, in that order
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoCoordinate {
            latitude,
            longitude,
        }
    }

    /// Create from integer micro-degrees (1e-6 degree units)
    pub fn from_micro_degrees(latitude: i32, longitude: i32) -> Self {
        Self::new(0.000001 * latitude as f64, 0.000001 * longitude as f64)
    }

    /// Create from a `(longitude, latitude)` pair, the order used at the API boundary
    pub fn from_lon_lat((longitude, latitude): LonLat) -> Self {
        Self::new(latitude, longitude)
    }

    /// Returns `(longitude, latitude)`
    pub fn to_lon_lat(&self) -> LonLat {
        (self.longitude, self.latitude)
    }

    /// Latitude in degrees, positive north
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, positive east
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// True when both latitude and longitude are away from zero
    ///
    /// This is a zero-sentinel check for uninitialized positions rather than a
    /// range check: genuine points on the equator or the prime meridian are
    /// reported invalid as well.
    pub fn is_valid(&self) -> bool {
        self.latitude.abs() > VALIDITY_THRESHOLD_DEG
            && self.longitude.abs() > VALIDITY_THRESHOLD_DEG
    }

    /// Projection onto the unit sphere
    pub fn to_vector(&self) -> SphereVector {
        SphereVector::from_coordinate(self)
    }

    /// Great-circle distance in miles
    pub fn air_distance(&self, other: &GeoCoordinate) -> f64 {
        self.to_vector().air_distance(&other.to_vector())
    }

    /// Initial great-circle bearing toward `to`, in degrees `[0, 360)`
    pub fn initial_bearing(&self, to: &GeoCoordinate) -> f64 {
        let lat1 = self.latitude * DEG2RAD;
        let lat2 = to.latitude * DEG2RAD;
        let dlon = (to.longitude - self.longitude) * DEG2RAD;

        let bearing = (dlon.sin() * lat2.cos())
            .atan2(lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos());

        ((TAU + bearing) % TAU) * RAD2DEG
    }

    /// Compass bucket of the bearing from `self` to `to`
    ///
    /// Each principal direction owns a ±30° band around it, so neighbouring
    /// bands overlap the exact 22.5° half-sectors; ties go to the first
    /// matching bucket clockwise from north.
    pub fn direction_to(&self, to: &GeoCoordinate) -> Direction {
        if !self.is_valid() || !to.is_valid() {
            return Direction::Unknown;
        }

        if (to.latitude - self.latitude).abs() < COINCIDENT_DEG
            && (to.longitude - self.longitude).abs() < COINCIDENT_DEG
        {
            return Direction::Unknown;
        }

        let r = self.initial_bearing(to);
        let band = BEARING_BAND_DEG;

        if r <= band || r >= 360.0 - band {
            Direction::North
        } else if r <= 90.0 - band {
            Direction::NorthEast
        } else if r <= 90.0 + band {
            Direction::East
        } else if r <= 180.0 - band {
            Direction::SouthEast
        } else if r <= 180.0 + band {
            Direction::South
        } else if r <= 270.0 - band {
            Direction::SouthWest
        } else if r <= 270.0 + band {
            Direction::West
        } else if r < 360.0 - band {
            Direction::NorthWest
        } else {
            Direction::Unknown
        }
    }

    /// Text form under an explicit formatting preference
    pub fn format(&self, format: CoordinateFormat) -> String {
        format_coordinate(self.latitude, self.longitude, format)
    }

    /// Signed `lat,lon` text with 5 (`short`) or 6 truncated decimals
    pub fn to_decimal_signed(&self, short: bool) -> String {
        self.format(CoordinateFormat::DecimalSigned { short })
    }

    /// Distance to the great-circle segment `a`-`b` by plane projection
    ///
    /// See [`SphereVector::distance_to_great_circle_segment`]. The closest
    /// point is only reported when it falls within the segment.
    pub fn distance_to_segment(
        &self,
        a: &GeoCoordinate,
        b: &GeoCoordinate,
    ) -> Result<SegmentDistance> {
        self.to_vector()
            .distance_to_great_circle_segment(&a.to_vector(), &b.to_vector())
    }

    /// Distance to the great-circle segment `a`-`b` by rotating into a local frame
    ///
    /// The frame puts the midpoint of `a`-`b` at (0, 0) with both endpoints on
    /// the equator. The distance is then `|asin(z)|` of the rotated point and
    /// the segment test compares longitudes. Always reports the perpendicular
    /// foot as the closest point. Agrees with
    /// [`distance_to_segment`](Self::distance_to_segment) within floating
    /// point tolerance.
    pub fn distance_to_segment_using_rotation(
        &self,
        a: &GeoCoordinate,
        b: &GeoCoordinate,
    ) -> Result<SegmentDistance> {
        let frame = PairFrame::new(a, b)?;
        let c = frame.to_frame(&self.to_vector());

        let distance_miles = c.z().clamp(-1.0, 1.0).asin().abs() * EARTH_RADIUS_MILES;

        let end = frame.endpoint_on_equator().to_coordinate();
        let within_segment = c.to_coordinate().longitude().abs() < end.longitude().abs();

        let foot_norm = c.x().hypot(c.y());
        let closest = if foot_norm == 0.0 {
            None
        } else {
            let foot = SphereVector::new(c.x() / foot_norm, c.y() / foot_norm, 0.0);
            Some(frame.from_frame(&foot).to_coordinate())
        };

        Ok(SegmentDistance {
            distance_miles,
            within_segment,
            closest,
        })
    }

    /// This point expressed in the frame where `a` and `b` sit on the equator
    /// symmetrically around (0, 0)
    pub fn relative_to_pair(&self, a: &GeoCoordinate, b: &GeoCoordinate) -> Result<GeoCoordinate> {
        let frame = PairFrame::new(a, b)?;
        Ok(frame.to_frame(&self.to_vector()).to_coordinate())
    }

    /// Crossing point of the great-circle segments `a`-`b` and `c`-`d`, if any
    ///
    /// The two great circles meet at an antipodal pair of points; a point is a
    /// genuine crossing when it is strictly closer to each endpoint of both
    /// segments than that segment's length.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` if either segment has coincident or antipodal
    /// endpoints, or both segments lie on the same great circle.
    pub fn segments_cross(
        a: &GeoCoordinate,
        b: &GeoCoordinate,
        c: &GeoCoordinate,
        d: &GeoCoordinate,
    ) -> Result<Option<GeoCoordinate>> {
        let (va, vb, vc, vd) = (a.to_vector(), b.to_vector(), c.to_vector(), d.to_vector());

        let ab = SphereVector::cross_product(&va, &vb)?;
        let cd = SphereVector::cross_product(&vc, &vd)?;
        let candidate = SphereVector::cross_product(&ab, &cd)?;

        let ab_angle = va.angle(&vb);
        let cd_angle = vc.angle(&vd);

        let on_both = |p: &SphereVector| {
            p.angle(&va) < ab_angle
                && p.angle(&vb) < ab_angle
                && p.angle(&vc) < cd_angle
                && p.angle(&vd) < cd_angle
        };

        if on_both(&candidate) {
            return Ok(Some(candidate.to_coordinate()));
        }

        let opposite = candidate.antipode();
        if on_both(&opposite) {
            return Ok(Some(opposite.to_coordinate()));
        }

        Ok(None)
    }

    /// Whether every point of `points` other than `a` and `b` lies on one side
    /// of the great circle through `a` and `b`
    ///
    /// Points exactly on the great circle are ignored. Returns `false` when
    /// `a == b`.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` when `a` and `b` are antipodal.
    pub fn same_hemisphere(
        a: &GeoCoordinate,
        b: &GeoCoordinate,
        points: &[GeoCoordinate],
    ) -> Result<bool> {
        if a == b {
            return Ok(false);
        }

        let pole = SphereVector::cross_product(&a.to_vector(), &b.to_vector())?;

        let others: Vec<SphereVector> = points
            .iter()
            .filter(|p| *p != a && *p != b)
            .map(GeoCoordinate::to_vector)
            .collect();

        Ok(all_on_one_side(&pole, &others))
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(CoordinateFormat::default()))
    }
}

/// Local frame centred on the midpoint of a pair, with the pair on the equator
struct PairFrame {
    center: GeoCoordinate,
    // cos/sin of the angle that lays the centred pair flat on the equator
    cos_a: f64,
    sin_a: f64,
    centered_a: SphereVector,
}

impl PairFrame {
    fn new(a: &GeoCoordinate, b: &GeoCoordinate) -> Result<Self> {
        if a == b {
            return Err(degenerate(format!("segment {} - {} has no length", a, b)));
        }

        let center = SphereVector::midpoint(&a.to_vector(), &b.to_vector())?.to_coordinate();
        let centered_a = a.to_vector().rotate_to_center(&center);

        let r = centered_a.x().hypot(centered_a.z());
        if r == 0.0 {
            return Err(degenerate(format!("segment {} - {} has no length", a, b)));
        }

        Ok(PairFrame {
            center,
            cos_a: centered_a.x() / r,
            sin_a: centered_a.z() / r,
            centered_a,
        })
    }

    fn to_frame(&self, v: &SphereVector) -> SphereVector {
        let m = v.rotate_to_center(&self.center);
        SphereVector::new(
            m.x() * self.cos_a + m.z() * self.sin_a,
            m.y(),
            m.z() * self.cos_a - m.x() * self.sin_a,
        )
    }

    fn from_frame(&self, v: &SphereVector) -> SphereVector {
        SphereVector::new(
            v.x() * self.cos_a - v.z() * self.sin_a,
            v.y(),
            v.z() * self.cos_a + v.x() * self.sin_a,
        )
        .rotate_from_center(&self.center)
    }

    /// Endpoint `a` after the frame change
    fn endpoint_on_equator(&self) -> SphereVector {
        let a = self.centered_a;
        SphereVector::new(a.x().hypot(a.z()), a.y(), 0.0)
    }
}
