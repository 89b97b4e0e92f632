//! Minimum enclosing circle on the sphere
//!
//! Incremental support-set search in the style of Welzl / Matoušek-Sharir-Welzl:
//! a circle through at most three support points is grown whenever a working
//! point falls outside it.
//!
//! Both the support set and the working set hold [`SupportPoint`] values that
//! carry a promotion flag. A point that has forced a change of the support set
//! is promoted, and only unpromoted support members are swapped out directly.
//! Once all three are promoted, the member to drop is chosen by geometry.

use log::{debug, warn};
use serde::Serialize;

use super::unique_coordinates;
use crate::constants::{CIRCLE_CONTAINMENT_EPSILON, CIRCLE_CONTAINMENT_RELATIVE};
use crate::coordinates::{GeoCoordinate, SphereVector};
use crate::errors::{degenerate, GeoError, Result};
use crate::LonLat;

/// A spherical cap: center on the unit sphere and radius in miles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: SphereVector,
    pub radius_miles: f64,
}

impl Circle {
    pub fn new(center: SphereVector, radius_miles: f64) -> Self {
        Circle {
            center,
            radius_miles,
        }
    }

    /// Whether `point` is inside or on the circle, up to rounding slack
    pub fn contains(&self, point: &SphereVector) -> bool {
        let slack = CIRCLE_CONTAINMENT_EPSILON.max(self.radius_miles * CIRCLE_CONTAINMENT_RELATIVE);
        point.air_distance(&self.center) <= self.radius_miles + slack
    }

    /// Smallest circle containing `a`, `b` and `c`
    ///
    /// That is the circle on the farthest pair when it already covers the
    /// third point, otherwise the circle through all three.
    ///
    /// # Errors
    ///
    /// `DegenerateInput` when the farthest pair is antipodal, or when the
    /// three-point circle cannot be constructed.
    pub fn smallest_enclosing(
        a: &SphereVector,
        b: &SphereVector,
        c: &SphereVector,
    ) -> Result<Circle> {
        let ab = a.angle_cosine(b);
        let bc = b.angle_cosine(c);
        let ac = a.angle_cosine(c);

        // Smallest cosine is the widest separation
        let (p, q, other) = if ac < ab.min(bc) {
            (a, c, b)
        } else if ab < bc {
            (a, b, c)
        } else {
            (b, c, a)
        };

        let mid = SphereVector::midpoint(p, q)?;
        if mid.angle_cosine(other) >= mid.angle_cosine(p) {
            return Ok(Circle::new(mid, mid.air_distance(p)));
        }

        let center = SphereVector::equidistant_point(a, b, c)?;
        Ok(Circle::new(center, center.air_distance(a)))
    }

    fn through(support: &[SupportPoint; 3]) -> Result<Circle> {
        Circle::smallest_enclosing(&support[0].vector, &support[1].vector, &support[2].vector)
    }
}

/// Minimum enclosing circle in geographic terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnclosingCircle {
    pub center: GeoCoordinate,
    pub radius_miles: f64,
}

impl From<Circle> for EnclosingCircle {
    fn from(circle: Circle) -> Self {
        EnclosingCircle {
            center: circle.center.to_coordinate(),
            radius_miles: circle.radius_miles,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SupportPoint {
    vector: SphereVector,
    promoted: bool,
}

impl SupportPoint {
    fn new(vector: SphereVector) -> Self {
        SupportPoint {
            vector,
            promoted: false,
        }
    }
}

/// Smallest circle containing every `(longitude, latitude)` point
///
/// Exact duplicates are ignored. One distinct point gives a zero-radius
/// circle, two give the circle on their midpoint.
///
/// # Errors
///
/// - `InsufficientPoints` for empty input
/// - `DegenerateInput` when a circle through antipodal points is required
///
/// # Examples
///
/// ```rust
/// use spheregeo::minimum_enclosing_circle;
///
/// let circle = minimum_enclosing_circle(&[(0.0, 0.0), (2.0, 0.0)]).unwrap();
/// assert!((circle.center.longitude() - 1.0).abs() < 1e-12);
/// assert!((circle.radius_miles - 69.09).abs() < 0.01);
/// ```
pub fn minimum_enclosing_circle(points: &[LonLat]) -> Result<EnclosingCircle> {
    let vectors: Vec<SphereVector> = unique_coordinates(points)
        .iter()
        .map(GeoCoordinate::to_vector)
        .collect();

    let circle = match vectors.as_slice() {
        [] => {
            return Err(GeoError::InsufficientPoints {
                required: 1,
                found: 0,
            })
        }
        [only] => Circle::new(*only, 0.0),
        [a, b] => {
            let mid = SphereVector::midpoint(a, b)?;
            Circle::new(mid, mid.air_distance(a))
        }
        all => enclose(all)?,
    };

    Ok(circle.into())
}

// Seeds the support set with the first three points; callers pass at least three
fn enclose(vectors: &[SphereVector]) -> Result<Circle> {
    let mut support = [
        SupportPoint::new(vectors[0]),
        SupportPoint::new(vectors[1]),
        SupportPoint::new(vectors[2]),
    ];
    let mut pending: Vec<SupportPoint> =
        vectors[3..].iter().copied().map(SupportPoint::new).collect();

    let mut circle = Circle::through(&support)?;
    let mut index = 0;
    let mut changes = 0usize;

    while index < pending.len() {
        let mut candidate = pending[index];
        if circle.contains(&candidate.vector) {
            index += 1;
            continue;
        }

        candidate.promoted = true;

        if let Some(slot) = support.iter().position(|s| !s.promoted) {
            pending[index] = support[slot];
            support[slot] = candidate;
            circle = Circle::through(&support)?;
        } else {
            let (slot, replacement) = replace_support(&support, &candidate.vector)?;

            let mut dropped = support[slot];
            dropped.promoted = false;
            pending[index] = dropped;

            support[slot] = candidate;
            circle = replacement;
        }

        changes += 1;
        index = 0;
    }

    debug!(
        "enclosing circle settled after {} support changes, radius {:.6} miles",
        changes, circle.radius_miles
    );

    Ok(circle)
}

// Tries dropping the third, second, then first member. The circle through the
// two kept members and the candidate must still contain the dropped one.
fn replace_support(
    support: &[SupportPoint; 3],
    candidate: &SphereVector,
) -> Result<(usize, Circle)> {
    const ORDER: [(usize, usize, usize); 3] = [(2, 0, 1), (1, 0, 2), (0, 1, 2)];

    let mut closest: Option<(usize, Circle, f64)> = None;

    for &(slot, keep1, keep2) in ORDER.iter() {
        let circle =
            Circle::smallest_enclosing(&support[keep1].vector, &support[keep2].vector, candidate)?;
        let dropped = &support[slot].vector;

        if circle.contains(dropped) {
            return Ok((slot, circle));
        }

        let excess = dropped.air_distance(&circle.center) - circle.radius_miles;
        if closest.map_or(true, |(_, _, best)| excess < best) {
            closest = Some((slot, circle, excess));
        }
    }

    let (slot, circle, excess) =
        closest.ok_or_else(|| degenerate("no replacement circle for the support set"))?;
    warn!(
        "no replacement circle contains the dropped support point; \
         dropping slot {} ({:.3e} miles outside)",
        slot, excess
    );

    Ok((slot, circle))
}

/// Point equidistant from three `(longitude, latitude)` points
///
/// Of the two antipodal solutions, the one on the same hemisphere as `a`.
///
/// # Errors
///
/// `DegenerateInput` if any two points coincide or the construction has no
/// defined direction.
pub fn equidistant_point(a: LonLat, b: LonLat, c: LonLat) -> Result<LonLat> {
    let [a, b, c] = [a, b, c].map(|p| GeoCoordinate::from_lon_lat(p).to_vector());
    let point = SphereVector::equidistant_point(&a, &b, &c)?;
    Ok(point.to_coordinate().to_lon_lat())
}
