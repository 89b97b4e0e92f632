//! Regular polygons around a coordinate and buffer polygons around point sets
//!
//! Polygons are built in a local frame centred on latitude 0°, longitude 0°
//! (the +Y axis) and rotated onto the requested center. A polygon whose
//! vertices sit at radius `r` has edges that cut inside the circle of radius
//! `r`; [`true_radius`] gives the vertex radius needed so that the edges keep
//! a requested clearance instead.

use log::debug;

use super::hull::{convex_hull_indices, AllPairs, BatchedFans};
use super::unique_coordinates;
use crate::constants::{EARTH_RADIUS_MILES, TAU};
use crate::coordinates::{GeoCoordinate, SphereVector};
use crate::errors::{GeoError, Result};
use crate::LonLat;

/// Vertex radius (miles) of a regular `vertex_count`-gon whose edges are
/// `radius_miles` from its center
///
/// Two neighbouring edge planes are built at the requested clearance around
/// the polar axis; their intersection is a vertex.
///
/// # Errors
///
/// `InvalidArgument` if `vertex_count` is below 3.
///
/// # Examples
///
/// ```rust
/// use spheregeo::true_radius;
///
/// let vertex_radius = true_radius(10.0, 8).unwrap();
/// assert!(vertex_radius > 10.0);
/// assert!(vertex_radius < 10.0 / (std::f64::consts::PI / 8.0).cos() + 1e-6);
/// ```
pub fn true_radius(radius_miles: f64, vertex_count: usize) -> Result<f64> {
    check_vertex_count(vertex_count)?;

    let angle = radius_miles / EARTH_RADIUS_MILES;
    let step = TAU / vertex_count as f64;

    let a = SphereVector::new(0.0, angle.cos(), -angle.sin());
    let b = SphereVector::new(
        step.sin() * angle.cos(),
        step.cos() * angle.cos(),
        -angle.sin(),
    );

    let vertex = SphereVector::cross_product(&a, &b)?;

    Ok(vertex.z().abs().min(1.0).acos() * EARTH_RADIUS_MILES)
}

/// `vertex_count` points at `radius_miles` from `center`
///
/// The first point lies due north of the center; the rest follow at equal
/// angular steps. Callers validate `vertex_count`.
pub fn points_around(
    center: &GeoCoordinate,
    radius_miles: f64,
    vertex_count: usize,
) -> Vec<GeoCoordinate> {
    let alpha = radius_miles / EARTH_RADIUS_MILES;
    let (coef, y) = alpha.sin_cos();

    (0..vertex_count)
        .map(|i| {
            let beta = i as f64 * TAU / vertex_count as f64;
            SphereVector::new(beta.sin() * coef, y, beta.cos() * coef)
                .rotate_from_center(center)
                .to_coordinate()
        })
        .collect()
}

/// Polygon vertices at `radius_miles` from `center`, as `(longitude, latitude)`
///
/// # Errors
///
/// `InvalidArgument` if `vertex_count` is below 3.
pub fn points_around_coordinate(
    center: LonLat,
    radius_miles: f64,
    vertex_count: usize,
) -> Result<Vec<LonLat>> {
    check_vertex_count(vertex_count)?;

    let center = GeoCoordinate::from_lon_lat(center);
    Ok(points_around(&center, radius_miles, vertex_count)
        .iter()
        .map(GeoCoordinate::to_lon_lat)
        .collect())
}

/// Polygon around `center` whose edges keep `clearance_miles` from it
///
/// # Errors
///
/// `InvalidArgument` if `vertex_count` is below 3.
pub fn polygon_around_coordinate(
    center: LonLat,
    clearance_miles: f64,
    vertex_count: usize,
) -> Result<Vec<LonLat>> {
    let vertex_radius = true_radius(clearance_miles, vertex_count)?;
    points_around_coordinate(center, vertex_radius, vertex_count)
}

/// Convex polygon keeping at least `radius_miles` between its boundary and
/// every input point
///
/// The hull of the input is computed first. Each hull vertex then gets a fan
/// of `vertex_count` points at the true radius, and the hull of all fans is
/// taken with pairs restricted to neighbouring fans. A single distinct input
/// point yields the regular polygon around it.
///
/// # Errors
///
/// - `InvalidArgument` if `vertex_count` is below 3
/// - any hull failure of either stage
pub fn buffer_polygon(
    points: &[LonLat],
    radius_miles: f64,
    vertex_count: usize,
) -> Result<Vec<LonLat>> {
    check_vertex_count(vertex_count)?;

    let coords = unique_coordinates(points);
    if coords.len() == 1 {
        return polygon_around_coordinate(coords[0].to_lon_lat(), radius_miles, vertex_count);
    }

    let vectors: Vec<SphereVector> = coords.iter().map(GeoCoordinate::to_vector).collect();
    let hull = convex_hull_indices(&vectors, &AllPairs)?;
    debug!("input hull has {} of {} points", hull.len(), coords.len());

    let vertex_radius = true_radius(radius_miles, vertex_count)?;

    // Fans must stay in hull order: the batched filter relies on it
    let fans: Vec<GeoCoordinate> = hull
        .iter()
        .flat_map(|&i| points_around(&coords[i], vertex_radius, vertex_count))
        .collect();
    let fan_vectors: Vec<SphereVector> = fans.iter().map(GeoCoordinate::to_vector).collect();

    let filter = BatchedFans::new(vertex_count, fans.len())?;
    let outline = convex_hull_indices(&fan_vectors, &filter)?;
    debug!("buffer outline has {} of {} fan points", outline.len(), fans.len());

    Ok(outline.iter().map(|&i| fans[i].to_lon_lat()).collect())
}

fn check_vertex_count(vertex_count: usize) -> Result<()> {
    if vertex_count < 3 {
        return Err(GeoError::InvalidArgument(format!(
            "polygon needs at least 3 vertices, got {}",
            vertex_count
        )));
    }
    Ok(())
}
