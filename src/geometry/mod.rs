//! Geometric constructions over point sets
//!
//! - [`hull`]: gift-wrapping convex hull with pluggable pair pruning
//! - [`polygon`]: regular polygons around a point and buffer polygons
//! - [`circle`]: minimum enclosing circle and equidistant points
//!
//! Public entry points take and return `(longitude, latitude)` pairs; the
//! submodules expose the vector-level building blocks.

pub mod circle;
pub mod hull;
pub mod polygon;

pub use circle::{equidistant_point, minimum_enclosing_circle, Circle, EnclosingCircle};
pub use hull::{convex_hull, convex_hull_indices, AllPairs, BatchedFans, EdgeFilter};
pub use polygon::{
    buffer_polygon, points_around, points_around_coordinate, polygon_around_coordinate,
    true_radius,
};

use crate::coordinates::GeoCoordinate;
use crate::LonLat;

/// Converts input pairs to coordinates, dropping exact repeats but keeping
/// first-seen order
pub(crate) fn unique_coordinates(points: &[LonLat]) -> Vec<GeoCoordinate> {
    let mut unique: Vec<GeoCoordinate> = Vec::with_capacity(points.len());

    for &point in points {
        let coord = GeoCoordinate::from_lon_lat(point);
        if !unique.contains(&coord) {
            unique.push(coord);
        }
    }

    unique
}
