//! Spheregeo: geometric constructions over longitude/latitude points on a
//! spherical Earth
//!
//! This crate computes convex hulls, buffer polygons that keep a minimum
//! geodesic distance from a point set, minimum enclosing circles, equidistant
//! (circumcenter) points and regular polygons around a coordinate. Results are
//! open rings of `(longitude, latitude)` pairs ready to be written as GeoJSON.
//!
//! ```rust
//! use spheregeo::{convex_hull, minimum_enclosing_circle};
//!
//! let square = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
//!
//! let hull = convex_hull(&square).unwrap();
//! assert_eq!(hull.len(), 4);
//!
//! let circle = minimum_enclosing_circle(&square).unwrap();
//! let (lon, lat) = circle.center.to_lon_lat();
//! assert!((lon - 0.5).abs() < 1e-3 && (lat - 0.5).abs() < 1e-3);
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod geojson;
pub mod geometry;

/// A `(longitude, latitude)` pair in decimal degrees
pub type LonLat = (f64, f64);

// Re-export commonly used types
pub use coordinates::{CoordinateFormat, Direction, GeoCoordinate, SphereVector};
pub use errors::{GeoError, HullError, Result};
pub use geometry::{
    buffer_polygon, convex_hull, equidistant_point, minimum_enclosing_circle,
    points_around_coordinate, polygon_around_coordinate, true_radius, EnclosingCircle,
};
