//! Convex hull on the sphere by gift wrapping
//!
//! The march works on indices into a slice of [`SphereVector`]s. A pair
//! `(i, j)` is a hull edge when all other points lie on one side of the great
//! circle through `points[i]` and `points[j]`. Which pairs are even considered
//! is decided by an [`EdgeFilter`]: [`AllPairs`] for arbitrary input, and
//! [`BatchedFans`] for point sets generated as fans around consecutive hull
//! vertices, where only neighbouring fans can contribute an edge.

use log::{debug, warn};

use crate::coordinates::sphere_vector::all_on_one_side;
use crate::coordinates::{GeoCoordinate, SphereVector};
use crate::errors::{GeoError, HullError, Result};
use crate::LonLat;

use super::unique_coordinates;

/// Decides which index pairs the hull search may test
pub trait EdgeFilter {
    /// Whether the pair `(i, j)` is worth testing; callers pass `i < j`
    fn admits(&self, i: usize, j: usize) -> bool;
}

/// Every pair is admissible
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairs;

impl EdgeFilter for AllPairs {
    fn admits(&self, _i: usize, _j: usize) -> bool {
        true
    }
}

/// Pair pruning for points laid out in consecutive fans of `batch_count`
///
/// Array position determines fan membership, so the input order must be
/// preserved. Admissible pairs are:
/// - neighbours within one fan, including its first and last element
/// - any pair from adjacent fans
/// - any pair from the first and the last fan, which closes the loop
#[derive(Debug, Clone, Copy)]
pub struct BatchedFans {
    batch_count: usize,
    len: usize,
}

impl BatchedFans {
    /// Filter for `len` points arranged in fans of `batch_count`
    pub fn new(batch_count: usize, len: usize) -> Result<Self> {
        if batch_count == 0 {
            return Err(GeoError::InvalidArgument(
                "batch count must be positive".to_string(),
            ));
        }
        Ok(BatchedFans { batch_count, len })
    }
}

impl EdgeFilter for BatchedFans {
    fn admits(&self, i: usize, j: usize) -> bool {
        let batch1 = i / self.batch_count;
        let batch2 = j / self.batch_count;

        let first_last = batch1 == 0 && batch2 + 1 == self.len / self.batch_count;

        if batch2 - batch1 > 1 && !first_last {
            return false;
        }

        if batch1 == batch2 {
            let gap = j - i;
            if gap > 1 && gap != self.batch_count - 1 {
                return false;
            }
        }

        true
    }
}

/// Indices of the hull vertices of `points`, in walk order
///
/// The ring is open: the first vertex is not repeated at the end.
///
/// # Errors
///
/// - `HullError::InsufficientPoints` for fewer than two points
/// - `HullError::NonCircularWalk` when no start edge exists or the march
///   fails to return to its starting vertex
/// - `DegenerateInput` if a tested pair is antipodal
pub fn convex_hull_indices<F: EdgeFilter>(
    points: &[SphereVector],
    filter: &F,
) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 2 {
        return Err(HullError::InsufficientPoints { count: n }.into());
    }

    let (start, second) = match find_start_edge(points, filter)? {
        Some(edge) => edge,
        None => {
            warn!("no hull edge found among {} points", n);
            return Err(HullError::NonCircularWalk {
                start: None,
                last: None,
                visited: 0,
            }
            .into());
        }
    };
    debug!("hull start edge ({}, {}) among {} points", start, second, n);

    let mut walk = vec![start, second];
    let (mut prev, mut cur) = (start, second);

    while cur != start {
        if walk.len() > n {
            warn!("hull walk exceeded {} vertices without closing", n);
            return Err(non_circular(start, cur, walk.len()));
        }

        match next_vertex(points, filter, prev, cur)? {
            Some(next) => {
                walk.push(next);
                prev = cur;
                cur = next;
            }
            // Only the edge back to where we came from is left: a two-vertex hull
            None if prev == start => {
                walk.push(start);
                cur = start;
            }
            None => {
                warn!("hull walk stuck at index {} after {} vertices", cur, walk.len());
                return Err(non_circular(start, cur, walk.len()));
            }
        }
    }

    // The start index is recorded at both ends of a closed walk
    walk.remove(0);
    debug!("hull closed with {} vertices", walk.len());

    Ok(walk)
}

/// Convex hull of `(longitude, latitude)` points
///
/// Exact duplicate points are ignored. The result is an open ring of hull
/// vertices in walk order (either winding).
///
/// # Examples
///
/// ```rust
/// use spheregeo::convex_hull;
///
/// let points = [(10.0, 10.0), (11.0, 10.0), (10.5, 10.2), (11.0, 11.0), (10.0, 11.0)];
/// let hull = convex_hull(&points).unwrap();
/// assert_eq!(hull.len(), 4);
/// assert!(!hull.contains(&(10.5, 10.2)));
/// ```
pub fn convex_hull(points: &[LonLat]) -> Result<Vec<LonLat>> {
    let coords = unique_coordinates(points);
    let vectors: Vec<SphereVector> = coords.iter().map(GeoCoordinate::to_vector).collect();

    let indices = convex_hull_indices(&vectors, &AllPairs)?;

    Ok(indices.iter().map(|&i| coords[i].to_lon_lat()).collect())
}

fn find_start_edge<F: EdgeFilter>(
    points: &[SphereVector],
    filter: &F,
) -> Result<Option<(usize, usize)>> {
    let n = points.len();

    for i in 0..n {
        for j in (i + 1)..n {
            if filter.admits(i, j) && is_hull_edge(points, i, j)? {
                return Ok(Some((i, j)));
            }
        }
    }

    Ok(None)
}

// Candidates are scanned from cur + 1 with wraparound: in batched mode the
// next vertex almost always has a larger index.
fn next_vertex<F: EdgeFilter>(
    points: &[SphereVector],
    filter: &F,
    prev: usize,
    cur: usize,
) -> Result<Option<usize>> {
    let n = points.len();

    for step in 1..n {
        let index = (cur + step) % n;
        if index == prev {
            continue;
        }

        if filter.admits(cur.min(index), cur.max(index)) && is_hull_edge(points, cur, index)? {
            return Ok(Some(index));
        }
    }

    Ok(None)
}

fn is_hull_edge(points: &[SphereVector], i: usize, j: usize) -> Result<bool> {
    let (a, b) = (&points[i], &points[j]);
    if a == b {
        return Ok(false);
    }

    let pole = SphereVector::cross_product(a, b)?;

    let others = || {
        points
            .iter()
            .enumerate()
            .filter(move |(k, _)| *k != i && *k != j)
            .map(|(_, p)| p)
    };

    // A point on the great circle but beyond the arc means (a, b) is not an edge
    if others().any(|p| p.dot(&pole) == 0.0 && !p.lies_between(a, b)) {
        return Ok(false);
    }

    Ok(all_on_one_side(&pole, others()))
}

fn non_circular(start: usize, last: usize, visited: usize) -> GeoError {
    HullError::NonCircularWalk {
        start: Some(start),
        last: Some(last),
        visited,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vectors(points: &[LonLat]) -> Vec<SphereVector> {
        points
            .iter()
            .map(|&(lon, lat)| SphereVector::from_degrees(lat, lon))
            .collect()
    }

    #[test]
    fn test_square_hull_order() {
        let square = vectors(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let hull = convex_hull_indices(&square, &AllPairs).unwrap();
        assert_eq!(hull, vec![1, 2, 3, 0]);
    }

    #[rstest]
    // Three points on the equator and an apex north of them
    #[case(
        &[(10.0, 0.0), (12.0, 0.0), (11.0, 0.0), (11.0, 1.0)],
        vec![(12.0, 0.0), (11.0, 1.0), (10.0, 0.0)]
    )]
    // Three points on the prime meridian and an apex east of them
    #[case(
        &[(0.0, 10.0), (0.0, 12.0), (0.0, 11.0), (1.0, 11.0)],
        vec![(0.0, 12.0), (1.0, 11.0), (0.0, 10.0)]
    )]
    fn test_points_exactly_on_an_edge_circle(
        #[case] points: &[LonLat],
        #[case] expected: Vec<LonLat>,
    ) {
        assert_eq!(convex_hull(points).unwrap(), expected);
    }

    #[test]
    fn test_collinear_points_close_on_the_extremes() {
        let hull = convex_hull(&[(10.0, 0.0), (11.0, 0.0), (12.0, 0.0)]).unwrap();
        assert_eq!(hull, vec![(12.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_interior_points_excluded() {
        let points = vectors(&[
            (20.0, 40.0),
            (20.5, 40.5),
            (22.0, 40.0),
            (21.0, 40.2),
            (22.0, 42.0),
            (21.2, 41.1),
            (20.0, 42.0),
        ]);
        let mut hull = convex_hull_indices(&points, &AllPairs).unwrap();
        hull.sort_unstable();
        assert_eq!(hull, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_two_points() {
        let points = vectors(&[(5.0, 5.0), (6.0, 6.0)]);
        let hull = convex_hull_indices(&points, &AllPairs).unwrap();
        assert_eq!(hull, vec![1, 0]);
    }

    #[test]
    fn test_insufficient_points() {
        let result = convex_hull_indices(&vectors(&[(5.0, 5.0)]), &AllPairs);
        assert!(matches!(
            result,
            Err(GeoError::Hull(HullError::InsufficientPoints { count: 1 }))
        ));
    }

    #[test]
    fn test_identical_points_have_no_edge() {
        let points = vectors(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        let result = convex_hull_indices(&points, &AllPairs);
        assert!(matches!(
            result,
            Err(GeoError::Hull(HullError::NonCircularWalk { start: None, .. }))
        ));
    }

    #[test]
    fn test_public_hull_ignores_duplicates() {
        let points = [(0.0, 0.0), (0.0, 1.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)];
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull, vec![(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_batched_fans_admissibility() {
        // 4 fans of 5 points
        let filter = BatchedFans::new(5, 20).unwrap();

        // Neighbours within a fan
        assert!(filter.admits(6, 7));
        // First and last of a fan
        assert!(filter.admits(5, 9));
        // Non-neighbours within a fan
        assert!(!filter.admits(5, 7));
        // Adjacent fans
        assert!(filter.admits(3, 8));
        assert!(filter.admits(9, 14));
        // Fans two apart
        assert!(!filter.admits(2, 12));
        // First and last fan close the loop
        assert!(filter.admits(1, 17));
    }

    #[test]
    fn test_batched_fans_rejects_zero() {
        assert!(matches!(
            BatchedFans::new(0, 10),
            Err(GeoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_filter_does_not_change_small_hull() {
        let points = vectors(&[(0.0, 10.0), (1.0, 10.0), (1.0, 11.0), (0.0, 11.0)]);
        let plain = convex_hull_indices(&points, &AllPairs).unwrap();
        // One fan holding every point
        let batched = convex_hull_indices(&points, &BatchedFans::new(4, 4).unwrap()).unwrap();
        assert_eq!(plain, batched);
    }
}
