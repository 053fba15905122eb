//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points
//!
//! Visibility uses a tolerance scaled by the point cloud's bounding-box
//! diagonal; degeneracy of the initial simplex is decided exactly with
//! `robust::orient3d`.

use crate::error::MeshError;
use crate::solid::Solid;
use config::constants::HULL_EPSILON;
use glam::DVec3;
use robust::{orient3d, Coord3D};
use std::collections::{BTreeMap, HashMap};

/// Computes the convex hull of a set of 3D points.
///
/// # Arguments
///
/// * `points` - Points to compute hull of (at least 4 non-coplanar)
///
/// # Returns
///
/// A closed, outward-wound solid whose vertices are a subset of `points`.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] when fewer than four distinct points
/// are given or they are collinear or coplanar.
///
/// # Example
///
/// ```rust
/// use solid_mesh::ops::hull::convex_hull;
/// use glam::DVec3;
///
/// let points = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let hull = convex_hull(&points).unwrap();
/// assert_eq!(hull.face_count(), 4);
/// ```
pub fn convex_hull(points: &[DVec3]) -> Result<Solid, MeshError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(MeshError::degenerate("Convex hull input has non-finite points"));
    }

    let diagonal = bounds_diagonal(points);
    let epsilon = HULL_EPSILON * diagonal.max(1.0);

    let unique_points = remove_duplicates(points, epsilon);
    if unique_points.len() < 4 {
        return Err(MeshError::degenerate(format!(
            "Convex hull requires at least 4 distinct points, got {}",
            unique_points.len()
        )));
    }

    let faces = build_initial_simplex(&unique_points, epsilon)?;
    let final_faces = quickhull_iterate(faces, &unique_points, epsilon)?;
    Ok(faces_to_solid(&final_faces, &unique_points))
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices, counter-clockwise from outside
    vertices: [usize; 3],
    /// Outward unit normal (zero for a sliver face)
    normal: DVec3,
    /// Offset along the normal
    distance: f64,
    /// Points outside this face
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0)
            .cross(points[v2] - p0)
            .try_normalize()
            .unwrap_or(DVec3::ZERO);
        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    #[inline]
    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    #[inline]
    fn is_outside(&self, point: DVec3, epsilon: f64) -> bool {
        self.signed_distance(point) > epsilon
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points.iter().copied().max_by(|&a, &b| {
            self.signed_distance(points[a])
                .total_cmp(&self.signed_distance(points[b]))
                .then(b.cmp(&a))
        })
    }
}

#[inline]
fn coord(p: DVec3) -> Coord3D<f64> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

fn bounds_diagonal(points: &[DVec3]) -> f64 {
    let Some((first, rest)) = points.split_first() else {
        return 0.0;
    };
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    (max - min).length()
}

/// Removes points closer than `epsilon` to an earlier point.
fn remove_duplicates(points: &[DVec3], epsilon: f64) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| u.distance(*p) <= epsilon) {
            unique.push(*p);
        }
    }
    unique
}

/// Builds the initial tetrahedron from extreme points and assigns outside sets.
fn build_initial_simplex(points: &[DVec3], epsilon: f64) -> Result<Vec<HullFace>, MeshError> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points, epsilon)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points)?;

    // orient3d > 0 puts p3 below the counter-clockwise plane p0,p1,p2
    let below = orient3d(coord(points[p0]), coord(points[p1]), coord(points[p2]), coord(points[p3])) > 0.0;
    let (a, b) = if below { (p0, p1) } else { (p1, p0) };

    let mut faces = vec![
        HullFace::new(a, b, p2, points),
        HullFace::new(a, p3, b, points),
        HullFace::new(b, p3, p2, points),
        HullFace::new(p2, p3, a, points),
    ];

    for idx in (0..points.len()).filter(|i| ![p0, p1, p2, p3].contains(i)) {
        if let Some(face) = faces.iter_mut().find(|f| f.is_outside(points[idx], epsilon)) {
            face.outside_points.push(idx);
        }
    }

    Ok(faces)
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = -1.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from the line through `p0` and `p1`.
fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    epsilon: f64,
) -> Result<usize, MeshError> {
    let origin = points[p0];
    let dir = (points[p1] - origin).normalize_or_zero();
    let mut max_dist = epsilon;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let dist = (*p - origin).cross(dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("Convex hull input is collinear"))
}

/// Finds the point with the largest exact orientation against plane `p0 p1 p2`.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
) -> Result<usize, MeshError> {
    let (a, b, c) = (coord(points[p0]), coord(points[p1]), coord(points[p2]));
    let mut max_det = 0.0;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let det = orient3d(a, b, c, coord(*p)).abs();
        if det > max_det {
            max_det = det;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("Convex hull input is coplanar"))
}

/// Main QuickHull iteration.
fn quickhull_iterate(
    mut faces: Vec<HullFace>,
    points: &[DVec3],
    epsilon: f64,
) -> Result<Vec<HullFace>, MeshError> {
    let max_iterations = points.len() * 4 + 16;

    for _ in 0..max_iterations {
        let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) else {
            return Ok(faces);
        };
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            faces[face_idx].outside_points.clear();
            continue;
        };
        let apex = points[farthest];

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex, epsilon))
            .map(|(i, _)| i)
            .collect();
        if visible.is_empty() {
            faces[face_idx].outside_points.retain(|&p| p != farthest);
            continue;
        }

        let horizon = find_horizon_edges(&faces, &visible);

        let mut orphans: Vec<usize> = visible
            .iter()
            .flat_map(|&idx| faces[idx].outside_points.iter().copied())
            .filter(|&p| p != farthest)
            .collect();
        orphans.sort_unstable();

        let mut keep = vec![true; faces.len()];
        for &idx in &visible {
            keep[idx] = false;
        }
        let mut flags = keep.into_iter();
        faces.retain(|_| flags.next().unwrap_or(false));

        let first_new = faces.len();
        for (e0, e1) in horizon {
            faces.push(HullFace::new(e0, e1, farthest, points));
        }

        for idx in orphans {
            let point = points[idx];
            if let Some(face) = faces[first_new..]
                .iter_mut()
                .find(|f| f.is_outside(point, epsilon))
            {
                face.outside_points.push(idx);
            }
        }
    }

    Err(MeshError::degenerate("Convex hull did not converge"))
}

/// Edges of the visible region used by exactly one visible face, in that
/// face's winding.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    let directed = |idx: usize| {
        let v = faces[idx].vertices;
        [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
    };

    for &idx in visible {
        for (a, b) in directed(idx) {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    visible
        .iter()
        .flat_map(|&idx| directed(idx))
        .filter(|&(a, b)| edge_count.get(&(a.min(b), a.max(b))) == Some(&1))
        .collect()
}

/// Converts hull faces to a solid, numbering vertices in input order.
fn faces_to_solid(faces: &[HullFace], points: &[DVec3]) -> Solid {
    let mut vertex_map: BTreeMap<usize, u32> = faces
        .iter()
        .flat_map(|f| f.vertices)
        .map(|v| (v, 0))
        .collect();

    let mut solid = Solid::with_capacity(vertex_map.len(), faces.len());
    for (&v, slot) in vertex_map.iter_mut() {
        *slot = solid.add_vertex(points[v]);
    }
    for face in faces {
        let [a, b, c] = face.vertices.map(|v| vertex_map[&v]);
        solid.add_face(a, b, c);
    }
    solid
}
