//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Layout
//!
//! Nodes live in a flat arena and refer to their children by index, so
//! every traversal is an explicit loop and deep trees cannot overflow the
//! call stack. Node 0 is the root.
//!
//! Each node owns its dividing plane. The plane outlives the node's
//! polygons, which may all be clipped away.

use super::polygon::Polygon;
use super::plane::Plane;
use crate::error::MeshError;
use config::constants::MAX_BSP_POLYGONS;

#[derive(Debug, Clone, Default)]
struct Node {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<usize>,
    back: Option<usize>,
}

/// A BSP tree over convex polygons.
///
/// # Example
///
/// ```rust,ignore
/// let mut tree = BspTree::new(polygons)?;
/// tree.invert();
/// let all = tree.all_polygons();
/// ```
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<Node>,
}

impl BspTree {
    /// Builds a tree from polygons.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::BooleanFailed`] if splitting pushes the polygon
    /// count past [`MAX_BSP_POLYGONS`].
    pub fn new(polygons: Vec<Polygon>) -> Result<Self, MeshError> {
        let mut tree = Self {
            nodes: vec![Node::default()],
        };
        tree.build(polygons)?;
        Ok(tree)
    }

    /// Adds polygons to the tree, splitting them down to the leaves.
    ///
    /// Each node takes the plane of the first polygon that reaches it.
    pub fn build(&mut self, polygons: Vec<Polygon>) -> Result<(), MeshError> {
        let mut stack = vec![(0usize, polygons)];
        let mut budget = self.polygon_count();

        while let Some((index, polys)) = stack.pop() {
            let Some(first) = polys.first() else {
                continue;
            };
            let plane = *self.nodes[index].plane.get_or_insert(*first.plane());

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::with_capacity(polys.len() / 2 + 1);
            let mut back = Vec::with_capacity(polys.len() / 2 + 1);
            let incoming = polys.len();
            for poly in polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }

            budget += coplanar_front.len() + coplanar_back.len() + front.len() + back.len();
            budget = budget.saturating_sub(incoming);
            if budget > MAX_BSP_POLYGONS {
                return Err(MeshError::boolean_failed(format!(
                    "BSP polygon count exceeded {MAX_BSP_POLYGONS}"
                )));
            }

            let node = &mut self.nodes[index];
            node.polygons.extend(coplanar_front);
            node.polygons.extend(coplanar_back);

            if !front.is_empty() {
                let child = self.child(index, true);
                stack.push((child, front));
            }
            if !back.is_empty() {
                let child = self.child(index, false);
                stack.push((child, back));
            }
        }
        Ok(())
    }

    /// Returns the front or back child of `index`, creating it if needed.
    fn child(&mut self, index: usize, front: bool) -> usize {
        let existing = if front {
            self.nodes[index].front
        } else {
            self.nodes[index].back
        };
        if let Some(child) = existing {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::default());
        if front {
            self.nodes[index].front = Some(child);
        } else {
            self.nodes[index].back = Some(child);
        }
        child
    }

    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for poly in &mut node.polygons {
                poly.flip();
            }
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(0usize, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for poly in polys {
                poly.partition(&plane, &mut front, &mut back);
            }

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
            // Without a back subtree the back pieces are inside the solid
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        result
    }

    /// Removes the parts of this tree's polygons that lie inside `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            let polys = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polys);
        }
    }

    /// Collects every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }

    /// Consumes the tree and returns its polygons.
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.nodes.into_iter().flat_map(|node| node.polygons).collect()
    }

    /// Number of polygons stored in the tree.
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|n| n.polygons.len()).sum()
    }

    /// Depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.front.map(|c| (c, depth + 1)));
            stack.extend(node.back.map(|c| (c, depth + 1)));
        }
        max_depth
    }
}
