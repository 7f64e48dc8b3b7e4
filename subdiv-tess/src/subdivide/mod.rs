//! Refinement passes.
//!
//! * [`subdivide_linear()`] – One-to-four split of triangles and quads into
//!   quads, refining every vertex attribute linearly.
//! * [`subdivide_catmull_clark()`] – The same split on positions followed by
//!   a valence weighted averaging pass, then normal regeneration.
//! * [`subdivide_bezier()`] – De Casteljau bisection of cubic Bezier splines,
//!   flattened into line segments.
//!
//! Every pass is gated by its level counter in
//! [`SubdivisionLevels`](crate::SubdivisionLevels) and resets it to `0`
//! once it has run. A pass whose counter already is `0` does nothing.
use std::ops::{Add, Div};

use crate::mesh::{fetch, fetch_all, next_index};
use crate::topology::EdgeMap;
use crate::Result;

pub mod bezier;
pub mod catmull_clark;
pub mod linear;

pub use bezier::*;
pub use catmull_clark::*;
pub use linear::*;

/// The quads produced by one topological split and the edge map they were
/// built with.
///
/// New vertices are laid out after the existing ones: first one per edge
/// (in [`EdgeMap::edges()`] order), then one per triangle, then one per
/// quad.
pub(crate) struct FaceSplit {
    pub edges: EdgeMap,
    pub quads: Vec<[u32; 4]>,
}

impl FaceSplit {
    /// Replaces every triangle with three quads and every quad with four.
    ///
    /// Each new quad is `corner, next edge midpoint, face centroid, previous
    /// edge midpoint`, which keeps the winding of the parent face.
    pub fn new(vertex_count: usize, triangles: &[[u32; 3]], quads: &[[u32; 4]]) -> Result<Self> {
        let edges = EdgeMap::new(triangles, quads);

        let new_vertices = edges.len() + triangles.len() + quads.len();
        let edge_offset = next_index(vertex_count, new_vertices, "positions")?;
        let triangle_offset = edge_offset + edges.len() as u32;
        let quad_offset = triangle_offset + triangles.len() as u32;

        let mut split_quads = Vec::with_capacity(3 * triangles.len() + 4 * quads.len());

        for (face, triangle) in triangles.iter().enumerate() {
            for i in 0..3 {
                split_quads.push([
                    triangle[i],
                    edge_offset + edges.edge_index(triangle[i], triangle[(i + 1) % 3])?,
                    triangle_offset + face as u32,
                    edge_offset + edges.edge_index(triangle[i], triangle[(i + 2) % 3])?,
                ]);
            }
        }

        for (face, quad) in quads.iter().enumerate() {
            for i in 0..4 {
                split_quads.push([
                    quad[i],
                    edge_offset + edges.edge_index(quad[i], quad[(i + 1) % 4])?,
                    quad_offset + face as u32,
                    edge_offset + edges.edge_index(quad[i], quad[(i + 3) % 4])?,
                ]);
            }
        }

        Ok(Self {
            edges,
            quads: split_quads,
        })
    }

    /// Linearly refines one per-vertex attribute to match the split layout.
    ///
    /// The existing values are kept; edge midpoints and face centroids are
    /// appended in that order.
    pub fn refine<T>(
        &self,
        values: &[T],
        name: &'static str,
        triangles: &[[u32; 3]],
        quads: &[[u32; 4]],
    ) -> Result<Vec<T>>
    where
        T: Copy + Default + Add<Output = T> + Div<f32, Output = T>,
    {
        let mut refined =
            Vec::with_capacity(values.len() + self.edges.len() + triangles.len() + quads.len());
        refined.extend_from_slice(values);

        for &[from, to] in self.edges.edges() {
            refined.push((fetch(values, from, name)? + fetch(values, to, name)?) / 2.0);
        }

        for triangle in triangles {
            let [a, b, c] = fetch_all(values, *triangle, name)?;
            refined.push((a + b + c) / 3.0);
        }

        for quad in quads {
            let [a, b, c, d] = fetch_all(values, *quad, name)?;
            refined.push((a + b + c + d) / 4.0);
        }

        Ok(refined)
    }
}
