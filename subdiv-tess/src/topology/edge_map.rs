//! Deduplicated, indexed set of the undirected edges of a polygon soup.
//!
//! ## Example
//! ```
//! # use subdiv_tess::topology::EdgeMap;
//! // Two triangles sharing the edge (1, 2).
//! let edges = EdgeMap::new(&[[0, 1, 2], [2, 1, 3]], &[]);
//!
//! assert_eq!(edges.len(), 5);
//! assert_eq!(edges.edge_index(1, 2)?, edges.edge_index(2, 1)?);
//! # Ok::<(), subdiv_tess::Error>(())
//! ```
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use itertools::Itertools;

use crate::{Error, Result};

/// Maps undirected vertex pairs to sequential edge ids.
///
/// Ids are handed out in first-seen order while walking the triangles and
/// then the quads, each face along its boundary.
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    ids: HashMap<(u32, u32), u32>,
    edges: Vec<[u32; 2]>,
}

impl EdgeMap {
    /// Builds the edge map of a triangle list and a quad list sharing one
    /// vertex index space.
    pub fn new(triangles: &[[u32; 3]], quads: &[[u32; 4]]) -> Self {
        let mut edge_map = Self::default();

        for face in triangles {
            edge_map.add_face(face);
        }
        for face in quads {
            edge_map.add_face(face);
        }

        edge_map
    }

    fn add_face(&mut self, face: &[u32]) {
        for (&from, &to) in face.iter().circular_tuple_windows() {
            self.add_edge(from, to);
        }
    }

    fn add_edge(&mut self, from: u32, to: u32) {
        let next_id = self.edges.len() as u32;
        if let Entry::Vacant(entry) = self.ids.entry(undirected(from, to)) {
            entry.insert(next_id);
            self.edges.push([from, to]);
        }
    }

    /// Returns the deduplicated edges in first-seen order.
    ///
    /// Each edge keeps the orientation of the face that introduced it.
    #[inline]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Returns the number of unique edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the id of the edge between `from` and `to`, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TopologyInconsistency`] if no face has this edge.
    /// That means the face list changed since the map was built.
    #[inline]
    pub fn edge_index(&self, from: u32, to: u32) -> Result<u32> {
        self.ids
            .get(&undirected(from, to))
            .copied()
            .ok_or(Error::TopologyInconsistency { from, to })
    }
}

#[inline]
fn undirected(from: u32, to: u32) -> (u32, u32) {
    if from <= to {
        (from, to)
    } else {
        (to, from)
    }
}
