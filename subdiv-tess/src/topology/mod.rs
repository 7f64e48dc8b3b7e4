//! Topology helpers shared by the subdivision passes.
//!
//! An [`EdgeMap`] gives every undirected edge of a face list a stable,
//! sequential id. The ids are the offsets of the edge-midpoint vertices a
//! subdivision pass appends, so a map is only valid for the face lists it
//! was built from.
pub mod edge_map;
pub use edge_map::*;
