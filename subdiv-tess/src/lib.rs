//#![warn(missing_docs)]
//! # Mesh & Curve Tessellation
//!
//! Turns coarse, hand-authored meshes into refined geometry for rendering.
//!
//! The crate works on one [`Mesh`] at a time. A mesh carries vertex buffers
//! (positions, optional normals and texture coordinates), element lists
//! (triangles, quads, points, lines and cubic Bezier splines) and a set of
//! [`SubdivisionLevels`] telling the driver which passes to run:
//!
//! * [`subdivide_catmull_clark()`] – Approximate Catmull-Clark subdivision
//!   with flat or smooth normal regeneration.
//! * [`subdivide_linear()`] – One-to-four split without smoothing; refines
//!   normals and texture coordinates linearly.
//! * [`subdivide_bezier()`] – De Casteljau refinement of splines into
//!   polylines, with tangents stored in the normal buffer.
//! * [`grow_hair()`] – Area-uniform placement of short Bezier strands on
//!   the surface.
//! * [`apply_bump()`] – Displacement along the normal by a [`Texture`].
//!
//! [`subdivide_scene()`] runs all of them over a [`Scene`] and generates the
//! display meshes of its implicit [`Surface`]s.
//!
//! Every pass builds its output buffers locally and only writes them back to
//! the mesh once it succeeded. Errors are reported through [`Error`]; nothing
//! panics on malformed input.
//!
//! Hair placement is the only source of randomness. It draws from a
//! caller-provided [`rand::Rng`]:
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use subdiv_tess::{subdivide_scene, Mesh, Scene, TessellationOptions, Vec3};
//!
//! let mut mesh = Mesh::new("floor");
//! mesh.positions = vec![
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(1.0, 1.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//! ];
//! mesh.quads = vec![[0, 1, 2, 3]];
//! mesh.subdivision.catmull_clark = 1;
//! mesh.subdivision.catmull_clark_smooth = true;
//! mesh.material.hair_count = 10;
//!
//! let mut scene = Scene {
//!     meshes: vec![mesh],
//!     ..Default::default()
//! };
//!
//! let report = subdivide_scene(
//!     &mut scene,
//!     &TessellationOptions::default(),
//!     &mut StdRng::seed_from_u64(7),
//! );
//! assert!(report.is_success());
//! assert!(scene.meshes[0].splines.is_empty());
//! ```
//!
//! ## Cargo Features
#![doc = document_features::document_features!()]

pub mod bump;
pub mod error;
pub mod hair;
pub mod mesh;
pub mod normals;
pub mod obj_export;
pub mod scene;
pub mod subdivide;
pub mod surface;
pub mod texture;
pub mod topology;

#[cfg(feature = "tri_mesh_buffers")]
pub mod tri_mesh_buffers;

pub use bump::apply_bump;
pub use error::{Error, Result};
pub use hair::{grow_hair, HairOptions};
pub use mesh::{Material, Mesh, SubdivisionLevels};
pub use normals::{facet_normals, smooth_normals, smooth_tangents};
pub use scene::{
    subdivide_mesh, subdivide_scene, MeshFailure, Pass, Scene, SceneReport, TessellationOptions,
};
pub use subdivide::{
    subdivide_bezier, subdivide_catmull_clark, subdivide_linear, LinearOptions,
};
pub use surface::{
    make_surface_mesh, subdivide_surface, Surface, SurfaceMeshOptions, SurfaceShape,
};
pub use texture::Texture;
pub use topology::EdgeMap;

pub use ultraviolet::{Mat4, Vec2, Vec3};
