//! Indexed mesh data: vertex buffers, element lists, material and the
//! per-mesh subdivision configuration.
//!
//! A [`Mesh`] owns its buffers. Every pass in this crate replaces them
//! wholesale: new buffers are built locally and only written back once the
//! pass has succeeded.
//!
//! ## Example
//! ```
//! # use subdiv_tess::{Mesh, Vec3};
//! let mut quad = Mesh::new("floor");
//! quad.positions = vec![
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(1.0, 1.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//! ];
//! quad.quads = vec![[0, 1, 2, 3]];
//! quad.subdivision.catmull_clark = 2;
//!
//! assert!(quad.validate().is_ok());
//! ```
use std::sync::Arc;

use ultraviolet::{Mat4, Vec2, Vec3};

use crate::texture::Texture;
use crate::{Error, Result};

/// Independent refinement counters of a mesh.
///
/// A level of `0` means there is nothing left to do for that pass. Every
/// pass resets its own counter once it has run, so a second driver run is a
/// no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubdivisionLevels {
    /// One-to-four split without smoothing.
    pub linear: u32,
    /// Approximate Catmull-Clark subdivision.
    pub catmull_clark: u32,
    /// Smooth (`true`) or faceted (`false`) normals after Catmull-Clark.
    pub catmull_clark_smooth: bool,
    /// De Casteljau bisection of the cubic Bezier splines.
    pub bezier: u32,
}

impl SubdivisionLevels {
    /// Returns `true` if no pass has anything left to do.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        0 == self.linear && 0 == self.catmull_clark && 0 == self.bezier
    }
}

/// The parts of a material the tessellation pipeline cares about.
#[derive(Debug, Clone)]
pub struct Material {
    /// Number of hair strands to grow on the surface.
    pub hair_count: u32,
    /// Length scale of each strand. `0` keeps the unit stylization.
    pub hair_length: f32,
    /// Bump texture; its texel magnitude displaces vertices along their
    /// normal.
    pub bump_texture: Option<Arc<Texture>>,
    /// Scale applied to the bump displacement.
    pub bump_factor: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            hair_count: 0,
            hair_length: 0.0,
            bump_texture: None,
            bump_factor: 0.03,
        }
    }
}

/// Indexed mesh with vertex positions, optional normals and texture
/// coordinates, a set of element lists, material and frame.
///
/// `normals` and `texcoords` are either empty or parallel to `positions`.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Name used in diagnostics.
    pub name: String,
    /// Local to world transform, passed through untouched.
    pub frame: Mat4,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
    pub points: Vec<u32>,
    pub lines: Vec<[u32; 2]>,
    /// Cubic Bezier segments as control point indices `p0, p1, p2, p3`.
    pub splines: Vec<[u32; 4]>,
    pub material: Material,
    pub subdivision: SubdivisionLevels,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            name: String::new(),
            frame: Mat4::identity(),
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            triangles: Vec::new(),
            quads: Vec::new(),
            points: Vec::new(),
            lines: Vec::new(),
            splines: Vec::new(),
            material: Material::default(),
            subdivision: SubdivisionLevels::default(),
        }
    }
}

impl Mesh {
    /// Creates an empty, named mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of faces (triangles plus quads).
    #[inline]
    pub fn face_count(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }

    /// Returns `true` if the mesh has any non-face elements that reference
    /// vertices.
    #[inline]
    pub fn has_curve_elements(&self) -> bool {
        !(self.points.is_empty() && self.lines.is_empty() && self.splines.is_empty())
    }

    /// Checks all structural invariants.
    ///
    /// * `normals`/`texcoords` are either empty or as long as `positions`.
    /// * Every index of every element list is `< positions.len()`.
    pub fn validate(&self) -> Result<()> {
        let len = self.positions.len();

        check_parallel("normals", self.normals.len(), len)?;
        check_parallel("texcoords", self.texcoords.len(), len)?;

        check_indices("triangles", self.triangles.iter().flatten(), len)?;
        check_indices("quads", self.quads.iter().flatten(), len)?;
        check_indices("points", self.points.iter(), len)?;
        check_indices("lines", self.lines.iter().flatten(), len)?;
        check_indices("splines", self.splines.iter().flatten(), len)?;

        Ok(())
    }

    /// Errors with [`Error::MissingBuffer`] if `buffer_len` is zero.
    pub(crate) fn require(&self, buffer: &'static str, buffer_len: usize) -> Result<()> {
        if 0 == buffer_len {
            Err(Error::MissingBuffer {
                mesh: self.name.clone(),
                buffer,
            })
        } else {
            Ok(())
        }
    }
}

/// Errors unless `actual` is `0` or `expected`.
pub(crate) fn check_parallel(buffer: &'static str, actual: usize, expected: usize) -> Result<()> {
    if 0 != actual && actual != expected {
        Err(Error::InvalidBufferSize {
            buffer,
            expected,
            actual,
        })
    } else {
        Ok(())
    }
}

fn check_indices<'a>(
    elements: &'static str,
    mut indices: impl Iterator<Item = &'a u32>,
    len: usize,
) -> Result<()> {
    match indices.find(|&&index| len <= index as usize) {
        Some(&index) => Err(Error::IndexOutOfBounds {
            buffer: elements,
            index: index as usize,
            len,
        }),
        None => Ok(()),
    }
}

/// Bounds-checked read of `buffer[index]`.
#[inline]
pub(crate) fn fetch<T: Copy>(buffer: &[T], index: u32, name: &'static str) -> Result<T> {
    buffer
        .get(index as usize)
        .copied()
        .ok_or_else(|| Error::out_of_bounds(name, index as usize, buffer.len()))
}

/// Bounds-checked read of all corners of an element.
#[inline]
pub(crate) fn fetch_all<T: Copy + Default, const N: usize>(
    buffer: &[T],
    element: [u32; N],
    name: &'static str,
) -> Result<[T; N]> {
    let mut corners = [T::default(); N];
    for (corner, index) in corners.iter_mut().zip(element) {
        *corner = fetch(buffer, index, name)?;
    }
    Ok(corners)
}

/// Index of the first of `count` elements appended to a buffer of `len`.
///
/// Fails if the grown buffer could no longer be addressed with `u32`
/// indices.
#[inline]
pub(crate) fn next_index(len: usize, count: usize, buffer: &'static str) -> Result<u32> {
    let grown = len.saturating_add(count);
    if (u32::MAX as usize) < grown {
        return Err(Error::BufferTooLarge { buffer, len: grown });
    }
    Ok(len as u32)
}
