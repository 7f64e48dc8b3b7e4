//! Per-vertex normals and polyline tangents.
//!
//! * [`facet_normals()`] – Flat shading. Every face gets its own copy of its
//!   vertices, all carrying the face normal.
//! * [`smooth_normals()`] – Every vertex gets the normalized sum of the
//!   normals of the faces around it. Faces are not weighted by area.
//! * [`smooth_tangents()`] – Same accumulation over `lines`, using segment
//!   directions. The result is stored in the normal buffer.
use ultraviolet::{Vec2, Vec3};

use crate::mesh::{fetch, fetch_all, next_index};
use crate::{Mesh, Result};

/// Normalizes `v`, mapping the zero vector to itself.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let mag = v.mag();
    if 0.0 == mag {
        Vec3::zero()
    } else {
        v / mag
    }
}

/// Unit normal of a counter-clockwise triangle. Zero if it is degenerate.
#[inline]
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    normalize_or_zero((b - a).cross(c - a))
}

/// Area of a triangle.
#[inline]
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).mag() / 2.0
}

/// Flat normal of a quad: the average of the normals of the two triangles
/// on either side of the `0–2` diagonal.
#[inline]
fn quad_facet_normal([a, b, c, d]: [Vec3; 4]) -> Vec3 {
    normalize_or_zero(triangle_normal(a, b, c) + triangle_normal(a, c, d))
}

/// Replaces the normals of `mesh` with flat face normals, duplicating every
/// vertex for each face it belongs to.
///
/// Texture coordinates are duplicated along when present. If the mesh has
/// points, lines or splines, the original vertices are kept after the
/// duplicated ones and those elements are re-indexed to them.
pub fn facet_normals(mesh: &mut Mesh) -> Result<()> {
    Faceted::new(
        &mesh.positions,
        &mesh.texcoords,
        &mesh.triangles,
        &mesh.quads,
    )?
    .apply(mesh);
    Ok(())
}

/// Buffers of a faceted mesh, built before anything is written back.
pub(crate) struct Faceted {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    triangles: Vec<[u32; 3]>,
    quads: Vec<[u32; 4]>,
}

impl Faceted {
    pub fn new(
        positions: &[Vec3],
        texcoords: &[Vec2],
        triangles: &[[u32; 3]],
        quads: &[[u32; 4]],
    ) -> Result<Self> {
        let corner_count = 3 * triangles.len() + 4 * quads.len();
        // Curve meshes keep their original vertices after the corners.
        next_index(corner_count, positions.len(), "positions")?;

        let mut faceted = Self {
            positions: Vec::with_capacity(corner_count),
            normals: Vec::with_capacity(corner_count),
            texcoords: Vec::with_capacity(if texcoords.is_empty() {
                0
            } else {
                corner_count
            }),
            triangles: Vec::with_capacity(triangles.len()),
            quads: Vec::with_capacity(quads.len()),
        };

        for triangle in triangles {
            let corners = fetch_all(positions, *triangle, "positions")?;
            let normal = triangle_normal(corners[0], corners[1], corners[2]);
            let start = faceted.positions.len() as u32;
            faceted.triangles.push([start, start + 1, start + 2]);
            faceted.push_corners(&corners, normal, texcoords, triangle)?;
        }

        for quad in quads {
            let corners = fetch_all(positions, *quad, "positions")?;
            let normal = quad_facet_normal(corners);
            let start = faceted.positions.len() as u32;
            faceted
                .quads
                .push([start, start + 1, start + 2, start + 3]);
            faceted.push_corners(&corners, normal, texcoords, quad)?;
        }

        Ok(faceted)
    }

    fn push_corners(
        &mut self,
        corners: &[Vec3],
        normal: Vec3,
        texcoords: &[Vec2],
        face: &[u32],
    ) -> Result<()> {
        self.positions.extend_from_slice(corners);
        self.normals.extend(std::iter::repeat(normal).take(corners.len()));
        if !texcoords.is_empty() {
            for &index in face {
                self.texcoords.push(fetch(texcoords, index, "texcoords")?);
            }
        }
        Ok(())
    }

    /// Writes the faceted buffers into `mesh`.
    pub fn apply(mut self, mesh: &mut Mesh) {
        if mesh.has_curve_elements() {
            let offset = self.positions.len() as u32;

            self.positions.extend_from_slice(&mesh.positions);
            self.normals.extend_from_slice(&mesh.normals);
            self.normals.resize(self.positions.len(), Vec3::zero());
            if !self.texcoords.is_empty() {
                self.texcoords.extend_from_slice(&mesh.texcoords);
                self.texcoords.resize(self.positions.len(), Vec2::zero());
            }

            mesh.points.iter_mut().for_each(|index| *index += offset);
            mesh.lines
                .iter_mut()
                .flatten()
                .for_each(|index| *index += offset);
            mesh.splines
                .iter_mut()
                .flatten()
                .for_each(|index| *index += offset);
        }

        mesh.positions = self.positions;
        mesh.normals = self.normals;
        mesh.texcoords = self.texcoords;
        mesh.triangles = self.triangles;
        mesh.quads = self.quads;
    }
}

/// Replaces the normals of `mesh` with smoothed per-vertex normals.
///
/// Vertices no face touches get a zero normal.
pub fn smooth_normals(mesh: &mut Mesh) -> Result<()> {
    mesh.normals = vertex_normals(&mesh.positions, &mesh.triangles, &mesh.quads)?;
    Ok(())
}

/// Accumulates the unit face normal of every face into its vertices and
/// normalizes the sums.
///
/// A quad contributes the mean of the normals of its `(0, 1, 3)` and
/// `(1, 2, 3)` triangles.
pub(crate) fn vertex_normals(
    positions: &[Vec3],
    triangles: &[[u32; 3]],
    quads: &[[u32; 4]],
) -> Result<Vec<Vec3>> {
    let mut normals = vec![Vec3::zero(); positions.len()];

    for triangle in triangles {
        let [a, b, c] = fetch_all(positions, *triangle, "positions")?;
        let normal = triangle_normal(a, b, c);
        for &index in triangle {
            normals[index as usize] += normal;
        }
    }

    for quad in quads {
        let [a, b, c, d] = fetch_all(positions, *quad, "positions")?;
        let normal = (triangle_normal(a, b, d) + triangle_normal(b, c, d)) / 2.0;
        for &index in quad {
            normals[index as usize] += normal;
        }
    }

    normals
        .iter_mut()
        .for_each(|normal| *normal = normalize_or_zero(*normal));

    Ok(normals)
}

/// Writes per-vertex tangents of the `lines` of `mesh` into its normal
/// buffer.
///
/// Existing normals of vertices no line touches survive (renormalized).
pub fn smooth_tangents(mesh: &mut Mesh) -> Result<()> {
    mesh.normals = line_tangents(&mesh.positions, &mesh.normals, &mesh.lines)?;
    Ok(())
}

/// Accumulates segment directions into `normals`, resized to match
/// `positions`, and normalizes every entry.
pub(crate) fn line_tangents(
    positions: &[Vec3],
    normals: &[Vec3],
    lines: &[[u32; 2]],
) -> Result<Vec<Vec3>> {
    let mut tangents = normals.to_vec();
    tangents.resize(positions.len(), Vec3::zero());

    for line in lines {
        let [from, to] = fetch_all(positions, *line, "positions")?;
        let tangent = normalize_or_zero(to - from);
        for &index in line {
            tangents[index as usize] += tangent;
        }
    }

    tangents
        .iter_mut()
        .for_each(|tangent| *tangent = normalize_or_zero(*tangent));

    Ok(tangents)
}
