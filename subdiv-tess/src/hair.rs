//! Procedural hair strands grown on a mesh surface.
//!
//! Roots are distributed uniformly by area: a triangle is picked with
//! probability proportional to its area, then a point inside it is picked
//! with the square root barycentric transform. Every strand is one cubic
//! Bezier spline that the Bezier pass later turns into a polyline.
use std::ops::{Add, Mul};

use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use ultraviolet::Vec3;

use crate::mesh::{check_parallel, fetch_all, next_index};
use crate::normals::{normalize_or_zero, triangle_area, triangle_normal};
use crate::{Mesh, Result};

/// Control point spacing of a strand, before scaling by the hair length.
///
/// The root sits on the surface, the second point one step along the
/// normal, the last two one and two steps below that (`-y`).
const STRAND_STEP: f32 = 0.4;

/// Options for [`grow_hair()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairOptions {
    /// Bezier level set on the mesh so the strands get tessellated by the
    /// same driver run.
    pub bezier_level: u32,
    /// Keep the quads of the mesh instead of replacing them with their
    /// triangulation.
    pub keep_quads: bool,
}

impl Default for HairOptions {
    fn default() -> Self {
        Self {
            bezier_level: 3,
            keep_quads: false,
        }
    }
}

/// Grows `mesh.material.hair_count` strands on the faces of `mesh`.
///
/// Quads `(a, b, c, d)` are sampled as the triangles `(a, b, c)` and
/// `(c, d, a)`. Unless [`HairOptions::keep_quads`] is set, those triangles
/// replace the quads in the mesh.
///
/// Appends four vertices and one spline per strand and sets
/// `mesh.subdivision.bezier` to [`HairOptions::bezier_level`]. New vertices
/// get a zero normal and the root's texture coordinate, if the mesh has
/// those buffers. The zero normals leave the strand tangents written by
/// [`subdivide_bezier()`](crate::subdivide_bezier) to the segments alone.
///
/// All randomness comes from `rng`; seed it for reproducible results.
///
/// # Errors
///
/// Returns [`Error::HairSampling`](crate::Error::HairSampling) if the mesh
/// has no face with positive area. `mesh` is left untouched on error.
pub fn grow_hair<R: Rng + ?Sized>(
    mesh: &mut Mesh,
    options: &HairOptions,
    rng: &mut R,
) -> Result<()> {
    let hair_count = mesh.material.hair_count;
    if 0 == hair_count {
        return Ok(());
    }

    check_parallel("normals", mesh.normals.len(), mesh.positions.len())?;
    check_parallel("texcoords", mesh.texcoords.len(), mesh.positions.len())?;

    let mut triangles = mesh.triangles.clone();
    triangles.extend(
        mesh.quads
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [c, d, a]]),
    );

    let areas = triangles
        .iter()
        .map(|triangle| {
            let [a, b, c] = fetch_all(&mesh.positions, *triangle, "positions")?;
            Ok(triangle_area(a, b, c))
        })
        .collect::<Result<Vec<_>>>()?;
    let distribution = WeightedIndex::new(&areas)?;

    debug!(
        "Growing {} hair strands on `{}` ({} triangles)",
        hair_count,
        mesh.name,
        triangles.len()
    );

    let scale = if mesh.material.hair_length > 0.0 {
        mesh.material.hair_length
    } else {
        1.0
    };
    let droop = Vec3::new(0.0, -STRAND_STEP * scale, 0.0);

    let strand_vertices = 4 * hair_count as usize;
    let first_strand_vertex = next_index(mesh.positions.len(), strand_vertices, "positions")?;
    let mut positions = Vec::with_capacity(strand_vertices);
    let mut normals = Vec::with_capacity(strand_vertices);
    let mut texcoords = Vec::with_capacity(strand_vertices);
    let mut splines = Vec::with_capacity(hair_count as usize);

    for _ in 0..hair_count {
        let triangle = triangles[distribution.sample(rng)];
        let weights = sample_barycentric(rng);

        let [a, b, c] = fetch_all(&mesh.positions, triangle, "positions")?;
        let root = interpolate([a, b, c], weights);

        let direction = if mesh.normals.is_empty() {
            triangle_normal(a, b, c)
        } else {
            let corners = fetch_all(&mesh.normals, triangle, "normals")?;
            let interpolated = normalize_or_zero(interpolate(corners, weights));
            if Vec3::zero() == interpolated {
                triangle_normal(a, b, c)
            } else {
                interpolated
            }
        };

        let tip = root + direction * (STRAND_STEP * scale);

        let start = first_strand_vertex + positions.len() as u32;
        positions.extend([root, tip, tip + droop, tip + droop * 2.0]);
        normals.extend([Vec3::zero(); 4]);
        if !mesh.texcoords.is_empty() {
            let uvs = fetch_all(&mesh.texcoords, triangle, "texcoords")?;
            texcoords.extend([interpolate(uvs, weights); 4]);
        }
        splines.push([start, start + 1, start + 2, start + 3]);
    }

    if !options.keep_quads {
        mesh.triangles = triangles;
        mesh.quads.clear();
    }
    mesh.positions.extend(positions);
    if !mesh.normals.is_empty() {
        mesh.normals.extend(normals);
    }
    if !mesh.texcoords.is_empty() {
        mesh.texcoords.extend(texcoords);
    }
    mesh.splines.extend(splines);
    mesh.subdivision.bezier = options.bezier_level;

    Ok(())
}

/// Barycentric weights of a point uniformly distributed over the area of a
/// triangle.
///
/// With `r1`, `r2` uniform in `[0, 1)`, `u = 1 - √r1` and `v = r2 · √r1`
/// weight the second and third corner.
#[inline]
fn sample_barycentric<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    let r1 = rng.gen::<f32>().sqrt();
    let r2 = rng.gen::<f32>();
    let u = 1.0 - r1;
    let v = r2 * r1;
    [r1 * (1.0 - r2), u, v]
}

#[inline]
fn interpolate<T>([a, b, c]: [T; 3], [wa, wb, wc]: [f32; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    a * wa + b * wb + c * wc
}
