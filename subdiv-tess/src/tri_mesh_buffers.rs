//! # Draw-ready Buffers
//!
//! Helpers for turning a tessellated [`Mesh`] into flat buffers for use with
//! realtime rendering.
use itertools::Itertools;
use slice_of_array::prelude::*;
use ultraviolet::Vec3;

use crate::mesh::{check_parallel, fetch_all};
use crate::{Mesh, Result};

static EPSILON: f32 = 0.00000001;

/// Flat index arrays and parallel attribute arrays of a mesh.
///
/// Indices refer to the shared attribute arrays; nothing is duplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBuffers {
    /// Index triples, flattened.
    pub triangles: Vec<u32>,
    /// Index quadruples, flattened.
    pub quads: Vec<u32>,
    /// Index pairs, flattened.
    pub lines: Vec<u32>,
    pub points: Vec<u32>,
    pub positions: Vec<[f32; 3]>,
    /// Empty or parallel to `positions`.
    pub normals: Vec<[f32; 3]>,
    /// Empty or parallel to `positions`.
    pub texcoords: Vec<[f32; 2]>,
}

impl DrawBuffers {
    /// Copies the buffers of `mesh`.
    ///
    /// Splines are not drawable and are skipped; run the Bezier pass first.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        #[cfg(feature = "topology_validation")]
        mesh.validate()?;

        check_parallel("normals", mesh.normals.len(), mesh.positions.len())?;
        check_parallel("texcoords", mesh.texcoords.len(), mesh.positions.len())?;

        Ok(Self {
            triangles: mesh.triangles.flat().to_vec(),
            quads: mesh.quads.flat().to_vec(),
            lines: mesh.lines.flat().to_vec(),
            points: mesh.points.clone(),
            positions: mesh.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
            normals: mesh.normals.iter().map(|n| [n.x, n.y, n.z]).collect(),
            texcoords: mesh.texcoords.iter().map(|uv| [uv.x, uv.y]).collect(),
        })
    }

    /// Position data as bytes, ready for upload.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    #[inline]
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    #[inline]
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    #[inline]
    pub fn quad_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.quads)
    }
}

/// Returns a flat [`u32`] triangle index buffer and two flat, matching point
/// and normal buffers.
///
/// All the faces are disconnected. I.e. points & normals are duplicated for
/// each shared vertex. Normals are computed per corner from the geometry;
/// the normals of `mesh` are ignored.
pub fn to_triangle_mesh_buffers(mesh: &Mesh) -> Result<(Vec<u32>, Vec<[f32; 3]>, Vec<[f32; 3]>)> {
    let faces = mesh
        .triangles
        .iter()
        .map(|triangle| fetch_all(&mesh.positions, *triangle, "positions").map(Vec::from))
        .chain(
            mesh.quads
                .iter()
                .map(|quad| fetch_all(&mesh.positions, *quad, "positions").map(Vec::from)),
        )
        .collect::<Result<Vec<Vec<Vec3>>>>()?;

    let (points, normals): (Vec<[f32; 3]>, Vec<[f32; 3]>) = faces
        .iter()
        .flat_map(|face| {
            // Rotate so the window centered on corner `i` comes out `i`-th.
            let mut corners = face.clone();
            corners.rotate_right(1);
            corners
                .into_iter()
                // Grab the three corners around each vertex.
                .circular_tuple_windows::<(_, _, _)>()
                .map(|(p0, p1, p2)| {
                    let normal = orthogonal(&p0, &p1, &p2);
                    let mag_sq = normal.mag_sq();

                    // Check for collinearity:
                    let normal = if mag_sq < EPSILON {
                        face_normal(face).unwrap_or_default()
                    } else {
                        normal / mag_sq.sqrt()
                    };

                    ([p1.x, p1.y, p1.z], [normal.x, normal.y, normal.z])
                })
                .collect_vec()
        })
        .unzip();

    // Build a new face index. Same topology as the old one, only with new keys.
    let triangle_face_index = faces
        .iter()
        .scan(0u32.., |counter, face| {
            Some(counter.take(face.len()).collect::<Vec<u32>>())
        })
        .zip(&faces)
        .flat_map(|(face, p)| {
            // Bitriangulate quadrilateral faces use shortest diagonal so
            // triangles are most nearly equilateral.
            if 4 == face.len() {
                if (p[0] - p[2]).mag_sq() < (p[1] - p[3]).mag_sq() {
                    vec![face[0], face[1], face[2], face[0], face[2], face[3]]
                } else {
                    vec![face[1], face[2], face[3], face[1], face[3], face[0]]
                }
            } else {
                face
            }
        })
        .collect();

    Ok((triangle_face_index, points, normals))
}

#[inline]
fn orthogonal(v0: &Vec3, v1: &Vec3, v2: &Vec3) -> Vec3 {
    (*v1 - *v0).cross(*v2 - *v1)
}

/// Computes the normal of a face.
/// Tries to do the right thing if the face
/// is non-planar or degenerate.
#[inline]
fn face_normal(points: &[Vec3]) -> Option<Vec3> {
    let mut considered_edges = 0;

    let normal = points.iter().circular_tuple_windows::<(_, _, _)>().fold(
        Vec3::zero(),
        |normal, corner| {
            let ortho_normal = orthogonal(corner.0, corner.1, corner.2);
            let mag_sq = ortho_normal.mag_sq();
            // Filter out collinear edge pairs.
            if mag_sq < EPSILON {
                normal
            } else {
                considered_edges += 1;
                normal + ortho_normal / mag_sq.sqrt()
            }
        },
    );

    if 0 == considered_edges {
        // Degenerate/zero size face.
        None
    } else {
        Some(normal / considered_edges as f32)
    }
}
