//! Linear one-to-four subdivision.
use log::debug;
use ultraviolet::{Vec2, Vec3};

use super::FaceSplit;
use crate::mesh::check_parallel;
use crate::normals::normalize_or_zero;
use crate::{Mesh, Result};

/// Options for [`subdivide_linear()`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearOptions {
    /// Normalize the averaged normals after every level.
    ///
    /// Off by default: edge midpoint and centroid normals are plain
    /// averages of unit vectors and therefore usually shorter than one.
    pub renormalize_normals: bool,
}

/// Applies `mesh.subdivision.linear` levels of linear subdivision.
///
/// Every triangle becomes three quads and every quad four. Positions,
/// normals and texture coordinates (the latter two only when present) of
/// the new vertices are the averages of the edge or face they split. No
/// smoothing is applied and normals are not recomputed. The result is
/// quad-only.
///
/// Resets the level to `0`. `mesh` is left untouched on error.
pub fn subdivide_linear(mesh: &mut Mesh, options: &LinearOptions) -> Result<()> {
    let levels = mesh.subdivision.linear;
    if 0 == levels {
        return Ok(());
    }

    debug!(
        "Linear subdivision of `{}`: {} levels, {} vertices, {} faces",
        mesh.name,
        levels,
        mesh.vertex_count(),
        mesh.face_count()
    );

    let mut level = LinearLevel::split(
        &mesh.positions,
        &mesh.normals,
        &mesh.texcoords,
        &mesh.triangles,
        &mesh.quads,
        options,
    )?;
    for _ in 1..levels {
        level = LinearLevel::split(
            &level.positions,
            &level.normals,
            &level.texcoords,
            &[],
            &level.quads,
            options,
        )?;
    }

    mesh.positions = level.positions;
    mesh.normals = level.normals;
    mesh.texcoords = level.texcoords;
    mesh.quads = level.quads;
    mesh.triangles.clear();
    mesh.subdivision.linear = 0;

    debug!(
        "Linear subdivision of `{}` done: {} vertices, {} quads",
        mesh.name,
        mesh.vertex_count(),
        mesh.quads.len()
    );

    Ok(())
}

struct LinearLevel {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    quads: Vec<[u32; 4]>,
}

impl LinearLevel {
    fn split(
        positions: &[Vec3],
        normals: &[Vec3],
        texcoords: &[Vec2],
        triangles: &[[u32; 3]],
        quads: &[[u32; 4]],
        options: &LinearOptions,
    ) -> Result<Self> {
        check_parallel("normals", normals.len(), positions.len())?;
        check_parallel("texcoords", texcoords.len(), positions.len())?;

        let split = FaceSplit::new(positions.len(), triangles, quads)?;

        let positions = split.refine(positions, "positions", triangles, quads)?;

        let mut normals = if normals.is_empty() {
            Vec::new()
        } else {
            split.refine(normals, "normals", triangles, quads)?
        };
        if options.renormalize_normals {
            normals
                .iter_mut()
                .for_each(|normal| *normal = normalize_or_zero(*normal));
        }

        let texcoords = if texcoords.is_empty() {
            Vec::new()
        } else {
            split.refine(texcoords, "texcoords", triangles, quads)?
        };

        Ok(Self {
            positions,
            normals,
            texcoords,
            quads: split.quads,
        })
    }
}
