//! Cubic Bezier refinement into polylines.
//!
//! One level bisects every segment `(p0, p1, p2, p3)` with de Casteljau's
//! construction:
//!
//! ```text
//! q0 = (p0 + p1) / 2          q2 = (p2 + p3) / 2
//! r0 = q0 / 2 + (p1 + p2) / 4 r1 = q2 / 2 + (p1 + p2) / 4
//! s  = (r0 + r1) / 2
//! ```
//!
//! The segment is replaced by `(p0, q0, r0, s)` and `(s, r1, q2, p3)`, which
//! trace exactly the two halves of the original curve.
use std::ops::{Add, Mul};

use log::debug;

use crate::mesh::{check_parallel, fetch_all, next_index};
use crate::normals::line_tangents;
use crate::{Mesh, Result};

/// Splits a cubic Bezier segment at `t = 0.5`.
///
/// Returns the new points in the order they are appended to the vertex
/// buffers: `s, q0, r0, r1, q2`.
#[inline]
pub fn bisect_cubic<T>([p0, p1, p2, p3]: [T; 4]) -> [T; 5]
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    let q0 = (p0 + p1) * 0.5;
    let q2 = (p2 + p3) * 0.5;
    let inner = (p1 + p2) * 0.25;
    let r0 = q0 * 0.5 + inner;
    let r1 = q2 * 0.5 + inner;
    let s = (r0 + r1) * 0.5;
    [s, q0, r0, r1, q2]
}

/// Applies `mesh.subdivision.bezier` levels of de Casteljau bisection to the
/// splines of `mesh`, then flattens them into line segments.
///
/// After `n` levels every original spline is `2^n` segments. Each segment
/// becomes the three lines `p0–p1`, `p1–p2`, `p2–p3`, appended to the
/// existing `lines`; `splines` ends up empty. Texture coordinates, when
/// present, are bisected along. Finally the normal buffer receives smoothed
/// line tangents.
///
/// Resets the level to `0`. `mesh` is left untouched on error.
pub fn subdivide_bezier(mesh: &mut Mesh) -> Result<()> {
    let levels = mesh.subdivision.bezier;
    if 0 == levels {
        return Ok(());
    }

    debug!(
        "Bezier subdivision of `{}`: {} levels, {} segments",
        mesh.name,
        levels,
        mesh.splines.len()
    );

    check_parallel("texcoords", mesh.texcoords.len(), mesh.positions.len())?;

    let mut positions = mesh.positions.clone();
    let mut texcoords = mesh.texcoords.clone();
    let mut splines = mesh.splines.clone();

    for _ in 0..levels {
        let mut segments = Vec::with_capacity(2 * splines.len());

        for segment in &splines {
            let [p0, _, _, p3] = *segment;
            let start = next_index(positions.len(), 5, "positions")?;

            let points = bisect_cubic(fetch_all(&positions, *segment, "positions")?);
            positions.extend(points);
            if !texcoords.is_empty() {
                let uvs = bisect_cubic(fetch_all(&texcoords, *segment, "texcoords")?);
                texcoords.extend(uvs);
            }

            // `start` is the shared midpoint `s`.
            segments.push([p0, start + 1, start + 2, start]);
            segments.push([start, start + 3, start + 4, p3]);
        }

        splines = segments;
    }

    let mut lines = mesh.lines.clone();
    lines.extend(
        splines
            .iter()
            .flat_map(|&[p0, p1, p2, p3]| [[p0, p1], [p1, p2], [p2, p3]]),
    );

    let normals = line_tangents(&positions, &mesh.normals, &lines)?;

    mesh.positions = positions;
    mesh.normals = normals;
    mesh.texcoords = texcoords;
    mesh.lines = lines;
    mesh.splines.clear();
    mesh.subdivision.bezier = 0;

    debug!(
        "Bezier subdivision of `{}` done: {} vertices, {} lines",
        mesh.name,
        mesh.vertex_count(),
        mesh.lines.len()
    );

    Ok(())
}
