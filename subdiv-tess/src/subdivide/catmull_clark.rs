//! Approximate Catmull-Clark subdivision.
//!
//! Each level does the linear one-to-four split on positions and then pulls
//! every vertex towards the mean of the centers of the new quads around it:
//!
//! `p' = p + (avg - p) * 4 / valence`
//!
//! where `valence` is the number of new quads touching the vertex. Repeated
//! levels converge towards a smooth limit surface.
use log::{debug, warn};
use ultraviolet::Vec3;

use super::FaceSplit;
use crate::mesh::fetch_all;
use crate::normals::{vertex_normals, Faceted};
use crate::{Error, Mesh, Result};

/// Applies `mesh.subdivision.catmull_clark` levels of Catmull-Clark
/// subdivision, then regenerates normals.
///
/// Normals are smoothed if `mesh.subdivision.catmull_clark_smooth` is set
/// and faceted (duplicating vertices) otherwise. Texture coordinates are not
/// refined and get dropped. Vertices no face references (e.g. the control
/// points of splines) keep their position.
///
/// Resets the level to `0`. `mesh` is left untouched on error.
pub fn subdivide_catmull_clark(mesh: &mut Mesh) -> Result<()> {
    let levels = mesh.subdivision.catmull_clark;
    if 0 == levels {
        return Ok(());
    }

    debug!(
        "Catmull-Clark subdivision of `{}`: {} levels, {} vertices, {} faces",
        mesh.name,
        levels,
        mesh.vertex_count(),
        mesh.face_count()
    );

    let loose = loose_vertices(mesh.positions.len(), &mesh.triangles, &mesh.quads);

    let (mut positions, mut quads) =
        split_and_average(&mesh.positions, &mesh.triangles, &mesh.quads, &loose)?;
    for _ in 1..levels {
        (positions, quads) = split_and_average(&positions, &[], &quads, &loose)?;
    }

    let smooth = mesh.subdivision.catmull_clark_smooth;
    let (normals, faceted) = if smooth {
        (vertex_normals(&positions, &[], &quads)?, None)
    } else {
        (Vec::new(), Some(Faceted::new(&positions, &[], &[], &quads)?))
    };

    if !mesh.texcoords.is_empty() {
        warn!(
            "Catmull-Clark subdivision of `{}` drops its texture coordinates",
            mesh.name
        );
    }

    mesh.positions = positions;
    mesh.normals = normals;
    mesh.texcoords.clear();
    mesh.quads = quads;
    mesh.triangles.clear();
    mesh.subdivision.catmull_clark = 0;

    if let Some(faceted) = faceted {
        faceted.apply(mesh);
    }

    debug!(
        "Catmull-Clark subdivision of `{}` done: {} vertices, {} quads ({} normals)",
        mesh.name,
        mesh.vertex_count(),
        mesh.quads.len(),
        if smooth { "smooth" } else { "faceted" }
    );

    Ok(())
}

/// Marks the vertices no face references.
fn loose_vertices(vertex_count: usize, triangles: &[[u32; 3]], quads: &[[u32; 4]]) -> Vec<bool> {
    let mut loose = vec![true; vertex_count];
    for &index in triangles.iter().flatten().chain(quads.iter().flatten()) {
        if let Some(is_loose) = loose.get_mut(index as usize) {
            *is_loose = false;
        }
    }
    loose
}

fn split_and_average(
    positions: &[Vec3],
    triangles: &[[u32; 3]],
    quads: &[[u32; 4]],
    loose: &[bool],
) -> Result<(Vec<Vec3>, Vec<[u32; 4]>)> {
    let split = FaceSplit::new(positions.len(), triangles, quads)?;
    let mut positions = split.refine(positions, "positions", triangles, quads)?;
    average_valence(&mut positions, &split.quads, loose)?;
    Ok((positions, split.quads))
}

/// The Catmull-Clark correction on a quad mesh.
///
/// Vertices marked in `loose` may have zero valence and are left alone. Any
/// other vertex without an incident quad is an [`Error::ZeroValence`].
/// Vertices past the end of `loose` are never loose.
pub(crate) fn average_valence(
    positions: &mut [Vec3],
    quads: &[[u32; 4]],
    loose: &[bool],
) -> Result<()> {
    let mut centers = vec![Vec3::zero(); positions.len()];
    let mut valences = vec![0u32; positions.len()];

    for quad in quads {
        let [a, b, c, d] = fetch_all(positions, *quad, "positions")?;
        let center = (a + b + c + d) / 4.0;
        for &index in quad {
            centers[index as usize] += center;
            valences[index as usize] += 1;
        }
    }

    for (vertex, (position, (center_sum, valence))) in positions
        .iter_mut()
        .zip(centers.into_iter().zip(valences))
        .enumerate()
    {
        if 0 == valence {
            if loose.get(vertex).copied().unwrap_or(false) {
                continue;
            }
            return Err(Error::ZeroValence { vertex });
        }

        let valence = valence as f32;
        let center = center_sum / valence;
        *position += (center - *position) * (4.0 / valence);
    }

    Ok(())
}
