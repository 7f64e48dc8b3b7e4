//! Displacement of vertices along their normal by a bump texture.
use log::debug;

use crate::mesh::check_parallel;
use crate::normals::vertex_normals;
use crate::{Mesh, Result};

/// Displaces every vertex of `mesh` along its normal by the magnitude of the
/// bump texel under its texture coordinate, scaled by
/// `mesh.material.bump_factor`. Normals are smoothed afterwards.
///
/// A mesh without a bump texture is left alone.
///
/// # Errors
///
/// * [`Error::MissingBuffer`](crate::Error::MissingBuffer) if the mesh has no
///   texture coordinates or no normals.
/// * [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) if a
///   texture coordinate lies outside `[0, 1]`.
///
/// `mesh` is left untouched on error.
pub fn apply_bump(mesh: &mut Mesh) -> Result<()> {
    let Some(texture) = mesh.material.bump_texture.clone() else {
        return Ok(());
    };

    mesh.require("texcoords", mesh.texcoords.len())?;
    mesh.require("normals", mesh.normals.len())?;
    check_parallel("texcoords", mesh.texcoords.len(), mesh.positions.len())?;
    check_parallel("normals", mesh.normals.len(), mesh.positions.len())?;

    debug!(
        "Bump mapping `{}` with a {}x{} texture, factor {}",
        mesh.name,
        texture.width(),
        texture.height(),
        mesh.material.bump_factor
    );

    let factor = mesh.material.bump_factor;
    let positions = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.texcoords)
        .map(|((&position, &normal), &uv)| {
            let height = texture.sample(uv)?.mag();
            Ok(position + normal * (factor * height))
        })
        .collect::<Result<Vec<_>>>()?;

    let normals = vertex_normals(&positions, &mesh.triangles, &mesh.quads)?;

    mesh.positions = positions;
    mesh.normals = normals;

    Ok(())
}
