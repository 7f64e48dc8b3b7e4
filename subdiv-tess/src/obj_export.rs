//! Wavefront OBJ export of tessellated meshes.
//!
//! Writes `v`, `vt` and `vn` records for the vertex buffers and `f`, `l` and
//! `p` records for the elements. Splines have no OBJ counterpart here and are
//! skipped; run the Bezier pass first.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mesh::check_parallel;
use crate::{Mesh, Result};

/// Writes `mesh` as OBJ to `writer`.
///
/// Indices are 1-based as OBJ demands. Face corners reference texture
/// coordinates and normals with the vertex index when the mesh has them.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    #[cfg(feature = "topology_validation")]
    mesh.validate()?;

    check_parallel("normals", mesh.normals.len(), mesh.positions.len())?;
    check_parallel("texcoords", mesh.texcoords.len(), mesh.positions.len())?;

    writeln!(writer, "# {}", mesh.name)?;
    writeln!(
        writer,
        "# {} vertices, {} faces, {} lines, {} points",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.lines.len(),
        mesh.points.len()
    )?;
    writeln!(writer, "o {}", object_name(&mesh.name))?;

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.texcoords {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    let corner: fn(u32) -> String = match (mesh.texcoords.is_empty(), mesh.normals.is_empty()) {
        (true, true) => |i: u32| format!("{}", i + 1),
        (false, true) => |i: u32| format!("{0}/{0}", i + 1),
        (true, false) => |i: u32| format!("{0}//{0}", i + 1),
        (false, false) => |i: u32| format!("{0}/{0}/{0}", i + 1),
    };

    for face in mesh
        .triangles
        .iter()
        .map(|t| t.as_slice())
        .chain(mesh.quads.iter().map(|q| q.as_slice()))
    {
        write!(writer, "f")?;
        for &index in face {
            write!(writer, " {}", corner(index))?;
        }
        writeln!(writer)?;
    }

    for [from, to] in &mesh.lines {
        writeln!(writer, "l {} {}", from + 1, to + 1)?;
    }

    for point in &mesh.points {
        writeln!(writer, "p {}", point + 1)?;
    }

    Ok(())
}

/// Writes `mesh` as OBJ into the file at `path`.
pub fn write_obj_file(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// OBJ object names must not contain whitespace.
fn object_name(name: &str) -> String {
    if name.is_empty() {
        "mesh".to_string()
    } else {
        name.split_whitespace().collect::<Vec<_>>().join("_")
    }
}
