//! Tests for OBJ export.
mod test_utils;

use subdiv_tess::obj_export::{write_obj, write_obj_file};
use subdiv_tess::{subdivide_bezier, Vec3};
use test_utils::*;

#[test]
fn test_quad_matches_expected() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    mesh.normals = vec![Vec3::unit_z(); 4];
    mesh.lines = vec![[0, 2]];
    mesh.points = vec![3];

    let mut obj = Vec::new();
    write_obj(&mesh, &mut obj)?;

    assert_content_matches(&String::from_utf8(obj)?, "quad.obj");

    Ok(())
}

#[test]
fn test_face_corner_formats() -> anyhow::Result<()> {
    let mut obj = Vec::new();
    write_obj(&triangle(), &mut obj)?;
    assert!(String::from_utf8(obj)?.contains("\nf 1 2 3\n"));

    let mut obj = Vec::new();
    write_obj(&unit_quad_with_attributes(), &mut obj)?;
    let obj = String::from_utf8(obj)?;
    assert!(obj.contains("\nf 1/1/1 2/2/2 3/3/3 4/4/4\n"));
    assert_eq!(obj.lines().filter(|line| line.starts_with("vt ")).count(), 4);

    Ok(())
}

#[test]
fn test_refined_curve_to_file() -> anyhow::Result<()> {
    let mut mesh = arch();
    mesh.subdivision.bezier = 2;
    subdivide_bezier(&mut mesh)?;

    let path = test_output_path("arch.obj");
    write_obj_file(&mesh, &path)?;

    let obj = std::fs::read_to_string(&path)?;
    assert_eq!(obj.lines().filter(|line| line.starts_with("v ")).count(), 19);
    assert_eq!(obj.lines().filter(|line| line.starts_with("l ")).count(), 12);
    assert!(obj.lines().any(|line| line == "l 1 11"));

    Ok(())
}
