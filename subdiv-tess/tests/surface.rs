//! Tests for surface display meshes.
mod test_utils;

use subdiv_tess::{
    make_surface_mesh, subdivide_surface, Mat4, Material, Surface, SurfaceMeshOptions,
    SurfaceShape, Vec3,
};
use test_utils::*;

#[test]
fn test_sphere_resolution() {
    let mesh = make_surface_mesh(
        "sphere",
        Mat4::identity(),
        2.0,
        SurfaceShape::Sphere,
        &Material::default(),
        &SurfaceMeshOptions::default(),
    );

    assert_eq!(mesh.positions.len(), 129 * 65);
    assert_eq!(mesh.quads.len(), 128 * 64);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    assert_eq!(mesh.texcoords.len(), mesh.positions.len());
    assert!(mesh.validate().is_ok());

    for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
        assert_unit(*normal);
        assert_vec3_eq(*position, *normal * 2.0);
    }
}

#[test]
fn test_sphere_is_not_covered_twice() {
    let options = SurfaceMeshOptions {
        sphere_longitude_steps: 8,
        sphere_latitude_steps: 4,
        ..Default::default()
    };
    let mesh = make_surface_mesh(
        "sphere",
        Mat4::identity(),
        1.0,
        SurfaceShape::Sphere,
        &Material::default(),
        &options,
    );

    // Poles at the first and last row, the seam closes each row.
    assert_vec3_eq(mesh.positions[0], Vec3::unit_z());
    assert_vec3_eq(*mesh.positions.last().unwrap(), -Vec3::unit_z());
    for row in mesh.positions.chunks(9) {
        assert_vec3_eq(row[0], row[8]);
    }
    assert_vec3_eq(mesh.positions[9 * 2 + 4], -Vec3::unit_x());
}

#[test]
fn test_sphere_offset_shrinks() {
    let mesh = make_surface_mesh(
        "sphere",
        Mat4::identity(),
        1.0,
        SurfaceShape::Sphere,
        &Material::default(),
        &SurfaceMeshOptions {
            offset: 0.25,
            ..Default::default()
        },
    );

    for position in &mesh.positions {
        assert!((position.mag() - 0.75).abs() < EPSILON);
    }
}

#[test]
fn test_quad() {
    let mesh = make_surface_mesh(
        "floor",
        Mat4::identity(),
        3.0,
        SurfaceShape::Quad,
        &Material::default(),
        &SurfaceMeshOptions {
            offset: 0.5,
            ..Default::default()
        },
    );

    assert_eq!(
        mesh.positions,
        vec![
            Vec3::new(-3.0, -3.0, -0.5),
            Vec3::new(3.0, -3.0, -0.5),
            Vec3::new(3.0, 3.0, -0.5),
            Vec3::new(-3.0, 3.0, -0.5),
        ]
    );
    assert_eq!(mesh.normals, vec![Vec3::unit_z(); 4]);
    assert_eq!(mesh.quads, vec![[0, 1, 2, 3]]);
}

#[test]
fn test_subdivide_surface_sets_display_mesh() {
    let mut surface = Surface {
        name: "ball".to_string(),
        frame: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        radius: 0.5,
        ..Default::default()
    };
    surface.material.hair_count = 7;

    subdivide_surface(&mut surface, &SurfaceMeshOptions::default());

    let mesh = surface.display_mesh.as_ref().unwrap();
    assert_eq!(mesh.name, "ball");
    assert_eq!(mesh.frame, surface.frame);
    assert_eq!(mesh.material.hair_count, 7);
    assert_eq!(mesh.quads.len(), 128 * 64);
}
