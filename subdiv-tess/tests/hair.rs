//! Tests for hair growth.
mod test_utils;

use rand::{rngs::StdRng, SeedableRng};
use subdiv_tess::{grow_hair, Error, HairOptions, Vec3};
use test_utils::*;

#[test]
fn test_appends_four_vertices_and_one_spline_per_strand() -> anyhow::Result<()> {
    let mut mesh = cube();
    mesh.material.hair_count = 25;
    let vertex_count = mesh.positions.len();

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(3))?;

    assert_eq!(mesh.positions.len(), vertex_count + 4 * 25);
    assert_eq!(mesh.splines.len(), 25);
    assert_eq!(mesh.subdivision.bezier, 3);
    assert!(mesh.validate().is_ok());

    Ok(())
}

#[test]
fn test_quads_are_replaced_by_triangles() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    mesh.material.hair_count = 1;

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(3))?;

    assert!(mesh.quads.is_empty());
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [2, 3, 0]]);

    Ok(())
}

#[test]
fn test_keep_quads() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    mesh.material.hair_count = 1;

    grow_hair(
        &mut mesh,
        &HairOptions {
            keep_quads: true,
            bezier_level: 5,
        },
        &mut StdRng::seed_from_u64(3),
    )?;

    assert_eq!(mesh.quads, vec![[0, 1, 2, 3]]);
    assert!(mesh.triangles.is_empty());
    assert_eq!(mesh.subdivision.bezier, 5);

    Ok(())
}

#[test]
fn test_strand_shape() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    mesh.material.hair_count = 50;

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(5))?;

    for spline in &mesh.splines {
        let [root, tip, bend, end] = spline.map(|index| mesh.positions[index as usize]);

        // Roots lie on the quad.
        let inside = -EPSILON..=1.0 + EPSILON;
        assert!(inside.contains(&root.x) && inside.contains(&root.y));
        assert_eq!(root.z, 0.0);

        // Without vertex normals the strand grows along the face normal.
        assert_vec3_eq(tip - root, Vec3::new(0.0, 0.0, 0.4));
        assert_vec3_eq(bend - tip, Vec3::new(0.0, -0.4, 0.0));
        assert_vec3_eq(end - tip, Vec3::new(0.0, -0.8, 0.0));
    }

    Ok(())
}

#[test]
fn test_hair_length_scales_strands() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    mesh.material.hair_count = 4;
    mesh.material.hair_length = 0.5;

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(5))?;

    for spline in &mesh.splines {
        let [root, tip, _, end] = spline.map(|index| mesh.positions[index as usize]);
        assert_vec3_eq(tip - root, Vec3::new(0.0, 0.0, 0.2));
        assert_vec3_eq(end - tip, Vec3::new(0.0, -0.4, 0.0));
    }

    Ok(())
}

#[test]
fn test_interpolated_vertex_normals() -> anyhow::Result<()> {
    let mut mesh = unit_quad_with_attributes();
    mesh.normals = vec![Vec3::unit_x(); 4];
    mesh.material.hair_count = 10;

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(9))?;

    // Parallel buffers stay parallel.
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    assert_eq!(mesh.texcoords.len(), mesh.positions.len());

    for spline in &mesh.splines {
        let root = spline[0] as usize;
        let tip = spline[1] as usize;
        assert_vec3_eq(
            mesh.positions[tip] - mesh.positions[root],
            Vec3::new(0.4, 0.0, 0.0),
        );
        for index in spline {
            assert_eq!(mesh.normals[*index as usize], Vec3::zero());
        }

        // The root's texture coordinate matches its position on the quad.
        let uv = mesh.texcoords[root];
        assert!((uv.x - mesh.positions[root].x).abs() < EPSILON);
        assert!((uv.y - mesh.positions[root].y).abs() < EPSILON);
    }

    Ok(())
}

#[test]
fn test_seeded_growth_is_reproducible() -> anyhow::Result<()> {
    let mut first = cube();
    first.material.hair_count = 20;
    let mut second = first.clone();

    grow_hair(&mut first, &HairOptions::default(), &mut StdRng::seed_from_u64(77))?;
    grow_hair(&mut second, &HairOptions::default(), &mut StdRng::seed_from_u64(77))?;

    assert_eq!(first.positions, second.positions);
    assert_eq!(first.splines, second.splines);

    Ok(())
}

#[test]
fn test_area_weighted_sampling() -> anyhow::Result<()> {
    // A large and a tiny triangle side by side.
    let mut mesh = triangle();
    mesh.positions.extend([
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.1, 0.0, 0.0),
        Vec3::new(10.0, 0.1, 0.0),
    ]);
    mesh.triangles.push([3, 4, 5]);
    mesh.material.hair_count = 200;

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(2))?;

    let on_small = mesh
        .splines
        .iter()
        .filter(|spline| 5.0 < mesh.positions[spline[0] as usize].x)
        .count();
    // The small triangle has 1/900 of the area.
    assert!(on_small < 5);

    Ok(())
}

#[test]
fn test_no_area_is_an_error() {
    let mut mesh = unit_quad();
    mesh.positions = vec![Vec3::zero(); 4];
    mesh.material.hair_count = 3;
    let before = mesh.clone();

    assert!(matches!(
        grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(1)),
        Err(Error::HairSampling(_))
    ));
    assert_eq!(mesh.positions, before.positions);
    assert_eq!(mesh.quads, before.quads);
    assert!(mesh.splines.is_empty());
}

#[test]
fn test_zero_hair_count_is_a_no_op() -> anyhow::Result<()> {
    let mut mesh = unit_quad();
    let before = mesh.clone();

    grow_hair(&mut mesh, &HairOptions::default(), &mut StdRng::seed_from_u64(1))?;

    assert_eq!(mesh.positions, before.positions);
    assert_eq!(mesh.quads, before.quads);
    assert_eq!(mesh.subdivision.bezier, 0);

    Ok(())
}
