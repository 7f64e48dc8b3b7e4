//! Geometry generator binary
//!
//! Tessellates a small demo scene (a hairy, Catmull-Clark smoothed cube, a
//! Bezier curve and a sphere surface) and writes every resulting mesh as
//! Wavefront OBJ into the current directory.
//!
//! Needs the `generator` feature:
//! `cargo run --features generator --bin generator`. Set `RUST_LOG=debug` to
//! follow the individual passes.
use std::process::ExitCode;

use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use subdiv_tess::{
    obj_export, subdivide_scene, Mesh, Scene, Surface, SurfaceShape, TessellationOptions, Vec3,
};

// Seed for the hair placement so runs are reproducible.
static SEED: u64 = 42;

fn main() -> ExitCode {
    env_logger::init();

    let mut scene = Scene {
        meshes: vec![hairy_cube(), curve()],
        surfaces: vec![Surface {
            name: "sphere".to_string(),
            radius: 0.5,
            shape: SurfaceShape::Sphere,
            ..Default::default()
        }],
    };

    let report = subdivide_scene(
        &mut scene,
        &TessellationOptions::default(),
        &mut StdRng::seed_from_u64(SEED),
    );
    for failure in &report.failures {
        error!(
            "Mesh #{} `{}`: {} failed: {}",
            failure.index, failure.name, failure.pass, failure.error
        );
    }

    let meshes = scene.meshes.iter().chain(
        scene
            .surfaces
            .iter()
            .filter_map(|surface| surface.display_mesh.as_ref()),
    );

    let mut status = if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    for mesh in meshes {
        let filename = format!("{}.obj", mesh.name);
        match obj_export::write_obj_file(mesh, &filename) {
            Ok(()) => info!(
                "Wrote `{}` ({} vertices, {} faces, {} lines) to {}",
                mesh.name,
                mesh.vertex_count(),
                mesh.face_count(),
                mesh.lines.len(),
                filename
            ),
            Err(e) => {
                error!("Error writing {}: {}", filename, e);
                status = ExitCode::FAILURE;
            }
        }
    }

    status
}

/// A unit cube with 200 hair strands, smoothed twice.
fn hairy_cube() -> Mesh {
    let mut mesh = Mesh::new("cube");
    mesh.positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    mesh.quads = vec![
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    mesh.material.hair_count = 200;
    mesh.material.hair_length = 0.25;
    mesh.subdivision.catmull_clark = 2;
    mesh.subdivision.catmull_clark_smooth = true;
    mesh
}

/// A single S-shaped cubic segment, refined into a polyline.
fn curve() -> Mesh {
    let mut mesh = Mesh::new("curve");
    mesh.positions = vec![
        Vec3::new(-2.0, 0.0, 0.0),
        Vec3::new(-1.0, 2.0, 0.0),
        Vec3::new(1.0, -2.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
    ];
    mesh.splines = vec![[0, 1, 2, 3]];
    mesh.subdivision.bezier = 4;
    mesh
}
