#![allow(dead_code)]
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use subdiv_tess::{Mesh, Vec2, Vec3};

/// Check if tests should update expected results
pub fn should_update_expected() -> bool {
    // Check for UPDATE_EXPECTED environment variable
    if env::var("UPDATE_EXPECTED").is_ok() {
        return true;
    }

    // Check for --update or -u flag in test arguments
    let args: Vec<String> = env::args().collect();
    args.iter().any(|arg| arg == "--update" || arg == "-u")
}

/// Get the path to the expected results directory
pub fn expected_results_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("expected_results")
}

/// Get the path to the test output directory (in target)
pub fn test_output_dir() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("test_output");

    // Create directory if it doesn't exist
    fs::create_dir_all(&path).expect("Failed to create test output directory");
    path
}

/// Helper to create a test-specific output path
pub fn test_output_path(filename: &str) -> PathBuf {
    test_output_dir().join(filename)
}

/// Compare or update test result with in-memory content
pub fn assert_content_matches(actual_content: &str, expected_filename: &str) {
    let expected_path = expected_results_dir().join(expected_filename);

    if should_update_expected() {
        fs::write(&expected_path, actual_content)
            .unwrap_or_else(|_| panic!("Failed to update expected file: {expected_filename}"));
        println!("Updated expected file: {expected_filename}");
    } else {
        assert!(
            expected_path.exists(),
            "Expected file does not exist: {}. Run with UPDATE_EXPECTED=1 or --update to create it.",
            expected_path.display()
        );

        let expected_content = fs::read_to_string(&expected_path).unwrap_or_else(|_| {
            panic!("Failed to read expected file: {}", expected_path.display())
        });

        assert_eq!(
            actual_content,
            expected_content,
            "Content mismatch for {expected_filename}. Run with UPDATE_EXPECTED=1 or --update to update expected results."
        );
    }
}

/// Compare or update a test result file
pub fn assert_file_matches(actual_path: &Path, expected_filename: &str) {
    let actual_content = fs::read_to_string(actual_path)
        .unwrap_or_else(|_| panic!("Failed to read actual file: {}", actual_path.display()));
    assert_content_matches(&actual_content, expected_filename);
}

pub const EPSILON: f32 = 1e-5;

/// Asserts that two vectors are equal within [`EPSILON`].
#[track_caller]
pub fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).mag() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Asserts that `v` has unit length within [`EPSILON`].
#[track_caller]
pub fn assert_unit(v: Vec3) {
    assert!((v.mag() - 1.0).abs() < EPSILON, "{v:?} is not unit length");
}

/// The unit square `(0,0,0), (1,0,0), (1,1,0), (0,1,0)` as one quad.
pub fn unit_quad() -> Mesh {
    let mut mesh = Mesh::new("quad");
    mesh.positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    mesh.quads = vec![[0, 1, 2, 3]];
    mesh
}

/// [`unit_quad()`] with `+z` normals and texture coordinates equal to the
/// `xy` position.
pub fn unit_quad_with_attributes() -> Mesh {
    let mut mesh = unit_quad();
    mesh.normals = vec![Vec3::unit_z(); 4];
    mesh.texcoords = mesh
        .positions
        .iter()
        .map(|p| Vec2::new(p.x, p.y))
        .collect();
    mesh
}

/// A single counter-clockwise triangle in the `xy` plane.
pub fn triangle() -> Mesh {
    let mut mesh = Mesh::new("triangle");
    mesh.positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
    ];
    mesh.triangles = vec![[0, 1, 2]];
    mesh
}

/// Axis aligned cube with corners at `±1`, outward facing quads.
pub fn cube() -> Mesh {
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
    mesh
}

/// One cubic segment `(0,0,0), (1,1,0), (2,1,0), (3,0,0)`.
pub fn arch() -> Mesh {
    let mut mesh = Mesh::new("arch");
    mesh.positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    mesh.splines = vec![[0, 1, 2, 3]];
    mesh
}

/// Evaluates a cubic Bezier segment with the Bernstein basis.
pub fn bezier_point([p0, p1, p2, p3]: [Vec3; 4], t: f32) -> Vec3 {
    let s = 1.0 - t;
    p0 * (s * s * s) + p1 * (3.0 * s * s * t) + p2 * (3.0 * s * t * t) + p3 * (t * t * t)
}
