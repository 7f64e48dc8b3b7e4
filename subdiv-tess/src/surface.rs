//! Implicit surfaces and their tessellated display meshes.
//!
//! A [`Surface`] is an analytic primitive. The renderer never sees it
//! directly; it gets the mesh built by [`make_surface_mesh()`] instead.
use std::f32::consts::PI;

use derive_more::Display;
use log::debug;
use ultraviolet::{Mat4, Vec2, Vec3};

use crate::{Material, Mesh};

/// Shape of an implicit [`Surface`].
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceShape {
    /// Sphere of the surface radius around the frame origin.
    #[default]
    Sphere,
    /// Square of side `2 · radius` in the frame's `xy` plane.
    Quad,
}

/// An implicit primitive.
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub frame: Mat4,
    pub radius: f32,
    pub shape: SurfaceShape,
    pub material: Material,
    /// Set by [`subdivide_surface()`].
    pub display_mesh: Option<Mesh>,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            name: String::new(),
            frame: Mat4::identity(),
            radius: 1.0,
            shape: SurfaceShape::default(),
            material: Material::default(),
            display_mesh: None,
        }
    }
}

/// Options for [`make_surface_mesh()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMeshOptions {
    /// Quads around the equator of a sphere.
    pub sphere_longitude_steps: u32,
    /// Quads from pole to pole of a sphere.
    pub sphere_latitude_steps: u32,
    /// Pulls the display mesh inwards: spheres shrink to
    /// `radius · (1 - offset)`, quads move to `z = -offset`.
    pub offset: f32,
}

impl Default for SurfaceMeshOptions {
    fn default() -> Self {
        Self {
            sphere_longitude_steps: 128,
            sphere_latitude_steps: 64,
            offset: 0.0,
        }
    }
}

/// Builds the display mesh of an implicit primitive.
///
/// Spheres are UV-tessellated with `(longitude + 1) · (latitude + 1)`
/// vertices (the seam and the poles are duplicated) and
/// `longitude · latitude` quads. Both shapes get unit normals and texture
/// coordinates.
pub fn make_surface_mesh(
    name: impl Into<String>,
    frame: Mat4,
    radius: f32,
    shape: SurfaceShape,
    material: &Material,
    options: &SurfaceMeshOptions,
) -> Mesh {
    let mut mesh = Mesh::new(name);
    mesh.frame = frame;
    mesh.material = material.clone();

    match shape {
        SurfaceShape::Quad => {
            let z = -options.offset;
            mesh.positions = vec![
                Vec3::new(-radius, -radius, z),
                Vec3::new(radius, -radius, z),
                Vec3::new(radius, radius, z),
                Vec3::new(-radius, radius, z),
            ];
            mesh.normals = vec![Vec3::unit_z(); 4];
            mesh.texcoords = vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ];
            mesh.quads = vec![[0, 1, 2, 3]];
        }
        SurfaceShape::Sphere => {
            let longitude = options.sphere_longitude_steps;
            let latitude = options.sphere_latitude_steps;
            let row = longitude + 1;
            let vertex_count = (row * (latitude + 1)) as usize;

            mesh.positions.reserve(vertex_count);
            mesh.normals.reserve(vertex_count);
            mesh.texcoords.reserve(vertex_count);

            for j in 0..=latitude {
                for i in 0..=longitude {
                    let s = i as f32 / longitude.max(1) as f32;
                    let t = j as f32 / latitude.max(1) as f32;
                    let (u, v) = (2.0 * PI * s, PI * t);
                    let direction = Vec3::new(u.cos() * v.sin(), u.sin() * v.sin(), v.cos());

                    mesh.positions
                        .push(direction * (radius * (1.0 - options.offset)));
                    mesh.normals.push(direction);
                    mesh.texcoords.push(Vec2::new(s, t));
                }
            }

            mesh.quads = (0..latitude)
                .flat_map(|j| (0..longitude).map(move |i| (i, j)))
                .map(|(i, j)| {
                    let index = |i: u32, j: u32| j * row + i;
                    [index(i, j), index(i + 1, j), index(i + 1, j + 1), index(i, j + 1)]
                })
                .collect();
        }
    }

    mesh
}

/// Replaces the display mesh of `surface` with a fresh tessellation.
pub fn subdivide_surface(surface: &mut Surface, options: &SurfaceMeshOptions) {
    let mesh = make_surface_mesh(
        surface.name.clone(),
        surface.frame,
        surface.radius,
        surface.shape,
        &surface.material,
        options,
    );

    debug!(
        "Display mesh for {} surface `{}`: {} vertices, {} quads",
        surface.shape,
        surface.name,
        mesh.vertex_count(),
        mesh.quads.len()
    );

    surface.display_mesh = Some(mesh);
}
