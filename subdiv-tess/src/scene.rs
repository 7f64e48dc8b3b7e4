//! The subdivision driver.
//!
//! [`subdivide_scene()`] runs the full pipeline over every mesh of a
//! [`Scene`] and then builds the display meshes of its surfaces.
//!
//! Per mesh the passes run in a fixed order, each gated by its own level
//! counter or material setting:
//!
//! 1. [`grow_hair()`] if `material.hair_count > 0`.
//! 2. [`subdivide_catmull_clark()`].
//! 3. [`subdivide_linear()`].
//! 4. [`subdivide_bezier()`].
//! 5. [`apply_bump()`] if the material has a bump texture.
//!
//! The passes operate on a copy of the mesh which replaces the original
//! only once all of them succeeded. A failing mesh is reported in the
//! [`SceneReport`] and stays as it was; the remaining meshes are still
//! processed.
use derive_more::Display;
use log::{info, warn};
use rand::Rng;

use crate::{
    apply_bump, grow_hair, subdivide_bezier, subdivide_catmull_clark, subdivide_linear,
    subdivide_surface, Error, HairOptions, LinearOptions, Mesh, Result, Surface,
    SurfaceMeshOptions,
};

/// Everything the driver works on.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub surfaces: Vec<Surface>,
}

/// Options for [`subdivide_scene()`].
///
/// Uses the [init struct pattern](https://xaeroxe.github.io/init-struct-pattern/):
///
/// ```
/// # use subdiv_tess::{LinearOptions, TessellationOptions};
/// let options = TessellationOptions {
///     linear: LinearOptions {
///         renormalize_normals: true,
///     },
///     ..Default::default()
/// };
/// # assert!(!options.hair.keep_quads);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TessellationOptions {
    pub linear: LinearOptions,
    pub hair: HairOptions,
    pub surface: SurfaceMeshOptions,
}

/// A pass of the mesh pipeline.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    #[display("validation")]
    Validation,
    #[display("hair growth")]
    Hair,
    #[display("Catmull-Clark subdivision")]
    CatmullClark,
    #[display("linear subdivision")]
    Linear,
    #[display("Bezier subdivision")]
    Bezier,
    #[display("bump mapping")]
    Bump,
}

/// A mesh whose pipeline failed.
#[derive(Debug)]
pub struct MeshFailure {
    /// Position of the mesh in [`Scene::meshes`].
    pub index: usize,
    pub name: String,
    /// The pass that failed.
    pub pass: Pass,
    pub error: Error,
}

/// Outcome of [`subdivide_scene()`].
#[derive(Debug, Default)]
pub struct SceneReport {
    /// Meshes whose pipeline completed.
    pub meshes_processed: usize,
    /// Surfaces that got a display mesh.
    pub surfaces_processed: usize,
    pub failures: Vec<MeshFailure>,
}

impl SceneReport {
    /// Returns `true` if no mesh failed.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the full pipeline on one mesh.
///
/// On error `mesh` is unchanged and the failing [`Pass`] is returned along
/// with the error.
pub fn subdivide_mesh<R: Rng + ?Sized>(
    mesh: &mut Mesh,
    options: &TessellationOptions,
    rng: &mut R,
) -> std::result::Result<(), (Pass, Error)> {
    #[cfg(feature = "topology_validation")]
    run(Pass::Validation, || mesh.validate())?;

    let mut working = mesh.clone();

    run(Pass::Hair, || {
        if 0 < working.material.hair_count {
            grow_hair(&mut working, &options.hair, rng)
        } else {
            Ok(())
        }
    })?;
    run(Pass::CatmullClark, || subdivide_catmull_clark(&mut working))?;
    run(Pass::Linear, || {
        subdivide_linear(&mut working, &options.linear)
    })?;
    run(Pass::Bezier, || subdivide_bezier(&mut working))?;
    run(Pass::Bump, || apply_bump(&mut working))?;

    *mesh = working;
    Ok(())
}

#[inline]
fn run(pass: Pass, f: impl FnOnce() -> Result<()>) -> std::result::Result<(), (Pass, Error)> {
    f().map_err(|error| (pass, error))
}

/// Tessellates every mesh and surface of `scene`.
///
/// Meshes are processed in order with [`subdivide_mesh()`]; a failure is
/// logged, recorded and does not stop the run. Every surface then gets its
/// display mesh.
///
/// Hair placement draws from `rng`. Seed it for reproducible output.
pub fn subdivide_scene<R: Rng + ?Sized>(
    scene: &mut Scene,
    options: &TessellationOptions,
    rng: &mut R,
) -> SceneReport {
    let mut report = SceneReport::default();

    for (index, mesh) in scene.meshes.iter_mut().enumerate() {
        match subdivide_mesh(mesh, options, rng) {
            Ok(()) => report.meshes_processed += 1,
            Err((pass, error)) => {
                warn!("{} of mesh `{}` failed: {}", pass, mesh.name, error);
                report.failures.push(MeshFailure {
                    index,
                    name: mesh.name.clone(),
                    pass,
                    error,
                });
            }
        }
    }

    for surface in &mut scene.surfaces {
        subdivide_surface(surface, &options.surface);
        report.surfaces_processed += 1;
    }

    info!(
        "Tessellated {} of {} meshes and {} surfaces",
        report.meshes_processed,
        scene.meshes.len(),
        report.surfaces_processed
    );

    report
}
