//! Error types for the subdiv-tess crate.

use thiserror::Error;

/// Main error type for tessellation operations.
///
/// All of these are fatal for the pass that raised them. The scene driver
/// reports them per mesh and moves on to the next one.
#[derive(Debug, Error)]
pub enum Error {
    /// An edge was looked up that no face of the current topology has.
    #[error("Topology inconsistency: edge ({from}, {to}) is not in the edge map")]
    TopologyInconsistency { from: u32, to: u32 },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for `{buffer}` (len: {len})")]
    IndexOutOfBounds {
        buffer: &'static str,
        index: usize,
        len: usize,
    },

    /// A face-connected vertex ended up in no face after a Catmull-Clark
    /// split.
    #[error("Vertex {vertex} has zero valence after Catmull-Clark split")]
    ZeroValence { vertex: usize },

    /// An operation needs a buffer the mesh does not have.
    #[error("Mesh `{mesh}` has no `{buffer}` buffer")]
    MissingBuffer { mesh: String, buffer: &'static str },

    /// Invalid buffer size.
    #[error("Invalid buffer size for `{buffer}`: expected {expected}, got {actual}")]
    InvalidBufferSize {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A buffer grew past what `u32` indices can address.
    #[error("Buffer `{buffer}` would hold {len} elements, more than `u32` indices can address")]
    BufferTooLarge { buffer: &'static str, len: usize },

    /// Texel data does not match the texture dimensions.
    #[error("Invalid texture: {width}x{height} needs {} texels, got {texels}", .width * .height)]
    InvalidTexture {
        width: usize,
        height: usize,
        texels: usize,
    },

    /// No face with positive area to grow hair on.
    #[error("Cannot sample hair roots: {0}")]
    HairSampling(#[from] rand::distributions::WeightedError),

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an out of bounds access into `buffer`.
    #[inline]
    pub(crate) fn out_of_bounds(buffer: &'static str, index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { buffer, index, len }
    }
}
