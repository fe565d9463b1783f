/// Error types for fractal generation
use thiserror::Error;

/// Errors raised at the configuration and export boundaries.
///
/// The recursive generators themselves never fail.
#[derive(Debug, Error, PartialEq)]
pub enum FractalError {
    /// The twist angle is NaN or infinite.
    #[error("twist angle must be finite, got {0}")]
    InvalidTwistAngle(f32),

    /// A base face has a NaN or infinite coordinate.
    #[error("base face {face} has a non-finite coordinate at vertex {vertex}")]
    NonFiniteVertex {
        /// Index of the base face.
        face: usize,
        /// Index of the vertex within the face.
        vertex: usize,
    },

    /// Generation would emit more triangles than allowed.
    #[error("generation would emit {projected} triangles, max {max}")]
    MeshTooLarge {
        /// Triangles the parameters would produce.
        projected: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Result type for fractal operations.
pub type FractalResult<T> = std::result::Result<T, FractalError>;
