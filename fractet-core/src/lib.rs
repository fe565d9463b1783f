/// Fractet Core Library - Recursive fractal surfaces over a tetrahedron
///
/// Builds flat-shaded triangle soups for a Koch-style tetrahedral fractal
/// and two Sierpinski-triangle variants, colored by the base face each
/// triangle is parallel to, as an interleaved vertex buffer.
pub mod classify;
pub mod error;
pub mod fractal;
pub mod geometry;
pub mod params;
pub mod vector;

// Re-export commonly used types
pub use classify::{BaseFace, FaceClassifier, ReferenceFace};
pub use error::{FractalError, FractalResult};
pub use fractal::{generate, GenerationResult, Generator};
pub use geometry::{emit_triangle, Color, Mesh, Triangle, Vertex, FLOATS_PER_TRIANGLE, FLOATS_PER_VERTEX};
pub use params::{FractalKind, FractalParams};
