/// Generation parameters
use std::f32::consts::FRAC_PI_3;
use std::fmt;

use crate::classify::BaseFace;
use crate::error::{FractalError, FractalResult};

/// Default recursion bound.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default twist applied to the inner cell of the Sierpinski variants (60°).
pub const DEFAULT_TWIST_ANGLE: f32 = FRAC_PI_3;

/// Default upper bound on emitted triangles.
pub const DEFAULT_MAX_TRIANGLES: usize = 4_000_000;

/// Which recursive surface to build on each base face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKind {
    /// Koch-style tetrahedron: raises a tetrahedron on every midpoint triangle.
    #[default]
    Tetrahedral,
    /// Three corner cells plus a raised, twisted inner cell.
    Sierpinski,
    /// Emits the midpoint triangle and twisted twin of every cell at every
    /// level, down to and including the bound.
    InverseSierpinski,
}

impl FractalKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Tetrahedral => "tetrahedral",
            Self::Sierpinski => "sierpinski",
            Self::InverseSierpinski => "inverse-sierpinski",
        }
    }

    /// Exact number of triangles emitted for a single base face.
    pub fn triangles_per_face(self, max_depth: u32) -> usize {
        let mut count: usize = match self {
            Self::InverseSierpinski => 2,
            _ => 1,
        };
        for _ in 0..max_depth {
            count = match self {
                Self::Tetrahedral => count.saturating_mul(6),
                Self::Sierpinski => count.saturating_mul(4),
                Self::InverseSierpinski => count.saturating_mul(4).saturating_add(2),
            };
        }
        count
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use fractet_core::{FractalKind, FractalParams};
///
/// let params = FractalParams::sierpinski()
///     .with_max_depth(4)
///     .with_twist_degrees(60.0);
///
/// assert_eq!(params.kind, FractalKind::Sierpinski);
/// assert_eq!(params.expected_triangles(), 4 * 256);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FractalParams {
    /// Surface to generate.
    pub kind: FractalKind,

    /// Recursion bound. Work grows as `O(6^max_depth)` in the worst case.
    pub max_depth: u32,

    /// Rotation of the inner cell about the subdivision normal, in radians.
    pub twist_angle: f32,

    /// The four faces fed to the generator, in emission order.
    pub faces: [BaseFace; 4],

    /// Refuse runs that would emit more triangles than this.
    pub max_triangles: usize,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            kind: FractalKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            twist_angle: DEFAULT_TWIST_ANGLE,
            faces: BaseFace::regular_tetrahedron(),
            max_triangles: DEFAULT_MAX_TRIANGLES,
        }
    }
}

impl FractalParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tetrahedral() -> Self {
        Self::default().with_kind(FractalKind::Tetrahedral)
    }

    pub fn sierpinski() -> Self {
        Self::default().with_kind(FractalKind::Sierpinski)
    }

    pub fn inverse_sierpinski() -> Self {
        Self::default().with_kind(FractalKind::InverseSierpinski)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: FractalKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_twist_angle(mut self, radians: f32) -> Self {
        self.twist_angle = radians;
        self
    }

    #[must_use]
    pub fn with_twist_degrees(self, degrees: f32) -> Self {
        self.with_twist_angle(degrees.to_radians())
    }

    #[must_use]
    pub fn with_faces(mut self, faces: [BaseFace; 4]) -> Self {
        self.faces = faces;
        self
    }

    #[must_use]
    pub fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Triangles a run with these parameters emits over all four faces.
    pub fn expected_triangles(&self) -> usize {
        self.kind
            .triangles_per_face(self.max_depth)
            .saturating_mul(self.faces.len())
    }

    /// Check the parameters before any geometry is built.
    ///
    /// # Errors
    ///
    /// Returns an error if the twist angle or any base-face coordinate is
    /// not finite, or if the run would exceed `max_triangles`.
    pub fn validate(&self) -> FractalResult<()> {
        if !self.twist_angle.is_finite() {
            return Err(FractalError::InvalidTwistAngle(self.twist_angle));
        }

        for (face, base) in self.faces.iter().enumerate() {
            for (vertex, point) in base.triangle.iter().enumerate() {
                if !point.coords.iter().all(|v| v.is_finite()) {
                    return Err(FractalError::NonFiniteVertex { face, vertex });
                }
            }
        }

        let projected = self.expected_triangles();
        if projected > self.max_triangles {
            return Err(FractalError::MeshTooLarge {
                projected,
                max: self.max_triangles,
            });
        }

        Ok(())
    }
}
