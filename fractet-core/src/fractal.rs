/// Recursive fractal surface generators
use log::debug;
use nalgebra::{Point3, Vector3};

use crate::classify::FaceClassifier;
use crate::error::FractalResult;
use crate::geometry::{emit_triangle, Mesh};
use crate::params::{FractalKind, FractalParams};
use crate::vector::{centroid, face_normal, midpoint, rotate_around_axis};

/// Height of a regular tetrahedron relative to its edge length.
fn tetrahedron_height(edge: f32) -> f32 {
    (2.0f32 / 3.0).sqrt() * edge
}

/// The geometry shared by one subdivision step of every generator.
#[derive(Debug, Clone, Copy)]
struct Subdivision {
    ab: Point3<f32>,
    bc: Point3<f32>,
    ca: Point3<f32>,
    /// Normal of the midpoint triangle.
    normal: Vector3<f32>,
    /// Centroid of the midpoint triangle.
    center: Point3<f32>,
    height: f32,
}

impl Subdivision {
    fn new(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Self {
        let ab = midpoint(a, b);
        let bc = midpoint(b, c);
        let ca = midpoint(c, a);
        let edge = (bc - ab).norm();

        Self {
            ab,
            bc,
            ca,
            normal: face_normal(&ab, &bc, &ca),
            center: centroid(&ab, &bc, &ca),
            height: tetrahedron_height(edge),
        }
    }

    fn midpoint_triangle(&self) -> [Point3<f32>; 3] {
        [self.ab, self.bc, self.ca]
    }

    /// The three corner cells, wound like the parent.
    fn corners(
        &self,
        a: &Point3<f32>,
        b: &Point3<f32>,
        c: &Point3<f32>,
    ) -> [[Point3<f32>; 3]; 3] {
        [
            [*a, self.ab, self.ca],
            [self.ab, *b, self.bc],
            [self.ca, self.bc, *c],
        ]
    }

    fn lift(&self, point: &Point3<f32>) -> Point3<f32> {
        point + self.normal * self.height
    }

    /// Apex of the regular tetrahedron standing on the midpoint triangle.
    fn apex(&self) -> Point3<f32> {
        self.lift(&self.center)
    }

    /// The three side faces of the raised tetrahedron, wound outward.
    fn apex_faces(&self) -> [[Point3<f32>; 3]; 3] {
        let apex = self.apex();
        [
            [self.ab, self.bc, apex],
            [self.bc, self.ca, apex],
            [self.ca, self.ab, apex],
        ]
    }

    /// The midpoint triangle lifted off the plane and spun by `angle`
    /// about the subdivision normal through its own centroid.
    fn twisted(&self, angle: f32) -> [Point3<f32>; 3] {
        let pivot = self.apex();
        self.midpoint_triangle()
            .map(|p| rotate_around_axis(&self.lift(&p), &pivot, &self.normal, angle))
    }
}

/// Output of a full generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Triangle soup ready for the renderer.
    pub mesh: Mesh,
    pub kind: FractalKind,
    pub max_depth: u32,
    pub triangle_count: usize,
}

/// Recursive surface builder with a fixed depth bound and classifier.
#[derive(Debug, Clone)]
pub struct Generator {
    classifier: FaceClassifier,
    max_depth: u32,
    twist_angle: f32,
}

impl Generator {
    pub fn new(classifier: FaceClassifier, max_depth: u32, twist_angle: f32) -> Self {
        Self {
            classifier,
            max_depth,
            twist_angle,
        }
    }

    pub fn from_params(params: &FractalParams) -> Self {
        Self::new(
            FaceClassifier::new(&params.faces),
            params.max_depth,
            params.twist_angle,
        )
    }

    pub fn classifier(&self) -> &FaceClassifier {
        &self.classifier
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn emit_triangle(&self, a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>, out: &mut Mesh) {
        emit_triangle(a, b, c, &self.classifier, out);
    }

    /// Run the generator for `kind` on one triangle.
    pub fn generate(
        &self,
        kind: FractalKind,
        a: &Point3<f32>,
        b: &Point3<f32>,
        c: &Point3<f32>,
        depth: u32,
        out: &mut Mesh,
    ) {
        match kind {
            FractalKind::Tetrahedral => self.tetrahedral(a, b, c, depth, out),
            FractalKind::Sierpinski => self.sierpinski(a, b, c, depth, out),
            FractalKind::InverseSierpinski => self.inverse_sierpinski(a, b, c, depth, out),
        }
    }

    /// Koch-style tetrahedral subdivision.
    ///
    /// Raises a regular tetrahedron on the midpoint triangle and recurses
    /// into its three side faces. The corner cells recurse too, except on
    /// the last subdivision step where they are emitted flat.
    pub fn tetrahedral(
        &self,
        a: &Point3<f32>,
        b: &Point3<f32>,
        c: &Point3<f32>,
        depth: u32,
        out: &mut Mesh,
    ) {
        if depth >= self.max_depth {
            self.emit_triangle(a, b, c, out);
            return;
        }

        let step = Subdivision::new(a, b, c);
        for [p, q, r] in step.apex_faces() {
            self.tetrahedral(&p, &q, &r, depth + 1, out);
        }

        let last_step = depth + 1 == self.max_depth;
        for [p, q, r] in step.corners(a, b, c) {
            if last_step {
                self.emit_triangle(&p, &q, &r, out);
            } else {
                self.tetrahedral(&p, &q, &r, depth + 1, out);
            }
        }
    }

    /// Sierpinski-triangle subdivision with a raised, twisted inner cell.
    pub fn sierpinski(
        &self,
        a: &Point3<f32>,
        b: &Point3<f32>,
        c: &Point3<f32>,
        depth: u32,
        out: &mut Mesh,
    ) {
        if depth >= self.max_depth {
            self.emit_triangle(a, b, c, out);
            return;
        }

        let step = Subdivision::new(a, b, c);
        for [p, q, r] in step.corners(a, b, c) {
            self.sierpinski(&p, &q, &r, depth + 1, out);
        }

        let [p, q, r] = step.twisted(self.twist_angle);
        self.sierpinski(&p, &q, &r, depth + 1, out);
    }

    /// Sierpinski subdivision that keeps every level.
    ///
    /// Each call emits its midpoint triangle and the twisted twin, then
    /// recurses into the three corners and the twin while `depth` is below
    /// the bound. The input triangle itself is never emitted.
    pub fn inverse_sierpinski(
        &self,
        a: &Point3<f32>,
        b: &Point3<f32>,
        c: &Point3<f32>,
        depth: u32,
        out: &mut Mesh,
    ) {
        let step = Subdivision::new(a, b, c);
        let [m0, m1, m2] = step.midpoint_triangle();
        let [t0, t1, t2] = step.twisted(self.twist_angle);
        self.emit_triangle(&m0, &m1, &m2, out);
        self.emit_triangle(&t0, &t1, &t2, out);

        if depth < self.max_depth {
            for [p, q, r] in step.corners(a, b, c) {
                self.inverse_sierpinski(&p, &q, &r, depth + 1, out);
            }
            self.inverse_sierpinski(&t0, &t1, &t2, depth + 1, out);
        }
    }
}

/// Build the full surface described by `params`.
///
/// The four base faces are fed in order at depth 0 into one shared mesh.
///
/// # Errors
///
/// Returns an error if `params` fails [`FractalParams::validate`].
///
/// # Examples
///
/// ```
/// use fractet_core::{generate, FractalParams};
///
/// let result = generate(&FractalParams::tetrahedral().with_max_depth(1))?;
/// assert_eq!(result.triangle_count, 4 * 6);
/// # Ok::<(), fractet_core::FractalError>(())
/// ```
pub fn generate(params: &FractalParams) -> FractalResult<GenerationResult> {
    params.validate()?;

    let expected = params.expected_triangles();
    debug!(
        "Generating {} surface: depth {}, twist {:.4} rad, {} triangles expected",
        params.kind, params.max_depth, params.twist_angle, expected
    );

    let generator = Generator::from_params(params);
    let mut mesh = Mesh::with_capacity(expected);
    for (i, face) in params.faces.iter().enumerate() {
        let [a, b, c] = &face.triangle;
        generator.generate(params.kind, a, b, c, 0, &mut mesh);
        debug!("Face {}: {} triangles so far", i + 1, mesh.triangle_count());
    }

    let triangle_count = mesh.triangle_count();
    Ok(GenerationResult {
        mesh,
        kind: params.kind,
        max_depth: params.max_depth,
        triangle_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BaseFace;
    use approx::assert_relative_eq;

    fn generator(max_depth: u32) -> Generator {
        Generator::new(FaceClassifier::default(), max_depth, std::f32::consts::FRAC_PI_3)
    }

    #[test]
    fn test_subdivision_apex_is_regular() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[0].triangle;
        let step = Subdivision::new(&a, &b, &c);
        let apex = step.apex();
        let edge = (step.bc - step.ab).norm();
        for corner in step.midpoint_triangle() {
            assert_relative_eq!((apex - corner).norm(), edge, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_apex_faces_point_away_from_parent() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[1].triangle;
        let step = Subdivision::new(&a, &b, &c);
        for [p, q, r] in step.apex_faces() {
            let n = face_normal(&p, &q, &r);
            let face_center = centroid(&p, &q, &r);
            assert!(n.dot(&(face_center - step.center)) > 0.0);
        }
    }

    #[test]
    fn test_twisted_cell_stays_in_lifted_plane() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[2].triangle;
        let step = Subdivision::new(&a, &b, &c);
        let [p, q, r] = step.twisted(std::f32::consts::FRAC_PI_3);
        assert_relative_eq!(face_normal(&p, &q, &r), step.normal, epsilon = 1e-5);
        for point in [p, q, r] {
            let offset = (point - step.center).dot(&step.normal);
            assert_relative_eq!(offset, step.height, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_twisted_cell_by_sixty_degrees_is_upright() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(1.0, 3.0f32.sqrt(), 0.0);
        let step = Subdivision::new(&a, &b, &c);
        let twisted = step.twisted(std::f32::consts::FRAC_PI_3);

        // The inverted midpoint triangle spun by 60° lines up with the
        // parent's orientation: its top vertex sits above the centroid.
        let top = twisted
            .iter()
            .fold(f32::NEG_INFINITY, |best, p| best.max(p.y));
        assert_relative_eq!(top - step.center.y, 2.0 / 3.0 * 3.0f32.sqrt() / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_depth_zero_emits_input() {
        let faces = BaseFace::regular_tetrahedron();
        let gen = generator(0);
        for kind in [FractalKind::Tetrahedral, FractalKind::Sierpinski] {
            let mut mesh = Mesh::new();
            let [a, b, c] = faces[3].triangle;
            gen.generate(kind, &a, &b, &c, 0, &mut mesh);
            assert_eq!(mesh.triangle_count(), 1);
            let positions: Vec<_> = mesh.vertices().iter().map(|v| v.position).collect();
            assert_eq!(positions, vec![a, b, c]);
        }
    }

    #[test]
    fn test_inverse_depth_zero_emits_midpoint_and_twin() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[3].triangle;
        let gen = generator(0);
        let mut mesh = Mesh::new();
        gen.inverse_sierpinski(&a, &b, &c, 0, &mut mesh);

        let step = Subdivision::new(&a, &b, &c);
        let mut expected = step.midpoint_triangle().to_vec();
        expected.extend(step.twisted(std::f32::consts::FRAC_PI_3));
        let positions: Vec<_> = mesh.vertices().iter().map(|v| v.position).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_inverse_never_repeats_a_triangle() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[0].triangle;
        for max_depth in 0..4 {
            let mut mesh = Mesh::new();
            generator(max_depth).inverse_sierpinski(&a, &b, &c, 0, &mut mesh);

            let triangles: Vec<[Point3<f32>; 3]> = mesh
                .triangles()
                .map(|t| t.vertices.map(|v| v.position))
                .collect();
            for (i, first) in triangles.iter().enumerate() {
                for second in &triangles[i + 1..] {
                    assert_ne!(first, second, "repeated triangle at depth {max_depth}");
                }
            }
        }
    }

    #[test]
    fn test_starting_past_bound_emits_once() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[0].triangle;
        let mut mesh = Mesh::new();
        generator(2).tetrahedral(&a, &b, &c, 5, &mut mesh);
        assert_eq!(mesh.triangle_count(), 1);

        let mut mesh = Mesh::new();
        generator(2).inverse_sierpinski(&a, &b, &c, 5, &mut mesh);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_per_face_counts_match_recurrence() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[0].triangle;
        for max_depth in 0..4 {
            let gen = generator(max_depth);
            for kind in [
                FractalKind::Tetrahedral,
                FractalKind::Sierpinski,
                FractalKind::InverseSierpinski,
            ] {
                let mut mesh = Mesh::new();
                gen.generate(kind, &a, &b, &c, 0, &mut mesh);
                assert_eq!(
                    mesh.triangle_count(),
                    kind.triangles_per_face(max_depth),
                    "{kind} at depth {max_depth}"
                );
            }
        }
    }

    #[test]
    fn test_inverse_emits_midpoint_triangle_first() {
        let [a, b, c] = BaseFace::regular_tetrahedron()[0].triangle;
        let mut mesh = Mesh::new();
        generator(1).inverse_sierpinski(&a, &b, &c, 0, &mut mesh);

        let first: Vec<_> = mesh.vertices()[..3].iter().map(|v| v.position).collect();
        assert_eq!(first, vec![midpoint(&a, &b), midpoint(&b, &c), midpoint(&c, &a)]);
    }

    #[test]
    fn test_degenerate_triangle_is_total() {
        let p = Point3::new(0.25, 0.25, 0.25);
        let gen = generator(2);
        let mut mesh = Mesh::new();
        gen.sierpinski(&p, &p, &p, 0, &mut mesh);
        gen.tetrahedral(&p, &p, &p, 0, &mut mesh);
        assert_eq!(mesh.triangle_count(), 16 + 36);
        assert!(mesh.to_buffer().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_generate_rejects_invalid_params() {
        let params = FractalParams::default().with_max_triangles(3);
        assert!(generate(&params).is_err());
    }
}
