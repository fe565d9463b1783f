/// Face-group classification by nearest reference normal
use nalgebra::{Point3, Vector3};

use crate::geometry::Color;
use crate::vector::face_normal;

/// One face of the base solid, with the color of its face group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseFace {
    pub triangle: [Point3<f32>; 3],
    pub color: Color,
}

impl BaseFace {
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, color: Color) -> Self {
        Self {
            triangle: [a, b, c],
            color,
        }
    }

    /// The four faces of a regular tetrahedron inscribed in the cube
    /// `[-0.5, 0.5]^3`, colored red, green, blue and yellow.
    pub fn regular_tetrahedron() -> [BaseFace; 4] {
        let p0 = Point3::new(0.5, 0.5, 0.5);
        let p1 = Point3::new(-0.5, -0.5, 0.5);
        let p2 = Point3::new(0.5, -0.5, -0.5);
        let p3 = Point3::new(-0.5, 0.5, -0.5);

        [
            BaseFace::new(p0, p1, p2, Color::RED),
            BaseFace::new(p0, p2, p3, Color::GREEN),
            BaseFace::new(p0, p3, p1, Color::BLUE),
            BaseFace::new(p1, p3, p2, Color::YELLOW),
        ]
    }

    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.triangle;
        face_normal(a, b, c)
    }
}

/// Reference orientation of a face group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFace {
    pub normal: Vector3<f32>,
    pub color: Color,
}

/// Assigns face-group colors to triangles by orientation.
///
/// A triangle belongs to the reference whose normal has the largest
/// absolute dot product with the triangle's normal, so winding flips and
/// floating-point drift from repeated subdivision do not change the group.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceClassifier {
    references: [ReferenceFace; 4],
}

impl FaceClassifier {
    pub fn new(faces: &[BaseFace; 4]) -> Self {
        let references = faces.map(|face| ReferenceFace {
            normal: face.normal(),
            color: face.color,
        });
        Self { references }
    }

    pub fn references(&self) -> &[ReferenceFace; 4] {
        &self.references
    }

    /// Index of the best matching reference. Ties go to the lowest index.
    pub fn classify_index(&self, normal: &Vector3<f32>) -> usize {
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (i, reference) in self.references.iter().enumerate() {
            let score = normal.dot(&reference.normal).abs();
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }

    pub fn classify(&self, normal: &Vector3<f32>) -> Color {
        self.references[self.classify_index(normal)].color
    }
}

impl Default for FaceClassifier {
    fn default() -> Self {
        Self::new(&BaseFace::regular_tetrahedron())
    }
}
