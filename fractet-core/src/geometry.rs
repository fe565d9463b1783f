/// Mesh primitives produced by the fractal generators
use nalgebra::{Point3, Vector3};

use crate::classify::FaceClassifier;
use crate::vector::face_normal;

/// Floats per vertex in the flat buffer: position then color
pub const FLOATS_PER_VERTEX: usize = 6;

/// Floats per emitted triangle in the flat buffer
pub const FLOATS_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX;

/// Linear RGB color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// A mesh vertex with position and flat color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Point3<f32>, color: Color) -> Self {
        Self { position, color }
    }
}

/// A triangle read back from a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = &self.vertices;
        face_normal(&v0.position, &v1.position, &v2.position)
    }

    /// Color of the first vertex; emitted triangles are flat shaded
    pub fn color(&self) -> Color {
        self.vertices[0].color
    }
}

/// Append-only triangle soup. Every run of three vertices is one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Reserve room for `triangles` triangles
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles.saturating_mul(3)),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.vertices.extend_from_slice(&triangle.vertices);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|run| Triangle::new(run[0], run[1], run[2]))
    }

    /// Interleaved `x y z r g b` floats for a non-indexed triangle list
    pub fn to_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.vertices.len() * FLOATS_PER_VERTEX);
        for vertex in &self.vertices {
            buffer.extend_from_slice(&[vertex.position.x, vertex.position.y, vertex.position.z]);
            buffer.extend_from_slice(&vertex.color.to_array());
        }
        buffer
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = self.vertices.first()?.position;
        let bounds = self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.inf(&v.position), max.sup(&v.position))
        });
        Some(bounds)
    }

    /// Triangle count per color, in the order colors first appear
    pub fn color_histogram(&self) -> Vec<(Color, usize)> {
        let mut histogram: Vec<(Color, usize)> = Vec::new();
        for triangle in self.triangles() {
            let color = triangle.color();
            match histogram.iter_mut().find(|(c, _)| *c == color) {
                Some((_, count)) => *count += 1,
                None => histogram.push((color, 1)),
            }
        }
        histogram
    }
}

/// Classify the triangle a -> b -> c and append its three vertices.
pub fn emit_triangle(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
    classifier: &FaceClassifier,
    out: &mut Mesh,
) {
    let color = classifier.classify(&face_normal(a, b, c));
    out.add_triangle(Triangle::new(
        Vertex::new(*a, color),
        Vertex::new(*b, color),
        Vertex::new(*c, color),
    ));
}
