/// Vector helpers used by the fractal generators
use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Cross product of two vectors
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Displacement from `a` to `b` (b - a)
pub fn displacement(a: &Point3<f32>, b: &Point3<f32>) -> Vector3<f32> {
    b - a
}

/// Normalize a vector, mapping the zero vector to itself instead of NaN
pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
    let length = v.norm();
    if length == 0.0 {
        return Vector3::zeros();
    }
    v / length
}

/// Unit normal of the triangle a -> b -> c. The sign follows the winding order.
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let ab = displacement(a, b);
    let ac = displacement(a, c);
    normalize(&cross(&ab, &ac))
}

pub fn midpoint(a: &Point3<f32>, b: &Point3<f32>) -> Point3<f32> {
    Point3::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

/// Centroid of a triangle
pub fn centroid(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Point3<f32> {
    Point3::new(
        (a.x + b.x + c.x) / 3.0,
        (a.y + b.y + c.y) / 3.0,
        (a.z + b.z + c.z) / 3.0,
    )
}

/// Rotate `point` by `angle` radians around `axis` passing through `center`.
///
/// The axis does not need to be normalized. A zero axis leaves the point
/// where it is.
pub fn rotate_around_axis(
    point: &Point3<f32>,
    center: &Point3<f32>,
    axis: &Vector3<f32>,
    angle: f32,
) -> Point3<f32> {
    let axis = normalize(axis);
    if axis == Vector3::zeros() {
        return *point;
    }

    let rotation = Rotation3::from_axis_angle(&Unit::new_unchecked(axis), angle);
    let local = displacement(center, point);
    center + rotation * local
}
