/// Mesh encoders: raw vertex buffer, binary STL and ASCII STL
use fractet_core::{Color, FractalError, FractalResult, Mesh};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Set in the attribute word when it carries a color
const COLOR_VALID: u16 = 1 << 15;

/// Pack a color into the 15-bit RGB attribute word
fn encode_color(color: Color) -> u16 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 31.0).round() as u16;
    COLOR_VALID | (channel(color.r) << 10) | (channel(color.g) << 5) | channel(color.b)
}

/// Binary STL stores the facet count as a `u32`
fn facet_count(count: usize) -> FractalResult<u32> {
    u32::try_from(count).map_err(|_| FractalError::MeshTooLarge {
        projected: count,
        max: u32::MAX as usize,
    })
}

/// Serialize a mesh as ASCII STL. Colors are not representable and are dropped.
pub fn write_ascii_stl(mesh: &Mesh, name: &str) -> String {
    let mut out = format!("solid {}\n", name);
    for triangle in mesh.triangles() {
        let n = triangle.calculate_normal();
        out.push_str(&format!("  facet normal {} {} {}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for vertex in &triangle.vertices {
            let p = vertex.position;
            out.push_str(&format!("      vertex {} {} {}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {}\n", name));
    out
}

/// Serialize a mesh as binary STL with per-facet colors in the attribute word
///
/// # Errors
///
/// Returns [`FractalError::MeshTooLarge`] if the mesh holds more facets than
/// the format's `u32` count can express.
pub fn write_binary_stl(mesh: &Mesh) -> FractalResult<Vec<u8>> {
    let count = mesh.triangle_count();
    let declared = facet_count(count)?;
    let mut data = Vec::with_capacity(HEADER_LEN + 4 + count * FACET_LEN);

    let mut header = [0u8; HEADER_LEN];
    let label = b"fractet binary STL";
    header[..label.len()].copy_from_slice(label);
    data.extend_from_slice(&header);
    data.extend_from_slice(&declared.to_le_bytes());

    for triangle in mesh.triangles() {
        let n = triangle.calculate_normal();
        for v in [n.x, n.y, n.z] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        for vertex in &triangle.vertices {
            let p = vertex.position;
            for v in [p.x, p.y, p.z] {
                data.extend_from_slice(&v.to_le_bytes());
            }
        }
        data.extend_from_slice(&encode_color(triangle.color()).to_le_bytes());
    }

    Ok(data)
}

/// The interleaved vertex buffer as little-endian `f32` bytes
pub fn write_vertex_buffer(mesh: &Mesh) -> Vec<u8> {
    mesh.to_buffer()
        .into_iter()
        .flat_map(f32::to_le_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractet_core::{emit_triangle, BaseFace, FaceClassifier};

    fn base_mesh() -> Mesh {
        let faces = BaseFace::regular_tetrahedron();
        let classifier = FaceClassifier::new(&faces);
        let mut mesh = Mesh::new();
        for face in &faces {
            let [a, b, c] = face.triangle;
            emit_triangle(&a, &b, &c, &classifier, &mut mesh);
        }
        mesh
    }

    fn read_f32(data: &[u8], at: usize) -> f32 {
        f32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    #[test]
    fn test_binary_layout() {
        let mesh = base_mesh();
        let data = write_binary_stl(&mesh).unwrap();
        assert_eq!(data.len(), 84 + 4 * 50);
        assert!(data.starts_with(b"fractet binary STL"));
        assert_eq!(u32::from_le_bytes([data[80], data[81], data[82], data[83]]), 4);

        // Facets follow in emission order: normal, three vertices, attribute
        for (i, triangle) in mesh.triangles().enumerate() {
            let facet = 84 + i * FACET_LEN;
            let n = triangle.calculate_normal();
            assert_eq!(read_f32(&data, facet), n.x);
            let first = triangle.vertices[0].position;
            assert_eq!(read_f32(&data, facet + 12), first.x);
            assert_eq!(read_f32(&data, facet + 16), first.y);
            assert_eq!(read_f32(&data, facet + 20), first.z);

            let attribute = u16::from_le_bytes([data[facet + 48], data[facet + 49]]);
            assert_eq!(attribute, encode_color(triangle.color()));
        }
    }

    #[test]
    fn test_empty_mesh_is_header_only() {
        let data = write_binary_stl(&Mesh::new()).unwrap();
        assert_eq!(data.len(), 84);
        assert_eq!(&data[80..84], &0u32.to_le_bytes());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_facet_count_overflow() {
        let count = u32::MAX as usize + 1;
        assert_eq!(
            facet_count(count),
            Err(FractalError::MeshTooLarge {
                projected: count,
                max: u32::MAX as usize,
            })
        );
        assert_eq!(facet_count(u32::MAX as usize), Ok(u32::MAX));
    }

    #[test]
    fn test_ascii_layout() {
        let mesh = base_mesh();
        let text = write_ascii_stl(&mesh, "tetrahedron");
        assert!(text.starts_with("solid tetrahedron\n"));
        assert!(text.trim_end().ends_with("endsolid tetrahedron"));
        assert_eq!(text.matches("facet normal").count(), 4);
        assert_eq!(text.matches("vertex ").count(), 12);
        assert!(text.contains("      vertex 0.5 0.5 0.5\n"));
    }

    #[test]
    fn test_color_attribute_encoding() {
        assert_eq!(encode_color(Color::RED), 0x8000 | (31 << 10));
        assert_eq!(encode_color(Color::GREEN), 0x8000 | (31 << 5));
        assert_eq!(encode_color(Color::YELLOW), 0x8000 | (31 << 10) | (31 << 5));
        assert_eq!(encode_color(Color::new(2.0, -1.0, 0.0)), 0x8000 | (31 << 10));
    }

    #[test]
    fn test_vertex_buffer_bytes() {
        let mesh = base_mesh();
        let bytes = write_vertex_buffer(&mesh);
        assert_eq!(bytes.len(), 72 * 4);
        assert_eq!(&bytes[0..4], &0.5f32.to_le_bytes());
        // First color channel of the first vertex: red
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
    }
}
