/// Plain-text mesh report printed after `generate`
use fractet_core::{Color, Mesh};
use std::io::{self, Write};

/// Human name for the default palette, or the raw channels otherwise
fn color_label(color: Color) -> String {
    const NAMED: &[(Color, &str)] = &[
        (Color::RED, "red"),
        (Color::GREEN, "green"),
        (Color::BLUE, "blue"),
        (Color::YELLOW, "yellow"),
        (Color::WHITE, "white"),
    ];

    match NAMED.iter().find(|(named, _)| *named == color) {
        Some((_, name)) => name.to_string(),
        None => format!("rgb({:.3}, {:.3}, {:.3})", color.r, color.g, color.b),
    }
}

pub fn write_summary<W: Write>(writer: &mut W, title: &str, mesh: &Mesh) -> io::Result<()> {
    writeln!(writer, "{}", title)?;
    writeln!(writer, "  triangles: {}", mesh.triangle_count())?;
    writeln!(writer, "  vertices:  {}", mesh.vertex_count())?;

    if let Some((min, max)) = mesh.bounds() {
        writeln!(
            writer,
            "  bounds:    ({:.4}, {:.4}, {:.4}) .. ({:.4}, {:.4}, {:.4})",
            min.x, min.y, min.z, max.x, max.y, max.z
        )?;
    }

    for (color, count) in mesh.color_histogram() {
        writeln!(writer, "  {:<24} {}", color_label(color), count)?;
    }
    Ok(())
}
