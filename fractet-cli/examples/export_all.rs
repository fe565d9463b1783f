/// Example: Write every fractal kind as a colored binary STL
///
/// Usage: cargo run --example export_all -- [output-dir] [depth]

use anyhow::{Context, Result};
use fractet_cli::export::write_binary_stl;
use fractet_core::{generate, FractalKind, FractalParams};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let dir = PathBuf::from(args.get(1).map(String::as_str).unwrap_or("."));
    let depth: u32 = match args.get(2) {
        Some(value) => value.parse().context("depth must be a non-negative integer")?,
        None => 3,
    };

    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for kind in [
        FractalKind::Tetrahedral,
        FractalKind::Sierpinski,
        FractalKind::InverseSierpinski,
    ] {
        let result = generate(&FractalParams::new().with_kind(kind).with_max_depth(depth))?;
        let path = dir.join(format!("{}-{}.stl", kind, depth));
        fs::write(&path, write_binary_stl(&result.mesh)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{}: {} triangles -> {}", kind, result.triangle_count, path.display());
    }

    Ok(())
}
