/// Command-line frontend: generate fractal meshes and write them to disk
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fractet_core::params::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TRIANGLES};
use fractet_core::{generate, FractalKind, FractalParams, Mesh};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod export;
pub mod summary;

pub use summary::write_summary;

/// Recursive fractal surfaces over a tetrahedron
#[derive(Parser, Debug)]
#[command(name = "fractet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a fractal mesh and write it to disk
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Surface to build
    #[arg(long, value_enum, default_value_t = KindArg::Tetrahedral)]
    pub kind: KindArg,

    /// Recursion bound (work grows exponentially)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: u32,

    /// Twist of the Sierpinski inner cell, in degrees
    #[arg(long, default_value_t = 60.0)]
    pub angle: f32,

    /// Refuse runs that would emit more triangles than this
    #[arg(long, default_value_t = DEFAULT_MAX_TRIANGLES)]
    pub max_triangles: usize,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Stl)]
    pub format: OutputFormat,

    /// Destination file
    #[arg(short, long)]
    pub output: PathBuf,
}

impl GenerateArgs {
    pub fn params(&self) -> FractalParams {
        FractalParams::new()
            .with_kind(self.kind.into())
            .with_max_depth(self.depth)
            .with_twist_degrees(self.angle)
            .with_max_triangles(self.max_triangles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Tetrahedral,
    Sierpinski,
    Inverse,
}

impl From<KindArg> for FractalKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tetrahedral => FractalKind::Tetrahedral,
            KindArg::Sierpinski => FractalKind::Sierpinski,
            KindArg::Inverse => FractalKind::InverseSierpinski,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Interleaved little-endian f32 `x y z r g b` per vertex
    Raw,
    /// Binary STL with face colors in the attribute word
    Stl,
    /// ASCII STL, no colors
    StlAscii,
}

/// Encode a mesh for `format`
pub fn encode(mesh: &Mesh, format: OutputFormat, name: &str) -> Result<Vec<u8>> {
    let data = match format {
        OutputFormat::Raw => export::write_vertex_buffer(mesh),
        OutputFormat::Stl => export::write_binary_stl(mesh).context("mesh does not fit in STL")?,
        OutputFormat::StlAscii => export::write_ascii_stl(mesh, name).into_bytes(),
    };
    Ok(data)
}

/// Execute a parsed command line, writing reports to `out`
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Generate(args) => {
            let result = generate(&args.params()).context("invalid generation parameters")?;
            info!(
                "Generated {} triangles ({} surface, depth {})",
                result.triangle_count, result.kind, result.max_depth
            );

            let data = encode(&result.mesh, args.format, result.kind.name())?;
            fs::write(&args.output, &data)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            info!("Wrote {} bytes to {}", data.len(), args.output.display());

            let title = format!("{} (depth {})", result.kind, result.max_depth);
            write_summary(out, &title, &result.mesh)?;
        }
    }
    Ok(())
}

/// Parse arguments and run against stdout
pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(cli, &mut handle)?;
    handle.flush()?;
    Ok(())
}
