/// Fractet - generate recursive fractal surfaces over a tetrahedron
///
/// Examples:
///   fractet generate --kind sierpinski --depth 4 -o sierpinski.stl
///   fractet generate --depth 3 --format raw -o koch.bin
///   fractet generate --kind inverse --format stl-ascii -o inverse.stl
use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    fractet_cli::run_from_args()
}
