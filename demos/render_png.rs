//! Example: Render a chained voronoi region map to a PNG
//!
//! ```text
//! RUST_LOG=info cargo run --release --example render_png -- --seed 42 --units 6,4,3 -o map.png
//! ```

use std::error::Error;
use std::time::Instant;

use chained_voronoi::*;
use clap::Parser;
use image::RgbImage;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "render_png")]
#[command(about = "Render a chained voronoi region map to a PNG file")]
struct Args {
    /// Width of the image in pixels
    #[arg(short = 'W', long, default_value = "512")]
    width: u32,

    /// Height of the image in pixels
    #[arg(short = 'H', long, default_value = "512")]
    height: u32,

    /// Seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Per-level cell-size exponents, first evaluated first
    #[arg(short, long, value_delimiter = ',', default_value = "6,4,3")]
    units: Vec<i32>,

    /// Pixel-space x of the image's first column
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_x: i32,

    /// Pixel-space y of the image's first row
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_y: i32,

    /// Hash with a reseeded ChaCha8 generator instead of the hash combine
    #[arg(long)]
    reseeded: bool,

    /// Output path
    #[arg(short, long, default_value = "chained_voronoi.png")]
    output: String,
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = GeneratorConfigBuilder::new().levels(args.units.iter().copied());
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;
    info!("seed {} units {:?}", config.seed, config.levels.units());

    let mut grid = ColorGrid::new(
        IVec2::new(args.origin_x, args.origin_y),
        args.width,
        args.height,
    );
    let rect = grid.extent();

    let start = Instant::now();
    if args.reseeded {
        ChainedVoronoi::with_hasher(config, ReseededRng).fill(rect, &mut grid)?;
    } else {
        ChainedVoronoi::new(config).fill(rect, &mut grid)?;
    }
    info!(
        "filled {}x{} in {:.2?}",
        args.width,
        args.height,
        start.elapsed()
    );

    let img = RgbImage::from_raw(args.width, args.height, grid.to_rgb8())
        .ok_or("pixel buffer does not match image size")?;
    img.save(&args.output)?;
    info!("wrote {}", args.output);

    Ok(())
}
