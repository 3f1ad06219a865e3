//! imbuf - image buffer transform CLI
//!
//! Applies affine transforms, builds mipmap chains and inspects PNG files
//! using the imbuf engine.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use imbuf_math::Vec2;
use imbuf_transform::{Filter, TransformMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod io;

#[derive(Parser)]
#[command(name = "imbuf")]
#[command(author, version, about = "Image buffer transform tool")]
#[command(long_about = "
Resamples PNG images through the imbuf transform engine.

Examples:
  imbuf info image.png
  imbuf transform in.png -o out.png --rotate 30 --filter bilinear
  imbuf transform in.png -o out.png --scale 0.5 --size 128x128
  imbuf transform in.png -o tiled.png --mode wrap-repeat --size 1024x1024
  imbuf transform in.png -o crop.png --mode crop-source --crop 0,0,64,64
  imbuf mipmap in.png -o levels/in
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply an affine transform
    #[command(visible_alias = "t")]
    Transform(TransformArgs),

    /// Build a mipmap chain and write every level
    #[command(visible_alias = "mip")]
    Mipmap(MipmapArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct TransformArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Mode: regular, crop-source, wrap-repeat
    #[arg(short, long, default_value = "regular")]
    mode: TransformMode,

    /// Filter: nearest, bilinear
    #[arg(short, long, default_value = "nearest")]
    filter: Filter,

    /// Translation in output pixels "X,Y"
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    translate: Option<Vec2>,

    /// Rotation in degrees (clockwise on screen)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    rotate: f32,

    /// Scale "S" or "SX,SY"
    #[arg(short, long, value_parser = parse_scale, allow_hyphen_values = true)]
    scale: Option<Vec2>,

    /// Pivot in input pixels "X,Y" (default: image center)
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    pivot: Option<Vec2>,

    /// Source crop rectangle "XMIN,YMIN,XMAX,YMAX" (crop-source mode)
    #[arg(long, value_parser = parse_crop, allow_hyphen_values = true)]
    crop: Option<imbuf_core::CropRect>,

    /// Output size "WxH" (default: input size)
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Run the float pipeline instead of the byte pipeline
    #[arg(long)]
    float: bool,
}

#[derive(Args)]
struct MipmapArgs {
    /// Input image
    input: PathBuf,

    /// Output prefix; level N is written to PREFIX_N.png
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum number of levels (including full resolution)
    #[arg(short, long)]
    levels: Option<usize>,
}

fn parse_floats(s: &str) -> Result<Vec<f32>, String> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<f32>()
                .map_err(|_| format!("invalid number '{}'", p.trim()))
        })
        .collect()
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    match parse_floats(s)?.as_slice() {
        [x, y] => Ok(Vec2::new(*x, *y)),
        _ => Err(format!("expected X,Y, got '{}'", s)),
    }
}

fn parse_scale(s: &str) -> Result<Vec2, String> {
    match parse_floats(s)?.as_slice() {
        [v] => Ok(Vec2::splat(*v)),
        [x, y] => Ok(Vec2::new(*x, *y)),
        _ => Err(format!("expected S or SX,SY, got '{}'", s)),
    }
}

fn parse_crop(s: &str) -> Result<imbuf_core::CropRect, String> {
    match parse_floats(s)?.as_slice() {
        [xmin, ymin, xmax, ymax] => Ok(imbuf_core::CropRect::new(*xmin, *xmax, *ymin, *ymax)),
        _ => Err(format!("expected XMIN,YMIN,XMAX,YMAX, got '{}'", s)),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be positive, got '{}'", s));
    }
    Ok((w, h))
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Transform(args) => commands::transform::run(args, cli.verbose),
        Commands::Mipmap(args) => commands::mipmap::run(args, cli.verbose),
    }
}
