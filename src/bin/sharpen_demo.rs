use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::info;
use ndarray::Array3;
use sharpen_rust::{load_config, ConfigError, PixelBuffer, SharpenConfig};

/// Sharpen a synthetic RGB image and report how long the filter takes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value_t = 300)]
    height: usize,

    /// JSON filter config (kernel, fallback, parallel)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process rows in parallel, overriding the config
    #[arg(short, long)]
    parallel: bool,

    #[arg(short = 'n', long, default_value_t = 1)]
    iterations: u32,
}

/// Diagonal RGB gradient with a bright square in the middle.
fn synthetic_image(width: usize, height: usize) -> PixelBuffer {
    let mut img = Array3::<u8>::zeros((height, width, 3));
    for ((y, x, c), v) in img.indexed_iter_mut() {
        let in_square = (height / 3..2 * height / 3).contains(&y)
            && (width / 3..2 * width / 3).contains(&x);
        *v = if in_square {
            230
        } else {
            ((x * 255 / width.max(1) + y * 255 / height.max(1) + c * 40) / 2 % 256) as u8
        };
    }
    img
}

fn run(args: Args) -> Result<(), ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SharpenConfig::default(),
    };
    config.parallel |= args.parallel;
    let engine = config.build_engine()?;

    let img = synthetic_image(args.width, args.height);
    let iterations = args.iterations.max(1);
    info!(
        "Sharpening {}x{} image {} time(s), parallel={}",
        args.width, args.height, iterations, config.parallel
    );

    let start = Instant::now();
    let mut result = engine.apply_u8(img.view())?;
    for _ in 1..iterations {
        result = engine.apply_u8(img.view())?;
    }
    let elapsed = start.elapsed();

    let checksum: u64 = result.iter().map(|&v| v as u64).sum();
    println!(
        "size={}x{} elapsed_ms={:.3} average_ms={:.3} checksum={}",
        args.width,
        args.height,
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / iterations as f64,
        checksum
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
