use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;
use warpbench_core::encode::DEFAULT_QUALITY;
use warpbench_core::pipeline::{self, BenchConfig, DEFAULT_ANGLE, DEFAULT_OUTPUT};
use warpbench_core::WarpMode;

mod logger;

/// Exit status for every failure, the `-1` of a C-style `main`.
const EXIT_FAILURE: u8 = 255;

/// Time BGR to YUV420 conversion and a rotated warpPerspective on one image.
#[derive(Parser, Debug)]
#[command(name = "warpbench", version)]
#[command(about = "Time YUV420 conversion and warpPerspective on a single image")]
struct Args {
    /// Image to load (any format the decoder recognises)
    image_path: PathBuf,

    /// Warp path selector: 0 for standard, nonzero for NEON
    #[arg(allow_negative_numbers = true)]
    use_neon: i64,

    /// Where to write the warped frame as JPEG
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Rotation angle in degrees (positive = counter-clockwise)
    #[arg(long, default_value_t = DEFAULT_ANGLE, allow_negative_numbers = true)]
    angle: f64,

    /// JPEG quality
    #[arg(short, long, default_value_t = DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here
            return if e.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logger::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: Args) -> Result<()> {
    ensure!(args.angle.is_finite(), "angle must be a finite number, got {}", args.angle);

    let config = BenchConfig::new(args.image_path, WarpMode::from_flag(args.use_neon))
        .with_output(args.output)
        .with_angle(args.angle)
        .with_quality(args.quality);

    info!(mode = %config.mode, angle = config.angle_degrees, "starting warpbench");

    let report = pipeline::run(&config)
        .with_context(|| format!("benchmark failed for {}", config.input.display()))?;
    report.print().context("failed to print report")?;

    Ok(())
}
