//! The benchmark run: load, convert, warp, write.
//!
//! Only the colour conversion and the warp are timed. The warp consumes the
//! I420 frame as one contiguous plane (see [`crate::color::YuvFrame::stacked`]) and renders
//! it at the original image size, so the output covers the luma rows and the
//! rotated corners may pick up chroma rows.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::color::bgr_to_i420;
use crate::decode::{load_bgr, BgrImage};
use crate::encode::{write_jpeg, DEFAULT_QUALITY};
use crate::error::Result;
use crate::plane::Plane;
use crate::timing::{time_stage, PipelineTimings, StageTiming, CONVERT_STAGE, WARP_STAGE};
use crate::transform::{warp_with_mode, MapDirection, TransformMatrix, WarpMode, WarpOptions};

/// File written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "output.jpg";
/// Rotation applied by the benchmark, in degrees.
pub const DEFAULT_ANGLE: f64 = 30.0;

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Image to load.
    pub input: PathBuf,
    /// JPEG file to write.
    pub output: PathBuf,
    /// Warp entry point.
    pub mode: WarpMode,
    /// Rotation angle in degrees (positive = counter-clockwise).
    pub angle_degrees: f64,
    /// Uniform scale applied with the rotation.
    pub scale: f64,
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Value written where the warp has no source data.
    pub border: u8,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            mode: WarpMode::Standard,
            angle_degrees: DEFAULT_ANGLE,
            scale: 1.0,
            quality: DEFAULT_QUALITY,
            border: 0,
        }
    }
}

impl BenchConfig {
    pub fn new(input: impl Into<PathBuf>, mode: WarpMode) -> Self {
        Self {
            input: input.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub mode: WarpMode,
    /// Decoded input `(width, height)`.
    pub input_size: (u32, u32),
    /// Written output `(width, height)`.
    pub output_size: (u32, u32),
    pub convert: StageTiming,
    pub warp: StageTiming,
    pub output: PathBuf,
}

impl BenchReport {
    /// Write the human-readable report lines.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.mode.description())?;
        writeln!(out, "Conversion to YUV420 Time: {} ms", self.convert.elapsed_ms())?;
        writeln!(out, "WarpPerspective Time: {} ms", self.warp.elapsed_ms())?;
        writeln!(out, "Output saved as {}", self.output.display())
    }

    /// Print the report to standard output.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)
    }
}

/// The benchmark's rotation for an image of the given size.
///
/// The centre uses integer halves of the dimensions.
pub fn rotation_for(width: u32, height: u32, angle_degrees: f64, scale: f64) -> TransformMatrix {
    let center = ((width / 2) as f64, (height / 2) as f64);
    TransformMatrix::rotation(center, angle_degrees, scale)
}

/// Run the timed stages on an already loaded image.
///
/// Returns the warped plane, which always has the image's dimensions, and
/// the conversion and warp timings in that order.
pub fn run_in_memory(image: &BgrImage, config: &BenchConfig) -> (Plane, PipelineTimings) {
    let mut timings = PipelineTimings::new();

    let (frame, convert) = time_stage(CONVERT_STAGE, || bgr_to_i420(image));
    debug!(elapsed_ms = convert.elapsed_ms(), "converted to I420");
    timings.push(convert);

    let matrix = rotation_for(image.width, image.height, config.angle_degrees, config.scale);
    let options = WarpOptions {
        map: MapDirection::Inverse,
        border: config.border,
    };
    let src = frame.stacked();
    let dst_size = (image.width, image.height);

    let (warped, warp) = time_stage(WARP_STAGE, || {
        warp_with_mode(config.mode, &src, &matrix, dst_size, &options)
    });
    debug!(mode = %config.mode, elapsed_ms = warp.elapsed_ms(), "warped frame");
    timings.push(warp);

    (warped, timings)
}

/// Load the input, run the timed stages and write the output.
///
/// # Errors
///
/// Returns `BenchError::Decode` if the input cannot be loaded and
/// `BenchError::Encode` if the output cannot be written. Nothing is written
/// when loading fails.
pub fn run(config: &BenchConfig) -> Result<BenchReport> {
    let image = load_bgr(&config.input)?;
    info!(
        path = %config.input.display(),
        width = image.width,
        height = image.height,
        "loaded image"
    );

    let (warped, timings) = run_in_memory(&image, config);
    write_output(&warped, &config.output, config.quality)?;

    let stage = |name: &str| {
        timings.stage(name).cloned().unwrap_or_else(|| StageTiming {
            name: name.to_string(),
            duration: Default::default(),
        })
    };

    Ok(BenchReport {
        mode: config.mode,
        input_size: (image.width, image.height),
        output_size: warped.dimensions(),
        convert: stage(CONVERT_STAGE),
        warp: stage(WARP_STAGE),
        output: config.output.clone(),
    })
}

fn write_output(plane: &Plane, path: &Path, quality: u8) -> Result<()> {
    write_jpeg(plane, path, quality)?;
    info!(path = %path.display(), width = plane.width, height = plane.height, "saved output");
    Ok(())
}
