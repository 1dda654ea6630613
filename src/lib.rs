//! CoinScan - coin detection library
//!
//! A pure Rust library that locates coin-like blobs in a photograph and
//! reports axis-aligned bounding boxes around them. One fixed-order
//! pipeline does all the work: grayscale conversion, percentile contrast
//! stretching, Scharr edge extraction, repeated box-mean smoothing,
//! fixed-threshold binarization, a morphological closing, and seeded
//! flood-fill component extraction. The pipeline is calibrated for coin
//! photographs on a plain background; it does no classification, circle
//! fitting, or sub-pixel work.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Named tuning constants for one detection run
pub mod config;
mod debug;
/// Blob isolation: morphology and component extraction
pub mod detector;
/// Typed errors surfaced by the entry points
pub mod error;
/// Pure filter stages (grayscale, contrast, gradient, smoothing, threshold)
pub mod filters;
/// Core data structures (PixelBuffer, BoundingBox)
pub mod models;
mod pipeline;
/// Helpers for the CLI, benches, and diagnostics (codec, stats, overlay)
pub mod tools;

pub use config::{ContrastFallback, DetectorConfig};
pub use error::DetectError;
pub use models::{BoundingBox, PixelBuffer};
pub use pipeline::DetectionTelemetry;

fn validate_dimensions(width: usize, height: usize) -> Result<(), DetectError> {
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyImage { width, height });
    }
    Ok(())
}

fn plane_from_slice(
    channel: &'static str,
    width: usize,
    height: usize,
    data: &[u8],
) -> Result<PixelBuffer<u8>, DetectError> {
    PixelBuffer::from_raw(width, height, data.to_vec()).ok_or(DetectError::ChannelSizeMismatch {
        channel,
        expected: width * height,
        actual: data.len(),
    })
}

/// Detect coins in an RGB image
///
/// # Arguments
/// * `image` - Raw RGB bytes (3 bytes per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Bounding boxes (inclusive pixel coordinates, x = column, y = row) in
/// seed-discovery order
pub fn detect(image: &[u8], width: usize, height: usize) -> Result<Vec<BoundingBox>, DetectError> {
    Detector::new().detect(image, width, height)
}

/// Detect coins from three separate channel planes
///
/// Each plane is a row-major `width * height` slice of 8-bit intensities.
/// All three must match the stated dimensions exactly; any mismatch fails
/// before the first pipeline stage runs.
pub fn detect_channels(
    width: usize,
    height: usize,
    red: &[u8],
    green: &[u8],
    blue: &[u8],
) -> Result<Vec<BoundingBox>, DetectError> {
    Detector::new().detect_channels(width, height, red, green, blue)
}

/// Detector with configuration options
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Create a detector with the calibrated default configuration
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with a specific configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The configuration this detector runs with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect coins in an interleaved RGB image
    pub fn detect(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<BoundingBox>, DetectError> {
        let (boxes, _telemetry) = self.run_interleaved(image, width, height)?;
        Ok(boxes)
    }

    /// Detect coins from three separate channel planes
    pub fn detect_channels(
        &self,
        width: usize,
        height: usize,
        red: &[u8],
        green: &[u8],
        blue: &[u8],
    ) -> Result<Vec<BoundingBox>, DetectError> {
        let (boxes, _telemetry) =
            self.detect_channels_with_telemetry(width, height, red, green, blue)?;
        Ok(boxes)
    }

    /// Like [`detect_channels`](Self::detect_channels) but also collects
    /// stage-level telemetry counters
    pub fn detect_channels_with_telemetry(
        &self,
        width: usize,
        height: usize,
        red: &[u8],
        green: &[u8],
        blue: &[u8],
    ) -> Result<(Vec<BoundingBox>, DetectionTelemetry), DetectError> {
        validate_dimensions(width, height)?;
        let red = plane_from_slice("red", width, height, red)?;
        let green = plane_from_slice("green", width, height, green)?;
        let blue = plane_from_slice("blue", width, height, blue)?;
        pipeline::run(&self.config, &red, &green, &blue)
    }

    /// Like [`detect`](Self::detect) but also collects stage-level
    /// telemetry counters
    pub fn detect_with_telemetry(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(Vec<BoundingBox>, DetectionTelemetry), DetectError> {
        self.run_interleaved(image, width, height)
    }

    fn run_interleaved(
        &self,
        image: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(Vec<BoundingBox>, DetectionTelemetry), DetectError> {
        validate_dimensions(width, height)?;
        let pixel_count = width * height;
        if image.len() != pixel_count * 3 {
            return Err(DetectError::ChannelSizeMismatch {
                channel: "rgb",
                expected: pixel_count * 3,
                actual: image.len(),
            });
        }

        let mut red = Vec::with_capacity(pixel_count);
        let mut green = Vec::with_capacity(pixel_count);
        let mut blue = Vec::with_capacity(pixel_count);
        for pixel in image.chunks_exact(3) {
            red.push(pixel[0]);
            green.push(pixel[1]);
            blue.push(pixel[2]);
        }

        let red = PixelBuffer::from_raw(width, height, red).expect("deinterleaved plane size");
        let green = PixelBuffer::from_raw(width, height, green).expect("deinterleaved plane size");
        let blue = PixelBuffer::from_raw(width, height, blue).expect("deinterleaved plane size");
        pipeline::run(&self.config, &red, &green, &blue)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
