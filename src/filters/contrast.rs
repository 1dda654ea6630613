//! Percentile-clip contrast stretching
//!
//! Builds a cumulative histogram over the 256 intensity bins, finds the
//! intensities enclosing the central 90% of pixel mass, and linearly
//! rescales that range onto [0, 255]. Washed-out coin photographs end up
//! using the full intensity range, which the fixed edge threshold
//! downstream depends on.

use crate::config::ContrastFallback;
use crate::error::DetectError;
use crate::models::PixelBuffer;

/// Cumulative histogram: entry `i` counts the pixels with intensity <= i
pub fn cumulative_histogram(input: &PixelBuffer<u8>) -> [usize; 256] {
    let mut histogram = [0usize; 256];
    for &value in input.as_slice() {
        histogram[value as usize] += 1;
    }

    let mut running = 0usize;
    for count in histogram.iter_mut() {
        running += *count;
        *count = running;
    }
    histogram
}

/// Find the (low, high) clip boundaries for the given CDF fractions
///
/// Low: smallest intensity whose cumulative count exceeds `clip_low` of
/// all pixels (default 0 when never exceeded). High: largest intensity
/// whose cumulative count stays under `clip_high` of all pixels (default
/// 255 when never under). High can land below low on near-uniform images;
/// only exact collapse (high == low) is degenerate.
pub fn contrast_boundaries(
    input: &PixelBuffer<u8>,
    clip_low: f64,
    clip_high: f64,
) -> (u8, u8) {
    let cdf = cumulative_histogram(input);
    let total = (input.width() * input.height()) as f64;

    let mut low = 0u8;
    for (intensity, &count) in cdf.iter().enumerate() {
        if count as f64 > clip_low * total {
            low = intensity as u8;
            break;
        }
    }

    let mut high = 255u8;
    for (intensity, &count) in cdf.iter().enumerate().rev() {
        if (count as f64) < clip_high * total {
            high = intensity as u8;
            break;
        }
    }

    (low, high)
}

/// Rescale intensities so the clip boundaries map onto [0, 255]
///
/// Values outside the boundaries clamp to 0 or 255; in-range values are
/// truncated to `u8` after scaling. When the boundaries collapse onto a
/// single intensity the `fallback` policy decides between returning the
/// input unchanged and surfacing the error.
pub fn stretch_contrast(
    input: &PixelBuffer<u8>,
    clip_low: f64,
    clip_high: f64,
    fallback: ContrastFallback,
) -> Result<PixelBuffer<u8>, DetectError> {
    let (low, high) = contrast_boundaries(input, clip_low, clip_high);
    if low == high {
        return match fallback {
            ContrastFallback::PassThrough => Ok(input.clone()),
            ContrastFallback::Fail => Err(DetectError::DegenerateContrast { boundary: low }),
        };
    }

    let scale = 255.0 / (high as f64 - low as f64);
    let mut out = PixelBuffer::new(input.width(), input.height());
    for (i, value) in input.as_slice().iter().enumerate() {
        let stretched = (scale * (*value as f64 - low as f64)).clamp(0.0, 255.0);
        out.as_mut_slice()[i] = stretched as u8;
    }
    Ok(out)
}
