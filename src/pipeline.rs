use crate::config::DetectorConfig;
use crate::detector::{components, morphology};
use crate::error::DetectError;
use crate::filters::{contrast, gradient, grayscale, smoothing, threshold};
use crate::models::{BoundingBox, PixelBuffer};

/// Stage-level counters collected alongside a detection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionTelemetry {
    /// Low contrast-clip boundary chosen for this image
    pub contrast_low: u8,
    /// High contrast-clip boundary chosen for this image
    pub contrast_high: u8,
    /// Foreground pixels right after binarization
    pub edge_pixels: usize,
    /// Foreground pixels after the morphological closing
    pub closed_pixels: usize,
    /// Connected components found by the seed scan
    pub components_found: usize,
}

fn count_foreground(mask: &PixelBuffer<u8>) -> usize {
    mask.as_slice()
        .iter()
        .filter(|&&v| v == threshold::FOREGROUND)
        .count()
}

/// Run the fixed-order pipeline over three channel planes
///
/// The planes must already share dimensions greater than zero; the
/// grayscale stage re-checks and fails on any mismatch before further
/// processing.
pub(crate) fn run(
    config: &DetectorConfig,
    red: &PixelBuffer<u8>,
    green: &PixelBuffer<u8>,
    blue: &PixelBuffer<u8>,
) -> Result<(Vec<BoundingBox>, DetectionTelemetry), DetectError> {
    let mut telemetry = DetectionTelemetry::default();

    // Step 1: Reduce the three channels to luminance
    let gray = if config.parallel {
        grayscale::channels_to_grayscale_parallel(red, green, blue)?
    } else {
        grayscale::channels_to_grayscale(red, green, blue)?
    };

    // Step 2: Stretch contrast so the fixed edge threshold applies
    let (low, high) = contrast::contrast_boundaries(&gray, config.clip_low, config.clip_high);
    telemetry.contrast_low = low;
    telemetry.contrast_high = high;
    let stretched =
        contrast::stretch_contrast(&gray, config.clip_low, config.clip_high, config.contrast_fallback)?;

    // Step 3: Edge magnitude, then smear it into wide ridges
    let magnitude = gradient::gradient_magnitude(&stretched);
    let smoothed = smoothing::mean_filter_passes(&magnitude, config.smoothing_passes, config.parallel);

    // Step 4: Binarize and close
    let mask = threshold::binarize(&smoothed, config.edge_threshold);
    telemetry.edge_pixels = count_foreground(&mask);
    let closed = morphology::close(&mask, config.morphology_passes);
    telemetry.closed_pixels = count_foreground(&closed);

    // Step 5: Flood-fill the seed lattice into bounding boxes
    let (boxes, _cleared) = components::extract_components(closed, config.seed_stride);
    telemetry.components_found = boxes.len();

    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!(
            "PIPELINE: contrast [{}..{}], {} edge px, {} closed px, {} components",
            telemetry.contrast_low,
            telemetry.contrast_high,
            telemetry.edge_pixels,
            telemetry.closed_pixels,
            telemetry.components_found
        );
        for (i, b) in boxes.iter().enumerate() {
            eprintln!(
                "PIPELINE: box {}: x {}..{}, y {}..{} ({}x{})",
                i,
                b.min_x,
                b.max_x,
                b.min_y,
                b.max_y,
                b.width(),
                b.height()
            );
        }
    }

    Ok((boxes, telemetry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(width: usize, height: usize, value: u8) -> PixelBuffer<u8> {
        PixelBuffer::from_raw(width, height, vec![value; width * height]).unwrap()
    }

    #[test]
    fn test_flat_image_finds_nothing() {
        let config = DetectorConfig::default();
        let r = plane(64, 64, 180);
        let g = plane(64, 64, 180);
        let b = plane(64, 64, 180);

        let (boxes, telemetry) = run(&config, &r, &g, &b).unwrap();
        assert!(boxes.is_empty());
        assert_eq!(telemetry.edge_pixels, 0);
        assert_eq!(telemetry.closed_pixels, 0);
        assert_eq!(telemetry.components_found, 0);
    }

    #[test]
    fn test_mismatched_planes_abort() {
        let config = DetectorConfig::default();
        let r = plane(64, 64, 10);
        let g = plane(64, 63, 10);
        let b = plane(64, 64, 10);

        let err = run(&config, &r, &g, &b).unwrap_err();
        assert!(matches!(err, DetectError::ChannelSizeMismatch { .. }));
    }

    #[test]
    fn test_parallel_run_matches_serial() {
        let width = 48;
        let height = 40;
        let mut r = PixelBuffer::new(width, height);
        let mut g = PixelBuffer::new(width, height);
        let mut b = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let bright = if (x / 8 + y / 8) % 2 == 0 { 220 } else { 30 };
                r.set(x, y, bright);
                g.set(x, y, bright);
                b.set(x, y, bright / 2);
            }
        }

        let serial = run(&DetectorConfig::default(), &r, &g, &b).unwrap();
        let parallel = run(&DetectorConfig::parallel(), &r, &g, &b).unwrap();
        assert_eq!(serial, parallel);
    }
}
