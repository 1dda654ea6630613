//! Fixed-constant binarization
//!
//! The default cutoff lives in [`DetectorConfig::edge_threshold`]; it is a
//! calibrated domain constant for coin photographs, not a value derived
//! from the image.
//!
//! [`DetectorConfig::edge_threshold`]: crate::config::DetectorConfig::edge_threshold

use crate::models::PixelBuffer;

/// Mask value for foreground pixels
pub const FOREGROUND: u8 = 255;
/// Mask value for background pixels
pub const BACKGROUND: u8 = 0;

/// Binarize a smoothed gradient map: values at or above `threshold`
/// become 255, everything else 0
pub fn binarize(input: &PixelBuffer<f64>, threshold: f64) -> PixelBuffer<u8> {
    let mut out = PixelBuffer::new(input.width(), input.height());
    for (i, &value) in input.as_slice().iter().enumerate() {
        if value >= threshold {
            out.as_mut_slice()[i] = FOREGROUND;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarize_cutoff_is_inclusive() {
        let data = vec![25.9, 26.0, 26.1, 0.0, 300.0, -4.0];
        let buf = PixelBuffer::from_raw(3, 2, data).unwrap();
        let mask = binarize(&buf, 26.0);

        assert_eq!(mask.as_slice(), &[0, 255, 255, 0, 255, 0]);
    }

    #[test]
    fn test_mask_is_binary() {
        let data: Vec<f64> = (0..100).map(|i| i as f64 * 0.7).collect();
        let buf = PixelBuffer::from_raw(10, 10, data).unwrap();
        let mask = binarize(&buf, 26.0);
        assert!(mask.as_slice().iter().all(|&v| v == 0 || v == 255));
    }
}
