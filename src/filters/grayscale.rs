//! Convert separate R/G/B planes to grayscale
//! Y = floor(0.3*R + 0.6*G + 0.1*B)
//!
//! The weights favor green the way human luminance perception does; the
//! result is truncated toward zero, not rounded, so Y = 200 exactly when
//! R = G = B = 200.

use rayon::prelude::*;

use crate::error::DetectError;
use crate::models::PixelBuffer;

/// Luminance weight of the red channel
const WEIGHT_R: f64 = 0.3;
/// Luminance weight of the green channel
const WEIGHT_G: f64 = 0.6;
/// Luminance weight of the blue channel
const WEIGHT_B: f64 = 0.1;

fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (WEIGHT_R * r as f64 + WEIGHT_G * g as f64 + WEIGHT_B * b as f64) as u8
}

fn check_dimensions(
    red: &PixelBuffer<u8>,
    green: &PixelBuffer<u8>,
    blue: &PixelBuffer<u8>,
) -> Result<(), DetectError> {
    let expected = red.width() * red.height();
    for (channel, buf) in [("green", green), ("blue", blue)] {
        if buf.width() != red.width() || buf.height() != red.height() {
            return Err(DetectError::ChannelSizeMismatch {
                channel,
                expected,
                actual: buf.width() * buf.height(),
            });
        }
    }
    Ok(())
}

/// Convert three equal-dimension channel planes to a grayscale buffer
pub fn channels_to_grayscale(
    red: &PixelBuffer<u8>,
    green: &PixelBuffer<u8>,
    blue: &PixelBuffer<u8>,
) -> Result<PixelBuffer<u8>, DetectError> {
    check_dimensions(red, green, blue)?;

    let mut gray = PixelBuffer::new(red.width(), red.height());
    let (r, g, b) = (red.as_slice(), green.as_slice(), blue.as_slice());
    for (i, out) in gray.as_mut_slice().iter_mut().enumerate() {
        *out = luminance(r[i], g[i], b[i]);
    }
    Ok(gray)
}

/// Row-parallel variant of [`channels_to_grayscale`] with identical output
pub fn channels_to_grayscale_parallel(
    red: &PixelBuffer<u8>,
    green: &PixelBuffer<u8>,
    blue: &PixelBuffer<u8>,
) -> Result<PixelBuffer<u8>, DetectError> {
    check_dimensions(red, green, blue)?;

    let width = red.width();
    let mut gray = PixelBuffer::new(width, red.height());
    let (r, g, b) = (red.as_slice(), green.as_slice(), blue.as_slice());
    gray.as_mut_slice()
        .par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * width;
            for (x, out) in row.iter_mut().enumerate() {
                let idx = row_start + x;
                *out = luminance(r[idx], g[idx], b[idx]);
            }
        });
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, value: u8) -> PixelBuffer<u8> {
        PixelBuffer::from_raw(width, height, vec![value; width * height]).unwrap()
    }

    #[test]
    fn test_equal_channels_pass_through() {
        // 0.3 + 0.6 + 0.1 weights must reproduce a neutral gray exactly
        let gray =
            channels_to_grayscale(&solid(4, 4, 200), &solid(4, 4, 200), &solid(4, 4, 200))
                .unwrap();
        assert!(gray.as_slice().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_truncates_toward_zero() {
        let gray = channels_to_grayscale(&solid(1, 1, 255), &solid(1, 1, 0), &solid(1, 1, 0))
            .unwrap();
        assert_eq!(gray.get(0, 0), 76); // floor(0.3 * 255) = floor(76.5)

        let gray = channels_to_grayscale(&solid(1, 1, 0), &solid(1, 1, 0), &solid(1, 1, 255))
            .unwrap();
        assert_eq!(gray.get(0, 0), 25); // floor(0.1 * 255) = floor(25.5)
    }

    #[test]
    fn test_output_in_range() {
        let gray =
            channels_to_grayscale(&solid(3, 3, 255), &solid(3, 3, 255), &solid(3, 3, 255))
                .unwrap();
        assert!(gray.as_slice().iter().all(|&v| v == 255));

        let gray = channels_to_grayscale(&solid(3, 3, 0), &solid(3, 3, 0), &solid(3, 3, 0))
            .unwrap();
        assert!(gray.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = channels_to_grayscale(&solid(4, 4, 0), &solid(4, 3, 0), &solid(4, 4, 0))
            .unwrap_err();
        assert_eq!(
            err,
            DetectError::ChannelSizeMismatch {
                channel: "green",
                expected: 16,
                actual: 12,
            }
        );
    }

    #[test]
    fn test_parallel_matches_serial() {
        let width = 31;
        let height = 17;
        let ramp: Vec<u8> = (0..width * height).map(|i| (i % 256) as u8).collect();
        let r = PixelBuffer::from_raw(width, height, ramp.clone()).unwrap();
        let g = PixelBuffer::from_raw(width, height, ramp.iter().rev().copied().collect())
            .unwrap();
        let b = solid(width, height, 40);

        let serial = channels_to_grayscale(&r, &g, &b).unwrap();
        let parallel = channels_to_grayscale_parallel(&r, &g, &b).unwrap();
        assert_eq!(serial, parallel);
    }
}
