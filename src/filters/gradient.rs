//! Scharr-style edge extraction
//!
//! Convolves the 3x3 derivative pair with weights {3, 10, 3} normalized
//! by 32 and combines the two responses into a magnitude map. Only
//! interior pixels are computed; the 1-pixel border stays 0 from
//! initialization. Everything downstream of this stage works on `f64`
//! buffers until binarization, so no precision is lost to intermediate
//! truncation.

use crate::models::PixelBuffer;

/// Normalizer of the {3, 10, 3} derivative stencil
const SCHARR_NORM: f64 = 32.0;

#[inline]
fn horizontal_at(gray: &PixelBuffer<u8>, x: usize, y: usize) -> f64 {
    (3.0 * gray.get(x - 1, y - 1) as f64
        + 10.0 * gray.get(x - 1, y) as f64
        + 3.0 * gray.get(x - 1, y + 1) as f64
        - 3.0 * gray.get(x + 1, y - 1) as f64
        - 10.0 * gray.get(x + 1, y) as f64
        - 3.0 * gray.get(x + 1, y + 1) as f64)
        / SCHARR_NORM
}

#[inline]
fn vertical_at(gray: &PixelBuffer<u8>, x: usize, y: usize) -> f64 {
    (3.0 * gray.get(x - 1, y - 1) as f64
        + 10.0 * gray.get(x, y - 1) as f64
        + 3.0 * gray.get(x + 1, y - 1) as f64
        - 3.0 * gray.get(x - 1, y + 1) as f64
        - 10.0 * gray.get(x, y + 1) as f64
        - 3.0 * gray.get(x + 1, y + 1) as f64)
        / SCHARR_NORM
}

/// Horizontal (x-direction) derivative over interior pixels
pub fn horizontal_scharr(gray: &PixelBuffer<u8>) -> PixelBuffer<f64> {
    let mut out = PixelBuffer::new(gray.width(), gray.height());
    if gray.width() < 3 || gray.height() < 3 {
        return out;
    }
    for y in 1..gray.height() - 1 {
        for x in 1..gray.width() - 1 {
            out.set(x, y, horizontal_at(gray, x, y));
        }
    }
    out
}

/// Vertical (y-direction) derivative over interior pixels
pub fn vertical_scharr(gray: &PixelBuffer<u8>) -> PixelBuffer<f64> {
    let mut out = PixelBuffer::new(gray.width(), gray.height());
    if gray.width() < 3 || gray.height() < 3 {
        return out;
    }
    for y in 1..gray.height() - 1 {
        for x in 1..gray.width() - 1 {
            out.set(x, y, vertical_at(gray, x, y));
        }
    }
    out
}

/// Gradient magnitude |horizontal| + |vertical| per interior pixel
pub fn gradient_magnitude(gray: &PixelBuffer<u8>) -> PixelBuffer<f64> {
    let mut out = PixelBuffer::new(gray.width(), gray.height());
    if gray.width() < 3 || gray.height() < 3 {
        return out;
    }
    for y in 1..gray.height() - 1 {
        for x in 1..gray.width() - 1 {
            let mag = horizontal_at(gray, x, y).abs() + vertical_at(gray, x, y).abs();
            out.set(x, y, mag);
        }
    }
    out
}
