//! Binary morphology with a fixed 5x5 disc-like structuring element
//!
//! Out-of-bounds reads count as background, so dilation never grows past
//! the image edge and erosion always eats into shapes touching it. The
//! closing (all dilations first, then the same number of erosions)
//! merges blobs up to twice the accumulated dilation reach apart and
//! fills internal holes of that scale.

use crate::filters::threshold::{BACKGROUND, FOREGROUND};
use crate::models::PixelBuffer;

/// 5x5 structuring element approximating a disc, center at [2][2]
pub const STRUCTURING_ELEMENT: [[u8; 5]; 5] = [
    [0, 0, 1, 0, 0],
    [0, 1, 1, 1, 1],
    [1, 1, 1, 1, 1],
    [0, 1, 1, 1, 0],
    [0, 0, 1, 0, 0],
];

/// Dilate: a pixel becomes foreground if any structuring-element offset
/// reads foreground
pub fn dilate(mask: &PixelBuffer<u8>) -> PixelBuffer<u8> {
    let mut out = PixelBuffer::new(mask.width(), mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let mut value = BACKGROUND;
            'offsets: for (dy, kernel_row) in STRUCTURING_ELEMENT.iter().enumerate() {
                for (dx, &bit) in kernel_row.iter().enumerate() {
                    if bit == 1
                        && mask.sample(x as isize + dx as isize - 2, y as isize + dy as isize - 2)
                            == FOREGROUND
                    {
                        value = FOREGROUND;
                        break 'offsets;
                    }
                }
            }
            out.set(x, y, value);
        }
    }
    out
}

/// Erode: a pixel stays foreground unless any structuring-element offset
/// reads background (out-of-bounds included)
pub fn erode(mask: &PixelBuffer<u8>) -> PixelBuffer<u8> {
    let mut out = PixelBuffer::new(mask.width(), mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let mut value = FOREGROUND;
            'offsets: for (dy, kernel_row) in STRUCTURING_ELEMENT.iter().enumerate() {
                for (dx, &bit) in kernel_row.iter().enumerate() {
                    if bit == 1
                        && mask.sample(x as isize + dx as isize - 2, y as isize + dy as isize - 2)
                            == BACKGROUND
                    {
                        value = BACKGROUND;
                        break 'offsets;
                    }
                }
            }
            out.set(x, y, value);
        }
    }
    out
}

/// Closing with extended reach: `passes` dilations, then `passes` erosions
pub fn close(mask: &PixelBuffer<u8>, passes: usize) -> PixelBuffer<u8> {
    let mut current = mask.clone();
    for _ in 0..passes {
        current = dilate(&current);
    }
    for _ in 0..passes {
        current = erode(&current);
    }
    current
}
