//! 5x5 box-mean noise smoothing
//!
//! Spreads the thin Scharr edge response into wide, connected ridges so
//! binarization produces solid blobs instead of one-pixel filigree. Only
//! interior pixels (2-pixel border excluded) are computed; the border
//! stays 0. The pipeline applies the filter several times in sequence,
//! each pass feeding the next.

use rayon::prelude::*;

use crate::models::PixelBuffer;

/// Number of samples in the mean window
const WINDOW_AREA: f64 = 25.0;

#[inline]
fn window_mean(input: &PixelBuffer<f64>, x: usize, y: usize) -> f64 {
    let mut sum = 0.0;
    for dy in 0..5 {
        for dx in 0..5 {
            sum += input.get(x + dx - 2, y + dy - 2);
        }
    }
    sum / WINDOW_AREA
}

/// Single 5x5 mean pass over interior pixels
pub fn mean_filter(input: &PixelBuffer<f64>) -> PixelBuffer<f64> {
    let mut out = PixelBuffer::new(input.width(), input.height());
    if input.width() < 5 || input.height() < 5 {
        return out;
    }
    for y in 2..input.height() - 2 {
        for x in 2..input.width() - 2 {
            out.set(x, y, window_mean(input, x, y));
        }
    }
    out
}

/// Row-parallel variant of [`mean_filter`] with identical output
pub fn mean_filter_parallel(input: &PixelBuffer<f64>) -> PixelBuffer<f64> {
    let width = input.width();
    let height = input.height();
    let mut out = PixelBuffer::new(width, height);
    if width < 5 || height < 5 {
        return out;
    }
    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            if y < 2 || y >= height - 2 {
                return;
            }
            for (x, out) in row.iter_mut().enumerate().take(width - 2).skip(2) {
                *out = window_mean(input, x, y);
            }
        });
    out
}

/// Apply the mean filter `passes` times, each pass feeding the next
pub fn mean_filter_passes(
    input: &PixelBuffer<f64>,
    passes: usize,
    parallel: bool,
) -> PixelBuffer<f64> {
    let mut current = input.clone();
    for _ in 0..passes {
        current = if parallel {
            mean_filter_parallel(&current)
        } else {
            mean_filter(&current)
        };
    }
    current
}
