//! Pure image-filter stages of the detection pipeline
//!
//! Each function here maps input buffer(s) to a fresh output buffer:
//! - Grayscale conversion (per-channel planes to luminance)
//! - Contrast stretching (cumulative-histogram percentile clip)
//! - Gradient extraction (Scharr derivative pair, magnitude map)
//! - Smoothing (repeated 5x5 box mean)
//! - Thresholding (fixed-constant binarization)

pub mod contrast;
pub mod gradient;
pub mod grayscale;
pub mod smoothing;
pub mod threshold;
