//! Detection pipeline configuration
//!
//! Every tunable here is an empirically calibrated constant for one image
//! domain: coin photographs on a plain background at a few hundred pixels
//! per side. Other resolutions or subjects will need re-tuning, starting
//! with `edge_threshold` and `seed_stride`.

/// What the contrast stretcher does when both percentile boundaries land
/// on the same intensity (a division by zero in the rescale formula).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastFallback {
    /// Return the input buffer unchanged
    #[default]
    PassThrough,
    /// Abort the run with [`DetectError::DegenerateContrast`]
    ///
    /// [`DetectError::DegenerateContrast`]: crate::error::DetectError::DegenerateContrast
    Fail,
}

/// Tuning values for one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// CDF fraction below the low contrast boundary
    pub clip_low: f64,
    /// CDF fraction above the high contrast boundary
    pub clip_high: f64,
    /// Policy for collapsed contrast boundaries
    pub contrast_fallback: ContrastFallback,
    /// Number of 5x5 mean-blur passes over the gradient magnitude
    pub smoothing_passes: usize,
    /// Smoothed gradient magnitude at or above this becomes foreground
    pub edge_threshold: f64,
    /// Dilation count (and matching erosion count) of the closing
    pub morphology_passes: usize,
    /// Row/column spacing of the flood-fill seed lattice
    pub seed_stride: usize,
    /// Run the pure stages with per-row parallelism
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            clip_low: 0.05,
            clip_high: 0.95,
            contrast_fallback: ContrastFallback::default(),
            smoothing_passes: 3,
            edge_threshold: 26.0,
            morphology_passes: 5,
            seed_stride: 4,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Default configuration with rayon row-parallel stages enabled
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.edge_threshold, 26.0);
        assert_eq!(config.smoothing_passes, 3);
        assert_eq!(config.morphology_passes, 5);
        assert_eq!(config.seed_stride, 4);
        assert_eq!(config.contrast_fallback, ContrastFallback::PassThrough);
        assert!(!config.parallel);
    }

    #[test]
    fn test_parallel_config() {
        assert!(DetectorConfig::parallel().parallel);
    }
}
