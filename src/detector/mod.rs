//! Blob isolation on the binary mask
//!
//! Two stages run after binarization:
//! - Morphological closing (dilations then erosions with a fixed
//!   near-circular structuring element) merges nearby edge fragments and
//!   fills internal gaps.
//! - Component extraction scans a sparse seed lattice and flood-fills
//!   each hit into a bounding box.

/// Dilation, erosion, and the closing built from them
pub mod morphology;
/// Seed scan and flood-fill bounding-box extraction
pub mod components;
