/// Inclusive axis-aligned box around one detected component
pub mod bounding_box;
/// Row-major 2D grid with bounds-checked-or-default access
pub mod pixel_buffer;

pub use bounding_box::BoundingBox;
pub use pixel_buffer::PixelBuffer;
