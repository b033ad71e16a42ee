//! Pixel buffers and the raster helpers used to place them.

/// Owned pixel buffers and format conversions.
pub mod image;
/// Affine image drawing with premultiplied source-over.
pub mod raster;
