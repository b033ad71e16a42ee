//! Pixel-level building blocks of the shadow pipeline.

/// Separable Gaussian blur and the [`blur::BlurFilter`] seam.
pub mod blur;
/// Premultiplied source-over compositing.
pub mod composite;
/// Elevation to blur-radius mapping.
pub mod elevation;
/// Color-matrix shadow matte extraction.
pub mod matte;
