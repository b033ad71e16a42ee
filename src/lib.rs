//! Elevation shadows for images with transparency.
//!
//! Given a source image and an elevation, the pipeline renders a soft drop shadow beneath the
//! image the way material-style UIs do:
//!
//! 1. **Radius**: elevation -> blur radius ([`blur_radius`]), saturating at 24dp / 25px.
//! 2. **Matte**: the source is rendered into a buffer padded for blur spill and turned into a
//!    shadow silhouette with a color matrix ([`AlphaMatteExtractor`]).
//! 3. **Blur**: separable Q16 Gaussian ([`BlurFilter`]).
//! 4. **Composite**: [`ShadowCompositor`] caches the matte and draws it centered under the source
//!    and shifted down by half the blur radius, clipped to the host's viewport widened by the
//!    blur spread.
//!
//! The hosting view draws the source image on top after [`ShadowCompositor::render`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs produce bit-identical mattes.
//! - **Premultiplied RGBA8** end-to-end.
#![forbid(unsafe_code)]

pub mod config;
pub mod effects;
mod foundation;
pub mod render;
pub mod surface;

pub use config::ShadowConfig;
pub use effects::blur::{BlurFilter, gaussian_kernel_q16, sigma_for_radius};
pub use effects::elevation::{
    BlurRadius, MAX_BLUR_RADIUS, MAX_ELEVATION_DP, blur_radius, dp_to_px,
};
pub use effects::matte::{AlphaMatteExtractor, ColorMatrix, extract_matte};
pub use foundation::core::{Affine, IRect, Point, Rect, Vec2};
pub use foundation::error::{ShadowError, ShadowResult};
pub use render::backend::{
    BackendKind, BackendResources, BackendSettings, ShadowBackend, create_backend,
};
pub use render::cache::{CachedShadow, ShadowCache, ShadowState};
pub use render::canvas::{HostContainer, PixmapCanvas, ShadowCanvas};
pub use render::compositor::{DrawOutcome, ShadowCompositor, ShadowParams, ShadowStats, SourceLayout};
pub use render::cpu::CpuBackend;
pub use surface::image::{Image, PixelFormat};
