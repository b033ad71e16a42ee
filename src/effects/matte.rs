//! Shadow silhouettes derived from a source image's channels.

use crate::foundation::error::ShadowResult;
use crate::foundation::math::unit_to_u8;
use crate::surface::image::{Image, PixelFormat};

/// Row-major 4x5 color matrix: each output channel is `dot(row[0..4], rgba) + row[4]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// Solid black at 40% of the source coverage.
    pub const OPAQUE_SHADOW: Self = Self([
        0.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 0.4, 0.0,
    ]);

    /// Source color darkened to 40%, coverage attenuated to 60%.
    pub const TRANSLUCENT_SHADOW: Self = Self([
        0.4, 0.0, 0.0, 0.0, 0.0, //
        0.0, 0.4, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.4, 0.0, 0.0, //
        0.0, 0.0, 0.0, 0.6, 0.0,
    ]);

    pub fn for_mode(translucent: bool) -> Self {
        if translucent {
            Self::TRANSLUCENT_SHADOW
        } else {
            Self::OPAQUE_SHADOW
        }
    }
}

/// Turns a source image into the (unblurred) shadow matte.
pub trait AlphaMatteExtractor {
    /// Build a matte with the same dimensions as `source`.
    ///
    /// Fails with [`crate::ShadowError::UnsupportedPixelFormat`] for anything other than
    /// premultiplied RGBA8.
    fn extract(&mut self, source: &Image, translucent: bool) -> ShadowResult<Image>;
}

/// Allocate a matte for `source` using the mode's color matrix.
pub fn extract_matte(source: &Image, translucent: bool) -> ShadowResult<Image> {
    source.require_rgba8_premul()?;
    let mut out = vec![0u8; source.data().len()];
    color_matrix_rgba8(source.data(), &mut out, ColorMatrix::for_mode(translucent));
    Image::from_raw(source.width(), source.height(), PixelFormat::Rgba8Premul, out)
}

/// Apply `m` to stored channel values, normalized to `[0, 1]`.
///
/// The matrix is applied to premultiplied values directly. The shadow matrices never weight a
/// color channel above alpha, so results stay valid premultiplied pixels.
pub(crate) fn color_matrix_rgba8(src: &[u8], dst: &mut [u8], m: ColorMatrix) {
    debug_assert_eq!(src.len(), dst.len());
    let m = m.0;
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let r = s[0] as f32 / 255.0;
        let g = s[1] as f32 / 255.0;
        let b = s[2] as f32 / 255.0;
        let a = s[3] as f32 / 255.0;

        let out_a = unit_to_u8(m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19]);
        let out_r = unit_to_u8(m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4]);
        let out_g = unit_to_u8(m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9]);
        let out_b = unit_to_u8(m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14]);

        d[0] = out_r.min(out_a);
        d[1] = out_g.min(out_a);
        d[2] = out_b.min(out_a);
        d[3] = out_a;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/matte.rs"]
mod tests;
