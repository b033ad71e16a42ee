//! Separable Gaussian blur over premultiplied RGBA8.
//!
//! Kernels are quantized to Q16 fixed point and normalized to sum exactly `1 << 16`, so every pass
//! is integer arithmetic and output is bit-identical across runs and thread counts.

use rayon::prelude::*;

use crate::effects::elevation::BlurRadius;
use crate::foundation::error::ShadowResult;
use crate::surface::image::Image;

const Q16_ONE: u32 = 1 << 16;

/// Blurs a shadow matte in place.
pub trait BlurFilter {
    /// Blur `image` with `radius`. A zero radius leaves the image untouched.
    fn blur(&mut self, image: &mut Image, radius: BlurRadius) -> ShadowResult<()>;
}

/// Standard deviation used for a given radius.
///
/// Same mapping as the platform script-intrinsic blur: `0.4 * r + 0.6`.
pub fn sigma_for_radius(radius: BlurRadius) -> f32 {
    0.4 * radius.get() + 0.6
}

/// Q16 Gaussian weights for `radius`: `2 * ceil(radius) + 1` taps at [`sigma_for_radius`].
pub fn gaussian_kernel_q16(radius: BlurRadius) -> Vec<u32> {
    if radius.is_zero() {
        return vec![Q16_ONE];
    }
    quantized_gaussian(radius.ceil_px(), f64::from(sigma_for_radius(radius)))
}

/// Sampled Gaussian over `-half_width..=half_width`, scaled to sum exactly to `Q16_ONE`.
///
/// Rounding drift is folded into the center tap.
fn quantized_gaussian(half_width: u32, sigma: f64) -> Vec<u32> {
    let hw = i64::from(half_width);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let falloff = |i: i64| (-((i * i) as f64) / two_sigma_sq).exp();

    // The center sample is 1.0, so the total is never zero.
    let scale = f64::from(Q16_ONE) / (-hw..=hw).map(falloff).sum::<f64>();
    let mut weights: Vec<u32> = (-hw..=hw)
        .map(|i| (falloff(i) * scale).round() as u32)
        .collect();

    let drift = i64::from(Q16_ONE) - weights.iter().map(|&w| i64::from(w)).sum::<i64>();
    let center = &mut weights[half_width as usize];
    *center = (i64::from(*center) + drift).max(0) as u32;
    weights
}

/// Two-pass blur from `src` into `dst` through `tmp`. All three buffers are `width * height * 4`.
pub(crate) fn blur_rgba8_q16(
    src: &[u8],
    dst: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel: &[u32],
    parallel: bool,
) {
    if width == 0 || height == 0 {
        return;
    }
    if kernel.len() == 1 {
        dst.copy_from_slice(src);
        return;
    }

    if parallel {
        horizontal_pass_par(src, tmp, width, kernel);
        vertical_pass_par(tmp, dst, width, height, kernel);
    } else {
        let row_bytes = width as usize * 4;
        for (y, row) in tmp.chunks_exact_mut(row_bytes).enumerate() {
            horizontal_row(src, row, y, width, kernel);
        }
        for (y, row) in dst.chunks_exact_mut(row_bytes).enumerate() {
            vertical_row(tmp, row, y, width, height, kernel);
        }
    }
}

fn horizontal_pass_par(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    dst.par_chunks_exact_mut(width as usize * 4)
        .enumerate()
        .for_each(|(y, row)| horizontal_row(src, row, y, width, k));
}

fn vertical_pass_par(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    dst.par_chunks_exact_mut(width as usize * 4)
        .enumerate()
        .for_each(|(y, row)| vertical_row(src, row, y, width, height, k));
}

fn horizontal_row(src: &[u8], out_row: &mut [u8], y: usize, width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let row_start = y * width as usize;
    for x in 0..w {
        let mut acc = [0u64; 4];
        for (ki, &kw) in k.iter().enumerate() {
            let sx = (x + ki as i64 - radius).clamp(0, w - 1) as usize;
            let idx = (row_start + sx) * 4;
            for c in 0..4 {
                acc[c] += u64::from(kw) * u64::from(src[idx + c]);
            }
        }
        let out_idx = x as usize * 4;
        for c in 0..4 {
            out_row[out_idx + c] = q16_to_u8(acc[c]);
        }
    }
}

fn vertical_row(src: &[u8], out_row: &mut [u8], y: usize, width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let h = i64::from(height);
    let w = width as usize;
    for x in 0..w {
        let mut acc = [0u64; 4];
        for (ki, &kw) in k.iter().enumerate() {
            let sy = (y as i64 + ki as i64 - radius).clamp(0, h - 1) as usize;
            let idx = (sy * w + x) * 4;
            for c in 0..4 {
                acc[c] += u64::from(kw) * u64::from(src[idx + c]);
            }
        }
        let out_idx = x * 4;
        for c in 0..4 {
            out_row[out_idx + c] = q16_to_u8(acc[c]);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
