use std::sync::Arc;

use crate::foundation::error::{ShadowError, ShadowResult};
use crate::foundation::math::Fnv1a64;

/// Pixel layouts an [`Image`] may carry.
///
/// The shadow pipeline operates on [`PixelFormat::Rgba8Premul`] only; the other layouts exist so
/// foreign buffers can be represented and rejected explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Premultiplied RGBA, 8 bits per channel.
    Rgba8Premul,
    /// Opaque RGB, 8 bits per channel.
    Rgb8,
    /// Single coverage channel.
    Alpha8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8Premul => 4,
            Self::Rgb8 => 3,
            Self::Alpha8 => 1,
        }
    }
}

/// Owned, tightly packed, row-major pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Image {
    /// A fully transparent premultiplied RGBA8 image.
    pub fn transparent(width: u32, height: u32) -> ShadowResult<Self> {
        let len = byte_len(width, height, PixelFormat::Rgba8Premul)?;
        Ok(Self {
            width,
            height,
            format: PixelFormat::Rgba8Premul,
            data: vec![0u8; len],
        })
    }

    /// Premultiplied RGBA8 image filled with one pixel value.
    pub fn filled(width: u32, height: u32, premul_rgba: [u8; 4]) -> ShadowResult<Self> {
        if premul_rgba[..3].iter().any(|&c| c > premul_rgba[3]) {
            return Err(ShadowError::validation(
                "premultiplied color channels must not exceed alpha",
            ));
        }
        let mut img = Self::transparent(width, height)?;
        for px in img.data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul_rgba);
        }
        Ok(img)
    }

    /// Wrap raw bytes, validating their length against the layout.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> ShadowResult<Self> {
        let expected = byte_len(width, height, format)?;
        if data.len() != expected {
            return Err(ShadowError::validation(format!(
                "image buffer is {} bytes, expected {expected} for {width}x{height} {format:?}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Convert a straight-alpha `image` buffer to premultiplied RGBA8.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            format: PixelFormat::Rgba8Premul,
            data,
        }
    }

    /// Decode encoded bytes (PNG, JPEG, ...) into premultiplied RGBA8.
    pub fn decode(bytes: &[u8]) -> ShadowResult<Self> {
        use anyhow::Context as _;

        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_rgba_image(&dyn_img.to_rgba8()))
    }

    /// Convert back to a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> ShadowResult<image::RgbaImage> {
        self.require_rgba8_premul()?;
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| ShadowError::validation("rgba buffer does not match dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if self.format != PixelFormat::Rgba8Premul || x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Fail with [`ShadowError::UnsupportedPixelFormat`] unless this is premultiplied RGBA8.
    pub fn require_rgba8_premul(&self) -> ShadowResult<()> {
        if self.format == PixelFormat::Rgba8Premul {
            Ok(())
        } else {
            Err(ShadowError::UnsupportedPixelFormat(self.format))
        }
    }

    /// Content hash over dimensions, layout and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&[self.format.bytes_per_pixel() as u8]);
        h.write_bytes(&self.data);
        h.finish()
    }
}

fn byte_len(width: u32, height: u32, format: PixelFormat) -> ShadowResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(format.bytes_per_pixel()))
        .ok_or_else(|| ShadowError::validation("image buffer size overflow"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/image.rs"]
mod tests;
