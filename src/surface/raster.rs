use crate::effects::composite::over;
use crate::foundation::core::{Affine, IRect, Point, Rect};
use crate::foundation::error::ShadowResult;
use crate::surface::image::Image;

// Sub-pixel weights are quantized to 8 bits so sampling stays bit-exact across platforms.
const FRAC_BITS: u32 = 8;
const FRAC_ONE: u32 = 1 << FRAC_BITS;

/// Draw `src` into `dst` through `transform` (source space -> destination space), limited to
/// `clip`, using bilinear sampling and premultiplied source-over.
///
/// Samples outside `src` are treated as transparent. Integer translations reproduce the source
/// pixels exactly.
pub fn draw_image(dst: &mut Image, src: &Image, transform: Affine, clip: IRect) -> ShadowResult<()> {
    dst.require_rgba8_premul()?;
    src.require_rgba8_premul()?;

    if src.width() == 0 || src.height() == 0 {
        return Ok(());
    }
    let det = transform.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return Ok(());
    }

    let src_rect = Rect::new(0.0, 0.0, f64::from(src.width()), f64::from(src.height()));
    let area = covered_pixels(transform.transform_rect_bbox(src_rect))
        .intersect(clip)
        .intersect(IRect::from_size(dst.width(), dst.height()));
    if area.is_empty() {
        return Ok(());
    }

    let inv = transform.inverse();
    let dst_w = dst.width() as usize;
    let dst_data = dst.data_mut();

    for y in area.top..area.bottom {
        for x in area.left..area.right {
            let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let px = sample_bilinear(src, p.x - 0.5, p.y - 0.5);
            if px[3] == 0 {
                continue;
            }
            let idx = (y as usize * dst_w + x as usize) * 4;
            let d = &mut dst_data[idx..idx + 4];
            let out = over([d[0], d[1], d[2], d[3]], px);
            d.copy_from_slice(&out);
        }
    }

    Ok(())
}

fn covered_pixels(r: Rect) -> IRect {
    let clamp = |v: f64| v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
    IRect::new(
        clamp(r.x0.floor()),
        clamp(r.y0.floor()),
        clamp(r.x1.ceil()),
        clamp(r.y1.ceil()),
    )
}

fn sample_bilinear(src: &Image, sx: f64, sy: f64) -> [u8; 4] {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = (((sx - x0) * f64::from(FRAC_ONE)).round() as u32).min(FRAC_ONE);
    let fy = (((sy - y0) * f64::from(FRAC_ONE)).round() as u32).min(FRAC_ONE);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (FRAC_ONE - fx) * (FRAC_ONE - fy)),
        (x0 + 1, y0, fx * (FRAC_ONE - fy)),
        (x0, y0 + 1, (FRAC_ONE - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut acc = [0u32; 4];
    for (tx, ty, w) in taps {
        if w == 0 {
            continue;
        }
        let Some(px) = texel(src, tx, ty) else {
            continue;
        };
        for c in 0..4 {
            acc[c] += u32::from(px[c]) * w;
        }
    }

    let shift = 2 * FRAC_BITS;
    let half = 1u32 << (shift - 1);
    acc.map(|v| ((v + half) >> shift).min(255) as u8)
}

fn texel(src: &Image, x: i64, y: i64) -> Option<[u8; 4]> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    src.pixel(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
