use crate::foundation::error::{ShadowError, ShadowResult};

/// Elevation (in dp) at which the blur radius saturates.
pub const MAX_ELEVATION_DP: f32 = 24.0;

/// Largest blur radius the pipeline produces, in pixels.
pub const MAX_BLUR_RADIUS: f32 = 25.0;

/// Blur spread in pixels, always within `[0, MAX_BLUR_RADIUS]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BlurRadius(f32);

impl BlurRadius {
    pub const ZERO: Self = Self(0.0);

    /// Clamp an arbitrary value into the supported range; non-finite input maps to zero.
    pub fn new(px: f32) -> Self {
        if px.is_finite() {
            Self(px.clamp(0.0, MAX_BLUR_RADIUS))
        } else {
            Self::ZERO
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Whole pixels needed to hold the blur spill on one side.
    pub fn ceil_px(self) -> u32 {
        self.0.ceil() as u32
    }

    /// Radius truncated toward zero, used for clip insets.
    pub fn trunc_px(self) -> i32 {
        self.0 as i32
    }
}

/// Convert device-independent units to pixels.
pub fn dp_to_px(dp: f32, pixel_density: f32) -> ShadowResult<f32> {
    check_density(pixel_density)?;
    Ok(dp * pixel_density)
}

/// Map an elevation (pixels, `>= 0`) to a blur radius.
///
/// The radius grows linearly until the elevation reaches [`MAX_ELEVATION_DP`] converted to pixels,
/// then stays at [`MAX_BLUR_RADIUS`]. Callers clamp negative elevations before calling.
pub fn blur_radius(elevation_px: f32, pixel_density: f32) -> ShadowResult<BlurRadius> {
    let max_elevation_px = dp_to_px(MAX_ELEVATION_DP, pixel_density)?;
    let r = (MAX_BLUR_RADIUS * (elevation_px / max_elevation_px)).min(MAX_BLUR_RADIUS);
    Ok(BlurRadius::new(r))
}

fn check_density(pixel_density: f32) -> ShadowResult<()> {
    if !pixel_density.is_finite() || pixel_density <= 0.0 {
        return Err(ShadowError::InvalidDensity(pixel_density));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/elevation.rs"]
mod tests;
