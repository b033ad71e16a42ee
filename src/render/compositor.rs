use std::sync::Arc;

use crate::config::ShadowConfig;
use crate::effects::elevation::{BlurRadius, blur_radius, dp_to_px};
use crate::foundation::core::{Affine, IRect, Point, Vec2};
use crate::foundation::error::{ShadowError, ShadowResult};
use crate::render::backend::{BackendKind, ShadowBackend, create_backend};
use crate::render::cache::{CachedShadow, ShadowCache, ShadowState};
use crate::render::canvas::{HostContainer, ShadowCanvas};
use crate::surface::image::Image;
use crate::surface::raster;

/// Display flags for the shadow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// Compute the shadow but never draw it.
    pub clip_shadow: bool,
    /// Ask the container not to clip children and apply the widened clip without save/restore.
    pub force_clip: bool,
    /// Tinted, softer matte instead of flat black.
    pub translucent: bool,
    /// Outward clip inset in pixels. `None` uses twice the truncated blur radius.
    pub clip_inset_px: Option<i32>,
}

/// How the hosting view lays out its source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceLayout {
    /// Hosting view size in pixels.
    pub view_width: i32,
    pub view_height: i32,
    /// View padding applied before the image matrix.
    pub padding_left: f64,
    pub padding_top: f64,
    /// Image placement inside the padded content area.
    pub image_matrix: Affine,
    /// Drawable bounds; the shadow is positioned relative to their top-left corner.
    pub bounds: IRect,
}

impl SourceLayout {
    /// View sized to the image with no padding and an identity image matrix.
    pub fn fitted(image: &Image) -> Self {
        let bounds = IRect::from_size(image.width(), image.height());
        Self {
            view_width: bounds.width(),
            view_height: bounds.height(),
            padding_left: 0.0,
            padding_top: 0.0,
            image_matrix: Affine::IDENTITY,
            bounds,
        }
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            view_width: 0,
            view_height: 0,
            padding_left: 0.0,
            padding_top: 0.0,
            image_matrix: Affine::IDENTITY,
            bounds: IRect::EMPTY,
        }
    }
}

/// What a render request did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOutcome {
    /// No elevation or no source: nothing generated, nothing drawn.
    Skipped,
    /// The matte is cached but `clip_shadow` kept it off the canvas.
    Suppressed,
    /// The matte was drawn with its top-left corner at `origin`.
    Drawn { origin: Point },
}

/// Counters for matte generation and drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowStats {
    /// Mattes built from scratch.
    pub generated: u64,
    /// Shadow draw calls issued.
    pub drawn: u64,
    /// Draw requests that produced a matte but drew nothing.
    pub suppressed: u64,
}

/// Renders an elevation shadow beneath a source image.
///
/// The matte is built lazily on the first render after any input change and reused until the next
/// one. The source image itself is never drawn here; the host paints it after [`render`].
///
/// [`render`]: ShadowCompositor::render
pub struct ShadowCompositor {
    backend: Box<dyn ShadowBackend>,
    cache: ShadowCache,
    params: ShadowParams,
    elevation_px: f32,
    density: f32,
    source: Option<Arc<Image>>,
    layout: SourceLayout,
    needs_redraw: bool,
    stats: ShadowStats,
}

impl std::fmt::Debug for ShadowCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowCompositor")
            .field("backend", &self.backend.kind())
            .field("state", &self.cache.state())
            .field("params", &self.params)
            .field("elevation_px", &self.elevation_px)
            .field("density", &self.density)
            .field("has_source", &self.source.is_some())
            .field("layout", &self.layout)
            .field("stats", &self.stats)
            .finish()
    }
}

impl ShadowCompositor {
    /// Build a compositor over an already constructed backend.
    pub fn new(backend: Box<dyn ShadowBackend>, density: f32) -> ShadowResult<Self> {
        check_density(density)?;
        Ok(Self {
            backend,
            cache: ShadowCache::new(),
            params: ShadowParams::default(),
            elevation_px: 0.0,
            density,
            source: None,
            layout: SourceLayout::default(),
            needs_redraw: true,
            stats: ShadowStats::default(),
        })
    }

    /// Build a compositor and its backend from configuration.
    pub fn from_config(config: &ShadowConfig) -> ShadowResult<Self> {
        config.validate()?;
        let backend = create_backend(BackendKind::Cpu, &config.backend)?;
        let mut compositor = Self::new(backend, config.density)?;
        compositor.params = config.params();
        compositor.elevation_px = sanitize_elevation(dp_to_px(config.elevation_dp, config.density)?);
        Ok(compositor)
    }

    pub fn params(&self) -> ShadowParams {
        self.params
    }

    pub fn elevation_px(&self) -> f32 {
        self.elevation_px
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn layout(&self) -> SourceLayout {
        self.layout
    }

    pub fn state(&self) -> ShadowState {
        self.cache.state()
    }

    pub fn stats(&self) -> ShadowStats {
        self.stats
    }

    pub fn backend(&self) -> &dyn ShadowBackend {
        self.backend.as_ref()
    }

    /// The cached matte, if it matches the current inputs.
    pub fn cached_matte(&self) -> Option<Arc<Image>> {
        self.cache.get().map(|s| Arc::clone(&s.matte))
    }

    /// Blur radius for the current elevation and density.
    pub fn blur_radius(&self) -> ShadowResult<BlurRadius> {
        blur_radius(self.elevation_px, self.density)
    }

    /// Returns whether a redraw was requested since the last call, and clears the flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Elevation in pixels. Negative or non-finite values are treated as zero.
    pub fn set_elevation(&mut self, elevation_px: f32) {
        let elevation_px = sanitize_elevation(elevation_px);
        if elevation_px != self.elevation_px {
            self.elevation_px = elevation_px;
            self.cache.bump();
        }
        self.needs_redraw = true;
    }

    /// Elevation in device-independent units at `density` pixels per unit.
    pub fn set_elevation_dp(&mut self, elevation_dp: f32, density: f32) -> ShadowResult<()> {
        let px = dp_to_px(elevation_dp, density)?;
        self.set_density(density)?;
        self.set_elevation(px);
        Ok(())
    }

    pub fn set_density(&mut self, density: f32) -> ShadowResult<()> {
        check_density(density)?;
        if density != self.density {
            self.density = density;
            self.cache.bump();
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Replace the source image and its layout. `None` disables shadow generation.
    pub fn set_source(&mut self, source: Option<Arc<Image>>, layout: SourceLayout) {
        let same_source = match (&self.source, &source) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same_source || layout != self.layout {
            self.source = source;
            self.layout = layout;
            self.cache.bump();
        }
        self.needs_redraw = true;
    }

    /// Update the layout of the current source (view resize, new image matrix, ...).
    pub fn set_layout(&mut self, layout: SourceLayout) {
        if layout != self.layout {
            self.layout = layout;
            self.cache.bump();
        }
        self.needs_redraw = true;
    }

    pub fn set_clip_shadow(&mut self, clip_shadow: bool) {
        self.params.clip_shadow = clip_shadow;
        self.needs_redraw = true;
    }

    /// Takes effect on the container at the next [`ShadowCompositor::attach`].
    pub fn set_force_clip(&mut self, force_clip: bool) {
        self.params.force_clip = force_clip;
        self.needs_redraw = true;
    }

    pub fn set_translucent(&mut self, translucent: bool) {
        if translucent != self.params.translucent {
            self.params.translucent = translucent;
            self.cache.bump();
        }
        self.needs_redraw = true;
    }

    /// Outward clip widening. Negative insets are rejected.
    pub fn set_clip_inset_px(&mut self, inset: Option<i32>) -> ShadowResult<()> {
        if let Some(px) = inset
            && px < 0
        {
            return Err(ShadowError::validation(format!(
                "clip inset must be >= 0, got {px}"
            )));
        }
        self.params.clip_inset_px = inset;
        self.needs_redraw = true;
        Ok(())
    }

    /// Drop the cached matte; the next render rebuilds it.
    pub fn invalidate(&mut self) {
        self.cache.bump();
        self.needs_redraw = true;
    }

    /// Connect to the hosting container. With `force_clip` the container stops clipping children
    /// so the shadow can paint outside the view.
    pub fn attach(&mut self, host: &mut dyn HostContainer) {
        if self.params.force_clip {
            host.set_clip_children(false);
        }
    }

    /// Build (or reuse) the matte for the current inputs.
    ///
    /// Returns `None` when no shadow applies: elevation `<= 0` or no source.
    pub fn prepare(&mut self) -> ShadowResult<Option<CachedShadow>> {
        if self.elevation_px <= 0.0 {
            return Ok(None);
        }
        let Some(source) = self.source.clone() else {
            return Ok(None);
        };
        if let Some(shadow) = self.cache.get() {
            return Ok(Some(shadow.clone()));
        }

        let shadow = self.generate(&source)?;
        Ok(Some(self.cache.store(shadow).clone()))
    }

    /// Draw the shadow for the current inputs into `canvas`.
    pub fn render(&mut self, canvas: &mut dyn ShadowCanvas) -> ShadowResult<DrawOutcome> {
        let Some(shadow) = self.prepare()? else {
            tracing::trace!(elevation_px = self.elevation_px, "no shadow to draw");
            return Ok(DrawOutcome::Skipped);
        };

        if self.params.clip_shadow {
            self.stats.suppressed += 1;
            tracing::trace!("shadow suppressed by clip_shadow");
            return Ok(DrawOutcome::Suppressed);
        }

        let r = shadow.radius;
        let inset = self.params.clip_inset_px.unwrap_or(2 * r.trunc_px());
        let clip = canvas.clip_bounds().inset(-inset, -inset);

        let radius = f64::from(r.get());
        let origin = Point::new(
            f64::from(self.layout.bounds.left) - radius,
            f64::from(self.layout.bounds.top) - radius / 2.0,
        );
        let transform = Affine::translate(origin.to_vec2());

        if self.params.force_clip {
            canvas.clip_rect(clip);
            canvas.draw_image(&shadow.matte, transform)?;
        } else {
            canvas.save();
            canvas.clip_rect(clip);
            let drawn = canvas.draw_image(&shadow.matte, transform);
            canvas.restore();
            drawn?;
        }

        self.stats.drawn += 1;
        tracing::trace!(x = origin.x, y = origin.y, "shadow drawn");
        Ok(DrawOutcome::Drawn { origin })
    }

    #[tracing::instrument(
        skip(self, source),
        fields(elevation_px = self.elevation_px, translucent = self.params.translucent)
    )]
    fn generate(&mut self, source: &Image) -> ShadowResult<CachedShadow> {
        let radius = blur_radius(self.elevation_px, self.density)?;
        let padded = self.render_padded_source(source, radius)?;
        let mut matte = self.backend.extract(&padded, self.params.translucent)?;
        self.backend.blur(&mut matte, radius)?;

        self.stats.generated += 1;
        tracing::debug!(
            radius = radius.get(),
            width = matte.width(),
            height = matte.height(),
            generation = self.cache.generation(),
            "shadow matte generated"
        );
        Ok(CachedShadow {
            matte: Arc::new(matte),
            radius,
        })
    }

    /// Render the source into a buffer padded by `ceil(radius)` on every side.
    fn render_padded_source(&self, source: &Image, radius: BlurRadius) -> ShadowResult<Image> {
        let pad = 2 * i64::from(radius.ceil_px());
        let width = i64::from(self.layout.view_width) + pad;
        let height = i64::from(self.layout.view_height) + pad;
        if width <= 0 || height <= 0 {
            tracing::debug!(width, height, "degenerate shadow bounds, using 1x1 buffer");
            return Image::transparent(1, 1);
        }
        let width = u32::try_from(width)
            .map_err(|_| ShadowError::validation("shadow buffer width out of range"))?;
        let height = u32::try_from(height)
            .map_err(|_| ShadowError::validation("shadow buffer height out of range"))?;

        let mut buffer = Image::transparent(width, height)?;
        let r = f64::from(radius.get());
        let transform = Affine::translate(Vec2::new(
            self.layout.padding_left + r,
            self.layout.padding_top + r,
        )) * self.layout.image_matrix;
        raster::draw_image(
            &mut buffer,
            source,
            transform,
            IRect::from_size(width, height),
        )?;
        Ok(buffer)
    }
}

impl Drop for ShadowCompositor {
    fn drop(&mut self) {
        self.backend.release_resources();
    }
}

fn check_density(density: f32) -> ShadowResult<()> {
    if !density.is_finite() || density <= 0.0 {
        return Err(ShadowError::InvalidDensity(density));
    }
    Ok(())
}

fn sanitize_elevation(elevation_px: f32) -> f32 {
    if elevation_px.is_finite() && elevation_px > 0.0 {
        elevation_px
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
