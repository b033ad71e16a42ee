use crate::foundation::core::{Affine, IRect};
use crate::foundation::error::ShadowResult;
use crate::surface::image::Image;
use crate::surface::raster;

/// Drawing surface the compositor paints the shadow into.
///
/// Mirrors the subset of a retained-mode canvas the shadow needs: a clip stack and image draws.
pub trait ShadowCanvas {
    /// Current clip rectangle in canvas pixels.
    fn clip_bounds(&self) -> IRect;

    /// Push the current clip.
    fn save(&mut self);

    /// Pop the clip pushed by the matching [`ShadowCanvas::save`].
    fn restore(&mut self);

    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: IRect);

    /// Draw `image` through `transform` (image space -> canvas space) inside the current clip.
    fn draw_image(&mut self, image: &Image, transform: Affine) -> ShadowResult<()>;
}

/// The container that lays out the shadowed view.
pub trait HostContainer {
    /// Whether the container clips its children to their own bounds.
    fn set_clip_children(&mut self, clip: bool);
}

/// CPU canvas over a premultiplied RGBA8 surface.
///
/// `viewport` is the hosting view's clip. When the container stops clipping children the clip
/// widens to the whole surface, which lets shadows spill past the view.
#[derive(Debug)]
pub struct PixmapCanvas {
    target: Image,
    viewport: IRect,
    clip_children: bool,
    clip: IRect,
    stack: Vec<IRect>,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32, viewport: IRect) -> ShadowResult<Self> {
        let target = Image::transparent(width, height)?;
        let clip = viewport.intersect(IRect::from_size(width, height));
        Ok(Self {
            target,
            viewport,
            clip_children: true,
            clip,
            stack: Vec::new(),
        })
    }

    /// Fill the whole surface with a premultiplied color, ignoring the clip.
    pub fn clear(&mut self, premul_rgba: [u8; 4]) {
        for px in self.target.data_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul_rgba);
        }
    }

    pub fn image(&self) -> &Image {
        &self.target
    }

    pub fn into_image(self) -> Image {
        self.target
    }

    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn base_clip(&self) -> IRect {
        let surface = IRect::from_size(self.target.width(), self.target.height());
        if self.clip_children {
            self.viewport.intersect(surface)
        } else {
            surface
        }
    }
}

impl ShadowCanvas for PixmapCanvas {
    fn clip_bounds(&self) -> IRect {
        self.clip
    }

    fn save(&mut self) {
        self.stack.push(self.clip);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(clip) => self.clip = clip,
            None => tracing::warn!("canvas restore without matching save"),
        }
    }

    fn clip_rect(&mut self, rect: IRect) {
        self.clip = self.clip.intersect(rect);
    }

    fn draw_image(&mut self, image: &Image, transform: Affine) -> ShadowResult<()> {
        raster::draw_image(&mut self.target, image, transform, self.clip)
    }
}

impl HostContainer for PixmapCanvas {
    fn set_clip_children(&mut self, clip: bool) {
        self.clip_children = clip;
        if self.stack.is_empty() {
            self.clip = self.base_clip();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
