use std::collections::HashMap;
use std::sync::Arc;

use crate::effects::blur::{BlurFilter, blur_rgba8_q16, gaussian_kernel_q16};
use crate::effects::elevation::BlurRadius;
use crate::effects::matte::{AlphaMatteExtractor, extract_matte};
use crate::foundation::error::{ShadowError, ShadowResult};
use crate::render::backend::{
    BackendKind, BackendResources, BackendSettings, ShadowBackend, build_thread_pool,
};
use crate::surface::image::Image;

/// CPU filtering backend.
///
/// Deterministic: the same input and radius always produce the same bytes, with or without
/// `parallel_rows`.
pub struct CpuBackend {
    settings: BackendSettings,
    pool: Option<rayon::ThreadPool>,

    blur_kernel_cache: HashMap<u32, Arc<Vec<u32>>>,
    blur_scratch_a: Vec<u8>,
    blur_scratch_b: Vec<u8>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("settings", &self.settings)
            .field("resources", &self.resources())
            .finish()
    }
}

impl CpuBackend {
    pub fn new(settings: BackendSettings) -> ShadowResult<Self> {
        let pool = if settings.parallel_rows {
            Some(build_thread_pool(settings.threads)?)
        } else {
            None
        };
        Ok(Self {
            settings,
            pool,
            blur_kernel_cache: HashMap::new(),
            blur_scratch_a: Vec::new(),
            blur_scratch_b: Vec::new(),
        })
    }

    fn kernel_for(&mut self, radius: BlurRadius) -> Arc<Vec<u32>> {
        let key = radius.get().to_bits();
        if let Some(k) = self.blur_kernel_cache.get(&key) {
            return Arc::clone(k);
        }

        let k = Arc::new(gaussian_kernel_q16(radius));
        if self.settings.max_cached_kernels > 0 {
            if self.blur_kernel_cache.len() >= self.settings.max_cached_kernels {
                self.blur_kernel_cache.clear();
            }
            self.blur_kernel_cache.insert(key, Arc::clone(&k));
        }
        k
    }
}

impl AlphaMatteExtractor for CpuBackend {
    fn extract(&mut self, source: &Image, translucent: bool) -> ShadowResult<Image> {
        extract_matte(source, translucent)
    }
}

impl BlurFilter for CpuBackend {
    fn blur(&mut self, image: &mut Image, radius: BlurRadius) -> ShadowResult<()> {
        image.require_rgba8_premul()?;
        if radius.is_zero() {
            return Ok(());
        }

        let (w, h) = (image.width(), image.height());
        let expected = (w as usize)
            .checked_mul(h as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ShadowError::validation("blur buffer size overflow"))?;
        if image.data().len() != expected {
            return Err(ShadowError::validation(
                "blur expects a buffer matching width*height*4",
            ));
        }

        let kernel = self.kernel_for(radius);

        // Scratch is reused across draws; only the first blur of a given size allocates.
        self.blur_scratch_a.resize(expected, 0);
        self.blur_scratch_b.resize(expected, 0);
        self.blur_scratch_b.copy_from_slice(image.data());

        let src = &self.blur_scratch_b;
        let tmp = &mut self.blur_scratch_a;
        let dst = image.data_mut();
        match &self.pool {
            Some(pool) => pool.install(|| blur_rgba8_q16(src, dst, tmp, w, h, &kernel, true)),
            None => blur_rgba8_q16(src, dst, tmp, w, h, &kernel, false),
        }
        Ok(())
    }
}

impl ShadowBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn release_resources(&mut self) {
        let held = self.resources();
        self.blur_kernel_cache = HashMap::new();
        self.blur_scratch_a = Vec::new();
        self.blur_scratch_b = Vec::new();
        tracing::debug!(
            scratch_bytes = held.scratch_bytes,
            cached_kernels = held.cached_kernels,
            "released cpu backend resources"
        );
    }

    fn resources(&self) -> BackendResources {
        BackendResources {
            scratch_bytes: self.blur_scratch_a.capacity() + self.blur_scratch_b.capacity(),
            cached_kernels: self.blur_kernel_cache.len(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
