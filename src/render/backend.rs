use crate::effects::blur::BlurFilter;
use crate::effects::matte::AlphaMatteExtractor;
use crate::foundation::error::{ShadowError, ShadowResult};

/// A filtering backend: matte extraction plus blur, with instance-scoped resources.
///
/// Kernel tables and scratch buffers are acquired on first use and dropped by
/// [`ShadowBackend::release_resources`]. Owners call it on teardown.
pub trait ShadowBackend: AlphaMatteExtractor + BlurFilter + Send {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Free every lazily acquired buffer and table.
    fn release_resources(&mut self);

    /// Snapshot of currently held resources.
    fn resources(&self) -> BackendResources;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Deterministic CPU implementation (color matrix + separable Q16 blur).
    Cpu,
}

/// Backend construction settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendSettings {
    /// Blur rows on a dedicated rayon pool. Output is identical either way.
    pub parallel_rows: bool,
    /// Worker threads for `parallel_rows`. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Kernel tables kept before the cache is flushed. `0` disables caching.
    pub max_cached_kernels: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            parallel_rows: false,
            threads: None,
            max_cached_kernels: 32,
        }
    }
}

/// Resources currently held by a backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackendResources {
    /// Bytes held in scratch buffers.
    pub scratch_bytes: usize,
    /// Number of cached blur kernels.
    pub cached_kernels: usize,
}

/// Create a filtering backend.
///
/// Failures here are fatal to the owner: a compositor without a working backend would render
/// an unshadowed image with no indication of the problem.
pub fn create_backend(
    kind: BackendKind,
    settings: &BackendSettings,
) -> ShadowResult<Box<dyn ShadowBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        )?)),
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ShadowResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ShadowError::backend("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("shadow-blur-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ShadowError::backend(format!("failed to build rayon thread pool: {e}")))
}
