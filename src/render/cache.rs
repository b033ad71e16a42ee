use std::sync::Arc;

use crate::effects::elevation::BlurRadius;
use crate::surface::image::Image;

/// Observable state of a [`ShadowCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowState {
    /// No matte matches the current inputs.
    Empty,
    /// The cached matte matches the current inputs.
    Ready,
}

/// A generated matte together with the radius it was blurred with.
#[derive(Clone, Debug)]
pub struct CachedShadow {
    pub matte: Arc<Image>,
    pub radius: BlurRadius,
}

/// Single-slot matte cache keyed by a generation stamp.
///
/// Every input change goes through [`ShadowCache::bump`], which advances the generation and drops
/// the slot. A stored matte is only returned while the generation it was built for is current.
#[derive(Debug, Default)]
pub struct ShadowCache {
    generation: u64,
    slot: Option<(u64, CachedShadow)>,
}

impl ShadowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate: advance the generation and free the cached matte.
    pub fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.slot.take().is_some() {
            tracing::debug!(generation = self.generation, "shadow matte invalidated");
        }
    }

    pub fn state(&self) -> ShadowState {
        match &self.slot {
            Some((generation, _)) if *generation == self.generation => ShadowState::Ready,
            _ => ShadowState::Empty,
        }
    }

    pub fn get(&self) -> Option<&CachedShadow> {
        match &self.slot {
            Some((generation, shadow)) if *generation == self.generation => Some(shadow),
            _ => None,
        }
    }

    /// Store a matte for the current generation, replacing any previous one.
    pub fn store(&mut self, shadow: CachedShadow) -> &CachedShadow {
        let (_, stored) = self.slot.insert((self.generation, shadow));
        stored
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
