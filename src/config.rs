//! Widget configuration.
//!
//! Field names follow the view's XML layout attributes (`compatElevation`,
//! `clipShadow`, `forceClip`, `isTranslucent`); snake_case spellings are accepted as well.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ShadowError, ShadowResult};
use crate::render::backend::BackendSettings;
use crate::render::compositor::ShadowParams;

/// Initial elevation, display flags and backend settings for a compositor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowConfig {
    /// Elevation in device-independent units.
    #[serde(alias = "compatElevation")]
    pub elevation_dp: f32,
    /// Pixels per device-independent unit.
    pub density: f32,
    #[serde(alias = "clipShadow")]
    pub clip_shadow: bool,
    #[serde(alias = "forceClip")]
    pub force_clip: bool,
    #[serde(alias = "isTranslucent")]
    pub translucent: bool,
    #[serde(alias = "clipInsetPx")]
    pub clip_inset_px: Option<i32>,
    pub backend: BackendSettings,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            elevation_dp: 0.0,
            density: 1.0,
            clip_shadow: false,
            force_clip: false,
            translucent: false,
            clip_inset_px: None,
            backend: BackendSettings::default(),
        }
    }
}

impl ShadowConfig {
    pub fn from_json_str(s: &str) -> ShadowResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ShadowError::config(format!("parse shadow config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ShadowResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read shadow config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ShadowResult<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ShadowError::InvalidDensity(self.density));
        }
        if !self.elevation_dp.is_finite() {
            return Err(ShadowError::config("elevation_dp must be finite"));
        }
        if let Some(inset) = self.clip_inset_px
            && inset < 0
        {
            return Err(ShadowError::config("clip_inset_px must be >= 0"));
        }
        if let Some(n) = self.backend.threads
            && n == 0
        {
            return Err(ShadowError::config("backend.threads must be >= 1 when set"));
        }
        Ok(())
    }

    pub fn params(&self) -> ShadowParams {
        ShadowParams {
            clip_shadow: self.clip_shadow,
            force_clip: self.force_clip,
            translucent: self.translucent,
            clip_inset_px: self.clip_inset_px,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
