use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Fps;
use crate::foundation::error::{GreenkeyError, GreenkeyResult};
use crate::keying::filter::KeyingMode;
use crate::keying::threshold::Threshold;

/// Compositor configuration.
///
/// Every field has a default, so `{}` is a valid config document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorConfig {
    /// Green-screen classification.
    pub threshold: Threshold,
    /// How long the host waits for the video before revealing the surface anyway.
    pub fallback_timeout_ms: u64,
    /// Display refresh rate used by hosts that own a [`crate::FrameClock`].
    pub refresh: Fps,
    /// Sequential or row-parallel keying.
    pub keying: KeyingMode,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::DEFAULT,
            fallback_timeout_ms: 1500,
            refresh: Fps::default(),
            keying: KeyingMode::Sequential,
        }
    }
}

impl CompositorConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> GreenkeyResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| GreenkeyError::config(format!("invalid config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> GreenkeyResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            GreenkeyError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> GreenkeyResult<()> {
        self.threshold.validate()?;
        Fps::new(self.refresh.num, self.refresh.den)?;
        Ok(())
    }

    /// Fallback timeout as a [`Duration`].
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
