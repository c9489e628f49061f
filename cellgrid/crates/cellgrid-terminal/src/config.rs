//! Engine configuration.
//!
//! Configuration is plain serde data with a default for every field, so a
//! TOML file only needs the keys it changes:
//!
//! ```toml
//! target_fps = 20
//! run_policy = "wrapping"
//!
//! [palette]
//! foreground = "Yellow"
//! background = "dark_blue"
//! ```

use std::path::Path;

use cellgrid_buffer::{Parallelism, RunPolicy};
use cellgrid_core::{Error, Palette, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Frame engine and application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Global default colors.
    pub palette: Palette,
    /// Minimum grid cell count before row-parallel work is used.
    pub parallel_threshold: usize,
    /// Worker threads for row-parallel work; 0 uses one per logical CPU.
    pub worker_threads: usize,
    /// How changed cells are grouped into terminal writes.
    pub run_policy: RunPolicy,
    /// Normal frame rate.
    pub target_fps: u32,
    /// Frame rate while live.
    pub max_fps: u32,
    /// Frames kept at `max_fps` after a frame that wrote cells or
    /// delivered a key.
    pub live_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: Palette::DEFAULT,
            parallel_threshold: Parallelism::DEFAULT_THRESHOLD,
            worker_threads: 0,
            run_policy: RunPolicy::RowBounded,
            target_fps: 30,
            max_fps: 60,
            live_frames: 8,
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Returns the row-parallel policy described by this configuration.
    pub fn parallelism(&self) -> Parallelism {
        Parallelism::new(self.parallel_threshold, self.worker_threads)
    }

    /// Sets the default colors.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the parallel threshold and worker count.
    pub fn with_parallelism(mut self, threshold: usize, workers: usize) -> Self {
        self.parallel_threshold = threshold;
        self.worker_threads = workers;
        self
    }

    /// Sets the run grouping policy.
    pub fn with_run_policy(mut self, policy: RunPolicy) -> Self {
        self.run_policy = policy;
        self
    }

    /// Sets target and maximum frame rates.
    pub fn with_fps(mut self, target_fps: u32, max_fps: u32) -> Self {
        self.target_fps = target_fps;
        self.max_fps = max_fps;
        self
    }

    /// Sets how many frames stay live after activity.
    pub fn with_live_frames(mut self, frames: u32) -> Self {
        self.live_frames = frames;
        self
    }
}
