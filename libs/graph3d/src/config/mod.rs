//! Engine-level configuration helpers building on the shared `config` crate.
//!
//! [`EngineConfig`] is what the frame pipeline reads; it forwards validation to
//! [`EngineSettings`] and fills the worker count from the host when asked.

use std::sync::OnceLock;

use ::config::constants::{ConfigError, EngineSettings};

/// Number of workers available for parallel sections.
///
/// Uses `available_parallelism()` when available, falling back to 1. The
/// value is computed once per process.
pub fn available_workers() -> usize {
    static SIZE: OnceLock<usize> = OnceLock::new();
    *SIZE.get_or_init(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// Renderer configuration wrapper.
///
/// # Examples
/// ```
/// use graph3d::config::EngineConfig;
/// let cfg = EngineConfig::default();
/// assert!(cfg.perspective_k >= 1.0);
/// assert!(cfg.worker_count >= 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Perspective coefficient used for camera to screen projection.
    pub perspective_k: f32,
    /// Screen depth of the near culling plane.
    pub near_z: f32,
    /// Screen depth of the far culling plane; not above `near_z` disables it.
    pub far_z: f32,
    /// Depth where fog starts.
    pub min_fog_distance: f32,
    /// Depth where fog is total.
    pub full_fog_distance: f32,
    /// Workers the engine may fan out to; 1 keeps every stage serial.
    pub worker_count: usize,
}

impl EngineConfig {
    /// Creates a configuration from validated settings.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EngineSettings;
    /// use graph3d::config::EngineConfig;
    /// let settings = EngineSettings::new(800.0, 1.0, 0.0, 0.0, 3000.0, 2).unwrap();
    /// let cfg = EngineConfig::new(settings);
    /// assert!(cfg.is_parallel());
    /// ```
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            perspective_k: settings.perspective_k,
            near_z: settings.near_z,
            far_z: settings.far_z,
            min_fog_distance: settings.min_fog_distance,
            full_fog_distance: settings.full_fog_distance,
            worker_count: settings.worker_count,
        }
    }

    /// Validates raw values through [`EngineSettings::new`].
    pub fn from_values(
        perspective_k: f32,
        near_z: f32,
        far_z: f32,
        min_fog_distance: f32,
        full_fog_distance: f32,
        worker_count: usize,
    ) -> Result<Self, ConfigError> {
        EngineSettings::new(
            perspective_k,
            near_z,
            far_z,
            min_fog_distance,
            full_fog_distance,
            worker_count,
        )
        .map(Self::new)
    }

    /// Forces every stage onto the calling thread.
    pub fn serial(mut self) -> Self {
        self.worker_count = 1;
        self
    }

    /// True when stages should use their parallel variants.
    pub fn is_parallel(&self) -> bool {
        self.worker_count > 1
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut cfg = Self::new(EngineSettings::default());
        cfg.worker_count = available_workers();
        cfg
    }
}
