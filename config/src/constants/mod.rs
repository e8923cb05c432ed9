//! Centralized configuration values shared across the graph3d renderer.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PROJECTION CONSTANTS
// =============================================================================

/// Largest absolute value a projected screen coordinate may take.
///
/// Perspective division of points close to the camera plane can produce huge
/// values; anything beyond this bound is clamped instead of overflowing the
/// integer pixel range.
///
/// # Examples
/// ```
/// use config::constants::MAX_SCREEN_VALUE;
/// assert!(MAX_SCREEN_VALUE < i32::MAX as f32);
/// ```
pub const MAX_SCREEN_VALUE: f32 = 5.0e8;

/// Lower bound of the perspective coefficient `K`.
///
/// # Examples
/// ```
/// use config::constants::MIN_PERSPECTIVE_K;
/// assert_eq!(MIN_PERSPECTIVE_K, 1.0);
/// ```
pub const MIN_PERSPECTIVE_K: f32 = 1.0;

/// Depth below which vertices are projected as if they were at this depth.
///
/// # Examples
/// ```
/// use config::constants::MIN_PROJECTION_DEPTH;
/// let z: f32 = -3.0;
/// assert_eq!(z.max(MIN_PROJECTION_DEPTH), 1.0);
/// ```
pub const MIN_PROJECTION_DEPTH: f32 = 1.0;

/// Depth at or below which a point object counts as sitting on the camera.
///
/// # Examples
/// ```
/// use config::constants::{UNIT_FALLBACK_DEPTH, UNIT_MIN_PROJECTION_DEPTH};
/// assert!(UNIT_FALLBACK_DEPTH > UNIT_MIN_PROJECTION_DEPTH);
/// ```
pub const UNIT_MIN_PROJECTION_DEPTH: f32 = 0.001;

/// Depth substituted for point objects sitting on the camera.
///
/// # Examples
/// ```
/// use config::constants::UNIT_FALLBACK_DEPTH;
/// assert!(UNIT_FALLBACK_DEPTH > 0.0);
/// ```
pub const UNIT_FALLBACK_DEPTH: f32 = 0.1;

// =============================================================================
// DEGENERATE GEOMETRY GUARDS
// =============================================================================

/// Vector length under which normalization multiplies by `f32::MAX` instead of
/// dividing by the length.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_LENGTH_EPSILON;
/// assert!(NORMAL_LENGTH_EPSILON < 0.01);
/// ```
pub const NORMAL_LENGTH_EPSILON: f32 = 0.001;

/// Magnitude under which a screen-space normal Z component is quantized to 0.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_Z_EPSILON;
/// assert!(NORMAL_Z_EPSILON > 0.0);
/// ```
pub const NORMAL_Z_EPSILON: f32 = 0.001;

/// Distance under which a light-to-polygon vector is treated as degenerate.
///
/// # Examples
/// ```
/// use config::constants::{LIGHT_DISTANCE_EPSILON, NORMAL_LENGTH_EPSILON};
/// assert!(LIGHT_DISTANCE_EPSILON < NORMAL_LENGTH_EPSILON);
/// ```
pub const LIGHT_DISTANCE_EPSILON: f32 = 0.0001;

/// Minimum gap between the inner and outer spot cone cosines before the
/// intensity ramp is replaced by a hard edge.
///
/// # Examples
/// ```
/// use config::constants::SPOT_CONE_EPSILON;
/// assert!(SPOT_CONE_EPSILON > 0.0);
/// ```
pub const SPOT_CONE_EPSILON: f32 = 0.0001;

// =============================================================================
// SORTING CONSTANTS
// =============================================================================

/// Exponent applied to the element count to size the depth-sort groups.
///
/// # Examples
/// ```
/// use config::constants::SORT_GROUP_EXPONENT;
/// let step = (1000_f64).powf(SORT_GROUP_EXPONENT) as usize;
/// assert_eq!(step, 63);
/// ```
pub const SORT_GROUP_EXPONENT: f64 = 0.6;

/// Smallest group size used by the depth sorter.
///
/// # Examples
/// ```
/// use config::constants::MIN_SORT_GROUP;
/// assert_eq!(MIN_SORT_GROUP, 5);
/// ```
pub const MIN_SORT_GROUP: usize = 5;

// =============================================================================
// MATERIAL AND FOG DEFAULTS
// =============================================================================

/// Matte coefficient assigned to both sides of a freshly built polygon.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MATTE;
/// assert!((0.0..=1.0).contains(&DEFAULT_MATTE));
/// ```
pub const DEFAULT_MATTE: f32 = 0.5;

/// Depth at which fog starts blending into lit colours.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_FOG_DISTANCE;
/// assert_eq!(DEFAULT_MIN_FOG_DISTANCE, 0.0);
/// ```
pub const DEFAULT_MIN_FOG_DISTANCE: f32 = 0.0;

/// Depth from which fog fully replaces lit colours.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_FULL_FOG_DISTANCE, DEFAULT_MIN_FOG_DISTANCE};
/// assert!(DEFAULT_FULL_FOG_DISTANCE > DEFAULT_MIN_FOG_DISTANCE);
/// ```
pub const DEFAULT_FULL_FOG_DISTANCE: f32 = 5000.0;

// =============================================================================
// FRAME DEFAULTS
// =============================================================================

/// Perspective coefficient used when a caller does not pick one.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_PERSPECTIVE_K, MIN_PERSPECTIVE_K};
/// assert!(DEFAULT_PERSPECTIVE_K >= MIN_PERSPECTIVE_K);
/// ```
pub const DEFAULT_PERSPECTIVE_K: f32 = 1000.0;

/// Screen depth at or in front of which polygons are culled by the frame
/// pipeline.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_NEAR_Z;
/// assert!(DEFAULT_NEAR_Z >= 0.0);
/// ```
pub const DEFAULT_NEAR_Z: f32 = 1.0;

/// Screen depth at or beyond which polygons are culled by the frame pipeline.
/// A value not above the near plane disables far culling.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_FAR_Z, DEFAULT_NEAR_Z};
/// assert!(DEFAULT_FAR_Z > DEFAULT_NEAR_Z);
/// ```
pub const DEFAULT_FAR_Z: f32 = 100_000.0;

/// Immutable snapshot of renderer settings that can be shared between crates.
///
/// # Examples
/// ```
/// use config::constants::EngineSettings;
/// let settings = EngineSettings::default();
/// assert!(settings.perspective_k >= 1.0);
/// assert_eq!(settings.worker_count, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Perspective coefficient used for camera to screen projection.
    pub perspective_k: f32,
    /// Screen depth of the near culling plane.
    pub near_z: f32,
    /// Screen depth of the far culling plane.
    pub far_z: f32,
    /// Depth where fog starts.
    pub min_fog_distance: f32,
    /// Depth where fog is total.
    pub full_fog_distance: f32,
    /// Number of workers the engine may fan out to.
    pub worker_count: usize,
}

impl EngineSettings {
    /// Builds settings enforcing strict validation of the supplied values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EngineSettings;
    /// let settings = EngineSettings::new(500.0, 1.0, 0.0, 100.0, 4000.0, 4).expect("valid settings");
    /// assert_eq!(settings.worker_count, 4);
    /// ```
    pub fn new(
        perspective_k: f32,
        near_z: f32,
        far_z: f32,
        min_fog_distance: f32,
        full_fog_distance: f32,
        worker_count: usize,
    ) -> Result<Self, ConfigError> {
        if !(perspective_k >= MIN_PERSPECTIVE_K) {
            return Err(ConfigError::InvalidPerspective(perspective_k));
        }
        if !(full_fog_distance > min_fog_distance) {
            return Err(ConfigError::InvalidFogRange {
                min: min_fog_distance,
                full: full_fog_distance,
            });
        }
        if worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount(worker_count));
        }
        Ok(Self {
            perspective_k,
            near_z,
            far_z,
            min_fog_distance,
            full_fog_distance,
            worker_count,
        })
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            perspective_k: DEFAULT_PERSPECTIVE_K,
            near_z: DEFAULT_NEAR_Z,
            far_z: DEFAULT_FAR_Z,
            min_fog_distance: DEFAULT_MIN_FOG_DISTANCE,
            full_fog_distance: DEFAULT_FULL_FOG_DISTANCE,
            worker_count: 1,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the perspective coefficient is below its minimum or NaN.
    InvalidPerspective(f32),
    /// Raised when fog does not get denser with distance.
    InvalidFogRange {
        /// Depth where fog starts.
        min: f32,
        /// Depth where fog is total.
        full: f32,
    },
    /// Raised when no worker is allowed.
    InvalidWorkerCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPerspective(value) => {
                write!(f, "perspective_k must be >= {MIN_PERSPECTIVE_K}: {value}")
            }
            ConfigError::InvalidFogRange { min, full } => {
                write!(f, "full_fog_distance ({full}) must exceed min_fog_distance ({min})")
            }
            ConfigError::InvalidWorkerCount(value) => {
                write!(f, "worker_count must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
