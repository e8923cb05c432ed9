//! # Error Types
//!
//! Error types for rendering operations. Every fallible operation returns a
//! [`Graph3dResult`]; callers that propagate a failure wrap it with the
//! component and operation they were running, so the final error reads as a
//! breadcrumb trail from the outermost call down to the root cause.
//!
//! ## Error Policy
//!
//! - Malformed build parameters fail construction, no object is produced
//! - Operation failures are returned, never stored in shared state
//! - Degenerate geometry (zero-length normals, near-camera depth) is not an
//!   error, the math kernel substitutes guard values instead

use ::config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during rendering operations.
///
/// ## Example
///
/// ```rust
/// use graph3d::error::{Graph3dError, ResultExt};
/// use graph3d::primitives::Plane3D;
///
/// let err = Plane3D::new(2, 10.0, 10.0, 10.0, 10.0, 0.0, 1.0)
///     .build()
///     .context("Scene", "load_floor")
///     .unwrap_err();
/// assert!(err.to_string().starts_with("Scene::load_floor"));
/// assert!(matches!(err.root(), Graph3dError::InvalidParameter { .. }));
/// ```
#[derive(Error, Debug)]
pub enum Graph3dError {
    /// A builder or constructor received parameters it cannot work with.
    #[error("invalid parameter for {component}: {message}")]
    InvalidParameter {
        /// Component that rejected the parameter.
        component: &'static str,
        /// What was wrong.
        message: String,
    },

    /// An index addressed past the end of a buffer, slot array or surface.
    #[error("{what} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// Name of the indexed collection.
        what: &'static str,
        /// Offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },

    /// A destination buffer is shorter than its source.
    #[error("destination buffer holds {destination} points, source holds {source_len}")]
    BufferSizeMismatch {
        /// Number of source points.
        source_len: usize,
        /// Number of destination points.
        destination: usize,
    },

    /// Spot light inner cone is wider than its outer cone.
    #[error("inner cone cosine {inner} cannot be below outer cone cosine {outer}")]
    InvalidLightCone {
        /// Cosine of the inner (full intensity) cone.
        inner: f32,
        /// Cosine of the outer (cut-off) cone.
        outer: f32,
    },

    /// Mesh text could not be parsed.
    #[error("mesh format error at line {line}: {message}")]
    Format {
        /// One-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// Reading or writing a mesh stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine settings failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A failure annotated with the component and operation it passed through.
    #[error("{component}::{operation}: {source}")]
    Context {
        /// Component that propagated the failure.
        component: &'static str,
        /// Operation that was running.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<Graph3dError>,
    },
}

impl Graph3dError {
    /// Shorthand for [`Graph3dError::InvalidParameter`].
    pub fn invalid(component: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            component,
            message: message.into(),
        }
    }

    /// Wraps this error with the component and operation that propagated it.
    pub fn context(self, component: &'static str, operation: &'static str) -> Self {
        Self::Context {
            component,
            operation,
            source: Box::new(self),
        }
    }

    /// Innermost error of a context chain.
    pub fn root(&self) -> &Graph3dError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// `(component, operation)` pairs of a context chain, outermost first.
    pub fn breadcrumbs(&self) -> Vec<(&'static str, &'static str)> {
        let mut trail = Vec::new();
        let mut current = self;
        while let Self::Context {
            component,
            operation,
            source,
        } = current
        {
            trail.push((*component, *operation));
            current = source.as_ref();
        }
        trail
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for rendering operations.
pub type Graph3dResult<T> = Result<T, Graph3dError>;

/// Adds breadcrumb context to a failing [`Graph3dResult`].
pub trait ResultExt<T> {
    /// Wraps the error, if any, with `component::operation`.
    fn context(self, component: &'static str, operation: &'static str) -> Graph3dResult<T>;
}

impl<T> ResultExt<T> for Graph3dResult<T> {
    fn context(self, component: &'static str, operation: &'static str) -> Graph3dResult<T> {
        self.map_err(|e| e.context(component, operation))
    }
}

// =============================================================================
// TESTS
// =============================================================================
