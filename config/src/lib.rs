//! # Config Crate
//!
//! Centralized configuration constants for the graph3d software renderer.
//! Every clamp, guard threshold and tunable default used by the rendering
//! pipeline is defined here so the engine crates never carry bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MAX_SCREEN_VALUE, MIN_PERSPECTIVE_K};
//!
//! // Projected coordinates are clamped to the screen value range
//! let projected: f32 = 1.0e12;
//! let clamped = projected.clamp(-MAX_SCREEN_VALUE, MAX_SCREEN_VALUE);
//! assert_eq!(clamped, MAX_SCREEN_VALUE);
//!
//! // The perspective coefficient never drops below its minimum
//! let k = 0.25_f32.max(MIN_PERSPECTIVE_K);
//! assert_eq!(k, 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Degenerate Guards Live Here**: thresholds that replace division by a
//!   near-zero length are named, not inlined
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
