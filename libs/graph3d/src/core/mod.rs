//! Core value types and the stateless math kernel.
//!
//! Includes the point aliases (`Point3D`, `Point2D`), angles and axes, ARGB
//! colours, and the transform, projection and normal helpers reused by every
//! later stage.

pub mod angle;
pub mod color;
pub mod normal;
pub mod point;
pub mod projection;
pub mod transform;
