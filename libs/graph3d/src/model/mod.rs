//! Mesh data: vertex buffers, polygons and the active-polygon stack.
//!
//! A [`VolumetricModel`] owns a [`VertexModel`] with three equally long
//! buffers (rest pose, camera space, screen space), its [`Polygon3D`] list and
//! an [`ActiveIndexes`] stack naming the polygons that survived this frame's
//! filters. Shape generators implement [`ShapeBuilder`] and tag the model with
//! a [`ModelKind`].

pub mod active;
pub mod kind;
pub mod polygon;
pub mod vertex;
pub mod volumetric;

pub use active::ActiveIndexes;
pub use kind::{ModelKind, ShapeBuilder};
pub use polygon::{FillType, Polygon3D, PolygonSide};
pub use vertex::{VertexModel, VertexSource};
pub use volumetric::VolumetricModel;
