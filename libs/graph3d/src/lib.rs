//! # graph3d
//!
//! CPU software 3D renderer: meshes are deformed in camera space, projected
//! to the screen, culled, lit per polygon, depth ordered and handed to an
//! abstract drawing surface as 2D primitives.
//!
//! ## Architecture
//!
//! ```text
//! core (points, rotation, projection, normals)
//!   → model (vertex buffers, polygons, active stack)
//!   → lighting + sort
//!   → collection (k-way merge across models)
//!   → surface (partitioned rasterization)
//! ```
//!
//! [`pipeline::FramePipeline`] strings the stages together for one frame.
//!
//! ## Example
//!
//! ```rust
//! use graph3d::config::EngineConfig;
//! use graph3d::core::angle::{Axis3D, RADIAN_90};
//! use graph3d::lighting::Light;
//! use graph3d::core::color::Color;
//! use graph3d::model::PolygonSide;
//! use graph3d::pipeline::FramePipeline;
//! use graph3d::primitives::CellPlane3D;
//! use graph3d::surface::{DrawingSurface, RecordingSurface};
//!
//! let mut floor = CellPlane3D::new(5, 5, 100.0, 100.0).build().unwrap();
//! floor.vertices_mut().rotate(-RADIAN_90, Axis3D::OXyz);
//! floor.vertices_mut().move_by(0.0, 0.0, 300.0);
//!
//! let surface = RecordingSurface::new(640, 480, 4).unwrap();
//! surface.clear_surfaces(Color::BLACK).unwrap();
//! let light = Light::Ambient { color: Color::WHITE, power: 0.5 };
//! FramePipeline::new(EngineConfig::default())
//!     .render_model(&mut floor, &[light], &surface, PolygonSide::Auto)
//!     .unwrap();
//! surface.merge_buffers().unwrap();
//! surface.render(0).unwrap();
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod lighting;
pub mod lod;
pub mod model;
pub mod pipeline;
pub mod primitives;
pub mod sort;
pub mod surface;
pub mod unit;

// Re-export public API
pub use crate::collection::{ModelCollectionController, PolygonRef};
pub use crate::config::EngineConfig;
pub use crate::core::color::Color;
pub use crate::core::point::{Point2D, Point3D};
pub use crate::error::{Graph3dError, Graph3dResult};
pub use crate::lighting::{Fog, Light};
pub use crate::model::{Polygon3D, PolygonSide, VolumetricModel};
pub use crate::pipeline::FramePipeline;
pub use crate::surface::{DrawingSurface, RecordingSurface};
