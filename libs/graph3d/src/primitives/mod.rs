//! Parametric shape generators.
//!
//! Each generator implements [`ShapeBuilder`](crate::model::ShapeBuilder)
//! and can describe itself as `key=value` properties, which is how its
//! parameters travel in the `#Properties#` section of a mesh file.

mod cell_plane;
mod complex;
mod plane;

use std::str::FromStr;

use crate::error::{Graph3dError, Graph3dResult};

pub use cell_plane::CellPlane3D;
pub use complex::{merge_near_vertex, merge_object};
pub use plane::Plane3D;

/// Ordered `key=value` pairs.
pub type Properties = Vec<(String, String)>;

/// Parses property `key` if present; later duplicates win.
fn property<T: FromStr>(props: &[(String, String)], component: &'static str, key: &str) -> Graph3dResult<Option<T>> {
    match props.iter().rev().find(|(k, _)| k == key) {
        Some((_, value)) => value
            .parse()
            .map(Some)
            .map_err(|_| Graph3dError::invalid(component, format!("bad value for {key}: {value}"))),
        None => Ok(None),
    }
}

fn float(value: f32) -> String {
    format!("{value:.4}")
}
