//! Level-of-detail selection by apparent size.
//!
//! A selector holds one model per detail level, coarsest first, each with
//! the apparent size from which it should be used. Every frame the selector
//! projects its reference size at its position and picks the finest level
//! whose threshold the projected size still reaches.

use log::trace;

use crate::core::angle::Axis3D;
use crate::core::point::Point3D;
use crate::core::projection::project_value;
use crate::core::transform::{move_point, rotate_point};
use crate::error::{Graph3dError, Graph3dResult};
use crate::model::VolumetricModel;

/// One detail level.
#[derive(Debug, Clone, Default)]
pub struct DetailLevel {
    /// Model drawn at this level, if assigned.
    pub model: Option<VolumetricModel>,
    /// Smallest apparent size at which this level is used.
    pub min_size: f32,
}

/// Picks a detail level from the projected size of a reference length.
///
/// # Examples
/// ```
/// use graph3d::core::point::Point3D;
/// use graph3d::lod::ModelDetailSelector;
/// let mut lod = ModelDetailSelector::new(3).unwrap();
/// lod.entries_mut()[1].min_size = 20.0;
/// lod.entries_mut()[2].min_size = 100.0;
/// lod.source_size = 10.0;
/// lod.position = Point3D::new(0.0, 0.0, 200.0);
/// // 10 units at depth 200 with k = 1000 look 50 pixels wide.
/// assert_eq!(lod.select_detail_index(1000.0), 1);
/// assert_eq!(lod.presentation_size(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct ModelDetailSelector {
    entries: Vec<DetailLevel>,
    /// Camera-space position the apparent size is measured at.
    pub position: Point3D,
    /// Reference length in world units.
    pub source_size: f32,
    presentation_size: f32,
}

impl ModelDetailSelector {
    /// Creates a selector with `count` empty levels, all with threshold 0.
    pub fn new(count: usize) -> Graph3dResult<Self> {
        if count == 0 {
            return Err(Graph3dError::invalid(
                "ModelDetailSelector",
                "a selector needs at least one detail level",
            ));
        }
        Ok(Self {
            entries: vec![DetailLevel::default(); count],
            position: Point3D::ZERO,
            source_size: 0.0,
            presentation_size: 0.0,
        })
    }

    /// Detail levels, coarsest first.
    pub fn entries(&self) -> &[DetailLevel] {
        &self.entries
    }

    /// Mutable detail levels.
    pub fn entries_mut(&mut self) -> &mut [DetailLevel] {
        &mut self.entries
    }

    /// Assigns level `index`.
    pub fn set_entry(&mut self, index: usize, model: VolumetricModel, min_size: f32) -> Graph3dResult<()> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or(Graph3dError::IndexOutOfRange {
            what: "detail level",
            index,
            len,
        })?;
        *entry = DetailLevel {
            model: Some(model),
            min_size,
        };
        Ok(())
    }

    /// Apparent size computed by the last selection.
    pub fn presentation_size(&self) -> f32 {
        self.presentation_size
    }

    /// Projects the reference size with perspective `k` and returns the
    /// level to draw: the one before the first level whose threshold is
    /// above the apparent size, or the last level.
    pub fn select_detail_index(&mut self, k: f32) -> usize {
        self.presentation_size = project_value(self.position.z, self.source_size, k);
        let size = self.presentation_size;
        let index = self
            .entries
            .iter()
            .skip(1)
            .position(|e| size < e.min_size)
            .unwrap_or(self.entries.len() - 1);
        trace!("apparent size {size}: detail level {index}");
        index
    }

    /// Model of the selected level, if one is assigned.
    pub fn select_model(&mut self, k: f32) -> Option<&VolumetricModel> {
        let index = self.select_detail_index(k);
        self.entries[index].model.as_ref()
    }

    /// Translates the position.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        move_point(dx, dy, dz, &mut self.position);
    }

    /// Places the position at `target`.
    pub fn move_to(&mut self, target: Point3D) {
        self.position = target;
    }

    /// Rotates the position about the origin.
    pub fn rotate(&mut self, angle: f32, axis: Axis3D) {
        rotate_point(angle, axis, &mut self.position);
    }
}
