//! Several models drawn as one depth-ordered scene.
//!
//! Each slot holds an optional [`VolumetricModel`] prepared independently
//! (projected, filtered, lit and sorted). [`ModelCollectionController::merge_active_polygon`]
//! then k-way merges the per-model stacks into one shared buffer of
//! [`PolygonRef`]s, farthest first, so overlapping models interleave
//! correctly under the painter's algorithm.

use log::{debug, trace};

use crate::error::{Graph3dError, Graph3dResult};
use crate::model::{Polygon3D, VolumetricModel};
use crate::sort::merge_sorted_runs;

/// A polygon of one slot's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PolygonRef {
    /// Slot index.
    pub model_index: usize,
    /// Polygon index within that slot's model.
    pub polygon_index: usize,
}

/// Fixed number of model slots plus the merged polygon buffer.
#[derive(Debug, Clone)]
pub struct ModelCollectionController {
    slots: Vec<Option<VolumetricModel>>,
    buffer: Vec<PolygonRef>,
    active_count: usize,
    closed_surface: bool,
}

impl ModelCollectionController {
    /// Creates a collection with `slot_count` empty slots.
    ///
    /// # Examples
    /// ```
    /// use graph3d::collection::ModelCollectionController;
    /// assert_eq!(ModelCollectionController::new(3).unwrap().slot_count(), 3);
    /// assert!(ModelCollectionController::new(0).is_err());
    /// ```
    pub fn new(slot_count: usize) -> Graph3dResult<Self> {
        if slot_count == 0 {
            return Err(Graph3dError::invalid(
                "ModelCollectionController",
                "a collection needs at least one slot",
            ));
        }
        Ok(Self {
            slots: (0..slot_count).map(|_| None).collect(),
            buffer: Vec::new(),
            active_count: 0,
            closed_surface: true,
        })
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots.
    pub fn slots(&self) -> &[Option<VolumetricModel>] {
        &self.slots
    }

    /// Model in slot `index`, if the slot exists and is filled.
    pub fn slot(&self, index: usize) -> Option<&VolumetricModel> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Mutable model in slot `index`.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut VolumetricModel> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Iterates the filled slots mutably.
    pub fn models_mut(&mut self) -> impl Iterator<Item = &mut VolumetricModel> {
        self.slots.iter_mut().flatten()
    }

    /// Puts `model` into slot `index` and returns the previous occupant.
    pub fn set_slot(
        &mut self,
        index: usize,
        model: Option<VolumetricModel>,
    ) -> Graph3dResult<Option<VolumetricModel>> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(Graph3dError::IndexOutOfRange {
            what: "slot",
            index,
            len,
        })?;
        Ok(std::mem::replace(slot, model))
    }

    /// Sizes the merged buffer for the polygons of every filled slot.
    ///
    /// A single-slot collection draws straight from its model, so only the
    /// active count is taken.
    pub fn create_active_polygon_buffer(&mut self) {
        if self.slots.len() == 1 {
            self.active_count = self.slot(0).map_or(0, |m| m.active().len());
            self.buffer.clear();
            return;
        }
        let capacity: usize = self
            .slots
            .iter()
            .flatten()
            .map(|m| m.polygons().len())
            .sum();
        self.buffer.clear();
        self.buffer.reserve(capacity);
        debug!("collection buffer sized for {capacity} polygons");
    }

    /// Merges the sorted per-model stacks into the shared buffer, farthest
    /// first, and combines the closed-surface flags.
    pub fn merge_active_polygon(&mut self) {
        let mut runs: Vec<&[usize]> = Vec::with_capacity(self.slots.len());
        let mut owners: Vec<usize> = Vec::with_capacity(self.slots.len());
        let mut closed = true;
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(model) => {
                    closed &= model.closed_surface();
                    runs.push(model.active_polygons());
                    owners.push(index);
                }
                None => trace!("collection slot {index} is empty, skipping"),
            }
        }
        let count: usize = runs.iter().map(|r| r.len()).sum();
        self.active_count = count;
        self.closed_surface = closed;
        if self.slots.len() == 1 {
            return;
        }

        self.buffer.clear();
        self.buffer.resize(count, PolygonRef::default());
        let slots = &self.slots;
        let buffer = &mut self.buffer;
        let mut write = count;
        merge_sorted_runs(
            &runs,
            |run, polygon| {
                slots[owners[run]]
                    .as_ref()
                    .map_or(f32::NEG_INFINITY, |m| m.polygons()[polygon].center.z)
            },
            |run, polygon| {
                write -= 1;
                buffer[write] = PolygonRef {
                    model_index: owners[run],
                    polygon_index: polygon,
                };
            },
        );
        debug!("merged {count} polygons from {} models", runs.len());
    }

    /// Merged polygons, farthest first. Empty for a single-slot collection.
    pub fn active_polygons(&self) -> &[PolygonRef] {
        &self.buffer
    }

    /// Number of polygons to draw.
    pub fn active_polygon_count(&self) -> usize {
        self.active_count
    }

    /// True when every filled slot is a closed surface.
    pub fn closed_surface(&self) -> bool {
        self.closed_surface
    }

    /// Polygon behind a merged reference.
    pub fn polygon(&self, r: PolygonRef) -> Option<(&VolumetricModel, &Polygon3D)> {
        let model = self.slot(r.model_index)?;
        let polygon = model.polygons().get(r.polygon_index)?;
        Some((model, polygon))
    }
}

#[cfg(test)]
mod tests;
