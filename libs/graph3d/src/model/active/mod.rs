//! The active-polygon stack.
//!
//! An arena holding a permutation of `0..capacity` plus a live length. The
//! live prefix names the polygons still in play this frame; filters shrink it
//! by swapping removed entries past the end, so the arena stays a permutation
//! and a reset restores every index without reallocating.

/// Arena of polygon indexes with a live prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveIndexes {
    slots: Vec<usize>,
    len: usize,
}

impl ActiveIndexes {
    /// Creates an arena over `0..capacity`, all live.
    pub fn new(capacity: usize) -> Self {
        let mut active = Self::default();
        active.reset(capacity);
        active
    }

    /// Resizes the arena to `capacity` and makes every index live in
    /// ascending order.
    pub fn reset(&mut self, capacity: usize) {
        self.slots.clear();
        self.slots.extend(0..capacity);
        self.len = capacity;
    }

    /// Restores the identity order and full length without resizing.
    pub fn reset_identity(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = i;
        }
        self.len = self.slots.len();
    }

    /// Live indexes.
    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }

    /// Live indexes, for in-place sorting.
    pub fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.slots[..self.len]
    }

    /// The whole arena including removed entries.
    pub fn arena(&self) -> &[usize] {
        &self.slots
    }

    /// Number of live indexes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Arena size.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True when no index is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every live index.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Keeps the live indexes for which `keep` holds and returns how many
    /// were removed. Removal swaps with the last live entry, so the order of
    /// the survivors is not preserved.
    ///
    /// # Examples
    /// ```
    /// use graph3d::model::ActiveIndexes;
    /// let mut active = ActiveIndexes::new(5);
    /// assert_eq!(active.retain_by(|i| i % 2 == 0), 2);
    /// let mut live = active.as_slice().to_vec();
    /// live.sort();
    /// assert_eq!(live, vec![0, 2, 4]);
    /// ```
    pub fn retain_by<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        let before = self.len;
        let mut i = 0;
        while i < self.len {
            if keep(self.slots[i]) {
                i += 1;
            } else {
                self.len -= 1;
                self.slots.swap(i, self.len);
            }
        }
        before - self.len
    }
}

#[cfg(test)]
mod tests;
