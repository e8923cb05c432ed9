//! Painter's-algorithm depth sorter.
//!
//! Elements are split into groups of [`group_step`] elements, each group is
//! selection-sorted descending by key, and the groups are then k-way merged
//! by repeatedly draining the group whose tail (smallest remaining key) is
//! lowest until that tail exceeds the runner-up tail. Groups sort
//! independently, so the group phase fans out across rayon workers; the
//! merge is sequential.
//!
//! Keys compare with [`f32::total_cmp`], so NaN keys still terminate.

use std::cmp::Ordering;

use ::config::constants::{MIN_SORT_GROUP, SORT_GROUP_EXPONENT};
use log::trace;
use rayon::prelude::*;

use crate::core::point::Point3D;

/// Group size for `n` elements: `max(trunc(n^0.6), 5)`.
///
/// # Examples
/// ```
/// use graph3d::sort::group_step;
/// assert_eq!(group_step(0), 5);
/// assert_eq!(group_step(1000), 63);
/// ```
pub fn group_step(n: usize) -> usize {
    ((n as f64).powf(SORT_GROUP_EXPONENT) as usize).max(MIN_SORT_GROUP)
}

#[inline]
fn greater(a: f32, b: f32) -> bool {
    a.total_cmp(&b) == Ordering::Greater
}

/// Selection-sorts one group descending; among equal keys the first wins.
fn selection_sort_descending<T, K>(group: &mut [T], key: &K)
where
    T: Copy,
    K: Fn(T) -> f32,
{
    for i in 0..group.len() {
        let mut best = i;
        let mut best_key = key(group[i]);
        for j in (i + 1)..group.len() {
            let k = key(group[j]);
            if greater(k, best_key) {
                best = j;
                best_key = k;
            }
        }
        group.swap(i, best);
    }
}

/// Merges runs sorted descending and emits their elements in ascending key
/// order, each with the index of the run it came from.
///
/// Each run is consumed from its tail. The caller decides where emitted
/// elements go; emitting into a buffer filled from the back yields a
/// descending result.
pub fn merge_sorted_runs<T, K, E>(runs: &[&[T]], key: K, mut emit: E)
where
    T: Copy,
    K: Fn(usize, T) -> f32,
    E: FnMut(usize, T),
{
    let mut remaining: Vec<usize> = runs.iter().map(|r| r.len()).collect();
    let tail = |g: usize, remaining: &[usize]| key(g, runs[g][remaining[g] - 1]);

    let lowest_except = |skip: Option<usize>, remaining: &[usize]| {
        let mut best: Option<(usize, f32)> = None;
        for g in 0..runs.len() {
            if Some(g) == skip || remaining[g] == 0 {
                continue;
            }
            let k = tail(g, remaining);
            match best {
                Some((_, bk)) if !greater(bk, k) => {}
                _ => best = Some((g, k)),
            }
        }
        best.map(|(g, _)| g)
    };

    let Some(mut current) = lowest_except(None, &remaining) else {
        return;
    };
    loop {
        let next = match lowest_except(Some(current), &remaining) {
            Some(g) => g,
            None if remaining[current] == 0 => break,
            None => current,
        };
        while remaining[current] > 0
            && (remaining[next] == 0 || !greater(tail(current, &remaining), tail(next, &remaining)))
        {
            remaining[current] -= 1;
            emit(current, runs[current][remaining[current]]);
        }
        current = next;
    }
}

fn merge_groups<T, K>(values: &mut [T], step: usize, key: &K)
where
    T: Copy,
    K: Fn(T) -> f32,
{
    if values.len() <= step {
        return;
    }
    let mut ascending = Vec::with_capacity(values.len());
    {
        let runs: Vec<&[T]> = values.chunks(step).collect();
        merge_sorted_runs(&runs, |_, v| key(v), |_, v| ascending.push(v));
    }
    for (dst, src) in values.iter_mut().zip(ascending.into_iter().rev()) {
        *dst = src;
    }
}

/// Sorts `values` descending by `key` on the calling thread.
///
/// # Examples
/// ```
/// use graph3d::sort::group_sort_descending;
/// let depth = [3.0_f32, 9.0, 1.0, 7.0, 5.0, 2.0, 8.0];
/// let mut order: Vec<usize> = (0..depth.len()).collect();
/// group_sort_descending(&mut order, |i| depth[i]);
/// assert_eq!(order, vec![1, 6, 3, 4, 0, 5, 2]);
/// ```
pub fn group_sort_descending<T, K>(values: &mut [T], key: K)
where
    T: Copy,
    K: Fn(T) -> f32,
{
    let step = group_step(values.len());
    trace!("group sort: {} elements, step {step}", values.len());
    for group in values.chunks_mut(step) {
        selection_sort_descending(group, &key);
    }
    merge_groups(values, step, &key);
}

/// Same ordering as [`group_sort_descending`], with the groups sorted on the
/// rayon pool.
pub fn group_sort_descending_parallel<T, K>(values: &mut [T], key: K)
where
    T: Copy + Send + Sync,
    K: Fn(T) -> f32 + Sync,
{
    let step = group_step(values.len());
    trace!("parallel group sort: {} elements, step {step}", values.len());
    values
        .par_chunks_mut(step)
        .for_each(|group| selection_sort_descending(group, &key));
    merge_groups(values, step, &key);
}

/// Sorts point indexes by descending `z`.
pub fn sort_points_by_depth(points: &[Point3D], indexes: &mut [usize]) {
    group_sort_descending(indexes, |i| points[i].z);
}
