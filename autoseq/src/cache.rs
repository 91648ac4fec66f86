//! Append-only backing storage for a sequence.

use tracing::{debug, trace};

use crate::error::SeqError;
use crate::formula::Formula;

/// Below this capacity, growth is rounded up to the next power of two.
pub const GROWTH_POW2_THRESHOLD: usize = 1024;

/// Capacity to grow to when `needed` elements no longer fit in `old_capacity`.
///
/// Grows by 1.5x (or straight to `needed` if that is larger); small
/// capacities are then rounded up to a power of two.
///
/// ```
/// use autoseq::grown_capacity;
///
/// assert_eq!(grown_capacity(0, 3), 4);
/// assert_eq!(grown_capacity(600, 601), 1024);
/// assert_eq!(grown_capacity(1024, 1025), 1536);
/// ```
pub fn grown_capacity(old_capacity: usize, needed: usize) -> usize {
    let capacity = old_capacity.saturating_add(old_capacity >> 1).max(needed);
    if capacity < GROWTH_POW2_THRESHOLD {
        capacity.next_power_of_two()
    } else {
        capacity
    }
}

/// Computed values plus the formula that extends them.
///
/// Element `i` is pushed exactly once: either as a seed or as
/// `formula.call(i, &values[..i])`. Nothing is ever removed except by
/// [`take_values`](Self::take_values) / [`into_values`](Self::into_values).
pub(crate) struct SeqCache<'f, T> {
    values: Vec<T>,
    formula: Formula<'f, T>,
}

impl<'f, T: 'f> SeqCache<'f, T> {
    pub(crate) fn new<I>(formula: Formula<'f, T>, seeds: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            values: seeds.into_iter().collect(),
            formula,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn into_values(self) -> Vec<T> {
        self.values
    }

    pub(crate) fn take_values(&mut self) -> Vec<T> {
        std::mem::take(&mut self.values)
    }

    /// Makes room for at least `n` elements in total without computing any.
    pub(crate) fn try_reserve(&mut self, n: usize) -> Result<(), SeqError> {
        let additional = n.saturating_sub(self.values.len());
        self.values
            .try_reserve_exact(additional)
            .map_err(|_| SeqError::Allocation { requested: n })
    }

    /// Computes every missing element up to and including `target`.
    pub(crate) fn try_ensure_computed(&mut self, target: usize) -> Result<(), SeqError> {
        if target < self.values.len() {
            return Ok(());
        }

        let needed = target
            .checked_add(1)
            .ok_or(SeqError::Allocation { requested: usize::MAX })?;
        let old_capacity = self.values.capacity();
        if needed > old_capacity {
            let new_capacity = grown_capacity(old_capacity, needed);
            trace!(old_capacity, new_capacity, target, "growing sequence cache");
            self.try_reserve(new_capacity)?;
        }

        let start = self.values.len();
        while self.values.len() < needed {
            let next = self.formula.call(self.values.len(), &self.values);
            self.values.push(next);
        }
        debug!(computed = needed - start, size = needed, "filled sequence cache");
        Ok(())
    }
}
