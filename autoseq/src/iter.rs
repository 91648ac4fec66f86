//! Iteration over the cached prefix of a sequence

use std::cell::Ref;
use std::fmt;
use std::iter::FusedIterator;

/// Iterator over the elements a sequence had cached when iteration started.
///
/// Created by [`AutoSeq::iter`](crate::AutoSeq::iter). Never computes new
/// elements. The iterator holds a borrow of the cache, so the sequence cannot
/// grow until it is dropped.
pub struct Iter<'a, T> {
    values: Ref<'a, [T]>,
    front: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(values: Ref<'a, [T]>) -> Self {
        Self { values, front: 0 }
    }

    /// The elements not yet yielded
    pub fn as_slice(&self) -> &[T] {
        &self.values[self.front..]
    }
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = self.values.get(self.front)?.clone();
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.front = self.front.saturating_add(n).min(self.values.len());
        self.next()
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}

impl<T: Clone> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.as_slice()).finish()
    }
}
