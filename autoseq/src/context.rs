//! Read-only computation context handed to contextual formulas

use std::ops::Index;

/// The state visible to a formula while it computes element `n`.
///
/// `history` is exactly the prefix `[0, n)`, so a formula can reach any
/// earlier element, not only the most recent one:
///
/// ```
/// use autoseq::{AutoSeq, Context};
///
/// let tribonacci = AutoSeq::from_context(
///     |c: Context<'_, u64>| c[c.n() - 1] + c[c.n() - 2] + c[c.n() - 3],
///     [0, 0, 1],
/// );
/// assert_eq!(tribonacci.get(7), 13);
/// ```
#[derive(Debug)]
pub struct Context<'a, T> {
    n: usize,
    history: &'a [T],
}

impl<'a, T> Context<'a, T> {
    pub(crate) fn new(n: usize, history: &'a [T]) -> Self {
        debug_assert_eq!(n, history.len());
        Self { n, history }
    }

    /// Index of the element being computed
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The most recently computed element, `a[n - 1]`.
    ///
    /// # Panics
    ///
    /// Panics when the history is empty (`n == 0`).
    #[inline]
    pub fn last(&self) -> &'a T {
        assert!(
            !self.history.is_empty(),
            "autoseq: cannot access last() on an empty history"
        );
        &self.history[self.history.len() - 1]
    }

    /// Like [`last`](Self::last), without the precondition
    #[inline]
    pub fn try_last(&self) -> Option<&'a T> {
        self.history.last()
    }

    /// Element `i` of the history, or `None` when `i >= n`
    #[inline]
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.history.get(i)
    }

    /// The whole prefix `[0, n)`
    #[inline]
    pub fn history(&self) -> &'a [T] {
        self.history
    }

    /// Whether this is the first element (no history yet)
    #[inline]
    pub fn is_first(&self) -> bool {
        self.n == 0
    }
}

impl<T> Clone for Context<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Context<'_, T> {}

impl<T> Index<usize> for Context<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics when `i >= n`.
    fn index(&self, i: usize) -> &T {
        assert!(
            i < self.history.len(),
            "autoseq: history index {} out of range (n = {})",
            i,
            self.n
        );
        &self.history[i]
    }
}
