//! The public sequence container

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

use tracing::warn;

use crate::cache::SeqCache;
use crate::context::Context;
use crate::error::SeqError;
use crate::formula::{Formula, IntoFormula};
use crate::iter::Iter;

/// A lazily evaluated, memoizing sequence.
///
/// Elements are computed on first access by the recurrence formula and cached
/// for the lifetime of the sequence; an element is never recomputed.
///
/// Reads take `&self` even though they may extend the cache. The cache lives
/// in a [`RefCell`]: reads are logically pure but physically mutating, and the
/// borrow flag enforces the single-owner discipline at runtime. While a
/// [`view`](Self::view), [`slice`](Self::slice), [`get_ref`](Self::get_ref)
/// guard or [`Iter`] is alive, any operation that would grow the cache is
/// refused instead of invalidating it: [`get`](Self::get) panics, and
/// [`at`](Self::at) returns [`SeqError::Busy`]. The same guard catches a
/// formula that re-enters its own sequence.
///
/// A formula may freely read a *different* sequence:
///
/// ```
/// use autoseq::{AutoSeq, Context};
///
/// let fib = AutoSeq::from_context(|c: Context<'_, u64>| c[c.n() - 1] + c[c.n() - 2], [0, 1]);
/// let sum = AutoSeq::from_context(|c: Context<'_, u64>| c.last() + fib.get(c.n()), [0]);
///
/// assert_eq!(sum.get(10), 143);
/// assert_eq!(&*sum.slice(3, 8), &[4, 7, 12, 20, 33]);
/// ```
///
/// # Type Parameters
///
/// - `'f`: lifetime of whatever the formula borrows (`'static` if it owns everything)
/// - `T`: element type
pub struct AutoSeq<'f, T> {
    cache: RefCell<SeqCache<'f, T>>,
}

impl<'f, T: 'f> AutoSeq<'f, T> {
    /// Creates a sequence from a rule of either shape and its seed values.
    ///
    /// Seeds occupy indices `0..k` and bypass the rule. The rule's closure
    /// arguments must be annotated so the shape can be resolved; see
    /// [`IntoFormula`].
    ///
    /// ```
    /// use autoseq::AutoSeq;
    ///
    /// let squares = AutoSeq::new(|n: usize, _: &[usize]| n * n, []);
    /// assert_eq!(squares.get(12), 144);
    /// ```
    pub fn new<S, F, I>(formula: F, seeds: I) -> Self
    where
        F: IntoFormula<'f, T, S>,
        I: IntoIterator<Item = T>,
    {
        Self::with_formula(formula.into_formula(), seeds)
    }

    /// Creates a sequence from a raw `(index, history) -> value` rule.
    pub fn from_raw<F, I>(formula: F, seeds: I) -> Self
    where
        F: FnMut(usize, &[T]) -> T + 'f,
        I: IntoIterator<Item = T>,
    {
        Self::with_formula(Formula::raw(formula), seeds)
    }

    /// Creates a sequence from a rule taking a [`Context`].
    pub fn from_context<F, I>(formula: F, seeds: I) -> Self
    where
        F: FnMut(Context<'_, T>) -> T + 'f,
        I: IntoIterator<Item = T>,
    {
        Self::with_formula(Formula::contextual(formula), seeds)
    }

    /// Creates a sequence from an already adapted [`Formula`].
    pub fn with_formula<I>(formula: Formula<'f, T>, seeds: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            cache: RefCell::new(SeqCache::new(formula, seeds)),
        }
    }

    fn borrow(&self) -> Result<Ref<'_, SeqCache<'f, T>>, SeqError> {
        self.cache.try_borrow().map_err(|_| busy())
    }

    fn borrow_mut(&self) -> Result<RefMut<'_, SeqCache<'f, T>>, SeqError> {
        self.cache.try_borrow_mut().map_err(|_| busy())
    }

    /// Computes through `n` and hands back a shared borrow of the cache.
    fn try_ensure(&self, n: usize) -> Result<Ref<'_, SeqCache<'f, T>>, SeqError> {
        {
            let cache = self.borrow()?;
            if n < cache.len() {
                return Ok(cache);
            }
        }
        self.borrow_mut()?.try_ensure_computed(n)?;
        self.borrow()
    }

    fn ensure(&self, n: usize) -> Ref<'_, SeqCache<'f, T>> {
        self.try_ensure(n)
            .unwrap_or_else(|err| panic!("autoseq: cannot compute index {}: {}", n, err))
    }

    /// Returns element `n`, computing it (and everything before it) if needed.
    ///
    /// # Panics
    ///
    /// Panics if the cache cannot grow: allocation failure, an outstanding
    /// view, or a formula reading its own sequence. [`at`](Self::at) reports
    /// these as errors instead.
    pub fn get(&self, n: usize) -> T
    where
        T: Clone,
    {
        self.ensure(n).as_slice()[n].clone()
    }

    /// Like [`get`](Self::get), but borrows the element instead of cloning it.
    ///
    /// The guard blocks growth of this sequence until it is dropped.
    pub fn get_ref(&self, n: usize) -> Ref<'_, T> {
        Ref::map(self.ensure(n), |cache| &cache.as_slice()[n])
    }

    /// Checked form of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// - [`SeqError::Allocation`] if the cache could not grow
    /// - [`SeqError::Busy`] if the cache is borrowed elsewhere
    pub fn at(&self, n: usize) -> Result<T, SeqError>
    where
        T: Clone,
    {
        let cache = self.try_ensure(n)?;
        Ok(cache.as_slice()[n].clone())
    }

    /// Eagerly computes every element up to and including `n`.
    pub fn prefetch_up_to(&self, n: usize) {
        drop(self.ensure(n));
    }

    /// Checked form of [`prefetch_up_to`](Self::prefetch_up_to).
    pub fn try_prefetch_up_to(&self, n: usize) -> Result<(), SeqError> {
        self.try_ensure(n).map(drop)
    }

    /// Reserves capacity for at least `n` elements in total. Computes nothing.
    pub fn reserve(&self, n: usize) {
        if let Err(err) = self.try_reserve(n) {
            panic!("autoseq: cannot reserve {} elements: {}", n, err);
        }
    }

    /// Checked form of [`reserve`](Self::reserve).
    pub fn try_reserve(&self, n: usize) -> Result<(), SeqError> {
        self.borrow_mut()?.try_reserve(n)
    }

    /// Returns the elements in `[start, end)`, computing through `end - 1`.
    ///
    /// An empty range computes nothing.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`, or if the cache cannot grow (see [`get`](Self::get)).
    pub fn slice(&self, start: usize, end: usize) -> Ref<'_, [T]> {
        assert!(
            start <= end,
            "autoseq: invalid slice range {}..{}",
            start,
            end
        );
        self.try_slice(start, end)
            .unwrap_or_else(|err| panic!("autoseq: cannot slice {}..{}: {}", start, end, err))
    }

    /// Checked form of [`slice`](Self::slice).
    ///
    /// # Errors
    ///
    /// [`SeqError::InvalidRange`] if `start > end`, otherwise as [`at`](Self::at).
    pub fn try_slice(&self, start: usize, end: usize) -> Result<Ref<'_, [T]>, SeqError> {
        if start > end {
            return Err(SeqError::InvalidRange { start, end });
        }
        if start == end {
            return Ok(Ref::map(self.borrow()?, |cache| &cache.as_slice()[..0]));
        }
        let cache = self.try_ensure(end - 1)?;
        Ok(Ref::map(cache, |cache| &cache.as_slice()[start..end]))
    }

    /// All elements computed so far. Computes nothing.
    ///
    /// # Panics
    ///
    /// Panics when called from inside this sequence's own formula.
    pub fn view(&self) -> Ref<'_, [T]> {
        Ref::map(self.cache.borrow(), |cache| cache.as_slice())
    }

    /// Checked form of [`view`](Self::view).
    pub fn try_view(&self) -> Result<Ref<'_, [T]>, SeqError> {
        Ok(Ref::map(self.borrow()?, |cache| cache.as_slice()))
    }

    /// Copies the computed prefix out. The sequence keeps its data.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.view().to_vec()
    }

    /// Consumes the sequence and moves the computed prefix out without copying.
    pub fn into_snapshot(self) -> Vec<T> {
        self.cache.into_inner().into_values()
    }

    /// Moves the computed prefix out, leaving this sequence with no cached
    /// elements.
    ///
    /// The formula is kept, but seeds are not restored: later accesses
    /// compute from index 0 with the formula.
    pub fn take_snapshot(&mut self) -> Vec<T> {
        self.cache.get_mut().take_values()
    }

    /// Number of elements computed so far
    pub fn size(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Whether nothing has been computed (or seeded) yet
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of elements the cache can hold before reallocating
    pub fn capacity(&self) -> usize {
        self.cache.borrow().capacity()
    }

    /// Iterates over the elements cached right now, without computing more.
    ///
    /// ```
    /// use autoseq::{AutoSeq, Context};
    ///
    /// let powers = AutoSeq::from_context(|c: Context<'_, u32>| c.last() * 2, [1]);
    /// powers.prefetch_up_to(4);
    /// assert_eq!(powers.iter().collect::<Vec<_>>(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.view())
    }
}

fn busy() -> SeqError {
    warn!("sequence cache is already borrowed");
    SeqError::Busy
}

impl<'s, 'f, T: Clone + 'f> IntoIterator for &'s AutoSeq<'f, T> {
    type Item = T;
    type IntoIter = Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'f, T: 'f> IntoIterator for AutoSeq<'f, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_snapshot().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for AutoSeq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AutoSeq");
        match self.cache.try_borrow() {
            Ok(cache) => s.field("cached", &cache.as_slice()),
            Err(_) => s.field("cached", &format_args!("<busy>")),
        };
        s.finish_non_exhaustive()
    }
}
