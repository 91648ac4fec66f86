//! Formula adaptation
//!
//! A recurrence rule may be written in one of two shapes:
//!
//! - **raw**: `FnMut(usize, &[T]) -> T`, receiving the index and the history slice
//! - **contextual**: `FnMut(Context<'_, T>) -> T`, receiving a [`Context`]
//!
//! Both are normalized into a [`Formula`], which always calls through the raw
//! signature. The shape is picked by the trait system through the marker
//! parameter of [`IntoFormula`], so a callable matching neither shape is a
//! compile error:
//!
//! ```compile_fail
//! use autoseq::AutoSeq;
//!
//! // Returns a String for a u64 sequence: no shape matches.
//! let seq: AutoSeq<u64> = AutoSeq::new(|n: usize| n.to_string(), []);
//! ```

use std::fmt;

use crate::context::Context;

/// Marker for rules shaped `FnMut(usize, &[T]) -> T`
pub struct Raw;

/// Marker for rules shaped `FnMut(Context<'_, T>) -> T`
pub struct Contextual;

/// Marker for values that already are a [`Formula`]
pub struct Adapted;

/// A recurrence rule normalized to the canonical `(index, history) -> value` call.
///
/// The wrapped closure is owned exclusively and may itself own move-only
/// resources (another sequence, a boxed buffer, ...). `Formula` is therefore
/// neither `Clone` nor `Copy`.
pub struct Formula<'f, T> {
    call: Box<dyn FnMut(usize, &[T]) -> T + 'f>,
}

impl<'f, T: 'f> Formula<'f, T> {
    /// Wraps a raw-shaped rule unchanged.
    pub fn raw<F>(rule: F) -> Self
    where
        F: FnMut(usize, &[T]) -> T + 'f,
    {
        Self {
            call: Box::new(rule),
        }
    }

    /// Wraps a contextual rule, building a [`Context`] for every call.
    pub fn contextual<F>(mut rule: F) -> Self
    where
        F: FnMut(Context<'_, T>) -> T + 'f,
    {
        Self::raw(move |n, history| rule(Context::new(n, history)))
    }

    /// Computes element `n` from the prefix `history` (which must hold exactly `n` elements).
    #[inline]
    pub fn call(&mut self, n: usize, history: &[T]) -> T {
        (self.call)(n, history)
    }
}

impl<T> fmt::Debug for Formula<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula").finish_non_exhaustive()
    }
}

/// Conversion of a user rule into a [`Formula`].
///
/// `Shape` is one of [`Raw`], [`Contextual`] or [`Adapted`] and is inferred:
/// callers never name it. Closures passed through this trait need annotated
/// argument types (`|n: usize, h: &[u64]|` or `|c: Context<'_, u64>|`); use
/// [`AutoSeq::from_raw`](crate::AutoSeq::from_raw) or
/// [`AutoSeq::from_context`](crate::AutoSeq::from_context) to let the
/// compiler infer them instead.
pub trait IntoFormula<'f, T, Shape> {
    /// Performs the conversion
    fn into_formula(self) -> Formula<'f, T>;
}

impl<'f, T: 'f, F> IntoFormula<'f, T, Raw> for F
where
    F: FnMut(usize, &[T]) -> T + 'f,
{
    fn into_formula(self) -> Formula<'f, T> {
        Formula::raw(self)
    }
}

impl<'f, T: 'f, F> IntoFormula<'f, T, Contextual> for F
where
    F: FnMut(Context<'_, T>) -> T + 'f,
{
    fn into_formula(self) -> Formula<'f, T> {
        Formula::contextual(self)
    }
}

impl<'f, T: 'f> IntoFormula<'f, T, Adapted> for Formula<'f, T> {
    fn into_formula(self) -> Formula<'f, T> {
        self
    }
}
