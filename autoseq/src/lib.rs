//! Lazily evaluated, memoizing recurrence sequences
//!
//! An [`AutoSeq`] is an infinite sequence described by a recurrence rule and
//! optional seed values. Elements are computed on demand, in index order, and
//! cached for good: each element is produced exactly once.
//!
//! # Overview
//!
//! This library provides:
//! - [`AutoSeq`]: the container (indexed access, prefetching, slices, views,
//!   snapshots and iteration over the cached prefix)
//! - Two rule shapes, resolved at compile time through [`IntoFormula`]:
//!   raw `(index, &[T]) -> T` and contextual `Context<'_, T> -> T`
//! - The [`autoseq!`] macro for variadic seeds
//! - A [`catalog`] of named `u128` recurrences collected with `inventory`
//!
//! # Quick Example
//!
//! ```
//! use autoseq::{autoseq, AutoSeq};
//!
//! let fib: AutoSeq<'_, u64> = autoseq!(context: |c| c[c.n() - 1] + c[c.n() - 2]; 0u64, 1);
//! let sum: AutoSeq<'_, u64> = autoseq!(context: |c| c.last() + fib.get(c.n()); 0u64);
//!
//! assert_eq!(sum.get(5), 12);
//! assert_eq!(sum.at(10), Ok(143));
//! assert_eq!(sum.size(), 11);
//!
//! sum.reserve(100);
//! sum.prefetch_up_to(20);
//! assert_eq!(sum.size(), 21);
//!
//! let copy = sum.snapshot();
//! assert_eq!(copy.len(), 21);
//! let moved = sum.into_snapshot();
//! assert_eq!(moved, copy);
//! ```
//!
//! # Key Concepts
//!
//! ## Rule shapes
//!
//! A raw rule gets the index and the history slice; it suits rules that
//! ignore the history or fold over all of it:
//!
//! ```
//! use autoseq::AutoSeq;
//!
//! let catalan = AutoSeq::from_raw(
//!     |n, h: &[u64]| (0..n).map(|i| h[i] * h[n - 1 - i]).sum(),
//!     [1],
//! );
//! assert_eq!(catalan.get(10), 16796);
//! ```
//!
//! A contextual rule gets a [`Context`] with `n()`, `last()` and indexing.
//!
//! ## Preconditions vs errors
//!
//! Reading outside the history from a rule (`last()` on an empty history,
//! `c[i]` with `i >= n`) and reversed slice ranges are caller bugs and panic.
//! Conditions a caller can recover from (allocation failure, a busy cache)
//! are reported as [`SeqError`] by the checked methods (`at`, `try_*`).
//!
//! ## Single-threaded
//!
//! `AutoSeq` is not `Sync`. A rule must not read its own sequence while that
//! sequence is being filled; doing so panics (or yields [`SeqError::Busy`]).

mod cache;
mod context;
mod error;
mod formula;
mod iter;
mod seq;

pub mod catalog;

// Re-export public API
pub use cache::{GROWTH_POW2_THRESHOLD, grown_capacity};
pub use context::Context;
pub use error::{CatalogError, SeqError};
pub use formula::{Adapted, Contextual, Formula, IntoFormula, Raw};
pub use iter::Iter;
pub use seq::AutoSeq;

// Re-export inventory for plugin registration from other crates
pub use inventory;

/// Builds an [`AutoSeq`] from a rule and a variadic list of seeds.
///
/// - `autoseq!(rule; s0, s1, ...)` resolves the shape through [`IntoFormula`]
///   (closure arguments must be annotated)
/// - `autoseq!(raw: rule; ...)` takes a raw `(index, history)` rule
/// - `autoseq!(context: rule; ...)` takes a [`Context`] rule
///
/// Seeds are optional.
///
/// ```
/// use autoseq::{autoseq, AutoSeq, Context};
///
/// let lucas: AutoSeq<'_, u32> = autoseq!(context: |c| c[c.n() - 1] + c[c.n() - 2]; 2u32, 1);
/// let odd = autoseq!(raw: |n, _: &[u32]| 2 * n as u32 + 1);
/// let pow3 = autoseq!(|c: Context<'_, u32>| c.last() * 3; 1);
///
/// assert_eq!(lucas.get(5), 11);
/// assert_eq!(odd.get(5), 11);
/// assert_eq!(pow3.get(5), 243);
/// ```
#[macro_export]
macro_rules! autoseq {
    (raw: $formula:expr $(; $($seed:expr),* $(,)?)?) => {
        $crate::AutoSeq::from_raw($formula, [$($($seed),*)?])
    };
    (context: $formula:expr $(; $($seed:expr),* $(,)?)?) => {
        $crate::AutoSeq::from_context($formula, [$($($seed),*)?])
    };
    ($formula:expr $(; $($seed:expr),* $(,)?)?) => {
        $crate::AutoSeq::new($formula, [$($($seed),*)?])
    };
}
