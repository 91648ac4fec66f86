//! Error types for the sequence library

use thiserror::Error;

/// Error type for checked sequence operations
///
/// Precondition violations (reading past the history inside a formula, a
/// reversed slice range on the asserting path) panic instead; these variants
/// cover the conditions a caller can reasonably recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// The allocator refused to grow the cache
    #[error("Allocation failed while growing the cache to {requested} elements")]
    Allocation { requested: usize },
    /// The cache is already borrowed, either by an outstanding view or by the
    /// sequence's own formula while it is being filled
    #[error("Sequence cache is busy (outstanding view or re-entrant formula)")]
    Busy,
    /// A slice was requested with `start > end`
    #[error("Invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: usize, end: usize },
}

/// Error type for catalog registration and lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No recurrence is registered under the given name
    #[error("Recurrence not found: {0}")]
    NotFound(String),
    /// Attempted to register two recurrences under the same name
    #[error("Duplicate recurrence registration for {0}")]
    Duplicate(&'static str),
    /// The requested index is past what the recurrence can represent
    #[error("Index {requested} exceeds the limit {limit} for {name}")]
    LimitExceeded {
        name: &'static str,
        requested: usize,
        limit: usize,
    },
}
