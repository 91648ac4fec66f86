//! Error types for the CLI

use autoseq::{CatalogError, SeqError};
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog lookup or registration error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Evaluating a sequence failed
    #[error("Evaluating {name} failed: {source}")]
    Sequence {
        name: &'static str,
        #[source]
        source: SeqError,
    },

    /// Catalog refused to build a sequence
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one, flattening nested `Multiple`s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy(name: &'static str) -> ArcExecutorError {
        ExecutorError::Sequence {
            name,
            source: SeqError::Busy,
        }
        .into()
    }

    fn len(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_singles() {
        let combined = ArcExecutorError::combine(busy("a"), busy("b"));
        assert_eq!(len(&combined), 2);
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
    }

    #[test]
    fn test_combine_flattens() {
        let left = ArcExecutorError::combine(busy("a"), busy("b"));
        let right = ArcExecutorError::combine(busy("c"), busy("d"));
        assert_eq!(len(&ArcExecutorError::combine(left.clone(), right.clone())), 4);
        assert_eq!(len(&ArcExecutorError::combine(busy("e"), right)), 3);
        assert_eq!(len(&ArcExecutorError::combine(left, busy("f"))), 3);
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(len(&ArcExecutorError::combine_opt(None, busy("a"))), 1);
        assert_eq!(len(&ArcExecutorError::combine_opt(Some(busy("a")), busy("b"))), 2);
    }

    #[test]
    fn test_sequence_error_message() {
        assert_eq!(
            busy("pell").to_string(),
            "Evaluating pell failed: Sequence cache is busy (outstanding view or re-entrant formula)"
        );
    }
}
