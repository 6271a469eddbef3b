//! Error types emitted by the softmax and attention entry points.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AttentionError>;

/// Attention-specific error category.
///
/// Every variant except [`AttentionError::Backend`] is produced while
/// validating inputs, before any arithmetic runs.
#[derive(Debug, Error)]
pub enum AttentionError {
    /// A matrix argument is not exactly two-dimensional.
    #[error("{name} must be two-dimensional, got {rank} dimension(s) with shape {dims:?}")]
    InvalidShape {
        name: &'static str,
        rank: usize,
        dims: Vec<usize>,
    },
    /// Two matrices disagree on a dimension they are required to share.
    #[error("{axis} mismatch: {lhs} has {lhs_size} but {rhs} has {rhs_size}")]
    DimensionMismatch {
        axis: &'static str,
        lhs: &'static str,
        lhs_size: usize,
        rhs: &'static str,
        rhs_size: usize,
    },
    /// A matrix has a zero-sized dimension that leaves a softmax row without
    /// entries or makes the `√d_k` scale zero.
    #[error("{name} must be non-empty, got shape ({rows}, {cols})")]
    EmptyMatrix {
        name: &'static str,
        rows: usize,
        cols: usize,
    },
    /// A candle failure propagated to the caller.
    #[error("backend failure: {0}")]
    Backend(#[from] candle_core::Error),
}
