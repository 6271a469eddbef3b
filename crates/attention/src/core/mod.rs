//! Core traits and types shared by the softmax and attention kernels.
//!
//! All matrices are rank-2 tensors. Queries are shaped `[n, d_k]`, keys
//! `[m, d_k]` and values `[m, d_v]`; attention returns an output shaped
//! `[n, d_v]` together with the `[n, m]` row-stochastic weights.

pub mod checks;
pub mod config;
pub mod errors;

use candle_core::Tensor;

pub use config::{Config, Precision, PrecisionPolicy};
pub use errors::{AttentionError, Result};

/// Unified interface for attention kernels.
///
/// * `q` is `[n, d_k]`, `k` is `[m, d_k]`, `v` is `[m, d_v]`.
/// * Returns `(output, attention_weights)` shaped `[n, d_v]` and `[n, m]`.
/// * Inputs are validated before any arithmetic; no partial results are
///   produced on failure.
/// * `n = 0` or `d_v = 0` yield empty results; `m = 0` or `d_k = 0` are
///   rejected.
/// * Element types are resolved through [`Config::precision`].
pub trait Attention {
    /// Compute scaled dot-product attention over the supplied matrices.
    fn attend(
        &self,
        q: &Tensor,
        k: &Tensor,
        v: &Tensor,
        config: &Config,
    ) -> Result<(Tensor, Tensor)>;
}
