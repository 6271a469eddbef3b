//! Scaled dot-product attention over rank-2 candle tensors.
//!
//! The crate exposes two pure operations:
//!
//! * [`softmax`] normalises every row of a `[n, m]` matrix into a probability
//!   distribution, shifting by the row maximum so large magnitudes neither
//!   overflow nor collapse to zero.
//! * [`attention`] computes `softmax(Q·Kᵗ / √d_k)·V` for queries `[n, d_k]`,
//!   keys `[m, d_k]` and values `[m, d_v]`, returning the `[n, d_v]` output
//!   together with the `[n, m]` attention weights.
//!
//! Inputs are validated before any arithmetic: every matrix must be exactly
//! two-dimensional, queries and keys must share `d_k`, keys and values must
//! have the same number of rows, and keys must have at least one row and one
//! column. Zero queries or zero value columns produce empty results. Failures surface as
//! [`AttentionError`] values, never panics.
//!
//! Element types are resolved through [`PrecisionPolicy`]. By default all
//! arithmetic runs in `f64` and float inputs get their own dtype back; integer
//! inputs are promoted to `f64` explicitly.

pub mod core;
pub mod reference;

pub use self::core::{Attention, AttentionError, Config, PrecisionPolicy, Result};
pub use reference::{
    attention, attention_with_config, softmax, softmax_with_config, ScaledDotProductAttention,
};
