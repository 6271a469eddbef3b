//! Reference scaled dot-product attention kernel.
//!
//! Computes `softmax(Q·Kᵗ / √d_k)·V` with every intermediate materialised,
//! prioritising clarity and numerical fidelity over throughput.

use std::sync::OnceLock;

use candle_core::{DType, Tensor};

use super::softmax::softmax_rows;
use crate::core::checks::{expect_matrix, expect_non_empty, expect_same_dim};
use crate::core::{Attention, Config, Result};

/// Exact attention over rank-2 query, key and value matrices.
#[derive(Debug, Default)]
pub struct ScaledDotProductAttention {
    first_call: OnceLock<()>,
}

impl ScaledDotProductAttention {
    /// Construct a reference attention kernel.
    pub const fn new() -> Self {
        Self {
            first_call: OnceLock::new(),
        }
    }
}

static SHARED: ScaledDotProductAttention = ScaledDotProductAttention::new();

impl Attention for ScaledDotProductAttention {
    fn attend(
        &self,
        q: &Tensor,
        k: &Tensor,
        v: &Tensor,
        config: &Config,
    ) -> Result<(Tensor, Tensor)> {
        if self.first_call.set(()).is_ok() {
            log::info!(
                "attention::reference init precision={:?}",
                config.precision
            );
        }

        let q_dims = expect_matrix("Q", q)?;
        let k_dims = expect_matrix("K", k)?;
        let v_dims = expect_matrix("V", v)?;
        expect_same_dim("key dimension", ("Q", q_dims.cols), ("K", k_dims.cols))?;
        expect_same_dim("row count", ("K", k_dims.rows), ("V", v_dims.rows))?;
        expect_non_empty("K", k_dims)?;

        let precision = config.resolve(&[q.dtype(), k.dtype(), v.dtype()]);
        let d_k = k_dims.cols;
        log::debug!(
            "attention n={} m={} d_k={} d_v={} compute={:?} output={:?}",
            q_dims.rows,
            k_dims.rows,
            d_k,
            v_dims.cols,
            precision.compute,
            precision.output
        );

        if q_dims.rows == 0 {
            let device = q.device();
            return Ok((
                Tensor::zeros((0, v_dims.cols), precision.output, device)?,
                Tensor::zeros((0, k_dims.rows), precision.output, device)?,
            ));
        }

        let q_work = prepare(q, precision.compute)?;
        let k_work = prepare(k, precision.compute)?;
        let v_work = prepare(v, precision.compute)?;

        let scores = q_work.matmul(&k_work.t()?.contiguous()?)?;
        let scaling_factor = (d_k as f64).sqrt();
        let scaled_scores = (scores / scaling_factor)?;
        let weights = softmax_rows(&scaled_scores)?;
        let output = weights.matmul(&v_work)?;

        Ok((
            output.to_dtype(precision.output)?,
            weights.to_dtype(precision.output)?,
        ))
    }
}

fn prepare(tensor: &Tensor, dtype: DType) -> candle_core::Result<Tensor> {
    tensor.to_dtype(dtype)?.contiguous()
}

/// Compute attention with the default configuration.
///
/// Returns `(output, attention_weights)`.
pub fn attention(q: &Tensor, k: &Tensor, v: &Tensor) -> Result<(Tensor, Tensor)> {
    attention_with_config(q, k, v, &Config::default())
}

/// Compute attention with an explicit configuration.
pub fn attention_with_config(
    q: &Tensor,
    k: &Tensor,
    v: &Tensor,
    config: &Config,
) -> Result<(Tensor, Tensor)> {
    SHARED
        .attend(q, k, v, config)
        .inspect_err(|err| log::debug!("attention rejected inputs: {err}"))
}
