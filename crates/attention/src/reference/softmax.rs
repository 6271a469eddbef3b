//! Row-wise, numerically stable softmax over rank-2 tensors.
//!
//! Each row is shifted by its maximum before exponentiation, so large
//! positive entries cannot overflow and large negative entries do not all
//! underflow to zero. The shift does not change the mathematical result.

use candle_core::Tensor;

use crate::core::checks::{expect_columns, expect_matrix};
use crate::core::{Config, Result};

/// Apply softmax independently to every row of `x` using the default config.
///
/// The result has the shape of `x`, every entry lies in `[0, 1]` and every
/// row sums to one within floating point tolerance.
pub fn softmax(x: &Tensor) -> Result<Tensor> {
    softmax_with_config(x, &Config::default())
}

/// Apply row-wise softmax with an explicit precision policy.
pub fn softmax_with_config(x: &Tensor, config: &Config) -> Result<Tensor> {
    let dims = expect_matrix("x", x)?;
    expect_columns("x", dims)?;

    let precision = config.resolve(&[x.dtype()]);
    log::debug!(
        "softmax rows={} cols={} compute={:?} output={:?}",
        dims.rows,
        dims.cols,
        precision.compute,
        precision.output
    );

    if dims.rows == 0 {
        return Ok(x.to_dtype(precision.output)?);
    }

    let work = x.to_dtype(precision.compute)?.contiguous()?;
    let probs = softmax_rows(&work)?;
    Ok(probs.to_dtype(precision.output)?)
}

/// Softmax over the last dimension of an already validated matrix.
pub(crate) fn softmax_rows(x: &Tensor) -> candle_core::Result<Tensor> {
    let row_max = x.max_keepdim(1)?;
    let shifted = x.broadcast_sub(&row_max)?;
    let exponentials = shifted.exp()?;
    let row_sums = exponentials.sum_keepdim(1)?;
    exponentials.broadcast_div(&row_sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttentionError, PrecisionPolicy};
    use candle_core::{DType, Device};

    #[test]
    fn rows_sum_to_one() -> candle_core::Result<()> {
        let device = Device::Cpu;
        let x = Tensor::new(&[[1f32, 2.0, 3.0], [-1.0, 0.0, 4.5]], &device)?;
        let probs = softmax(&x).unwrap();
        assert_eq!(probs.dims(), &[2, 3]);
        for row in probs.to_vec2::<f32>()? {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "row sum {sum}");
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        }
        Ok(())
    }

    #[test]
    fn equal_row_is_uniform() -> candle_core::Result<()> {
        let x = Tensor::new(&[[7f64, 7.0, 7.0, 7.0]], &Device::Cpu)?;
        let probs = softmax(&x).unwrap().to_vec2::<f64>()?;
        for p in &probs[0] {
            assert!((p - 0.25).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn dominant_value_does_not_overflow() -> candle_core::Result<()> {
        let x = Tensor::new(&[[1000f32, 0.0, -1000.0]], &Device::Cpu)?;
        let probs = softmax(&x).unwrap().to_vec2::<f32>()?;
        assert!(probs[0].iter().all(|p| p.is_finite()));
        assert!((probs[0][0] - 1.0).abs() < 1e-6);
        assert!(probs[0][1] < 1e-6);
        Ok(())
    }

    #[test]
    fn matches_direct_formula() -> candle_core::Result<()> {
        let row = [0.5f64, -1.25, 2.0, 0.0];
        let x = Tensor::new(&[row], &Device::Cpu)?;
        let probs = softmax(&x).unwrap().to_vec2::<f64>()?;
        let denom: f64 = row.iter().map(|v| v.exp()).sum();
        for (got, value) in probs[0].iter().zip(row.iter()) {
            assert!((got - value.exp() / denom).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn rejects_non_matrix_input() -> candle_core::Result<()> {
        let device = Device::Cpu;
        let vector = Tensor::new(&[1f32, 2.0, 3.0], &device)?;
        let err = softmax(&vector).unwrap_err();
        assert!(matches!(
            err,
            AttentionError::InvalidShape { name: "x", rank: 1, .. }
        ));

        let cube = Tensor::zeros((2, 2, 2), DType::F32, &device)?;
        let err = softmax(&cube).unwrap_err();
        assert!(matches!(err, AttentionError::InvalidShape { rank: 3, .. }));
        Ok(())
    }

    #[test]
    fn rejects_zero_columns() -> candle_core::Result<()> {
        let x = Tensor::zeros((3, 0), DType::F32, &Device::Cpu)?;
        let err = softmax(&x).unwrap_err();
        assert!(matches!(
            err,
            AttentionError::EmptyMatrix { rows: 3, cols: 0, .. }
        ));
        Ok(())
    }

    #[test]
    fn zero_rows_yield_empty_output() -> candle_core::Result<()> {
        let x = Tensor::zeros((0, 5), DType::F32, &Device::Cpu)?;
        let probs = softmax(&x).unwrap();
        assert_eq!(probs.dims(), &[0, 5]);
        assert_eq!(probs.dtype(), DType::F32);
        Ok(())
    }

    #[test]
    fn wide_f32_rows_accumulate_in_f64() -> candle_core::Result<()> {
        let x = Tensor::randn(0f32, 1.0, (8, 16_384), &Device::Cpu)?;
        let probs = softmax(&x).unwrap();
        assert_eq!(probs.dtype(), DType::F32);
        for row in probs.to_vec2::<f32>()? {
            let sum: f64 = row.iter().map(|&p| p as f64).sum();
            assert!((sum - 1.0).abs() < 1e-6, "row sum {sum}");
        }
        Ok(())
    }

    #[test]
    fn integer_input_is_promoted() -> candle_core::Result<()> {
        let x = Tensor::new(&[[1u32, 2, 3]], &Device::Cpu)?;
        let probs = softmax(&x).unwrap();
        assert_eq!(probs.dtype(), DType::F64);

        let forced = softmax_with_config(
            &x,
            &Config {
                precision: PrecisionPolicy::ForceF32,
            },
        )
        .unwrap();
        assert_eq!(forced.dtype(), DType::F32);
        Ok(())
    }
}
