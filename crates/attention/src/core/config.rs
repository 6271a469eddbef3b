//! Configuration options shared by the softmax and attention entry points.
//!
//! The [`Config`] struct carries the precision policy deciding which floating
//! point type the arithmetic runs in. Integer inputs are always promoted
//! explicitly; nothing relies on implicit conversions inside candle ops.

use candle_core::DType;
use serde::{Deserialize, Serialize};

/// How input element types map onto the dtype used for arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionPolicy {
    /// Compute in `f64` and return the shared float input dtype; integer or
    /// mixed inputs come back as `f64` (or `f32` when no input is wider).
    #[default]
    Inherit,
    /// Compute and return everything in `f32`. Row sums of wide softmax rows
    /// drift further from one than under the other policies.
    ForceF32,
    /// Compute and return everything in `f64`.
    ForceF64,
}

/// Dtypes resolved for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// Dtype used for matmuls, exponentials and reductions.
    pub compute: DType,
    /// Dtype of the returned tensors.
    pub output: DType,
}

/// Configuration driving softmax and attention behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub precision: PrecisionPolicy,
}

impl Config {
    /// Resolve compute and output dtypes for the supplied input dtypes.
    pub fn resolve(&self, inputs: &[DType]) -> Precision {
        match self.precision {
            PrecisionPolicy::ForceF32 => Precision {
                compute: DType::F32,
                output: DType::F32,
            },
            PrecisionPolicy::ForceF64 => Precision {
                compute: DType::F64,
                output: DType::F64,
            },
            PrecisionPolicy::Inherit => {
                let output = match inputs.first() {
                    Some(&first)
                        if is_float(first) && inputs.iter().all(|&dtype| dtype == first) =>
                    {
                        first
                    }
                    _ if inputs.iter().copied().any(needs_f64) => DType::F64,
                    _ => DType::F32,
                };
                Precision {
                    compute: DType::F64,
                    output,
                }
            }
        }
    }
}

fn is_float(dtype: DType) -> bool {
    matches!(dtype, DType::F64 | DType::F32 | DType::F16 | DType::BF16)
}

fn needs_f64(dtype: DType) -> bool {
    !matches!(dtype, DType::F32 | DType::F16 | DType::BF16)
}
