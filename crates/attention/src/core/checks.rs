//! Lightweight validation helpers shared by softmax and attention.
//!
//! Each check returns [`Result`] so the public entry points can reject
//! malformed input before touching any data.

use candle_core::Tensor;

use super::errors::{AttentionError, Result};

/// Row and column counts of a validated matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixDims {
    pub rows: usize,
    pub cols: usize,
}

impl MatrixDims {
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Ensures `tensor` is exactly two-dimensional and returns its extent.
pub fn expect_matrix(name: &'static str, tensor: &Tensor) -> Result<MatrixDims> {
    match tensor.dims() {
        [rows, cols] => Ok(MatrixDims {
            rows: *rows,
            cols: *cols,
        }),
        dims => Err(AttentionError::InvalidShape {
            name,
            rank: dims.len(),
            dims: dims.to_vec(),
        }),
    }
}

/// Checks that two matrices agree on a shared dimension.
pub fn expect_same_dim(
    axis: &'static str,
    lhs: (&'static str, usize),
    rhs: (&'static str, usize),
) -> Result<()> {
    if lhs.1 == rhs.1 {
        Ok(())
    } else {
        Err(AttentionError::DimensionMismatch {
            axis,
            lhs: lhs.0,
            lhs_size: lhs.1,
            rhs: rhs.0,
            rhs_size: rhs.1,
        })
    }
}

/// Rejects matrices without columns, whose rows have no maximum.
pub fn expect_columns(name: &'static str, dims: MatrixDims) -> Result<()> {
    if dims.cols == 0 {
        Err(AttentionError::EmptyMatrix {
            name,
            rows: dims.rows,
            cols: dims.cols,
        })
    } else {
        Ok(())
    }
}

/// Rejects matrices with a zero-sized dimension.
pub fn expect_non_empty(name: &'static str, dims: MatrixDims) -> Result<()> {
    if dims.is_empty() {
        Err(AttentionError::EmptyMatrix {
            name,
            rows: dims.rows,
            cols: dims.cols,
        })
    } else {
        Ok(())
    }
}
