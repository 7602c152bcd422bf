//! Tensor operations
//!
//! Operations are defined as traits (in [`traits`]) implemented by each
//! backend's client. This gives static dispatch per backend while keeping
//! the operator surface identical, which is what lets the parity suite run
//! the same code against CPU and MLU.

pub mod traits;

pub mod cpu;

#[cfg(feature = "mlu")]
pub mod mlu;

pub use traits::{
    IndexingOps, Pool2dGeometry, Pool2dParams, PoolOps, RandomOps, ScalarOps, UnaryOps,
};

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise binary operations (tensor op scalar)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
}

impl BinaryOp {
    /// Operation name for error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add_scalar",
            Self::Sub => "sub_scalar",
            Self::Mul => "mul_scalar",
            Self::Div => "div_scalar",
        }
    }
}

/// Element-wise unary operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation
    Neg,
    /// Absolute value
    Abs,
    /// Square root
    Sqrt,
    /// Reciprocal square root
    Rsqrt,
    /// Reciprocal
    Recip,
}

impl UnaryOp {
    /// Operation name for error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Rsqrt => "rsqrt",
            Self::Recip => "recip",
        }
    }

    /// Whether this operation has kernels for integer dtypes
    pub const fn supports_int(self) -> bool {
        matches!(self, Self::Neg | Self::Abs)
    }
}

/// Reject scalar divisors that convert to zero for integer dtypes.
///
/// The divisor is converted to the tensor's dtype before dividing, so for
/// I32/I64 a fractional scalar like 0.5 would turn into a zero divisor.
/// Both backends validate here instead of trapping in the kernel.
pub(crate) fn check_int_divisor(dtype: crate::dtype::DType, scalar: f64) -> Result<()> {
    if dtype.is_int() && scalar as i64 == 0 {
        return Err(Error::invalid_argument(
            "scalar",
            format!("divisor {scalar} converts to 0 for {dtype}"),
        ));
    }
    Ok(())
}

/// Shape decomposition for an index_select call.
///
/// The input is viewed as `[outer, dim_size, inner]` around the selected
/// dimension; both backends' kernels consume this view.
pub(crate) struct IndexSelectPlan {
    pub outer: usize,
    pub dim_size: usize,
    pub inner: usize,
    pub out_shape: Vec<usize>,
}

pub(crate) fn index_select_plan<R: Runtime>(
    a: &Tensor<R>,
    dim: isize,
    index_len: usize,
) -> Result<IndexSelectPlan> {
    let d = a
        .layout()
        .normalize_dim(dim)
        .ok_or(Error::InvalidDimension {
            dim,
            ndim: a.ndim(),
        })?;

    let shape = a.shape();
    let outer: usize = shape[..d].iter().product();
    let dim_size = shape[d];
    let inner: usize = shape[d + 1..].iter().product();

    let mut out_shape = shape.to_vec();
    out_shape[d] = index_len;

    Ok(IndexSelectPlan {
        outer,
        dim_size,
        inner,
        out_shape,
    })
}

/// Read an index tensor into a host-side `Vec<i64>`, validating rank,
/// dtype, and bounds.
///
/// Out-of-bounds indices are rejected here so neither backend's gather
/// kernel ever sees one.
pub(crate) fn read_index_vec<R: Runtime>(index: &Tensor<R>, dim_size: usize) -> Result<Vec<i64>> {
    if index.ndim() != 1 {
        return Err(Error::invalid_argument(
            "index",
            format!("expected a 1-D index tensor, got {}-D", index.ndim()),
        ));
    }

    let contig = crate::runtime::ensure_contiguous(index);
    let values: Vec<i64> = match index.dtype() {
        crate::dtype::DType::I64 => contig.to_vec(),
        crate::dtype::DType::I32 => {
            let v: Vec<i32> = contig.to_vec();
            v.into_iter().map(i64::from).collect()
        }
        other => return Err(Error::unsupported_dtype(other, "index_select")),
    };

    for &idx in &values {
        if idx < 0 || idx as usize >= dim_size {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                size: dim_size,
            });
        }
    }

    Ok(values)
}
