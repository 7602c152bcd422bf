//! MLU element-wise unary math

use crate::error::{Error, Result};
use crate::ops::{UnaryOp, UnaryOps};
use crate::runtime::mlu::{kernels, MluClient, MluRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl UnaryOps<MluRuntime> for MluClient {
    fn neg(&self, a: &Tensor<MluRuntime>) -> Result<Tensor<MluRuntime>> {
        unary_op(self, a, UnaryOp::Neg)
    }

    fn abs(&self, a: &Tensor<MluRuntime>) -> Result<Tensor<MluRuntime>> {
        unary_op(self, a, UnaryOp::Abs)
    }

    fn sqrt(&self, a: &Tensor<MluRuntime>) -> Result<Tensor<MluRuntime>> {
        unary_op(self, a, UnaryOp::Sqrt)
    }

    fn rsqrt(&self, a: &Tensor<MluRuntime>) -> Result<Tensor<MluRuntime>> {
        unary_op(self, a, UnaryOp::Rsqrt)
    }

    fn recip(&self, a: &Tensor<MluRuntime>) -> Result<Tensor<MluRuntime>> {
        unary_op(self, a, UnaryOp::Recip)
    }
}

fn unary_op(client: &MluClient, a: &Tensor<MluRuntime>, op: UnaryOp) -> Result<Tensor<MluRuntime>> {
    if !op.supports_int() && !a.dtype().is_float() {
        return Err(Error::unsupported_dtype(a.dtype(), op.name()));
    }

    let a = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), client.device())?;

    kernels::launch_unary_op(op, a.dtype(), a.storage().ptr(), out.storage().ptr(), a.numel())?;
    Ok(out)
}
