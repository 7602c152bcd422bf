//! CPU element-wise unary math

use crate::dispatch_dtype;
use crate::error::{Error, Result};
use crate::ops::{UnaryOp, UnaryOps};
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl UnaryOps<CpuRuntime> for CpuClient {
    fn neg(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op(self, a, UnaryOp::Neg)
    }

    fn abs(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op(self, a, UnaryOp::Abs)
    }

    fn sqrt(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op(self, a, UnaryOp::Sqrt)
    }

    fn rsqrt(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op(self, a, UnaryOp::Rsqrt)
    }

    fn recip(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op(self, a, UnaryOp::Recip)
    }
}

fn unary_op(client: &CpuClient, a: &Tensor<CpuRuntime>, op: UnaryOp) -> Result<Tensor<CpuRuntime>> {
    if !op.supports_int() && !a.dtype().is_float() {
        return Err(Error::unsupported_dtype(a.dtype(), op.name()));
    }

    let a = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), client.device())?;
    let len = a.numel();

    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            kernels::unary_op_kernel::<T>(
                op,
                a.storage().ptr() as *const T,
                out.storage().ptr() as *mut T,
                len,
            );
        }
        Ok(out)
    }, "unary_op")
}
