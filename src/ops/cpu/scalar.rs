//! CPU tensor-scalar arithmetic

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::{check_int_divisor, BinaryOp, ScalarOps};
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl ScalarOps<CpuRuntime> for CpuClient {
    fn add_scalar(&self, a: &Tensor<CpuRuntime>, scalar: f64) -> Result<Tensor<CpuRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Add)
    }

    fn sub_scalar(&self, a: &Tensor<CpuRuntime>, scalar: f64) -> Result<Tensor<CpuRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Sub)
    }

    fn mul_scalar(&self, a: &Tensor<CpuRuntime>, scalar: f64) -> Result<Tensor<CpuRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Mul)
    }

    fn div_scalar(&self, a: &Tensor<CpuRuntime>, scalar: f64) -> Result<Tensor<CpuRuntime>> {
        check_int_divisor(a.dtype(), scalar)?;
        scalar_op(self, a, scalar, BinaryOp::Div)
    }
}

fn scalar_op(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    scalar: f64,
    op: BinaryOp,
) -> Result<Tensor<CpuRuntime>> {
    let a = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), client.device())?;
    let len = a.numel();

    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            kernels::scalar_op_kernel::<T>(
                op,
                a.storage().ptr() as *const T,
                scalar,
                out.storage().ptr() as *mut T,
                len,
            );
        }
        Ok(out)
    }, "scalar_op")
}
