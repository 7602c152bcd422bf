//! MLU tensor-scalar arithmetic

use crate::error::Result;
use crate::ops::{check_int_divisor, BinaryOp, ScalarOps};
use crate::runtime::mlu::{kernels, MluClient, MluRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl ScalarOps<MluRuntime> for MluClient {
    fn add_scalar(&self, a: &Tensor<MluRuntime>, scalar: f64) -> Result<Tensor<MluRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Add)
    }

    fn sub_scalar(&self, a: &Tensor<MluRuntime>, scalar: f64) -> Result<Tensor<MluRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Sub)
    }

    fn mul_scalar(&self, a: &Tensor<MluRuntime>, scalar: f64) -> Result<Tensor<MluRuntime>> {
        scalar_op(self, a, scalar, BinaryOp::Mul)
    }

    fn div_scalar(&self, a: &Tensor<MluRuntime>, scalar: f64) -> Result<Tensor<MluRuntime>> {
        check_int_divisor(a.dtype(), scalar)?;
        scalar_op(self, a, scalar, BinaryOp::Div)
    }
}

fn scalar_op(
    client: &MluClient,
    a: &Tensor<MluRuntime>,
    scalar: f64,
    op: BinaryOp,
) -> Result<Tensor<MluRuntime>> {
    let a = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), client.device())?;

    kernels::launch_scalar_op(
        op,
        a.dtype(),
        a.storage().ptr(),
        scalar,
        out.storage().ptr(),
        a.numel(),
    )?;
    Ok(out)
}
