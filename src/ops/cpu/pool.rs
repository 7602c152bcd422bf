//! CPU 2-D max pooling

use crate::dispatch_float_dtype;
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{Pool2dParams, PoolOps};
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl PoolOps<CpuRuntime> for CpuClient {
    fn max_pool2d(
        &self,
        input: &Tensor<CpuRuntime>,
        params: &Pool2dParams,
    ) -> Result<Tensor<CpuRuntime>> {
        let (out, _) = max_pool2d_impl(self, input, params, false)?;
        Ok(out)
    }

    fn max_pool2d_with_indices(
        &self,
        input: &Tensor<CpuRuntime>,
        params: &Pool2dParams,
    ) -> Result<(Tensor<CpuRuntime>, Tensor<CpuRuntime>)> {
        let (out, indices) = max_pool2d_impl(self, input, params, true)?;
        match indices {
            Some(indices) => Ok((out, indices)),
            None => unreachable!("indices were requested"),
        }
    }
}

fn max_pool2d_impl(
    client: &CpuClient,
    input: &Tensor<CpuRuntime>,
    params: &Pool2dParams,
    want_indices: bool,
) -> Result<(Tensor<CpuRuntime>, Option<Tensor<CpuRuntime>>)> {
    let g = params.geometry(input.shape())?;

    let input = ensure_contiguous(input);
    let out_shape = [g.n, g.c, g.out_h, g.out_w];
    let out = Tensor::try_empty(&out_shape, input.dtype(), client.device())?;
    let indices = if want_indices {
        Some(Tensor::try_empty(&out_shape, DType::I64, client.device())?)
    } else {
        None
    };

    let indices_ptr = indices
        .as_ref()
        .map_or(std::ptr::null_mut(), |t| t.storage().ptr() as *mut i64);

    dispatch_float_dtype!(input.dtype(), T => {
        unsafe {
            kernels::max_pool2d_kernel::<T>(
                input.storage().ptr() as *const T,
                out.storage().ptr() as *mut T,
                indices_ptr,
                &g,
            );
        }
        Ok((out, indices))
    }, "max_pool2d")
}
