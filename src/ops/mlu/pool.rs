//! MLU 2-D max pooling

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{Pool2dParams, PoolOps};
use crate::runtime::mlu::{kernels, MluClient, MluRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl PoolOps<MluRuntime> for MluClient {
    fn max_pool2d(
        &self,
        input: &Tensor<MluRuntime>,
        params: &Pool2dParams,
    ) -> Result<Tensor<MluRuntime>> {
        let g = params.geometry(input.shape())?;
        let input = ensure_contiguous(input);
        let out = Tensor::try_empty(&[g.n, g.c, g.out_h, g.out_w], input.dtype(), self.device())?;

        kernels::launch_max_pool2d(
            input.dtype(),
            input.storage().ptr(),
            out.storage().ptr(),
            None,
            &g,
        )?;
        Ok(out)
    }

    fn max_pool2d_with_indices(
        &self,
        input: &Tensor<MluRuntime>,
        params: &Pool2dParams,
    ) -> Result<(Tensor<MluRuntime>, Tensor<MluRuntime>)> {
        let g = params.geometry(input.shape())?;
        let input = ensure_contiguous(input);
        let out_shape = [g.n, g.c, g.out_h, g.out_w];
        let out = Tensor::try_empty(&out_shape, input.dtype(), self.device())?;
        let indices = Tensor::try_empty(&out_shape, DType::I64, self.device())?;

        kernels::launch_max_pool2d(
            input.dtype(),
            input.storage().ptr(),
            out.storage().ptr(),
            Some(indices.storage().ptr()),
            &g,
        )?;
        Ok((out, indices))
    }
}
