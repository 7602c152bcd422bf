//! CPU indexing operations

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::{index_select_plan, read_index_vec, IndexingOps};
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl IndexingOps<CpuRuntime> for CpuClient {
    fn index_select(
        &self,
        a: &Tensor<CpuRuntime>,
        dim: isize,
        index: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        let plan = index_select_plan(a, dim, index.numel())?;
        let index = read_index_vec(index, plan.dim_size)?;

        let a = ensure_contiguous(a);
        let out = Tensor::try_empty(&plan.out_shape, a.dtype(), self.device())?;

        dispatch_dtype!(a.dtype(), T => {
            unsafe {
                kernels::index_select_kernel::<T>(
                    a.storage().ptr() as *const T,
                    &index,
                    out.storage().ptr() as *mut T,
                    plan.outer,
                    plan.dim_size,
                    plan.inner,
                );
            }
            Ok(out)
        }, "index_select")
    }
}
