//! MLU indexing operations

use crate::error::Result;
use crate::ops::{index_select_plan, read_index_vec, IndexingOps};
use crate::runtime::mlu::{kernels, MluClient, MluRuntime};
use crate::runtime::{ensure_contiguous, RuntimeClient};
use crate::tensor::Tensor;

impl IndexingOps<MluRuntime> for MluClient {
    fn index_select(
        &self,
        a: &Tensor<MluRuntime>,
        dim: isize,
        index: &Tensor<MluRuntime>,
    ) -> Result<Tensor<MluRuntime>> {
        let plan = index_select_plan(a, dim, index.numel())?;
        // Indices come back to the host for validation, as cnnl requires
        // in-range indices
        let index = read_index_vec(index, plan.dim_size)?;

        let a = ensure_contiguous(a);
        let out = Tensor::try_empty(&plan.out_shape, a.dtype(), self.device())?;

        kernels::launch_index_select(
            a.dtype().size_in_bytes(),
            a.storage().ptr(),
            &index,
            out.storage().ptr(),
            plan.outer,
            plan.dim_size,
            plan.inner,
        )?;
        Ok(out)
    }
}
