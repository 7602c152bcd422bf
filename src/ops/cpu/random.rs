//! CPU random tensor generation

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::RandomOps;
use crate::runtime::cpu::{kernels, CpuClient, CpuRuntime};
use crate::runtime::RuntimeClient;
use crate::tensor::Tensor;
use crate::{dispatch_dtype, dispatch_float_dtype};

impl RandomOps<CpuRuntime> for CpuClient {
    fn rand(&self, shape: &[usize], dtype: DType) -> Result<Tensor<CpuRuntime>> {
        let out = Tensor::try_empty(shape, dtype, self.device())?;
        let len = out.numel();

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::rand_uniform_kernel::<T>(out.storage().ptr() as *mut T, len);
            }
            Ok(out)
        }, "rand")
    }

    fn randn(&self, shape: &[usize], dtype: DType) -> Result<Tensor<CpuRuntime>> {
        let out = Tensor::try_empty(shape, dtype, self.device())?;
        let len = out.numel();

        dispatch_float_dtype!(dtype, T => {
            unsafe {
                kernels::rand_normal_kernel::<T>(out.storage().ptr() as *mut T, len);
            }
            Ok(out)
        }, "randn")
    }

    fn randint(&self, low: i64, high: i64, shape: &[usize], dtype: DType) -> Result<Tensor<CpuRuntime>> {
        if low >= high {
            return Err(Error::invalid_argument(
                "low",
                format!("empty range: low {low} >= high {high}"),
            ));
        }

        let out = Tensor::try_empty(shape, dtype, self.device())?;
        let len = out.numel();

        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::randint_kernel::<T>(out.storage().ptr() as *mut T, low, high, len);
            }
            Ok(out)
        }, "randint")
    }
}
