//! Random tensor generation

use crate::dtype::DType;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Random tensor constructors
///
/// Only the CPU backend implements this; test inputs are generated on the
/// host and uploaded to other backends.
pub trait RandomOps<R: Runtime> {
    /// Uniform random values in `[0, 1)`. Float dtypes only.
    fn rand(&self, shape: &[usize], dtype: DType) -> Result<Tensor<R>>;

    /// Standard normal random values (mean 0, std 1). Float dtypes only.
    fn randn(&self, shape: &[usize], dtype: DType) -> Result<Tensor<R>>;

    /// Random integers in `[low, high)`.
    fn randint(&self, low: i64, high: i64, shape: &[usize], dtype: DType) -> Result<Tensor<R>>;
}
