//! Tensor-scalar arithmetic operations

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise arithmetic between a tensor and a scalar
///
/// The scalar is passed as `f64` and converted to the tensor's dtype inside
/// the kernel, so `add_scalar` on an I32 tensor adds the truncated integer.
pub trait ScalarOps<R: Runtime> {
    /// `out[i] = a[i] + scalar`
    fn add_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;

    /// `out[i] = a[i] - scalar`
    fn sub_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;

    /// `out[i] = a[i] * scalar`
    fn mul_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;

    /// `out[i] = a[i] / scalar`
    fn div_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;
}
