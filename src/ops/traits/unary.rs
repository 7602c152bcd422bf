//! Element-wise unary operations

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise unary math
///
/// `neg` and `abs` are registered for every dtype. `sqrt`, `rsqrt`, and
/// `recip` are float-only; integer inputs return `UnsupportedDType`.
pub trait UnaryOps<R: Runtime> {
    /// `out[i] = -a[i]`
    fn neg(&self, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = |a[i]|`
    fn abs(&self, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = sqrt(a[i])`
    fn sqrt(&self, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = 1 / sqrt(a[i])`
    ///
    /// Non-positive inputs follow IEEE semantics: `rsqrt(0) = inf`,
    /// `rsqrt(x < 0) = NaN`.
    fn rsqrt(&self, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = 1 / a[i]`
    fn recip(&self, a: &Tensor<R>) -> Result<Tensor<R>>;
}
