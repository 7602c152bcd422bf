//! Shared helper functions for runtime backends

use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Ensure a tensor is contiguous in memory.
///
/// If the tensor is already contiguous, returns a clone (zero-copy, just
/// increments the Arc refcount). Otherwise materializes the strided view.
///
/// Backend kernels expect contiguous memory, so every op implementation
/// funnels its inputs through this first.
#[inline]
pub fn ensure_contiguous<R: Runtime>(tensor: &Tensor<R>) -> Tensor<R> {
    if tensor.is_contiguous() {
        tensor.clone()
    } else {
        tensor.contiguous()
    }
}
