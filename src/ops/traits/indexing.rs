//! Indexing operations

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Gather-style indexing operations
pub trait IndexingOps<R: Runtime> {
    /// Select slices along `dim` using a 1-D index tensor.
    ///
    /// The output has the input's shape with `shape[dim]` replaced by
    /// `index.numel()`: `out[..., j, ...] = a[..., index[j], ...]`.
    ///
    /// `dim` supports negative indexing. `index` must be 1-D with dtype I32
    /// or I64; indices outside `[0, shape[dim])` return `IndexOutOfBounds`.
    fn index_select(&self, a: &Tensor<R>, dim: isize, index: &Tensor<R>) -> Result<Tensor<R>>;
}
