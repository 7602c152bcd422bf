//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and provides the reference
//! implementation for all tensor operations. The MLU backend is validated
//! against it in the backend parity suite.
//!
//! Buffer handles on this backend are real host pointers cast to u64, so
//! kernels operate on them directly.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{CpuAllocator, CpuClient};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
