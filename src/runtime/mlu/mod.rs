//! MLU runtime implementation (requires `mlu` feature)
//!
//! This module provides the Cambricon MLU accelerator backend. It is the
//! backend under test in the backend parity suite: every operator it
//! implements is compared against the CPU reference.
//!
//! # Execution model
//!
//! MLU device memory is never exposed as host pointers; buffers are opaque
//! u64 ids resolved through a registry, and all host<->device traffic goes
//! through explicit copies. Kernels consume their operands in fixed-size
//! tiles, following the BANG model of staging data through on-chip NRAM
//! before computing.
//!
//! Until CNRT FFI bindings land, the registry is backed by host memory and
//! the kernels run on the host against the same tiled structure.
//! TODO(cnrt): swap the registry backing and kernel launches for
//! cnrtMalloc/cnrtMemcpy and BANG kernel invocations; the dispatch surface
//! above this module does not change.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::{MluAllocator, MluClient};
pub use device::MluDevice;
pub use runtime::MluRuntime;

/// Check if an MLU device is available.
///
/// The host device model is always present; with CNRT bindings this will
/// query the driver for an attached card.
pub fn is_mlu_available() -> bool {
    true
}
