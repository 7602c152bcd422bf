//! # numlu
//!
//! **Tensor operators with multi-backend dispatch and MLU parity validation.**
//!
//! numlu provides a small n-dimensional tensor type and a set of operators
//! (max pooling, scalar arithmetic, index selection, elementwise unary math)
//! with the same API across a CPU reference backend and a Cambricon MLU
//! backend. Its integration suite runs every operator on both backends and
//! asserts numerical closeness, which is the crate's reason to exist: the MLU
//! kernels are validated against the CPU reference, not trusted.
//!
//! ## Backends
//!
//! - **CPU** (always available): reference implementation on host memory
//! - **MLU** (`mlu` feature, default): accelerator backend. Until CNRT FFI
//!   bindings land it runs against a host-side device model with opaque
//!   buffer handles and tiled kernels, keeping the dispatch surface identical
//!   to the driver-backed implementation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use numlu::prelude::*;
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device);
//!
//! let x = Tensor::<CpuRuntime>::from_slice(&[4.0f32, 16.0, 64.0], &[3], &device);
//! let y = client.rsqrt(&x)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `mlu` (default): MLU accelerator backend
//! - `f16` (default): Half-precision floats (F16)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::ops::{IndexingOps, Pool2dParams, PoolOps, RandomOps, ScalarOps, UnaryOps};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    pub use crate::runtime::cpu::CpuRuntime;

    #[cfg(feature = "mlu")]
    pub use crate::runtime::mlu::MluRuntime;
}

/// Default runtime based on enabled features
///
/// - With `mlu` feature: `MluRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "mlu")]
pub type DefaultRuntime = runtime::mlu::MluRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "mlu"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
