//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the CPU reference backend and the MLU accelerator backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific MLU card / the host CPU)
//! ├── Client (dispatches operations, owns the queue)
//! └── Allocator (memory management)
//! ```

mod allocator;
mod helpers;

pub mod cpu;

#[cfg(feature = "mlu")]
pub mod mlu;

pub use allocator::{Allocator, DefaultAllocator};
pub use helpers::ensure_contiguous;

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices (CPU, MLU). It uses
/// static dispatch via generics for zero-cost abstraction.
///
/// # Handle Model
///
/// Buffers are identified by `u64` handles. The CPU backend stores real host
/// pointers in them; the MLU backend stores opaque buffer ids resolved
/// through a registry. Code outside a backend must never do arithmetic on a
/// handle -- strided access goes through [`Runtime::copy_strided`].
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Client for dispatching operations
    type Client: RuntimeClient<Self>;

    /// Memory allocator type
    type Allocator: Allocator;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Allocate device memory
    ///
    /// Returns a buffer handle that can be used for operations.
    /// Returns `Err(OutOfMemory)` if allocation fails.
    fn allocate(size_bytes: usize, device: &Self::Device) -> crate::error::Result<u64>;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy data from host to device
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> crate::error::Result<()>;

    /// Copy data from device to host
    fn copy_from_device(
        src: u64,
        dst: &mut [u8],
        device: &Self::Device,
    ) -> crate::error::Result<()>;

    /// Copy data within device (device to device)
    fn copy_within_device(
        src: u64,
        dst: u64,
        size_bytes: usize,
        device: &Self::Device,
    ) -> crate::error::Result<()>;

    /// Copy strided data to a contiguous buffer
    ///
    /// This is how a non-contiguous tensor is materialized. Each backend
    /// implements it against its own memory model:
    /// - CPU: pointer arithmetic on the handle
    /// - MLU: registry lookup, offsets applied inside the buffer
    ///
    /// # Parameters
    /// - `src_handle`: Source buffer handle
    /// - `src_byte_offset`: Byte offset into source buffer
    /// - `dst_handle`: Destination buffer handle (written contiguously)
    /// - `shape`: Shape of the tensor
    /// - `strides`: Strides of the source tensor (in elements, not bytes)
    /// - `elem_size`: Size of each element in bytes
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> crate::error::Result<()>;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self);

    /// Get the allocator for this client
    fn allocator(&self) -> &R::Allocator;
}
