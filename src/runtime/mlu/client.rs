//! MLU client, allocator, and buffer registry

use super::device::MluDevice;
use super::runtime::MluRuntime;
use crate::error::{Error, Result};
use crate::runtime::{Allocator, RuntimeClient};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// MLU client for operation dispatch
#[derive(Clone, Debug)]
pub struct MluClient {
    pub(crate) device: MluDevice,
    allocator: MluAllocator,
}

impl MluClient {
    /// Create a new MLU client
    pub fn new(device: MluDevice) -> Self {
        let allocator = MluAllocator {
            device: device.clone(),
        };
        Self { device, allocator }
    }
}

impl RuntimeClient<MluRuntime> for MluClient {
    fn device(&self) -> &MluDevice {
        &self.device
    }

    fn synchronize(&self) {
        // The device model drains its queue synchronously at launch time.
        // With CNRT bindings this becomes cnrtSyncQueue.
    }

    fn allocator(&self) -> &MluAllocator {
        &self.allocator
    }
}

/// MLU buffer allocator
///
/// Allocates device buffers identified by opaque ids. The driver never
/// exposes raw device addresses, so buffers live behind a registry that
/// maps ids to the underlying allocation.
#[derive(Clone, Debug)]
pub struct MluAllocator {
    #[allow(dead_code)] // Carries the card ordinal for multi-device support
    device: MluDevice,
}

impl Allocator for MluAllocator {
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        register_buffer(size_bytes)
    }

    fn deallocate(&self, ptr: u64, _size_bytes: usize) {
        unregister_buffer(ptr);
    }
}

/// One device-model allocation.
///
/// Backed by u64 words so that every dtype we carry is alignment-safe when
/// the buffer is viewed as a typed slice.
pub(crate) struct MluBuffer {
    words: RwLock<Box<[u64]>>,
    size_bytes: usize,
}

impl MluBuffer {
    fn new(size_bytes: usize) -> Self {
        let n_words = size_bytes.div_ceil(8);
        Self {
            words: RwLock::new(vec![0u64; n_words].into_boxed_slice()),
            size_bytes,
        }
    }

    /// Byte size of the allocation (unpadded)
    pub(crate) fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Run `f` over the buffer contents as bytes (shared)
    pub(crate) fn with_bytes<T>(&self, f: impl FnOnce(&[u8]) -> T) -> T {
        let guard = self.words.read();
        let bytes: &[u8] = bytemuck::cast_slice(&guard);
        f(&bytes[..self.size_bytes])
    }

    /// Run `f` over the buffer contents as bytes (exclusive)
    pub(crate) fn with_bytes_mut<T>(&self, f: impl FnOnce(&mut [u8]) -> T) -> T {
        let mut guard = self.words.write();
        let size = self.size_bytes;
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut guard);
        f(&mut bytes[..size])
    }
}

impl std::fmt::Debug for MluBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MluBuffer")
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// Global buffer registry mapping allocation ids to device buffers.
///
/// The driver hides device addresses behind handles, so the runtime does the
/// same: ids are minted from a counter and resolved here on every access.
static BUFFER_REGISTRY: std::sync::OnceLock<Mutex<HashMap<u64, Arc<MluBuffer>>>> =
    std::sync::OnceLock::new();

/// Counter for generating unique buffer ids. Starts at 1; 0 means "no buffer".
static BUFFER_ID_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

fn registry() -> &'static Mutex<HashMap<u64, Arc<MluBuffer>>> {
    BUFFER_REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Allocate a device-model buffer and return its id.
pub(crate) fn register_buffer(size_bytes: usize) -> Result<u64> {
    if size_bytes == 0 {
        return Ok(0);
    }

    let id = BUFFER_ID_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    registry().lock().insert(id, Arc::new(MluBuffer::new(size_bytes)));
    Ok(id)
}

/// Drop a buffer from the registry.
pub(crate) fn unregister_buffer(id: u64) {
    if id == 0 {
        return;
    }
    registry().lock().remove(&id);
}

/// Resolve a buffer id, erroring on stale or foreign handles.
pub(crate) fn get_buffer(id: u64) -> Result<Arc<MluBuffer>> {
    registry()
        .lock()
        .get(&id)
        .cloned()
        .ok_or_else(|| Error::Backend(format!("MLU buffer {id} not found in registry")))
}
