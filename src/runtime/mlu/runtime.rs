//! MLU runtime implementation

use super::client::{get_buffer, register_buffer, unregister_buffer, MluAllocator, MluClient};
use super::device::MluDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// MLU compute runtime
///
/// Buffer handles are opaque registry ids, never device addresses. Host/device
/// transfers resolve the id through the registry on every call, which is also
/// how stale handles are caught.
#[derive(Clone, Debug, Default)]
pub struct MluRuntime;

impl Runtime for MluRuntime {
    type Device = MluDevice;
    type Client = MluClient;
    type Allocator = MluAllocator;

    fn name() -> &'static str {
        "mlu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> Result<u64> {
        register_buffer(size_bytes)
    }

    fn deallocate(ptr: u64, _size_bytes: usize, _device: &Self::Device) {
        unregister_buffer(ptr);
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) -> Result<()> {
        if src.is_empty() || dst == 0 {
            return Ok(());
        }

        let buf = get_buffer(dst)?;
        buf.with_bytes_mut(|bytes| {
            if bytes.len() < src.len() {
                return Err(Error::invalid_argument(
                    "dst",
                    format!(
                        "destination buffer holds {} bytes, source has {}",
                        bytes.len(),
                        src.len()
                    ),
                ));
            }
            bytes[..src.len()].copy_from_slice(src);
            Ok(())
        })
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) -> Result<()> {
        if dst.is_empty() || src == 0 {
            return Ok(());
        }

        let buf = get_buffer(src)?;
        buf.with_bytes(|bytes| {
            if bytes.len() < dst.len() {
                return Err(Error::invalid_argument(
                    "src",
                    format!(
                        "source buffer holds {} bytes, destination wants {}",
                        bytes.len(),
                        dst.len()
                    ),
                ));
            }
            dst.copy_from_slice(&bytes[..dst.len()]);
            Ok(())
        })
    }

    fn copy_within_device(src: u64, dst: u64, size_bytes: usize, _device: &Self::Device) -> Result<()> {
        if size_bytes == 0 || src == 0 || dst == 0 {
            return Ok(());
        }

        let src_buf = get_buffer(src)?;
        if src == dst {
            // Same buffer: a read lock followed by a write lock would
            // deadlock, and the copy is a no-op at offset zero anyway
            return Ok(());
        }
        let dst_buf = get_buffer(dst)?;

        src_buf.with_bytes(|src_bytes| {
            dst_buf.with_bytes_mut(|dst_bytes| {
                dst_bytes[..size_bytes].copy_from_slice(&src_bytes[..size_bytes]);
            })
        });
        Ok(())
    }

    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        _device: &Self::Device,
    ) -> Result<()> {
        if src_handle == 0 || dst_handle == 0 || shape.is_empty() {
            return Ok(());
        }

        let numel: usize = shape.iter().product();
        if numel == 0 {
            return Ok(());
        }

        if src_handle == dst_handle {
            return Err(Error::invalid_argument(
                "dst",
                "in-place strided copy is not supported",
            ));
        }

        let src_buf = get_buffer(src_handle)?;
        let dst_buf = get_buffer(dst_handle)?;

        src_buf.with_bytes(|src_bytes| {
            dst_buf.with_bytes_mut(|dst_bytes| {
                let mut indices = vec![0usize; shape.len()];

                for dst_offset in 0..numel {
                    let mut src_elem_offset: isize = 0;
                    for (i, &idx) in indices.iter().enumerate() {
                        src_elem_offset += (idx as isize) * strides[i];
                    }

                    // Offsets stay inside the buffer, applied to the byte
                    // view rather than the handle
                    let src_byte =
                        (src_byte_offset as isize + src_elem_offset * elem_size as isize) as usize;
                    let dst_byte = dst_offset * elem_size;
                    dst_bytes[dst_byte..dst_byte + elem_size]
                        .copy_from_slice(&src_bytes[src_byte..src_byte + elem_size]);

                    // Increment indices (row-major order)
                    for dim in (0..shape.len()).rev() {
                        indices[dim] += 1;
                        if indices[dim] < shape[dim] {
                            break;
                        }
                        indices[dim] = 0;
                    }
                }
            })
        });

        Ok(())
    }

    fn default_device() -> Self::Device {
        MluDevice::default()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        MluClient::new(device.clone())
    }
}
