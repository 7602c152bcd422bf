//! MLU kernel launches
//!
//! Each launch resolves its operand ids through the buffer registry and runs
//! the computation tile by tile, staging data through a fixed-size local
//! buffer the way a BANG kernel stages device memory through NRAM. Dtype
//! dispatch happens here; the op implementations in `crate::ops::mlu` only
//! validate and allocate.

use super::client::get_buffer;
use crate::dtype::{DType, Element};
use crate::error::Result;
use crate::ops::{BinaryOp, Pool2dGeometry, UnaryOp};
use crate::{dispatch_dtype, dispatch_float_dtype};

/// Elements staged per tile. 512 f32 elements fit comfortably in one NRAM
/// slice alongside the output tile.
const NRAM_TILE: usize = 512;

/// Launch an element-wise tensor-scalar operation.
pub fn launch_scalar_op(
    op: BinaryOp,
    dtype: DType,
    src: u64,
    scalar: f64,
    dst: u64,
    len: usize,
) -> Result<()> {
    if len == 0 {
        return Ok(());
    }

    let src_buf = get_buffer(src)?;
    let dst_buf = get_buffer(dst)?;

    dispatch_dtype!(dtype, T => {
        src_buf.with_bytes(|src_bytes| {
            dst_buf.with_bytes_mut(|dst_bytes| {
                let a: &[T] = bytemuck::cast_slice(src_bytes);
                let out: &mut [T] = bytemuck::cast_slice_mut(dst_bytes);
                scalar_op_tiles(op, &a[..len], T::from_f64(scalar), &mut out[..len]);
            })
        });
        Ok(())
    }, "scalar_op")
}

fn scalar_op_tiles<T: Element>(op: BinaryOp, a: &[T], s: T, out: &mut [T]) {
    let mut tile = [T::zero(); NRAM_TILE];

    for (a_chunk, out_chunk) in a.chunks(NRAM_TILE).zip(out.chunks_mut(NRAM_TILE)) {
        let n = a_chunk.len();
        tile[..n].copy_from_slice(a_chunk);

        match op {
            BinaryOp::Add => {
                for x in &mut tile[..n] {
                    *x = *x + s;
                }
            }
            BinaryOp::Sub => {
                for x in &mut tile[..n] {
                    *x = *x - s;
                }
            }
            BinaryOp::Mul => {
                for x in &mut tile[..n] {
                    *x = *x * s;
                }
            }
            BinaryOp::Div => {
                for x in &mut tile[..n] {
                    *x = x.div_wrapping(s);
                }
            }
        }

        out_chunk.copy_from_slice(&tile[..n]);
    }
}

/// Launch an element-wise unary operation.
pub fn launch_unary_op(op: UnaryOp, dtype: DType, src: u64, dst: u64, len: usize) -> Result<()> {
    if len == 0 {
        return Ok(());
    }

    let src_buf = get_buffer(src)?;
    let dst_buf = get_buffer(dst)?;

    dispatch_dtype!(dtype, T => {
        src_buf.with_bytes(|src_bytes| {
            dst_buf.with_bytes_mut(|dst_bytes| {
                let a: &[T] = bytemuck::cast_slice(src_bytes);
                let out: &mut [T] = bytemuck::cast_slice_mut(dst_bytes);
                unary_op_tiles(op, &a[..len], &mut out[..len]);
            })
        });
        Ok(())
    }, "unary_op")
}

fn unary_op_tiles<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    match op {
        // Native arithmetic; keeps integer neg/abs exact at 64-bit magnitude
        UnaryOp::Neg | UnaryOp::Abs => unary_native_tiles(op, a, out),
        _ => unary_float_tiles(op, a, out),
    }
}

fn unary_native_tiles<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    let mut tile = [T::zero(); NRAM_TILE];

    for (a_chunk, out_chunk) in a.chunks(NRAM_TILE).zip(out.chunks_mut(NRAM_TILE)) {
        let n = a_chunk.len();
        tile[..n].copy_from_slice(a_chunk);

        match op {
            UnaryOp::Neg => {
                for x in &mut tile[..n] {
                    *x = x.neg();
                }
            }
            UnaryOp::Abs => {
                for x in &mut tile[..n] {
                    *x = x.abs();
                }
            }
            _ => unreachable!("float-only op in native tile path"),
        }

        out_chunk.copy_from_slice(&tile[..n]);
    }
}

fn unary_float_tiles<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    // Staged through an f64 tile; matches the CPU reference math exactly
    let mut tile = [0f64; NRAM_TILE];

    for (a_chunk, out_chunk) in a.chunks(NRAM_TILE).zip(out.chunks_mut(NRAM_TILE)) {
        let n = a_chunk.len();
        for (slot, &v) in tile[..n].iter_mut().zip(a_chunk) {
            *slot = v.to_f64();
        }

        match op {
            UnaryOp::Neg | UnaryOp::Abs => unreachable!("handled in native tile path"),
            UnaryOp::Sqrt => {
                for x in &mut tile[..n] {
                    *x = x.sqrt();
                }
            }
            UnaryOp::Rsqrt => {
                for x in &mut tile[..n] {
                    *x = x.sqrt().recip();
                }
            }
            UnaryOp::Recip => {
                for x in &mut tile[..n] {
                    *x = x.recip();
                }
            }
        }

        for (dst, &v) in out_chunk.iter_mut().zip(&tile[..n]) {
            *dst = T::from_f64(v);
        }
    }
}

/// Launch an index_select gather.
///
/// The input is viewed as `[outer, dim_size, inner]` and each selected slice
/// is moved as one contiguous run of `inner * elem_size` bytes, so the
/// launch does not need dtype dispatch. Indices have been bounds-checked by
/// the caller.
pub fn launch_index_select(
    elem_size: usize,
    src: u64,
    index: &[i64],
    dst: u64,
    outer: usize,
    dim_size: usize,
    inner: usize,
) -> Result<()> {
    if outer * index.len() * inner == 0 {
        return Ok(());
    }

    let src_buf = get_buffer(src)?;
    let dst_buf = get_buffer(dst)?;

    let run = inner * elem_size;
    let src_block = dim_size * run;
    let dst_block = index.len() * run;

    src_buf.with_bytes(|src_bytes| {
        dst_buf.with_bytes_mut(|dst_bytes| {
            for o in 0..outer {
                for (j, &idx) in index.iter().enumerate() {
                    let src_off = o * src_block + idx as usize * run;
                    let dst_off = o * dst_block + j * run;
                    dst_bytes[dst_off..dst_off + run]
                        .copy_from_slice(&src_bytes[src_off..src_off + run]);
                }
            }
        })
    });
    Ok(())
}

/// Launch 2-D max pooling over an NCHW tensor.
///
/// The window geometry is compiled into per-output-position tap tables
/// before touching any plane, so the inner loop is a flat scan over valid
/// input positions. Out-of-window positions behave as negative infinity;
/// `indices`, when present, receives the flat `h * W + w` position of each
/// maximum in the unpadded input plane.
pub fn launch_max_pool2d(
    dtype: DType,
    src: u64,
    dst: u64,
    indices: Option<u64>,
    g: &Pool2dGeometry,
) -> Result<()> {
    if g.n * g.c * g.out_h * g.out_w == 0 {
        return Ok(());
    }

    let src_buf = get_buffer(src)?;
    let dst_buf = get_buffer(dst)?;
    let idx_buf = match indices {
        Some(id) => Some(get_buffer(id)?),
        None => None,
    };

    let taps = compile_taps(g);

    dispatch_float_dtype!(dtype, T => {
        src_buf.with_bytes(|src_bytes| {
            dst_buf.with_bytes_mut(|dst_bytes| {
                let input: &[T] = bytemuck::cast_slice(src_bytes);
                let out: &mut [T] = bytemuck::cast_slice_mut(dst_bytes);
                match &idx_buf {
                    Some(buf) => buf.with_bytes_mut(|idx_bytes| {
                        let idx: &mut [i64] = bytemuck::cast_slice_mut(idx_bytes);
                        pool_planes(input, out, Some(idx), &taps, g);
                    }),
                    None => pool_planes(input, out, None, &taps, g),
                }
            })
        });
        Ok(())
    }, "max_pool2d")
}

/// Valid input positions per output position, in window scan order.
fn compile_taps(g: &Pool2dGeometry) -> Vec<Vec<usize>> {
    let mut taps = Vec::with_capacity(g.out_h * g.out_w);

    for oh in 0..g.out_h {
        for ow in 0..g.out_w {
            let mut positions = Vec::new();
            for kh in 0..g.kh {
                let ih = oh as isize * g.sh as isize - g.ph as isize + (kh * g.dh) as isize;
                if ih < 0 || ih >= g.h as isize {
                    continue;
                }
                for kw in 0..g.kw {
                    let iw = ow as isize * g.sw as isize - g.pw as isize + (kw * g.dw) as isize;
                    if iw < 0 || iw >= g.w as isize {
                        continue;
                    }
                    positions.push(ih as usize * g.w + iw as usize);
                }
            }
            taps.push(positions);
        }
    }

    taps
}

fn pool_planes<T: Element>(
    input: &[T],
    out: &mut [T],
    mut indices: Option<&mut [i64]>,
    taps: &[Vec<usize>],
    g: &Pool2dGeometry,
) {
    let plane = g.h * g.w;
    let out_plane = g.out_h * g.out_w;

    for nc in 0..g.n * g.c {
        let src = &input[nc * plane..(nc + 1) * plane];
        let dst = &mut out[nc * out_plane..(nc + 1) * out_plane];

        for (out_pos, positions) in taps.iter().enumerate() {
            let mut best = f64::NEG_INFINITY;
            let mut best_idx: i64 = -1;

            for &pos in positions {
                let v = src[pos].to_f64();
                if v > best {
                    best = v;
                    best_idx = pos as i64;
                }
            }

            dst[out_pos] = T::from_f64(best);
            if let Some(idx) = indices.as_deref_mut() {
                idx[nc * out_plane + out_pos] = best_idx;
            }
        }
    }
}
