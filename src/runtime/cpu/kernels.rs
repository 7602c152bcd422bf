//! Typed CPU kernels
//!
//! The actual compute loops for the CPU backend. Every kernel is generic
//! over `T: Element` and operates on raw pointers; the op implementations in
//! `crate::ops::cpu` are responsible for dtype dispatch, contiguity, and
//! output allocation before calling in here.

use crate::dtype::Element;
use crate::ops::{BinaryOp, Pool2dGeometry, UnaryOp};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Binary operation with a scalar (tensor op scalar)
///
/// # Safety
/// - `a` and `out` must be valid pointers to `len` elements when `len > 0`
#[inline]
pub unsafe fn scalar_op_kernel<T: Element>(
    op: BinaryOp,
    a: *const T,
    scalar: f64,
    out: *mut T,
    len: usize,
) {
    // Zero-size tensors carry a null handle; never form a slice from one
    if len == 0 {
        return;
    }

    let a_slice = std::slice::from_raw_parts(a, len);
    let out_slice = std::slice::from_raw_parts_mut(out, len);
    let s = T::from_f64(scalar);

    match op {
        BinaryOp::Add => {
            for i in 0..len {
                out_slice[i] = a_slice[i] + s;
            }
        }
        BinaryOp::Sub => {
            for i in 0..len {
                out_slice[i] = a_slice[i] - s;
            }
        }
        BinaryOp::Mul => {
            for i in 0..len {
                out_slice[i] = a_slice[i] * s;
            }
        }
        BinaryOp::Div => {
            for i in 0..len {
                out_slice[i] = a_slice[i].div_wrapping(s);
            }
        }
    }
}

/// Element-wise unary operation
///
/// Neg and abs run in the element's native arithmetic, so integer results
/// stay exact at full 64-bit magnitude. The float-only ops go through f64,
/// which keeps a single code path for F16 (no native sqrt on the host).
///
/// # Safety
/// - `a` and `out` must be valid pointers to `len` elements when `len > 0`
#[inline]
pub unsafe fn unary_op_kernel<T: Element>(op: UnaryOp, a: *const T, out: *mut T, len: usize) {
    if len == 0 {
        return;
    }

    let a_slice = std::slice::from_raw_parts(a, len);
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    match op {
        UnaryOp::Neg => {
            for i in 0..len {
                out_slice[i] = a_slice[i].neg();
            }
        }
        UnaryOp::Abs => {
            for i in 0..len {
                out_slice[i] = a_slice[i].abs();
            }
        }
        UnaryOp::Sqrt => {
            for i in 0..len {
                out_slice[i] = T::from_f64(a_slice[i].to_f64().sqrt());
            }
        }
        UnaryOp::Rsqrt => {
            for i in 0..len {
                out_slice[i] = T::from_f64(a_slice[i].to_f64().sqrt().recip());
            }
        }
        UnaryOp::Recip => {
            for i in 0..len {
                out_slice[i] = T::from_f64(a_slice[i].to_f64().recip());
            }
        }
    }
}

/// Select slices along a dimension using an index vector.
///
/// The input is viewed as `[outer, dim_size, inner]`; for each output
/// position `(o, j, :)` the kernel copies `input[o, index[j], :]`.
/// Indices have been bounds-checked by the caller.
///
/// # Safety
/// - `a` must be valid for `outer * dim_size * inner` elements
/// - `out` must be valid for `outer * index.len() * inner` elements
#[inline]
pub unsafe fn index_select_kernel<T: Element>(
    a: *const T,
    index: &[i64],
    out: *mut T,
    outer: usize,
    dim_size: usize,
    inner: usize,
) {
    // An empty output also guarantees the input is untouched; indices in
    // bounds mean dim_size > 0 whenever any index exists
    if outer * index.len() * inner == 0 {
        return;
    }

    let a_slice = std::slice::from_raw_parts(a, outer * dim_size * inner);
    let out_slice = std::slice::from_raw_parts_mut(out, outer * index.len() * inner);

    for o in 0..outer {
        let src_block = &a_slice[o * dim_size * inner..];
        let dst_block = &mut out_slice[o * index.len() * inner..];
        for (j, &idx) in index.iter().enumerate() {
            let src = &src_block[idx as usize * inner..idx as usize * inner + inner];
            dst_block[j * inner..j * inner + inner].copy_from_slice(src);
        }
    }
}

/// 2-D max pooling over an NCHW tensor.
///
/// Out-of-window positions behave as negative infinity. When `indices` is
/// non-null it receives the flat `h * W + w` position of each maximum within
/// the (unpadded) input plane, the PyTorch convention.
///
/// # Safety
/// - `input` must be valid for `n * c * h * w` elements
/// - `out` must be valid for `n * c * out_h * out_w` elements
/// - `indices`, if non-null, must be valid for the same count as `out`
#[inline]
pub unsafe fn max_pool2d_kernel<T: Element>(
    input: *const T,
    out: *mut T,
    indices: *mut i64,
    g: &Pool2dGeometry,
) {
    // Geometry rejects zero spatial and channel dims, so only an empty
    // batch reaches here with count zero
    if g.n * g.c * g.out_h * g.out_w == 0 {
        return;
    }

    let plane = g.h * g.w;
    let out_plane = g.out_h * g.out_w;
    let input_slice = std::slice::from_raw_parts(input, g.n * g.c * plane);
    let out_slice = std::slice::from_raw_parts_mut(out, g.n * g.c * out_plane);

    for nc in 0..g.n * g.c {
        let src = &input_slice[nc * plane..(nc + 1) * plane];
        let dst = &mut out_slice[nc * out_plane..(nc + 1) * out_plane];

        for oh in 0..g.out_h {
            for ow in 0..g.out_w {
                let mut best = f64::NEG_INFINITY;
                let mut best_idx: i64 = -1;

                for kh in 0..g.kh {
                    let ih = oh as isize * g.sh as isize - g.ph as isize + (kh * g.dh) as isize;
                    if ih < 0 || ih >= g.h as isize {
                        continue;
                    }
                    for kw in 0..g.kw {
                        let iw =
                            ow as isize * g.sw as isize - g.pw as isize + (kw * g.dw) as isize;
                        if iw < 0 || iw >= g.w as isize {
                            continue;
                        }
                        let pos = ih as usize * g.w + iw as usize;
                        let v = src[pos].to_f64();
                        if v > best {
                            best = v;
                            best_idx = pos as i64;
                        }
                    }
                }

                dst[oh * g.out_w + ow] = T::from_f64(best);
                if !indices.is_null() {
                    *indices.add(nc * out_plane + oh * g.out_w + ow) = best_idx;
                }
            }
        }
    }
}

/// Fill with uniform random values in [0, 1)
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements when `len > 0`
#[inline]
pub unsafe fn rand_uniform_kernel<T: Element>(out: *mut T, len: usize) {
    if len == 0 {
        return;
    }

    let mut rng = rand::rng();
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for elem in out_slice.iter_mut() {
        let v: f64 = rng.random();
        *elem = T::from_f64(v);
    }
}

/// Fill with standard normal random values (mean=0, std=1)
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements when `len > 0`
#[inline]
pub unsafe fn rand_normal_kernel<T: Element>(out: *mut T, len: usize) {
    if len == 0 {
        return;
    }

    let mut rng = rand::rng();
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for elem in out_slice.iter_mut() {
        let v: f64 = StandardNormal.sample(&mut rng);
        *elem = T::from_f64(v);
    }
}

/// Fill with random integers in [low, high)
///
/// # Safety
/// - `out` must be a valid pointer to `len` elements when `len > 0`
#[inline]
pub unsafe fn randint_kernel<T: Element>(out: *mut T, low: i64, high: i64, len: usize) {
    if len == 0 {
        return;
    }

    let mut rng = rand::rng();
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for elem in out_slice.iter_mut() {
        let v: i64 = rng.random_range(low..high);
        *elem = T::from_f64(v as f64);
    }
}
