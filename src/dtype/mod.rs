//! Data type system for numlu tensors
//!
//! This module provides the `DType` enum representing all supported element
//! types, the `Element` trait connecting Rust types to dtypes, and the
//! `dispatch_dtype!` macro used by backends to go from a runtime dtype to a
//! typed kernel call.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by numlu tensors
///
/// This enum represents the element type of a tensor at runtime.
/// Using an enum (rather than generics on `Tensor`) allows runtime type
/// selection, which the parity harness needs to parameterize tests over
/// dtypes.
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are **stable**: floats 0-9, signed ints 10-19.
/// Existing values are never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,

    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::F16 => 2,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32 | Self::F16)
    }

    /// Returns true if this is an integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32)
    }

    /// Short lowercase name, as used in kernel dispatch error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::I64 => "i64",
            Self::I32 => "i32",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Dispatch a runtime `DType` to a typed code block.
///
/// Matches on the dtype and executes the block with `$T` bound to the
/// corresponding Rust type. F16 requires the `f16` feature; without it the
/// F16 arm returns `UnsupportedDType`.
///
/// Usage: `dispatch_dtype!(dtype, T => { code using T }, "op_name")`
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::f16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err($crate::error::Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
            $crate::dtype::DType::I32 => {
                type $T = i32;
                $body
            }
        }
    };
}

/// Dispatch a runtime `DType` to a typed code block, float types only.
///
/// Integer dtypes return `UnsupportedDType`. Used by operators whose kernels
/// are only registered for floats (rsqrt, max_pool2d), matching cnnl kernel
/// coverage.
#[macro_export]
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::f16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err($crate::error::Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            _ => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                });
            }
        }
    };
}
