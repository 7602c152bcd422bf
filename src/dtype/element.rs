//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to numlu's runtime dtype system.
/// It's implemented for the primitive types behind each `DType` variant.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck)
/// - `Add + Sub + Mul + Div` - Arithmetic operations (Output = Self)
/// - `PartialOrd` - Comparison for max pooling
///
/// Note: the integer impls use wrapping arithmetic for `neg`, `abs`, and
/// `div_wrapping`, so `i64::MIN` maps to itself instead of trapping. This
/// is what the accelerator hardware does.
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Negation in native arithmetic (wrapping for integers)
    fn neg(self) -> Self;

    /// Absolute value in native arithmetic (wrapping for integers)
    fn abs(self) -> Self;

    /// Division in native arithmetic (wrapping for integers)
    fn div_wrapping(self, rhs: Self) -> Self;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn div_wrapping(self, rhs: Self) -> Self {
        self / rhs
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn div_wrapping(self, rhs: Self) -> Self {
        self / rhs
    }
}

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        half::f16::to_f64(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }

    #[inline]
    fn neg(self) -> Self {
        -self
    }

    #[inline]
    fn abs(self) -> Self {
        // Clear the sign bit; preserves NaN payloads
        half::f16::from_bits(self.to_bits() & 0x7fff)
    }

    #[inline]
    fn div_wrapping(self, rhs: Self) -> Self {
        self / rhs
    }
}

impl Element for i64 {
    const DTYPE: DType = DType::I64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i64
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }

    #[inline]
    fn abs(self) -> Self {
        self.wrapping_abs()
    }

    #[inline]
    fn div_wrapping(self, rhs: Self) -> Self {
        i64::wrapping_div(self, rhs)
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i32
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }

    #[inline]
    fn abs(self) -> Self {
        self.wrapping_abs()
    }

    #[inline]
    fn div_wrapping(self, rhs: Self) -> Self {
        i32::wrapping_div(self, rhs)
    }
}
