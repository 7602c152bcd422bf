//! MLU implementations of the operation traits
//!
//! Validation and planning are shared with the CPU path; only the kernel
//! launches differ. Random generation is deliberately absent: parity inputs
//! are generated on the host and uploaded.

mod indexing;
mod pool;
mod scalar;
mod unary;
