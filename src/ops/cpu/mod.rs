//! CPU reference implementations of the operation traits

mod indexing;
mod pool;
mod random;
mod scalar;
mod unary;
