//! Operation traits implemented by backend clients
//!
//! Each trait groups the operations a backend registers together, mirroring
//! how accelerator libraries group their kernels. A backend client
//! implements the traits whose kernels it has.

mod indexing;
mod pool;
mod random;
mod scalar;
mod unary;

pub use indexing::IndexingOps;
pub use pool::{Pool2dGeometry, Pool2dParams, PoolOps};
pub use random::RandomOps;
pub use scalar::ScalarOps;
pub use unary::UnaryOps;
