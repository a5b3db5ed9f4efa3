//! Mesh processing algorithms.
//!
//! - **Smoothing**: uniform Laplacian smoothing with fixed boundaries
//!   ([`smooth`])
//! - **Progress**: per-iteration progress callbacks ([`Progress`])

pub mod progress;
pub mod smooth;

pub use progress::Progress;
