//! # meshsmooth
//!
//! Iterative Laplacian smoothing for polygon meshes.
//!
//! meshsmooth pairs a half-edge connectivity structure with a per-vertex
//! position array and repeatedly moves every interior vertex to the average
//! of its neighbors. Vertices on an open boundary stay where they are.
//!
//! ## Features
//!
//! - **Half-edge connectivity**: polygon faces of any arity, type-safe indices
//! - **Flexible indexing**: 16-bit, 32-bit, and 64-bit indices
//! - **Snapshot-consistent passes**: results never depend on visiting order
//! - **Parallel passes**: the per-vertex loop runs on rayon
//!
//! ## Quick Start
//!
//! ```
//! use meshsmooth::prelude::*;
//! use nalgebra::Point3;
//!
//! // A 3x3 vertex grid of unit quads with a bump at the center
//! let mut positions = Vec::new();
//! for j in 0..3 {
//!     for i in 0..3 {
//!         let z = if (i, j) == (1, 1) { 1.0 } else { 0.0 };
//!         positions.push(Point3::new(i as f64, j as f64, z));
//!     }
//! }
//! let faces = [[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
//! let mut geometry: Geometry = Geometry::from_quads(&positions, &faces).unwrap();
//!
//! LaplacianSmoother::new(&mut geometry).apply(3).unwrap();
//!
//! // The bump is flattened; the boundary ring did not move
//! assert_eq!(geometry.position(VertexId::new(4)).z, 0.0);
//! assert_eq!(*geometry.position(VertexId::new(0)), Point3::new(0.0, 0.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use meshsmooth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::smooth::{laplacian_smooth, LaplacianSmoother, SmoothOptions};
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::geometry::{Geometry, Position};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, Connectivity, EdgeId,
        FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
