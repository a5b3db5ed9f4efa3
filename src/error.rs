//! Error types for meshsmooth.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building meshes or smoothing geometry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate (fewer than three distinct vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An edge has more than two incident faces.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The faces around a vertex do not form a single fan.
    #[error("vertex {vertex} is non-manifold (its faces do not form a single fan)")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// Two faces traverse the same directed edge.
    #[error("face {face} is oriented inconsistently with its neighbors")]
    InconsistentOrientation {
        /// The face index.
        face: usize,
    },

    /// The mesh needs more elements than the index type can address.
    #[error("{count} {element}s exceed the index limit of {limit}")]
    IndexOverflow {
        /// Kind of element that overflowed ("vertex", "face" or "half-edge").
        element: &'static str,
        /// Number of elements required.
        count: usize,
        /// Largest element count the index type can address.
        limit: usize,
    },

    /// A vertex has no adjacent vertices, so its neighbor average is undefined.
    #[error("vertex {vertex} has no adjacent vertices")]
    DegenerateTopology {
        /// The isolated vertex.
        vertex: usize,
    },

    /// The position array does not cover a mesh vertex.
    #[error("no position assigned to vertex {vertex}")]
    MissingPosition {
        /// The first vertex without a position.
        vertex: usize,
    },

    /// The position array holds entries for vertices the mesh does not have.
    #[error("mesh has {vertices} vertices but {positions} positions were supplied")]
    UnexpectedPositions {
        /// Number of vertices in the mesh.
        vertices: usize,
        /// Number of positions in the geometry.
        positions: usize,
    },
}
