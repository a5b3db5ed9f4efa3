//! Mesh connectivity.
//!
//! This module provides the half-edge representation of polygon mesh
//! topology and the [`Connectivity`] trait that smoothing consumes.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], which stores vertices, edges, and
//! faces of a polygon mesh using a half-edge (doubly-connected edge list)
//! structure. Adjacency queries walk index links, so there are no reference
//! cycles and the whole structure is `Send + Sync`.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies a full edge
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`]
//! trait), allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use meshsmooth::mesh::{build_from_triangles, Connectivity, HalfEdgeMesh, VertexId};
//!
//! // Two triangles sharing the edge (0, 1)
//! let mesh: HalfEdgeMesh = build_from_triangles(4, &[[0, 1, 2], [1, 0, 3]]).unwrap();
//!
//! let v = VertexId::new(0);
//! assert_eq!(mesh.degree(v), 3);
//! assert!(mesh.touches_boundary(v));
//! ```

mod builder;
mod connectivity;
mod halfedge;
mod index;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_polygons};
pub use connectivity::Connectivity;
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
