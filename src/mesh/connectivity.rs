//! Adjacency queries consumed by geometry algorithms.

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeId, MeshIndex, VertexId};

/// Read-only adjacency and boundary queries over a fixed mesh topology.
///
/// Vertex ids must be dense: every id in `0..num_vertices()` is a vertex, so
/// per-vertex data can live in a plain `Vec` indexed by [`VertexId::index`].
/// Neighbor and edge sequences must be finite and stable across calls while
/// the topology is unchanged.
pub trait Connectivity {
    /// Integer type backing the mesh's handles.
    type Index: MeshIndex;

    /// Number of vertices.
    fn num_vertices(&self) -> usize;

    /// Iterate over all vertex ids in index order.
    fn vertex_ids(&self) -> impl Iterator<Item = VertexId<Self::Index>> + '_ {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// The 1-ring neighbors of `v`.
    fn neighbors_of(&self, v: VertexId<Self::Index>) -> impl Iterator<Item = VertexId<Self::Index>> + '_;

    /// The edges incident to `v`.
    fn incident_edges_of(&self, v: VertexId<Self::Index>) -> impl Iterator<Item = EdgeId<Self::Index>> + '_;

    /// Number of neighbors of `v`, equal to the length of [`neighbors_of`](Self::neighbors_of).
    fn degree(&self, v: VertexId<Self::Index>) -> usize {
        self.neighbors_of(v).count()
    }

    /// Whether `e` has fewer than two incident faces.
    fn is_boundary(&self, e: EdgeId<Self::Index>) -> bool;

    /// Whether any edge incident to `v` is a boundary edge.
    fn touches_boundary(&self, v: VertexId<Self::Index>) -> bool {
        self.incident_edges_of(v).any(|e| self.is_boundary(e))
    }
}

impl<I: MeshIndex> Connectivity for HalfEdgeMesh<I> {
    type Index = I;

    #[inline]
    fn num_vertices(&self) -> usize {
        HalfEdgeMesh::num_vertices(self)
    }

    fn neighbors_of(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_neighbors(v)
    }

    fn incident_edges_of(&self, v: VertexId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.vertex_edges(v)
    }

    fn degree(&self, v: VertexId<I>) -> usize {
        self.valence(v)
    }

    #[inline]
    fn is_boundary(&self, e: EdgeId<I>) -> bool {
        self.is_boundary_edge(e)
    }

    #[inline]
    fn touches_boundary(&self, v: VertexId<I>) -> bool {
        self.is_boundary_vertex(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_quads, build_from_triangles};

    /// Walks the incident edges instead of using the anchored half-edge.
    fn touches_boundary_by_edges<C: Connectivity>(mesh: &C, v: VertexId<C::Index>) -> bool {
        mesh.incident_edges_of(v).any(|e| mesh.is_boundary(e))
    }

    #[test]
    fn test_boundary_shortcut_matches_edge_scan() {
        let faces = [
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [4, 5, 9, 8],
            [5, 6, 10, 9],
            [6, 7, 11, 10],
        ];
        let mesh: HalfEdgeMesh = build_from_quads(12, &faces).unwrap();
        for v in Connectivity::vertex_ids(&mesh) {
            assert_eq!(mesh.touches_boundary(v), touches_boundary_by_edges(&mesh, v));
        }
        // A 4x3 vertex grid has only boundary vertices except 5 and 6
        assert!(!mesh.touches_boundary(VertexId::new(5)));
        assert!(!mesh.touches_boundary(VertexId::new(6)));
        assert!(mesh.touches_boundary(VertexId::new(1)));
    }

    #[test]
    fn test_degree_matches_neighbor_count() {
        let faces = [[0, 1, 2], [0, 2, 3], [0, 3, 1]];
        let mesh: HalfEdgeMesh = build_from_triangles(5, &faces).unwrap();
        for v in Connectivity::vertex_ids(&mesh) {
            assert_eq!(Connectivity::degree(&mesh, v), mesh.neighbors_of(v).count());
            assert_eq!(mesh.incident_edges_of(v).count(), mesh.neighbors_of(v).count());
        }
        assert_eq!(Connectivity::degree(&mesh, VertexId::new(0)), 3);
        assert_eq!(Connectivity::degree(&mesh, VertexId::new(4)), 0);
    }
}
