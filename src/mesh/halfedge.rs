//! Half-edge mesh connectivity.
//!
//! This module provides a half-edge (doubly-connected edge list)
//! representation of polygon mesh topology. Positions are not stored here;
//! they live in [`Geometry`](crate::geometry::Geometry), which pairs a mesh
//! with one position per vertex.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** pointing in opposite
//!   directions. Twins are stored as adjacent pairs: edge `e` owns half-edges
//!   `2e` and `2e + 1`.
//! - Each half-edge knows its **next** and **prev** half-edge around its face,
//!   its **origin vertex**, and its **incident face**.
//! - Each vertex stores one outgoing half-edge.
//! - Each face stores one half-edge on its boundary.
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face ID and are linked into boundary
//! loops through `next`/`prev`. A boundary vertex always stores its outgoing
//! boundary half-edge, so boundary classification of a vertex is O(1).
//! Vertices referenced by no face are isolated: their half-edge is invalid.

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Vertex<I: MeshIndex = u32> {
    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is guaranteed to be a boundary half-edge.
    /// Invalid for isolated vertices.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new isolated vertex.
    pub fn new() -> Self {
        Self {
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

impl<I: MeshIndex> Default for Vertex<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The next half-edge around the face (or boundary loop).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face (or boundary loop).
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to.
    /// Invalid for boundary half-edges.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge leaving `origin`.
    pub fn new(origin: VertexId<I>) -> Self {
        Self {
            origin,
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh for polygon meshes.
///
/// Build one with [`build_from_polygons`](super::build_from_polygons) or one
/// of its fixed-arity shorthands.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh, twins adjacent.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with `num_vertices` isolated vertices and room for the
    /// given number of edges and faces.
    pub(crate) fn with_isolated_vertices(
        num_vertices: usize,
        num_edges: usize,
        num_faces: usize,
    ) -> Self {
        Self {
            vertices: vec![Vertex::new(); num_vertices],
            halfedges: Vec::with_capacity(num_edges * 2),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        he.twin()
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(he.twin())
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Get the edge a half-edge belongs to.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        he.edge()
    }

    /// Get the first half-edge of an edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId<I>) -> HalfEdgeId<I> {
        e.halfedge()
    }

    /// Get the two endpoints of an edge.
    pub fn edge_vertices(&self, e: EdgeId<I>) -> [VertexId<I>; 2] {
        let he = e.halfedge();
        [self.origin(he), self.dest(he)]
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if an edge has fewer than two incident faces.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        let he = e.halfedge();
        self.is_boundary_halfedge(he) || self.is_boundary_halfedge(he.twin())
    }

    /// Check if a vertex touches a boundary edge.
    ///
    /// Isolated vertices have no edges and are not boundary vertices.
    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let he = self.vertex(v).halfedge;
        he.is_valid() && self.is_boundary_halfedge(he)
    }

    /// Check if a vertex is referenced by no face.
    #[inline]
    pub fn is_isolated(&self, v: VertexId<I>) -> bool {
        !self.vertex(v).halfedge.is_valid()
    }

    /// Check if the mesh has no boundary edges.
    pub fn is_closed(&self) -> bool {
        self.halfedges.iter().all(|he| !he.is_boundary())
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over half-edges around a vertex (outgoing half-edges).
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Iterate over vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.dest(he))
    }

    /// Iterate over edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| he.edge())
    }

    /// Iterate over faces adjacent to a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_halfedges(v)
            .map(|he| self.face_of(he))
            .filter(|f| f.is_valid())
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over vertices of a face.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Number of vertices (equivalently edges) of a face.
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    /// Compute the valence (degree) of a vertex.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_halfedges(v).count()
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        if self.halfedges.len() % 2 != 0 {
            return false;
        }

        for (i, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).origin.index() != i {
                return false;
            }
        }

        for heid in self.halfedge_ids() {
            let he = self.halfedge(heid);
            if !he.next.is_valid() || !he.prev.is_valid() {
                return false;
            }
            if self.halfedge(he.next).prev != heid || self.halfedge(he.prev).next != heid {
                return false;
            }
            // next must leave from where this one arrives
            if self.origin(he.next) != self.dest(heid) {
                return false;
            }
            if self.halfedge(he.next).face != he.face {
                return false;
            }
        }

        self.faces.iter().all(|f| f.halfedge.is_valid())
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;

        // he: v -> w, twin(he): w -> v, next(twin(he)) leaves v again.
        self.current = self.mesh.next(self.current.twin());

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
