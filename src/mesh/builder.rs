//! Mesh construction utilities.
//!
//! This module builds half-edge connectivity from face-vertex lists, the
//! representation most mesh sources provide. Faces may have any number of
//! vertices (at least three) and are expected to be consistently oriented.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from polygon faces.
///
/// # Arguments
/// * `num_vertices` - Number of vertices; faces index into `0..num_vertices`
/// * `faces` - Polygon faces as vertex index lists (counter-clockwise)
///
/// Vertices not referenced by any face become isolated vertices.
///
/// # Errors
///
/// Fails on an empty face list, out-of-range indices, degenerate faces,
/// edges shared by more than two faces, inconsistent face orientation, and
/// vertices whose faces do not form a single fan. Returns
/// [`MeshError::IndexOverflow`] when the vertex, face or half-edge count does
/// not fit the index type `I`.
///
/// # Example
/// ```
/// use meshsmooth::mesh::{build_from_polygons, HalfEdgeMesh};
///
/// // A quad and a triangle sharing the edge (1, 2)
/// let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
/// let mesh: HalfEdgeMesh = build_from_polygons(5, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    num_vertices: usize,
    faces: &[F],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    check_capacity::<I>("vertex", num_vertices)?;
    check_capacity::<I>("face", faces.len())?;

    let mut num_corners = 0;
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        for &vi in face {
            if vi >= num_vertices {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face.len() < 3 || has_repeated_vertex(face) {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        num_corners += face.len();
    }

    // Each corner introduces at most one new edge
    let mut mesh = HalfEdgeMesh::with_isolated_vertices(num_vertices, num_corners, faces.len());
    let mut edge_map: HashMap<(usize, usize), EdgeId<I>> = HashMap::with_capacity(num_corners);

    // First pass: create edges on demand and claim one half-edge per corner
    let mut face_hes: Vec<HalfEdgeId<I>> = Vec::new();
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        let face_id = FaceId::<I>::new(fi);

        face_hes.clear();
        for (i, &v0) in face.iter().enumerate() {
            let v1 = face[(i + 1) % face.len()];
            let he = claim_halfedge(&mut mesh, &mut edge_map, fi, v0, v1)?;
            mesh.halfedge_mut(he).face = face_id;
            face_hes.push(he);
        }

        let n = face_hes.len();
        for i in 0..n {
            let he = face_hes[i];
            let link = mesh.halfedge_mut(he);
            link.next = face_hes[(i + 1) % n];
            link.prev = face_hes[(i + n - 1) % n];
        }
        mesh.faces.push(Face::new(face_hes[0]));

        for &he in &face_hes {
            let origin = mesh.origin(he);
            if !mesh.vertex(origin).halfedge.is_valid() {
                mesh.vertex_mut(origin).halfedge = he;
            }
        }
    }

    // Second pass: link boundary half-edges into loops and anchor boundary vertices
    link_boundary_loops(&mut mesh)?;

    // Third pass: every vertex's half-edges must form one rotation cycle
    check_vertex_fans(&mesh)?;

    Ok(mesh)
}

/// Build a half-edge mesh from triangle faces.
///
/// # Example
/// ```
/// use meshsmooth::mesh::{build_from_triangles, HalfEdgeMesh};
///
/// let mesh: HalfEdgeMesh = build_from_triangles(3, &[[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    num_vertices: usize,
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(num_vertices, faces)
}

/// Build a half-edge mesh from quad faces.
pub fn build_from_quads<I: MeshIndex>(
    num_vertices: usize,
    faces: &[[usize; 4]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(num_vertices, faces)
}

/// Convert a half-edge mesh back to polygon face lists.
pub fn to_polygons<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Vec<Vec<usize>> {
    mesh.face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect()
}

/// Fail if `count` elements cannot all be addressed by `I`.
fn check_capacity<I: MeshIndex>(element: &'static str, count: usize) -> Result<()> {
    let limit = I::MAX.to_usize().saturating_add(1);
    if count > limit {
        return Err(MeshError::IndexOverflow { element, count, limit });
    }
    Ok(())
}

fn has_repeated_vertex(face: &[usize]) -> bool {
    face.iter()
        .enumerate()
        .any(|(i, v)| face[i + 1..].contains(v))
}

/// Return the half-edge for the directed edge `v0 -> v1`, creating the edge
/// (both halves) if neither direction has been seen yet.
fn claim_halfedge<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    edge_map: &mut HashMap<(usize, usize), EdgeId<I>>,
    face: usize,
    v0: usize,
    v1: usize,
) -> Result<HalfEdgeId<I>> {
    let key = (v0.min(v1), v0.max(v1));
    let edge = match edge_map.entry(key) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            check_capacity::<I>("half-edge", mesh.num_halfedges() + 2)?;
            let edge = EdgeId::<I>::new(mesh.num_edges());
            mesh.halfedges.push(HalfEdge::new(VertexId::new(v0)));
            mesh.halfedges.push(HalfEdge::new(VertexId::new(v1)));
            *entry.insert(edge)
        }
    };

    let first = edge.halfedge();
    let he = if mesh.origin(first).index() == v0 {
        first
    } else {
        first.twin()
    };

    if !mesh.is_boundary_halfedge(he) {
        if mesh.is_boundary_halfedge(he.twin()) {
            return Err(MeshError::InconsistentOrientation { face });
        }
        return Err(MeshError::NonManifoldEdge { v0, v1 });
    }

    Ok(he)
}

/// Link boundary half-edges into loops.
///
/// Each boundary vertex must have exactly one outgoing boundary half-edge;
/// that half-edge becomes the vertex's anchor.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let boundary_hes: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::with_capacity(boundary_hes.len());
    for &he in &boundary_hes {
        let origin = mesh.origin(he).index();
        if outgoing.insert(origin, he).is_some() {
            return Err(MeshError::NonManifoldVertex { vertex: origin });
        }
    }

    // Every vertex has as many incoming boundary half-edges as outgoing ones,
    // so each loop closes.
    for &he in &boundary_hes {
        let dest = mesh.dest(he).index();
        let Some(&next) = outgoing.get(&dest) else {
            debug_assert!(false, "boundary loop is not closed at vertex {}", dest);
            continue;
        };
        mesh.halfedge_mut(he).next = next;
        mesh.halfedge_mut(next).prev = he;
    }

    for (&v, &he) in &outgoing {
        mesh.vertex_mut(VertexId::new(v)).halfedge = he;
    }

    Ok(())
}

/// Verify that rotating around each vertex visits all of its outgoing
/// half-edges exactly once. Runs before any unbounded rotation is possible.
fn check_vertex_fans<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<()> {
    let mut outgoing_count = vec![0usize; mesh.num_vertices()];
    for he in &mesh.halfedges {
        outgoing_count[he.origin.index()] += 1;
    }

    for (v, &count) in outgoing_count.iter().enumerate() {
        let start = mesh.vertices[v].halfedge;
        if !start.is_valid() {
            continue;
        }

        let mut he = start;
        let mut steps = 0;
        loop {
            he = mesh.next(he.twin());
            steps += 1;
            if he == start || steps > count {
                break;
            }
        }
        if he != start || steps != count {
            return Err(MeshError::NonManifoldVertex { vertex: v });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Vec<[usize; 3]> {
        vec![[0, 1, 2], [1, 0, 3]]
    }

    fn quad_grid(n: usize) -> (usize, Vec<[usize; 4]>) {
        let mut faces = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                faces.push([v00, v00 + 1, v00 + n + 2, v00 + n + 1]);
            }
        }
        ((n + 1) * (n + 1), faces)
    }

    #[test]
    fn test_single_triangle() {
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(3, &[[0, 1, 2]]).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        // 3 interior half-edges + 3 boundary half-edges
        assert_eq!(mesh.num_halfedges(), 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_two_triangles() {
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(4, &two_triangles()).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.is_valid());

        let shared = mesh
            .edge_ids()
            .filter(|&e| !mesh.is_boundary_edge(e))
            .collect::<Vec<_>>();
        assert_eq!(shared.len(), 1);
        let mut ends = mesh.edge_vertices(shared[0]).map(|v| v.index());
        ends.sort();
        assert_eq!(ends, [0, 1]);
    }

    #[test]
    fn test_quad_grid_interior_vertex() {
        let (n, faces) = quad_grid(2);
        let mesh: HalfEdgeMesh<u32> = build_from_quads(n, &faces).unwrap();
        assert!(mesh.is_valid());

        // Center of a 3x3 vertex grid
        let center = VertexId::new(4);
        assert!(!mesh.is_boundary_vertex(center));
        assert_eq!(mesh.valence(center), 4);
        let mut neighbors: Vec<usize> = mesh.vertex_neighbors(center).map(|v| v.index()).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 3, 5, 7]);

        let corner = VertexId::new(0);
        assert!(mesh.is_boundary_vertex(corner));
        assert_eq!(mesh.valence(corner), 2);
    }

    #[test]
    fn test_mixed_polygons() {
        let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3, 4], vec![1, 5, 2]];
        let mesh: HalfEdgeMesh<u16> = build_from_polygons(6, &faces).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.face_degree(FaceId::new(0)), 5);
        assert_eq!(mesh.face_degree(FaceId::new(1)), 3);
        assert_eq!(mesh.num_edges(), 7);
    }

    #[test]
    fn test_unreferenced_vertex_is_isolated() {
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(4, &[[0, 1, 2]]).unwrap();
        assert!(mesh.is_valid());
        assert!(mesh.is_isolated(VertexId::new(3)));
        assert_eq!(mesh.valence(VertexId::new(3)), 0);
    }

    #[test]
    fn test_roundtrip() {
        let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
        let mesh: HalfEdgeMesh<u32> = build_from_polygons(5, &faces).unwrap();
        assert_eq!(to_polygons(&mesh), faces);
    }

    #[test]
    fn test_empty_face_list() {
        let faces: Vec<[usize; 3]> = Vec::new();
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(3, &faces);
        assert_eq!(result.unwrap_err(), MeshError::EmptyMesh);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(1, &[[0, 1, 2]]);
        assert_eq!(
            result.unwrap_err(),
            MeshError::InvalidVertexIndex { face: 0, vertex: 1 }
        );
    }

    #[test]
    fn test_degenerate_face() {
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(3, &[[0, 0, 2]]);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });

        let faces: Vec<Vec<usize>> = vec![vec![0, 1]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_polygons(2, &faces);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });

        // Diagonal corners repeated
        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(4, &[[0, 1, 0, 3]]);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });
    }

    #[test]
    fn test_inconsistent_orientation() {
        // Second face walks 0 -> 1 in the same direction as the first
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(4, &[[0, 1, 2], [0, 1, 3]]);
        assert_eq!(
            result.unwrap_err(),
            MeshError::InconsistentOrientation { face: 1 }
        );
    }

    #[test]
    fn test_non_manifold_edge() {
        let faces = [[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(5, &faces);
        assert_eq!(
            result.unwrap_err(),
            MeshError::NonManifoldEdge { v0: 0, v1: 1 }
        );
    }

    #[test]
    fn test_non_manifold_vertex() {
        // Two triangles touching only at vertex 0 (bowtie)
        let faces = [[0, 1, 2], [0, 3, 4]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(5, &faces);
        assert_eq!(result.unwrap_err(), MeshError::NonManifoldVertex { vertex: 0 });
    }

    #[test]
    fn test_disjoint_closed_fans_at_vertex() {
        // Two tetrahedra sharing only vertex 0; no boundary half-edges anywhere
        let faces = [
            [0, 2, 1],
            [0, 1, 3],
            [1, 2, 3],
            [2, 0, 3],
            [0, 5, 4],
            [0, 4, 6],
            [4, 5, 6],
            [5, 0, 6],
        ];
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(7, &faces);
        assert_eq!(result.unwrap_err(), MeshError::NonManifoldVertex { vertex: 0 });
    }

    #[test]
    fn test_open_fan_touching_closed_surface() {
        // A triangle attached to a tetrahedron's apex: vertex 0 has a single
        // outgoing boundary half-edge, but rotation misses the tetrahedron.
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3], [0, 4, 5]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(6, &faces);
        assert_eq!(result.unwrap_err(), MeshError::NonManifoldVertex { vertex: 0 });

        // Without the extra triangle the tetrahedron is fine
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(4, &faces[..4]).unwrap();
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_vertex_count_exceeds_index_type() {
        let result: Result<HalfEdgeMesh<u16>> = build_from_triangles(70_000, &[[0, 1, 2]]);
        assert_eq!(
            result.unwrap_err(),
            MeshError::IndexOverflow { element: "vertex", count: 70_000, limit: 65_535 }
        );
    }

    #[test]
    fn test_halfedge_count_exceeds_index_type() {
        // 40401 vertices and 40000 faces fit in u16, but 160800 half-edges do not
        let (n, faces) = quad_grid(200);
        let result: Result<HalfEdgeMesh<u16>> = build_from_quads(n, &faces);
        match result {
            Err(MeshError::IndexOverflow { element, count, limit }) => {
                assert_eq!(element, "half-edge");
                assert_eq!(limit, 65_535);
                assert!(count > limit);
            }
            other => panic!("expected half-edge overflow, got {:?}", other.map(|m| m.num_edges())),
        }

        // Same grid fits comfortably with 32-bit indices
        let mesh: HalfEdgeMesh<u32> = build_from_quads(n, &faces).unwrap();
        assert_eq!(mesh.num_halfedges(), 160_800);
    }

    #[test]
    fn test_large_u16_mesh_within_limit() {
        // 20200 edges: 40400 half-edges is below the u16 limit
        let (n, faces) = quad_grid(100);
        let mesh: HalfEdgeMesh<u16> = build_from_quads(n, &faces).unwrap();
        assert_eq!(mesh.num_halfedges(), 40_400);
        assert!(mesh.is_valid());
    }
}
