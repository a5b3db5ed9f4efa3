//! Mesh geometry: connectivity plus one position per vertex.
//!
//! [`Geometry`] pairs a fixed topology with a dense position array indexed
//! by vertex id. The position array is the mutable state that smoothing
//! rewrites; the topology is never changed after construction.
//!
//! # Example
//!
//! ```
//! use meshsmooth::geometry::Geometry;
//! use meshsmooth::mesh::VertexId;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mut geometry: Geometry = Geometry::from_triangles(&positions, &[[0, 1, 2]]).unwrap();
//!
//! geometry.set_position(VertexId::new(2), Point3::new(0.5, 2.0, 0.0));
//! assert_eq!(geometry.position(VertexId::new(2)).y, 2.0);
//! ```

mod position;

pub use position::Position;

use std::cmp::Ordering;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{
    build_from_polygons, build_from_quads, build_from_triangles, Connectivity, HalfEdgeMesh,
    MeshIndex, VertexId,
};

/// A mesh together with a position for every vertex.
#[derive(Debug, Clone)]
pub struct Geometry<M = HalfEdgeMesh, P = Point3<f64>> {
    mesh: M,
    positions: Vec<P>,
}

impl<M: Connectivity, P: Position> Geometry<M, P> {
    /// Pair a mesh with positions, checking that there is exactly one
    /// position per vertex.
    pub fn new(mesh: M, positions: Vec<P>) -> Result<Self> {
        let geometry = Self::from_parts(mesh, positions);
        geometry.check_positions()?;
        Ok(geometry)
    }

    /// Pair a mesh with positions without any checks.
    ///
    /// Algorithms that consume the geometry validate it themselves and
    /// report a mismatch as an error.
    pub fn from_parts(mesh: M, positions: Vec<P>) -> Self {
        Self { mesh, positions }
    }

    /// Get the underlying mesh.
    #[inline]
    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// Get all positions, indexed by vertex id.
    #[inline]
    pub fn positions(&self) -> &[P] {
        &self.positions
    }

    /// Get the number of vertices in the mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Get the position of a vertex.
    ///
    /// # Panics
    /// Panics if the vertex has no position.
    #[inline]
    pub fn position(&self, v: VertexId<M::Index>) -> &P {
        &self.positions[v.index()]
    }

    /// Get the position of a vertex, or `None` if it has none.
    #[inline]
    pub fn get_position(&self, v: VertexId<M::Index>) -> Option<&P> {
        self.positions.get(v.index())
    }

    /// Set the position of a vertex.
    ///
    /// # Panics
    /// Panics if the vertex has no position slot.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<M::Index>, position: P) {
        self.positions[v.index()] = position;
    }

    /// Replace the whole position array, returning the previous one.
    pub fn replace_positions(&mut self, positions: Vec<P>) -> Vec<P> {
        std::mem::replace(&mut self.positions, positions)
    }

    /// Split the geometry back into its mesh and positions.
    pub fn into_parts(self) -> (M, Vec<P>) {
        (self.mesh, self.positions)
    }

    /// Check that the position array covers exactly the mesh's vertices.
    pub fn check_positions(&self) -> Result<()> {
        let vertices = self.mesh.num_vertices();
        let positions = self.positions.len();
        match positions.cmp(&vertices) {
            Ordering::Equal => Ok(()),
            Ordering::Less => Err(MeshError::MissingPosition { vertex: positions }),
            Ordering::Greater => Err(MeshError::UnexpectedPositions { vertices, positions }),
        }
    }

    /// Borrow the topology and the position buffer at the same time.
    pub(crate) fn parts_mut(&mut self) -> (&M, &mut Vec<P>) {
        (&self.mesh, &mut self.positions)
    }
}

impl<I: MeshIndex, P: Position> Geometry<HalfEdgeMesh<I>, P> {
    /// Build a half-edge mesh from polygon faces and attach `positions`.
    ///
    /// The number of vertices is taken from `positions`.
    pub fn from_polygons<F: AsRef<[usize]>>(positions: &[P], faces: &[F]) -> Result<Self> {
        let mesh = build_from_polygons(positions.len(), faces)?;
        Ok(Self::from_parts(mesh, positions.to_vec()))
    }

    /// Build a half-edge mesh from triangle faces and attach `positions`.
    pub fn from_triangles(positions: &[P], faces: &[[usize; 3]]) -> Result<Self> {
        let mesh = build_from_triangles(positions.len(), faces)?;
        Ok(Self::from_parts(mesh, positions.to_vec()))
    }

    /// Build a half-edge mesh from quad faces and attach `positions`.
    pub fn from_quads(positions: &[P], faces: &[[usize; 4]]) -> Result<Self> {
        let mesh = build_from_quads(positions.len(), faces)?;
        Ok(Self::from_parts(mesh, positions.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_from_triangles() {
        let geometry: Geometry = Geometry::from_triangles(&triangle(), &[[0, 1, 2]]).unwrap();
        assert_eq!(geometry.num_vertices(), 3);
        assert_eq!(geometry.positions().len(), 3);
        assert!(geometry.check_positions().is_ok());
        assert_eq!(geometry.mesh().num_faces(), 1);
    }

    #[test]
    fn test_new_rejects_missing_positions() {
        let mesh: HalfEdgeMesh = build_from_triangles(3, &[[0, 1, 2]]).unwrap();
        let result = Geometry::new(mesh, triangle()[..2].to_vec());
        assert_eq!(result.unwrap_err(), MeshError::MissingPosition { vertex: 2 });
    }

    #[test]
    fn test_new_rejects_extra_positions() {
        let mesh: HalfEdgeMesh = build_from_triangles(3, &[[0, 1, 2]]).unwrap();
        let mut positions = triangle();
        positions.push(Point3::new(9.0, 9.0, 9.0));
        let result = Geometry::new(mesh, positions);
        assert_eq!(
            result.unwrap_err(),
            MeshError::UnexpectedPositions { vertices: 3, positions: 4 }
        );
    }

    #[test]
    fn test_get_position_out_of_range() {
        let mesh: HalfEdgeMesh = build_from_triangles(3, &[[0, 1, 2]]).unwrap();
        let geometry = Geometry::from_parts(mesh, triangle()[..1].to_vec());
        assert!(geometry.get_position(VertexId::new(0)).is_some());
        assert!(geometry.get_position(VertexId::new(1)).is_none());
    }

    #[test]
    fn test_replace_positions() {
        let mut geometry: Geometry = Geometry::from_triangles(&triangle(), &[[0, 1, 2]]).unwrap();
        let shifted: Vec<Point3<f64>> = triangle()
            .iter()
            .map(|p| Point3::new(p.x, p.y, 1.0))
            .collect();

        let old = geometry.replace_positions(shifted);
        assert_eq!(old, triangle());
        assert!(geometry.positions().iter().all(|p| p.z == 1.0));

        let (mesh, positions) = geometry.into_parts();
        assert_eq!(mesh.num_vertices(), positions.len());
    }

    #[test]
    fn test_f32_positions() {
        let positions = vec![
            Point3::new(0.0f32, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let geometry: Geometry<HalfEdgeMesh<u16>, Point3<f32>> =
            Geometry::from_quads(&positions, &[[0, 1, 2, 3]]).unwrap();
        assert_eq!(geometry.mesh().num_edges(), 4);
    }
}
