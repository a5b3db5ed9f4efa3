//! Laplacian mesh smoothing.
//!
//! Each iteration moves every interior vertex to the average of its 1-ring
//! neighbors. Vertices incident to a boundary edge keep their position, so
//! open boundaries are preserved exactly. Plain Laplacian smoothing shrinks
//! closed surfaces over many iterations; no correction is applied for that.
//!
//! Every pass reads only the positions from before the pass and writes into
//! a separate buffer, which is swapped in once the pass is complete. The
//! result therefore does not depend on vertex visiting order, and the
//! per-vertex loop can run in parallel.
//!
//! # Example
//!
//! ```
//! use meshsmooth::algo::smooth::LaplacianSmoother;
//! use meshsmooth::geometry::Geometry;
//! use meshsmooth::mesh::VertexId;
//! use nalgebra::Point3;
//!
//! // Four fixed corners around a displaced center vertex
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(2.0, 2.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//!     Point3::new(5.0, 5.0, 5.0),
//! ];
//! let faces = [[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
//! let mut geometry: Geometry = Geometry::from_triangles(&positions, &faces).unwrap();
//!
//! LaplacianSmoother::new(&mut geometry).apply(1).unwrap();
//! assert_eq!(*geometry.position(VertexId::new(4)), Point3::new(1.0, 1.0, 0.0));
//! ```

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::geometry::{Geometry, Position};
use crate::mesh::{Connectivity, VertexId};

use super::Progress;

const PROGRESS_MESSAGE: &str = "Laplacian smoothing";

/// Options for Laplacian smoothing.
#[derive(Debug, Clone)]
pub struct SmoothOptions {
    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl SmoothOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// How a vertex is updated in every pass. Depends only on topology.
#[derive(Debug, Clone, Copy, PartialEq)]
enum VertexRule {
    /// Incident to a boundary edge; keeps its position.
    Fixed,
    /// Moves to the mean of its `degree` neighbors.
    Average { degree: usize },
}

/// Iterative Laplacian smoothing over a borrowed [`Geometry`].
///
/// The smoother holds a mutable borrow of the geometry for its whole
/// lifetime; the caller sees the smoothed positions once it is dropped (or
/// through [`geometry`](Self::geometry) in the meantime).
#[derive(Debug)]
pub struct LaplacianSmoother<'a, M, P> {
    geometry: &'a mut Geometry<M, P>,
    options: SmoothOptions,
}

impl<'a, M, P> LaplacianSmoother<'a, M, P>
where
    M: Connectivity + Sync,
    P: Position + Send + Sync,
{
    /// Create a smoother with default options. Performs no validation.
    pub fn new(geometry: &'a mut Geometry<M, P>) -> Self {
        Self::with_options(geometry, SmoothOptions::default())
    }

    /// Create a smoother with the given options. Performs no validation.
    pub fn with_options(geometry: &'a mut Geometry<M, P>, options: SmoothOptions) -> Self {
        Self { geometry, options }
    }

    /// The geometry being smoothed.
    pub fn geometry(&self) -> &Geometry<M, P> {
        &*self.geometry
    }

    /// The active options.
    pub fn options(&self) -> &SmoothOptions {
        &self.options
    }

    /// Run `steps` smoothing iterations.
    ///
    /// `steps == 0` returns immediately without inspecting the geometry.
    ///
    /// # Errors
    ///
    /// The geometry is validated before the first iteration. On error nothing
    /// has been written.
    ///
    /// - [`MeshError::MissingPosition`] / [`MeshError::UnexpectedPositions`]
    ///   if the position array does not match the vertex count.
    /// - [`MeshError::MissingPosition`] if a vertex lists a neighbor id with
    ///   no position.
    /// - [`MeshError::DegenerateTopology`] if a vertex has no neighbors.
    pub fn apply(&mut self, steps: usize) -> Result<()> {
        self.apply_with_progress(steps, &Progress::none())
    }

    /// Run `steps` smoothing iterations, reporting progress once per
    /// iteration and once on completion.
    ///
    /// Errors are the same as for [`apply`](Self::apply); no progress is
    /// reported when validation fails.
    pub fn apply_with_progress(&mut self, steps: usize, progress: &Progress) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }

        let rules = match vertex_rules(&*self.geometry) {
            Ok(rules) => rules,
            Err(err) => {
                debug!("laplacian smoothing rejected geometry: {}", err);
                return Err(err);
            }
        };

        let parallel = self.options.parallel;
        debug!(
            "laplacian smoothing: {} steps over {} vertices ({} fixed, {})",
            steps,
            rules.len(),
            rules.iter().filter(|r| **r == VertexRule::Fixed).count(),
            if parallel { "parallel" } else { "sequential" }
        );

        let (mesh, positions) = self.geometry.parts_mut();
        let mut next: Vec<P> = Vec::with_capacity(positions.len());

        for step in 0..steps {
            progress.report(step, steps, PROGRESS_MESSAGE);
            trace!("laplacian pass {}/{}", step + 1, steps);

            next.clear();
            smooth_pass(mesh, positions, &rules, &mut next, parallel);
            std::mem::swap(positions, &mut next);
        }

        progress.report(steps, steps, PROGRESS_MESSAGE);
        Ok(())
    }
}

/// Run `steps` Laplacian smoothing iterations on `geometry`.
///
/// Shorthand for [`LaplacianSmoother::with_options`] followed by
/// [`apply`](LaplacianSmoother::apply).
pub fn laplacian_smooth<M, P>(
    geometry: &mut Geometry<M, P>,
    steps: usize,
    options: &SmoothOptions,
) -> Result<()>
where
    M: Connectivity + Sync,
    P: Position + Send + Sync,
{
    LaplacianSmoother::with_options(geometry, options.clone()).apply(steps)
}

/// Validate the geometry and classify every vertex.
fn vertex_rules<M: Connectivity, P: Position>(geometry: &Geometry<M, P>) -> Result<Vec<VertexRule>> {
    geometry.check_positions()?;

    let mesh = geometry.mesh();
    let num_positions = geometry.positions().len();
    mesh.vertex_ids()
        .map(|v| {
            let mut degree = 0;
            for n in mesh.neighbors_of(v) {
                if n.index() >= num_positions {
                    return Err(MeshError::MissingPosition { vertex: n.index() });
                }
                degree += 1;
            }
            if degree == 0 {
                return Err(MeshError::DegenerateTopology { vertex: v.index() });
            }
            if mesh.touches_boundary(v) {
                Ok(VertexRule::Fixed)
            } else {
                Ok(VertexRule::Average { degree })
            }
        })
        .collect()
}

/// Compute one pass into `next`, reading only from `current`.
fn smooth_pass<M, P>(mesh: &M, current: &[P], rules: &[VertexRule], next: &mut Vec<P>, parallel: bool)
where
    M: Connectivity + Sync,
    P: Position + Send + Sync,
{
    let relax = |i: usize| match rules[i] {
        VertexRule::Fixed => current[i],
        VertexRule::Average { degree } => neighbor_average(mesh, current, VertexId::new(i), degree),
    };

    if parallel {
        next.par_extend((0..current.len()).into_par_iter().map(relax));
    } else {
        next.extend((0..current.len()).map(relax));
    }
}

fn neighbor_average<M: Connectivity, P: Position>(
    mesh: &M,
    positions: &[P],
    v: VertexId<M::Index>,
    degree: usize,
) -> P {
    mesh.neighbors_of(v)
        .fold(P::zero(), |sum, n| sum.plus(&positions[n.index()]))
        .over(degree as f64)
}
