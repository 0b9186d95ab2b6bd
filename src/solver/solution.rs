//! Result of a flux computation.
//!
//! A [FlowSolution] is created fresh by every
//! [FlowSolver::solve](crate::solver::FlowSolver::solve) run and is owned by
//! the caller; it never aliases the input tree. Values are stored densely by
//! [VertexIndex].

use crate::model::VertexIndex;
use crate::solver::config::BoundaryConditions;
use crate::solver::solver_error::SolverError;
use serde::Serialize;

// =#========================================================================#=
// SEGMENT FLOW
// =#========================================================================#=
/// Computed hydraulic state of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SegmentFlow {
    /// Axial conductance `K = K_raw / length`
    pub axial_conductance: f64,
    /// Equivalent conductance of the subtree rooted here, seen from the parent
    pub keq: f64,
    /// Potential at the proximal (upstream) face
    pub psi_out: f64,
    /// Potential at the distal (downstream) face
    pub psi_in: f64,
    /// Lateral flux entering the segment from outside
    pub j: f64,
    /// Axial flux through the segment, equal to `Jv` at the base
    pub j_out: f64,
}

// =#========================================================================#=
// FLUX WARNING
// =#========================================================================#=
/// A segment whose lateral flux exceeds the axial flux through it
/// (`J_out < j`).
///
/// Reported, not corrected; the computation still completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluxWarning {
    pub vertex: VertexIndex,
    pub j_out: f64,
    pub j: f64,
    pub psi_in: f64,
}

// =#========================================================================#=
// FLOW SOLUTION
// =#========================================================================#=
/// Per-segment hydraulic state of a whole root tree plus summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSolution {
    segments: Vec<SegmentFlow>,
    base_index: VertexIndex,
    jv_global: f64,
    warnings: Vec<FluxWarning>,
}

impl FlowSolution {
    pub(crate) fn new(
        segments: Vec<SegmentFlow>,
        base_index: VertexIndex,
        jv_global: f64,
        warnings: Vec<FluxWarning>,
    ) -> Self {
        FlowSolution {
            segments,
            base_index,
            jv_global,
            warnings,
        }
    }

    /// Returns the computed state of a segment.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn segment(&self, vertex: VertexIndex) -> &SegmentFlow {
        &self.segments[vertex]
    }

    /// Returns an iterator over `(vertex, state)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexIndex, &SegmentFlow)> {
        self.segments.iter().enumerate()
    }

    pub fn num_vertices(&self) -> usize {
        self.segments.len()
    }

    pub fn axial_conductance(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].axial_conductance
    }

    pub fn keq(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].keq
    }

    pub fn psi_in(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].psi_in
    }

    pub fn psi_out(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].psi_out
    }

    pub fn j(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].j
    }

    pub fn j_out(&self, vertex: VertexIndex) -> f64 {
        self.segments[vertex].j_out
    }

    /// Index of the base the boundary conditions were imposed at.
    pub fn base_index(&self) -> VertexIndex {
        self.base_index
    }

    /// Equivalent conductance of the whole tree, i.e. `Keq` of the base.
    pub fn keq_total(&self) -> f64 {
        self.segments[self.base_index].keq
    }

    /// Flux imposed at the base (echo of the boundary condition `Jv`).
    pub fn jv_global(&self) -> f64 {
        self.jv_global
    }

    /// Segments where `J_out < j`, in the order they were detected.
    pub fn warnings(&self) -> &[FluxWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Flux the tree carries when driven purely by the potential difference
    /// between the bath and the base: `Keq_total * (psi_e - psi_base)`.
    pub fn boundary_flux(&self, bc: &BoundaryConditions) -> f64 {
        self.keq_total() * (bc.psi_e - bc.psi_base)
    }

    /// Sum of the lateral fluxes of all segments.
    pub fn total_lateral_flux(&self) -> f64 {
        self.segments.iter().map(|s| s.j).sum()
    }

    /// Returns the per-segment ratio `J_out / J_out_reference`.
    ///
    /// Used to compare a run against a reference run on the same tree, e.g.
    /// after scaling conductivities. A reference flux of zero yields `NaN`
    /// (or an infinity) for that segment.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the two solutions differ in size.
    pub fn relative_flux(&self, reference: &FlowSolution) -> Result<Vec<f64>, SolverError> {
        if self.num_vertices() != reference.num_vertices() {
            return Err(SolverError::invalid_configuration(format!(
                "cannot compare solutions of {} and {} segments",
                self.num_vertices(),
                reference.num_vertices()
            )));
        }

        Ok(self
            .segments
            .iter()
            .zip(&reference.segments)
            .map(|(s, r)| s.j_out / r.j_out)
            .collect())
    }
}
