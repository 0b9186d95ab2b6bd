//! Steady-state water flux and potential in a root tree.
//!
//! The root system is treated as a resistance network: each segment has an
//! axial conductance `K` in series with the parallel combination of its
//! lateral conductance `k` and the equivalent conductances of its children.
//!
//! # Algorithm
//! 1. Axial conductivities are converted to conductances,
//!    `K = K_raw / length`.
//! 2. Post-order (children before parent), the equivalent conductance of
//!    every subtree is reduced bottom-up:
//!    `Keq = 1 / (1 / (k + Σ Keq_children) + 1 / K)`.
//! 3. Pre-order (parent before children), starting with
//!    `psi_out = psi_base` and `J_out = Jv` at the base, potentials and
//!    fluxes are propagated towards the tips. The flux left at a parent
//!    after its lateral exchange is split among its children in proportion
//!    to their `Keq`.
//!
//! A segment with `J_out < j` is physically implausible but does not stop
//! the run; it is collected as a [FluxWarning].

use crate::model::{PreOrderIter, RootArchitecture, VertexIndex};
use crate::solver::config::{BoundaryConditions, SolverConfig};
use crate::solver::solution::{FlowSolution, FluxWarning, SegmentFlow};
use crate::solver::solver_error::{Attribute, SolverError, SolverErrorType};
use log::{debug, warn};

// =#========================================================================#=
// FLOW SOLVER
// =#========================================================================#=
/// Computes water potentials and fluxes of every segment of a root tree.
///
/// The solver holds no state besides its [SolverConfig]; one instance can
/// solve any number of trees, also from several threads.
///
/// # Example
/// ```
/// use rootflux::model::RootTree;
/// use rootflux::solver::{BoundaryConditions, FlowSolver};
///
/// let mut tree = RootTree::new(3);
/// for v in tree.add_primary_axis(3, 1e-4, 1e-4) {
///     tree.set_lateral_conductance(v, 1e-5);
///     tree.set_axial_conductivity(v, 1e-9);
/// }
///
/// let solution = FlowSolver::default()
///     .solve(&tree, &BoundaryConditions::default())
///     .unwrap();
/// assert_eq!(solution.j_out(0), 0.1);
/// assert_eq!(solution.psi_out(0), 0.101325);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowSolver {
    config: SolverConfig,
}

impl FlowSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        FlowSolver { config }
    }

    /// Returns the configuration of this solver.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the tree under the given boundary conditions.
    ///
    /// The tree is only read; all derived values are returned in a new
    /// [FlowSolution].
    ///
    /// # Errors
    /// Fails without partial results if
    /// - the config is invalid (`InvalidConfiguration`),
    /// - the tree has no base or is not a proper tree
    ///   (`MissingBase`, `InvalidTreeStructure`, `DisconnectedVertex`),
    /// - a segment lacks `length`, `k` or `K_raw` (`MissingAttribute`),
    /// - a length is zero (`ZeroLength`), or an attribute is negative,
    ///   non-finite, or a non-positive axial conductivity
    ///   (`InvalidAttribute`),
    /// - a subtree conducts no water, e.g. a tip with zero or subnormal
    ///   lateral conductance (`ZeroConductancePath`).
    pub fn solve<A: RootArchitecture + ?Sized>(
        &self,
        tree: &A,
        bc: &BoundaryConditions,
    ) -> Result<FlowSolution, SolverError> {
        self.config.validate()?;
        let scale = self.config.numerical_scale;

        let base = tree
            .base_index()
            .ok_or_else(|| SolverError::without_vertex(SolverErrorType::MissingBase))?;
        let order = validated_pre_order(tree, base)?;
        debug!(
            "Solving flux on {} segments (Jv={}, psi_e={}, psi_base={})",
            order.len(),
            bc.jv,
            bc.psi_e,
            bc.psi_base
        );

        let num_vertices = tree.num_vertices();
        let mut segments = vec![SegmentFlow::default(); num_vertices];

        // Scaled conductances
        let mut k = vec![0.0; num_vertices];
        let mut big_k = vec![0.0; num_vertices];
        for &v in &order {
            let (lateral, axial) = read_conductances(tree, v)?;
            segments[v].axial_conductance = axial;
            k[v] = lateral * scale;
            big_k[v] = axial * scale;
        }

        // Equivalent conductances, children before parents
        let mut keq = vec![0.0; num_vertices];
        let mut children_keq = vec![0.0; num_vertices];
        for &v in order.iter().rev() {
            let sum: f64 = tree.children(v).iter().map(|&c| keq[c]).sum();
            let r = 1.0 / (k[v] + sum);
            let big_r = 1.0 / big_k[v];
            keq[v] = 1.0 / (r + big_r);

            // Also catches a subnormal `k + ΣKeq` whose reciprocal overflows
            if !(keq[v] > 0.0 && keq[v].is_finite()) {
                return Err(SolverError::at_vertex(
                    SolverErrorType::ZeroConductancePath,
                    v,
                ));
            }
            children_keq[v] = sum;
        }

        // Potentials and fluxes, parents before children
        let mut psi_in = vec![0.0; num_vertices];
        let mut j = vec![0.0; num_vertices];
        let mut j_out = vec![0.0; num_vertices];
        let mut warnings = Vec::new();
        for &v in &order {
            // Base reports the imposed Jv, not its scaled round trip
            let (psi_out, flux_out) = match tree.parent(v) {
                None => {
                    j_out[v] = bc.jv * scale;
                    (bc.psi_base, bc.jv)
                }
                Some(p) => {
                    j_out[v] = (j_out[p] - j[p]) * (keq[v] / children_keq[p]);
                    (psi_in[p], j_out[v] / scale)
                }
            };

            psi_in[v] = j_out[v] / big_k[v] + psi_out;
            j[v] = (bc.psi_e - psi_in[v]) * k[v];

            if j_out[v] < j[v] {
                let warning = FluxWarning {
                    vertex: v,
                    j_out: flux_out,
                    j: j[v] / scale,
                    psi_in: psi_in[v],
                };
                if self.config.warn_on_flux_excess {
                    warn!(
                        "Vertex {} (Jout={:.4}, j={:.4}, psi_in={:.4})",
                        v, warning.j_out, warning.j, warning.psi_in
                    );
                }
                warnings.push(warning);
            }

            let segment = &mut segments[v];
            segment.keq = keq[v] / scale;
            segment.psi_out = psi_out;
            segment.psi_in = psi_in[v];
            segment.j = j[v] / scale;
            segment.j_out = flux_out;
        }

        let solution = FlowSolution::new(segments, base, bc.jv, warnings);
        debug!(
            "Flux solved: Keq_total={}, {} flux warning(s)",
            solution.keq_total(),
            solution.warnings().len()
        );
        Ok(solution)
    }
}

/// Solves `tree` with the default [SolverConfig].
pub fn solve<A: RootArchitecture + ?Sized>(
    tree: &A,
    bc: &BoundaryConditions,
) -> Result<FlowSolution, SolverError> {
    FlowSolver::default().solve(tree, bc)
}

// ============================================================================
// Input validation (private)
// ============================================================================
/// Returns the vertices in pre-order from `base`, checking on the way that
/// the structure is a proper tree covering every vertex exactly once.
fn validated_pre_order<A: RootArchitecture + ?Sized>(
    tree: &A,
    base: VertexIndex,
) -> Result<Vec<VertexIndex>, SolverError> {
    let num_vertices = tree.num_vertices();
    if base >= num_vertices {
        return Err(SolverError::invalid_tree_structure(
            "base index out of bounds".to_string(),
            base,
        ));
    }
    if tree.parent(base).is_some() {
        return Err(SolverError::invalid_tree_structure(
            "base has a parent".to_string(),
            base,
        ));
    }

    let mut visited = vec![false; num_vertices];
    let mut order = Vec::with_capacity(num_vertices);

    // Children are checked before the iterator descends into them
    for v in PreOrderIter::new(tree) {
        if visited[v] {
            return Err(SolverError::invalid_tree_structure(
                "vertex reached twice (cycle or shared child)".to_string(),
                v,
            ));
        }
        visited[v] = true;
        order.push(v);

        for &c in tree.children(v) {
            if c >= num_vertices {
                return Err(SolverError::invalid_tree_structure(
                    format!("child index {c} out of bounds"),
                    v,
                ));
            }
            if tree.parent(c) != Some(v) {
                return Err(SolverError::invalid_tree_structure(
                    format!("child {c} does not point back to its parent"),
                    v,
                ));
            }
        }
    }

    if let Some(unreached) = visited.iter().position(|&seen| !seen) {
        return Err(SolverError::at_vertex(
            SolverErrorType::DisconnectedVertex,
            unreached,
        ));
    }

    Ok(order)
}

/// Reads `k` and computes `K = K_raw / length` of a vertex, validating both.
fn read_conductances<A: RootArchitecture + ?Sized>(
    tree: &A,
    v: VertexIndex,
) -> Result<(f64, f64), SolverError> {
    let length = tree
        .length(v)
        .ok_or_else(|| SolverError::missing_attribute(Attribute::Length, v))?;
    if length == 0.0 {
        return Err(SolverError::at_vertex(SolverErrorType::ZeroLength, v));
    }
    if !length.is_finite() || length < 0.0 {
        return Err(SolverError::invalid_attribute(Attribute::Length, length, v));
    }

    let k = tree
        .lateral_conductance(v)
        .ok_or_else(|| SolverError::missing_attribute(Attribute::LateralConductance, v))?;
    if !k.is_finite() || k < 0.0 {
        return Err(SolverError::invalid_attribute(
            Attribute::LateralConductance,
            k,
            v,
        ));
    }

    let k_raw = tree
        .axial_conductivity(v)
        .ok_or_else(|| SolverError::missing_attribute(Attribute::AxialConductivity, v))?;
    if !k_raw.is_finite() || k_raw <= 0.0 {
        return Err(SolverError::invalid_attribute(
            Attribute::AxialConductivity,
            k_raw,
            v,
        ));
    }

    Ok((k, k_raw / length))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-wired architecture to feed the solver structures a
    /// [RootTree](crate::model::RootTree) cannot represent.
    struct Wired {
        base: Option<VertexIndex>,
        parents: Vec<Option<VertexIndex>>,
        children: Vec<Vec<VertexIndex>>,
    }

    impl RootArchitecture for Wired {
        fn num_vertices(&self) -> usize {
            self.parents.len()
        }
        fn base_index(&self) -> Option<VertexIndex> {
            self.base
        }
        fn parent(&self, vertex: VertexIndex) -> Option<VertexIndex> {
            self.parents[vertex]
        }
        fn children(&self, vertex: VertexIndex) -> &[VertexIndex] {
            &self.children[vertex]
        }
        fn length(&self, _: VertexIndex) -> Option<f64> {
            Some(1.0)
        }
        fn lateral_conductance(&self, _: VertexIndex) -> Option<f64> {
            Some(1.0)
        }
        fn axial_conductivity(&self, _: VertexIndex) -> Option<f64> {
            Some(1.0)
        }
    }

    fn kind_of(tree: &Wired) -> SolverErrorType {
        solve(tree, &BoundaryConditions::default())
            .unwrap_err()
            .kind()
            .clone()
    }

    #[test]
    fn test_cycle_is_rejected() {
        // 0 -> 1 -> 2 -> 1
        let tree = Wired {
            base: Some(0),
            parents: vec![None, Some(0), Some(1)],
            children: vec![vec![1], vec![2], vec![1]],
        };
        assert!(matches!(
            kind_of(&tree),
            SolverErrorType::InvalidTreeStructure(_)
        ));
    }

    #[test]
    fn test_unreachable_vertex_is_rejected() {
        let tree = Wired {
            base: Some(0),
            parents: vec![None, Some(0), None],
            children: vec![vec![1], vec![], vec![]],
        };
        let err = solve(&tree, &BoundaryConditions::default()).unwrap_err();
        assert_eq!(err.kind(), &SolverErrorType::DisconnectedVertex);
        assert_eq!(err.vertex(), Some(2));
    }

    #[test]
    fn test_child_out_of_bounds_is_rejected() {
        let tree = Wired {
            base: Some(0),
            parents: vec![None],
            children: vec![vec![5]],
        };
        assert!(matches!(
            kind_of(&tree),
            SolverErrorType::InvalidTreeStructure(_)
        ));
    }

    #[test]
    fn test_missing_base() {
        let tree = Wired {
            base: None,
            parents: vec![None],
            children: vec![vec![]],
        };
        assert_eq!(kind_of(&tree), SolverErrorType::MissingBase);
    }
}
