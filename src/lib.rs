//! Rootflux computes steady-state water flux and potential in branched
//! root systems.
//!
//! A root architecture is discretized into segments forming a rooted tree.
//! Each segment exchanges water with its surroundings through a lateral
//! (radial) conductance `k` and passes water along the root through an axial
//! conductance `K`. Under an imposed flux `Jv` and potential `psi_base` at
//! the base and an external potential `psi_e`, the tree behaves like a
//! resistance network with current sources. Core functionality provided:
//! - Tree model: [RootTree] stores segments using the arena pattern, with
//!   optional per-segment length, radius, `k` and `K_raw`.
//!   See [crate::model] for more details.
//! - Conductances: assign `k` and `K_raw` from a radial conductivity and an
//!   axial conductivity profile, both with scale factors for sensitivity
//!   studies. See [crate::model::conductance].
//! - Solver: [FlowSolver] computes, for every segment, the equivalent
//!   conductance `Keq`, potentials `psi_out`/`psi_in` and fluxes `j`/`J_out`,
//!   returned as a [FlowSolution] separate from the input tree.
//! - Plausibility: segments with `J_out < j` are collected as warnings
//!   (and logged through the `log` facade) without stopping the run.
//!
//! Limitations:
//! - Only steady state
//! - Architecture generation, file formats and rendering are left to
//!   other crates; any tree implementing [RootArchitecture] can be solved
//!
//! # Usage patterns
//! 1. [solve_flux] solves a tree with the default [SolverConfig].
//! 2. Configure a [FlowSolver] with a [SolverConfig] for a numerical scale
//!    or to silence warning logs.
//!
//! ## Example
//! ```
//! use rootflux::model::RootTree;
//! use rootflux::model::conductance::{
//!     assign_conductances, AxialConductivityProfile, RadialConductivity,
//! };
//! use rootflux::solver::BoundaryConditions;
//!
//! // Primary axis of 20 segments with one lateral of 5 segments
//! let mut tree = RootTree::new(25);
//! let primary = tree.add_primary_axis(20, 1e-4, 1.5e-4);
//! tree.add_lateral_axis(primary[10], 5, 1e-4, 1e-4);
//!
//! assign_conductances(
//!     &mut tree,
//!     &RadialConductivity::new(92.0),
//!     &AxialConductivityProfile::constant(5e-9),
//! )?;
//!
//! let bc = BoundaryConditions::default();
//! let solution = rootflux::solve_flux(&tree, &bc)?;
//! println!(
//!     "Keq = {:e}, boundary flux = {:e}",
//!     solution.keq_total(),
//!     solution.boundary_flux(&bc)
//! );
//! # Ok::<(), rootflux::solver::SolverError>(())
//! ```

pub mod model;
pub mod solver;

use crate::model::RootArchitecture;
#[allow(unused_imports)]
use crate::model::RootTree;
use crate::solver::{BoundaryConditions, FlowSolution, SolverError};
#[allow(unused_imports)]
use crate::solver::{FlowSolver, SolverConfig};

// ============================================================================
// Quick Solver API
// ============================================================================
/// Solves the water flux and potential of every segment of `tree` using the
/// default [SolverConfig].
///
/// See [`FlowSolver::solve`] for full documentation.
pub fn solve_flux<A: RootArchitecture + ?Sized>(
    tree: &A,
    bc: &BoundaryConditions,
) -> Result<FlowSolution, SolverError> {
    solver::flux::solve(tree, bc)
}
