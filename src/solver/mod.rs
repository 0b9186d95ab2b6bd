//! Steady-state hydraulic flux solver.
pub mod config;
pub mod flux;
pub mod solution;
pub mod solver_error;

pub use config::BoundaryConditions;
pub use config::SolverConfig;
pub use flux::FlowSolver;
pub use solution::FlowSolution;
pub use solution::FluxWarning;
pub use solution::SegmentFlow;
pub use solver_error::Attribute;
pub use solver_error::SolverError;
pub use solver_error::SolverErrorType;
