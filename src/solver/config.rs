//! Boundary conditions and numerical settings of a flux computation.
//!
//! Both types can be loaded from JSON; missing fields fall back to their
//! defaults.
//!
//! ```
//! use rootflux::solver::BoundaryConditions;
//!
//! let bc = BoundaryConditions::from_json_str(r#"{ "jv": 0.05 }"#).unwrap();
//! assert_eq!(bc.jv, 0.05);
//! assert_eq!(bc.psi_base, 0.101325);
//! ```

use crate::solver::solver_error::SolverError;
use serde::{Deserialize, Serialize};

/// Default water flux imposed at the base, in µL/s.
pub const DEFAULT_JV: f64 = 0.1;

/// Default external water potential (pressure chamber), in MPa.
pub const DEFAULT_PSI_E: f64 = 0.4;

/// Default potential at the base (atmospheric pressure for a decapitated
/// plant), in MPa.
pub const DEFAULT_PSI_BASE: f64 = 0.101325;

// =#========================================================================#=
// BOUNDARY CONDITIONS
// =#========================================================================#=
/// Global boundary conditions of a root system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConditions {
    /// Total water flux imposed at the base (`Jv`, µL/s); any real value.
    pub jv: f64,
    /// External potential driving lateral exchange (`psi_e`, MPa).
    pub psi_e: f64,
    /// Potential at the proximal face of the base (`psi_base`, MPa).
    pub psi_base: f64,
}

impl BoundaryConditions {
    pub fn new(jv: f64, psi_e: f64, psi_base: f64) -> Self {
        BoundaryConditions {
            jv,
            psi_e,
            psi_base,
        }
    }

    /// Parses boundary conditions from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, SolverError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        BoundaryConditions::new(DEFAULT_JV, DEFAULT_PSI_E, DEFAULT_PSI_BASE)
    }
}

// =#========================================================================#=
// SOLVER CONFIG
// =#========================================================================#=
/// Numerical settings of the [FlowSolver](crate::solver::FlowSolver).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Multiplier applied to `k`, `K` and `Jv` before solving and divided
    /// out of `Keq`, `j` and `J_out` afterwards. Potentials are unaffected.
    /// Must be finite and positive.
    pub numerical_scale: f64,
    /// Whether each `J_out < j` event is also emitted as a `log` warning.
    /// Events are collected in the solution either way.
    pub warn_on_flux_excess: bool,
}

impl SolverConfig {
    /// Returns a config with the given numerical scale.
    pub fn with_numerical_scale(mut self, scale: f64) -> Self {
        self.numerical_scale = scale;
        self
    }

    /// Returns a config that does not log flux excess events.
    pub fn quiet(mut self) -> Self {
        self.warn_on_flux_excess = false;
        self
    }

    /// Parses a solver config from a JSON object and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, SolverError> {
        let config: SolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the numerical scale is finite and positive.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.numerical_scale.is_finite() || self.numerical_scale <= 0.0 {
            return Err(SolverError::invalid_configuration(format!(
                "numerical scale must be finite and positive, got {}",
                self.numerical_scale
            )));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            numerical_scale: 1.0,
            warn_on_flux_excess: true,
        }
    }
}
