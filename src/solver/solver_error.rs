//! Error types for the flux solver and conductance assignment.
//!
//! This module provides [SolverError] and [SolverErrorType] for reporting
//! fatal input problems. A [SolverError] names the offending vertex when
//! there is one, so callers can point at the broken segment.
//!
//! Physically implausible but computable states (a segment losing more
//! water laterally than flows through it) are not errors; they are
//! collected as [FluxWarning](crate::solver::FluxWarning)s instead.

use crate::model::VertexIndex;
use std::fmt;
use thiserror::Error;

// =#========================================================================#=
// ATTRIBUTE
// =#========================================================================#=
/// Per-segment input attribute, used to report which one is missing or
/// invalid.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Attribute {
    Length,
    Radius,
    LateralConductance,
    AxialConductivity,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Attribute::Length => write!(f, "length"),
            Attribute::Radius => write!(f, "radius"),
            Attribute::LateralConductance => write!(f, "lateral conductance (k)"),
            Attribute::AxialConductivity => write!(f, "axial conductivity (K)"),
        }
    }
}

// =#========================================================================#=
// SOLVER ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while preparing or solving a root tree.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum SolverErrorType {
    #[error("Tree has no base")]
    MissingBase,
    #[error("Missing {0}")]
    MissingAttribute(Attribute),
    #[error("Segment length is zero")]
    ZeroLength,
    #[error("Invalid {0}: {1}")]
    InvalidAttribute(Attribute, f64),
    #[error("Segment has neither lateral conductance nor children to pass flux")]
    ZeroConductancePath,
    #[error("Invalid tree structure - {0}")]
    InvalidTreeStructure(String),
    #[error("Segment not reachable from base")]
    DisconnectedVertex,
    #[error("Invalid conductivity profile - {0}")]
    InvalidProfile(String),
    #[error("Invalid configuration - {0}")]
    InvalidConfiguration(String),
}

// =#========================================================================#=
// SOLVER ERROR
// =#========================================================================#=
/// Solver error with the vertex it was detected at, if any.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}{}", vertex_suffix(.vertex))]
pub struct SolverError {
    kind: SolverErrorType,
    vertex: Option<VertexIndex>,
}

impl SolverError {
    /// Create a SolverError for a specific vertex
    pub fn at_vertex(kind: SolverErrorType, vertex: VertexIndex) -> Self {
        Self {
            kind,
            vertex: Some(vertex),
        }
    }

    /// Create a SolverError not tied to a vertex (configuration, profiles)
    pub fn without_vertex(kind: SolverErrorType) -> Self {
        Self { kind, vertex: None }
    }

    /// Convenience constructor for MissingAttribute
    pub fn missing_attribute(attribute: Attribute, vertex: VertexIndex) -> Self {
        Self::at_vertex(SolverErrorType::MissingAttribute(attribute), vertex)
    }

    /// Convenience constructor for InvalidAttribute
    pub fn invalid_attribute(attribute: Attribute, value: f64, vertex: VertexIndex) -> Self {
        Self::at_vertex(SolverErrorType::InvalidAttribute(attribute, value), vertex)
    }

    /// Convenience constructor for InvalidTreeStructure
    pub fn invalid_tree_structure(msg: String, vertex: VertexIndex) -> Self {
        Self::at_vertex(SolverErrorType::InvalidTreeStructure(msg), vertex)
    }

    /// Convenience constructor for InvalidConfiguration
    pub fn invalid_configuration(msg: String) -> Self {
        Self::without_vertex(SolverErrorType::InvalidConfiguration(msg))
    }

    /// Get the error kind
    pub fn kind(&self) -> &SolverErrorType {
        &self.kind
    }

    /// Get the vertex the error was detected at
    pub fn vertex(&self) -> Option<VertexIndex> {
        self.vertex
    }
}

fn vertex_suffix(vertex: &Option<VertexIndex>) -> String {
    vertex.map(|v| format!(" at vertex {v}")).unwrap_or_default()
}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        SolverError::invalid_configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_vertex() {
        let err = SolverError::missing_attribute(Attribute::Length, 7);
        assert_eq!(err.to_string(), "Missing length at vertex 7");
    }

    #[test]
    fn test_display_without_vertex() {
        let err = SolverError::invalid_configuration("scale must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration - scale must be positive"
        );
        assert_eq!(err.vertex(), None);
    }
}
