//! Assignment of lateral and axial conductances to a [RootTree].
//!
//! Radial (lateral) exchange happens through the segment surface, so the
//! lateral conductance of a segment is a radial conductivity `k0` times
//! `2π · radius · length`. Axial conductivity varies along a root axis and
//! is given as a profile over the distance to the axis tip.
//!
//! Both carry a `fold` factor, which scales the resulting values. Sensitivity
//! studies solve the same architecture under several folds; clone the tree
//! for each variant so earlier results stay untouched:
//!
//! ```
//! use rootflux::model::RootTree;
//! use rootflux::model::conductance::{
//!     assign_conductances, AxialConductivityProfile, RadialConductivity,
//! };
//!
//! let mut tree = RootTree::new(10);
//! tree.add_primary_axis(10, 1e-4, 1.2e-4);
//!
//! let axial = AxialConductivityProfile::new(vec![(0.0, 2e-9), (1e-3, 8e-9)]).unwrap();
//! let mut halved = tree.clone();
//! assign_conductances(&mut tree, &RadialConductivity::new(92.0), &axial).unwrap();
//! assign_conductances(&mut halved, &RadialConductivity::new(92.0), &axial.with_fold(0.5)).unwrap();
//! ```

use crate::model::tree::RootTree;
use crate::solver::solver_error::{Attribute, SolverError, SolverErrorType};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// =#========================================================================#=
// RADIAL CONDUCTIVITY
// =#========================================================================#=
/// Uniform radial conductivity per unit of root surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialConductivity {
    /// Radial conductivity per unit surface
    pub k0: f64,
    /// Scale factor applied on top of `k0`
    #[serde(default = "unit_fold")]
    pub fold: f64,
}

impl RadialConductivity {
    pub fn new(k0: f64) -> Self {
        RadialConductivity { k0, fold: 1.0 }
    }

    /// Returns a copy with the given scale factor.
    pub fn with_fold(mut self, fold: f64) -> Self {
        self.fold = fold;
        self
    }

    /// Lateral conductance of a segment with the given radius and length.
    pub fn lateral_conductance(&self, radius: f64, length: f64) -> f64 {
        self.k0 * self.fold * 2.0 * PI * radius * length
    }
}

// =#========================================================================#=
// AXIAL CONDUCTIVITY PROFILE
// =#========================================================================#=
/// Axial conductivity as a piecewise-linear function of the distance to the
/// axis tip.
///
/// Outside the data range the first or last value is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxialConductivityProfile {
    /// `(distance_to_tip, K)` pairs, sorted by strictly increasing distance
    points: Vec<(f64, f64)>,
    /// Scale factor applied to the interpolated value
    #[serde(default = "unit_fold")]
    fold: f64,
}

fn unit_fold() -> f64 {
    1.0
}

impl AxialConductivityProfile {
    /// Creates a profile from `(distance_to_tip, K)` pairs.
    ///
    /// # Errors
    /// `InvalidProfile` if `points` is empty, contains non-finite values,
    /// or distances are not strictly increasing.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, SolverError> {
        let profile = AxialConductivityProfile { points, fold: 1.0 };
        profile.validate()?;
        Ok(profile)
    }

    /// Creates a profile with the same conductivity everywhere.
    pub fn constant(conductivity: f64) -> Self {
        AxialConductivityProfile {
            points: vec![(0.0, conductivity)],
            fold: 1.0,
        }
    }

    /// Returns a copy with the given scale factor.
    pub fn with_fold(&self, fold: f64) -> Self {
        AxialConductivityProfile {
            points: self.points.clone(),
            fold,
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn fold(&self) -> f64 {
        self.fold
    }

    /// Checks the invariants listed in [`AxialConductivityProfile::new`].
    pub fn validate(&self) -> Result<(), SolverError> {
        let invalid =
            |msg: String| SolverError::without_vertex(SolverErrorType::InvalidProfile(msg));

        if self.points.is_empty() {
            return Err(invalid("no data points".to_string()));
        }
        if let Some((x, y)) = self
            .points
            .iter()
            .find(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(invalid(format!("non-finite data point ({x}, {y})")));
        }
        if let Some(pair) = self.points.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
            return Err(invalid(format!(
                "distances not strictly increasing at {} -> {}",
                pair[0].0, pair[1].0
            )));
        }
        Ok(())
    }

    /// Axial conductivity at the given distance to the tip, fold included.
    pub fn conductivity_at(&self, distance_to_tip: f64) -> f64 {
        self.interpolate(distance_to_tip) * self.fold
    }

    fn interpolate(&self, x: f64) -> f64 {
        let points = &self.points;
        let (first_x, first_y) = points[0];
        let (last_x, last_y) = points[points.len() - 1];
        if x <= first_x {
            return first_y;
        }
        if x >= last_x {
            return last_y;
        }

        // First point strictly beyond x; exists and is > 0 given the checks above
        let upper = points.partition_point(|&(px, _)| px <= x);
        let (x0, y0) = points[upper - 1];
        let (x1, y1) = points[upper];
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

// =#========================================================================#=
// ASSIGNMENT
// =#========================================================================#=
/// Sets lateral conductance `k` and axial conductivity `K_raw` on every
/// segment of `tree`.
///
/// Nothing is written unless all inputs are valid.
///
/// # Errors
/// - `MissingBase` if the tree has no base
/// - `InvalidProfile` if the axial profile is invalid
/// - `MissingAttribute` if a segment has no length or no radius
pub fn assign_conductances(
    tree: &mut RootTree,
    radial: &RadialConductivity,
    axial: &AxialConductivityProfile,
) -> Result<(), SolverError> {
    axial.validate()?;
    if tree.base_index().is_none() {
        return Err(SolverError::without_vertex(SolverErrorType::MissingBase));
    }

    let mut radii = Vec::with_capacity(tree.num_vertices());
    for segment in tree.segments() {
        let index = segment.index();
        if segment.length().is_none() {
            return Err(SolverError::missing_attribute(Attribute::Length, index));
        }
        let radius = segment
            .radius()
            .ok_or_else(|| SolverError::missing_attribute(Attribute::Radius, index))?;
        radii.push(radius);
    }

    let distances = tree.distance_to_tip();
    for (v, radius) in radii.into_iter().enumerate() {
        // Presence checked above
        let length = tree[v].length().unwrap_or_default();
        tree.set_lateral_conductance(v, radial.lateral_conductance(radius, length));
        tree.set_axial_conductivity(v, axial.conductivity_at(distances[v]));
    }
    Ok(())
}
