use rootflux::model::conductance::{
    AxialConductivityProfile, RadialConductivity, assign_conductances,
};
use rootflux::model::{RootArchitecture, RootTree};
use rootflux::solve_flux;
use rootflux::solver::{Attribute, BoundaryConditions, SolverErrorType};
use std::f64::consts::PI;

/// Primary axis of 10 segments with a lateral of 4 segments at segment 3.
fn tree_with_lateral() -> RootTree {
    let mut tree = RootTree::new(14);
    let primary = tree.add_primary_axis(10, 1e-4, 2e-4);
    tree.add_lateral_axis(primary[3], 4, 1e-4, 1e-4);
    tree
}

#[test]
fn test_lateral_conductance_from_surface() {
    let mut tree = tree_with_lateral();
    let radial = RadialConductivity::new(92.0);
    assign_conductances(&mut tree, &radial, &AxialConductivityProfile::constant(1e-9)).unwrap();

    assert_eq!(
        tree.lateral_conductance(0),
        Some(92.0 * 2.0 * PI * 2e-4 * 1e-4)
    );
    assert_eq!(
        tree.lateral_conductance(10),
        Some(92.0 * 2.0 * PI * 1e-4 * 1e-4)
    );
}

#[test]
fn test_axial_conductivity_follows_distance_to_tip() {
    let mut tree = RootTree::new(4);
    tree.add_primary_axis(4, 1.0, 1.0);
    let profile = AxialConductivityProfile::new(vec![(1.0, 10.0), (4.0, 40.0)]).unwrap();
    assign_conductances(&mut tree, &RadialConductivity::new(1.0), &profile).unwrap();

    // Distances to tip are 4, 3, 2, 1 from base to tip
    assert_eq!(tree.axial_conductivity(0), Some(40.0));
    assert_eq!(tree.axial_conductivity(1), Some(30.0));
    assert_eq!(tree.axial_conductivity(2), Some(20.0));
    assert_eq!(tree.axial_conductivity(3), Some(10.0));
}

#[test]
fn test_lateral_axis_uses_its_own_tip() {
    let mut tree = tree_with_lateral();
    let profile = AxialConductivityProfile::new(vec![(0.0, 0.0), (1e-3, 1e-8)]).unwrap();
    assign_conductances(&mut tree, &RadialConductivity::new(1.0), &profile).unwrap();

    // First lateral segment is 4 segments from its tip, the branching
    // primary segment 7 segments from the primary tip
    let lateral_k = tree.axial_conductivity(10).unwrap();
    let primary_k = tree.axial_conductivity(3).unwrap();
    assert!((lateral_k - 4e-9).abs() < 1e-20);
    assert!((primary_k - 7e-9).abs() < 1e-20);
}

#[test]
fn test_folds_scale_conductances() {
    let mut reference = tree_with_lateral();
    let mut scaled = reference.clone();
    let radial = RadialConductivity::new(50.0);
    let axial = AxialConductivityProfile::new(vec![(0.0, 1e-9), (1e-3, 3e-9)]).unwrap();

    assign_conductances(&mut reference, &radial, &axial).unwrap();
    assign_conductances(&mut scaled, &radial.with_fold(0.5), &axial.with_fold(2.0)).unwrap();

    for v in 0..reference.num_vertices() {
        let k_ref = reference.lateral_conductance(v).unwrap();
        let k_raw_ref = reference.axial_conductivity(v).unwrap();
        assert!((scaled.lateral_conductance(v).unwrap() - 0.5 * k_ref).abs() <= 1e-15 * k_ref);
        assert_eq!(scaled.axial_conductivity(v).unwrap(), 2.0 * k_raw_ref);
    }
}

#[test]
fn test_missing_radius_is_reported() {
    let mut tree = RootTree::new(2);
    let base = tree.add_base();
    tree.set_length(base, 1e-4);
    tree.set_radius(base, 1e-4);
    let tip = tree.continue_axis(base);
    tree.set_length(tip, 1e-4);

    let err = assign_conductances(
        &mut tree,
        &RadialConductivity::new(1.0),
        &AxialConductivityProfile::constant(1e-9),
    )
    .unwrap_err();
    assert_eq!(err.kind(), &SolverErrorType::MissingAttribute(Attribute::Radius));
    assert_eq!(err.vertex(), Some(tip));

    // Nothing written on failure
    assert_eq!(tree.lateral_conductance(base), None);
}

#[test]
fn test_tree_without_base_is_rejected() {
    let mut tree = RootTree::new(0);
    let err = assign_conductances(
        &mut tree,
        &RadialConductivity::new(1.0),
        &AxialConductivityProfile::constant(1e-9),
    )
    .unwrap_err();
    assert_eq!(err.kind(), &SolverErrorType::MissingBase);
    assert_eq!(err.vertex(), None);
}

#[test]
fn test_assigned_tree_solves() {
    let mut tree = tree_with_lateral();
    assign_conductances(
        &mut tree,
        &RadialConductivity::new(92.0),
        &AxialConductivityProfile::new(vec![(0.0, 1e-10), (5e-4, 5e-9)]).unwrap(),
    )
    .unwrap();

    let bc = BoundaryConditions::default();
    let solution = solve_flux(&tree, &bc).unwrap();
    assert_eq!(solution.num_vertices(), tree.num_vertices());
    assert!(solution.keq_total() > 0.0);
    assert!(solution.boundary_flux(&bc) > 0.0);
}

#[test]
fn test_profile_from_json() {
    let profile: AxialConductivityProfile =
        serde_json::from_str(r#"{ "points": [[0.0, 1e-9], [1e-3, 2e-9]], "fold": 0.5 }"#).unwrap();
    assert_eq!(profile.fold(), 0.5);
    assert_eq!(profile.points().len(), 2);
    assert!(profile.validate().is_ok());

    let radial: RadialConductivity = serde_json::from_str(r#"{ "k0": 92.0 }"#).unwrap();
    assert_eq!(radial.fold, 1.0);
}
