use rootflux::model::{RootArchitecture, RootTree};

/// Primary axis 0-1-2-3 with a lateral 4-5 branching off segment 1,
/// all segments of length 1.
fn small_tree() -> RootTree {
    let mut tree = RootTree::new(6);
    let primary = tree.add_primary_axis(4, 1.0, 0.5);
    tree.add_lateral_axis(primary[1], 2, 1.0, 0.25);
    tree
}

#[test]
fn test_building_tree() {
    let tree = small_tree();

    // Counts
    assert_eq!(tree.num_vertices(), 6);
    assert_eq!(tree.num_tips(), 2);
    assert_eq!(tree.num_branching_points(), 1);
    assert_eq!(tree.max_order(), Some(1));
    assert_eq!(tree.total_length(), 6.0);

    // Base
    assert_eq!(tree.base_index(), Some(0));
    let base = tree.base();
    assert!(base.is_base());
    assert_eq!(base.parent(), None);
    assert_eq!(base.order(), 0);

    // Branching point
    let branching = &tree[1];
    assert!(branching.is_branching());
    assert_eq!(branching.children(), &[2, 4]);

    // Lateral
    let lateral = &tree[4];
    assert_eq!(lateral.parent(), Some(1));
    assert_eq!(lateral.order(), 1);
    assert_eq!(lateral.radius(), Some(0.25));
    assert_eq!(tree[5].order(), 1);
    assert!(tree[5].is_tip());

    assert!(tree.is_valid());
}

#[test]
fn test_axis_successor() {
    let tree = small_tree();
    assert_eq!(tree.axis_successor(1), Some(2));
    assert_eq!(tree.axis_successor(4), Some(5));
    assert_eq!(tree.axis_successor(3), None);
}

#[test]
fn test_pre_order_visits_parents_first() {
    let tree = small_tree();
    let order: Vec<_> = tree.pre_order_iter().collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_post_order_visits_children_first() {
    let tree = small_tree();
    let order: Vec<_> = tree.post_order_iter().collect();
    assert_eq!(order, vec![3, 2, 5, 4, 1, 0]);
}

#[test]
fn test_traversal_of_empty_tree() {
    let tree = RootTree::new(0);
    assert_eq!(tree.pre_order_iter().count(), 0);
    assert_eq!(tree.post_order_iter().count(), 0);
    assert!(!tree.is_valid());
}

#[test]
fn test_distance_from_base() {
    let tree = small_tree();
    assert_eq!(tree.distance_from_base(), vec![1.0, 2.0, 3.0, 4.0, 3.0, 4.0]);
}

#[test]
fn test_distance_to_tip_follows_own_axis() {
    let tree = small_tree();
    assert_eq!(tree.distance_to_tip(), vec![4.0, 3.0, 2.0, 1.0, 2.0, 1.0]);
}

#[test]
fn test_attribute_setters() {
    let mut tree = RootTree::new(1);
    let base = tree.add_base();
    assert_eq!(tree.length(base), None);
    assert!(!tree.vertices_have_lengths());

    tree.set_length(base, 2e-4);
    tree.set_lateral_conductance(base, 3.0);
    tree.set_axial_conductivity(base, 4.0);

    assert!(tree.vertices_have_lengths());
    assert_eq!(tree[base].length(), Some(2e-4));
    assert_eq!(tree.lateral_conductance(base), Some(3.0));
    assert_eq!(tree.axial_conductivity(base), Some(4.0));
}

#[test]
#[should_panic]
fn test_second_base_panics() {
    let mut tree = RootTree::new(2);
    tree.add_base();
    tree.add_base();
}

#[test]
#[should_panic]
fn test_get_base_panics_on_empty_tree() {
    let tree = RootTree::new(2);
    tree.base();
}

#[test]
#[should_panic]
fn test_get_segment_out_of_bounds() {
    let tree = small_tree();
    let _ = &tree[55];
}
