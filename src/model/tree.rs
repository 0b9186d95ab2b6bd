//! Provides the arena tree representation of a root system.
//!
//! Provides core data structures for representing root architectures:
//! * [RootTree] - Main tree structure using the arena pattern for efficient
//!   memory layout, with per-segment physical attributes.
//! * [VertexIndex] as type used to index segments in tree

use crate::model::architecture::{PostOrderIter, PreOrderIter, RootArchitecture};
use crate::model::vertex::Segment;

/// Index of a vertex (segment) in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted root-system tree represented using the arena pattern on
/// [Segment].
///
/// Segments are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
///
/// # Structure
/// - All segments are stored in the arena, the base included.
/// - Index of the base is maintained.
/// - A segment may have any number of children; branching points have
///   two or more.
/// - Every segment besides the base is added with its parent, so the tree
///   is connected and acyclic by construction.
/// - Physical attributes (`length`, `radius`, `k`, `K_raw`) are optional
///   and set after construction, e.g. by
///   [assign_conductances](crate::model::conductance::assign_conductances).
///
/// # Construction
/// Start with [`RootTree::add_base`], then grow axes with
/// [`RootTree::continue_axis`] and branch with [`RootTree::add_lateral`],
/// or use [`RootTree::add_primary_axis`] and [`RootTree::add_lateral_axis`]
/// to add whole axes of uniform segments at once.
#[derive(Debug, Clone, Default)]
pub struct RootTree {
    /// Segments of this tree (arena pattern)
    segments: Vec<Segment>,

    /// Index of the base of this tree, `None` until added
    base_index: Option<VertexIndex>,
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl RootTree {
    /// Creates a new empty tree with capacity for `capacity` segments.
    pub fn new(capacity: usize) -> Self {
        RootTree {
            segments: Vec::with_capacity(capacity),
            base_index: None,
        }
    }

    /// Adds the base segment, assigning a unique index, which gets returned.
    ///
    /// # Panics
    /// Panics if the tree already has a base.
    pub fn add_base(&mut self) -> VertexIndex {
        assert!(self.base_index.is_none(), "Tree already has a base");
        let index = self.segments.len();
        self.segments.push(Segment::new_base(index));
        self.base_index = Some(index);
        index
    }

    /// Adds a segment continuing the axis of `parent` (same branching order).
    ///
    /// # Returns
    /// The index of the newly created segment.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds.
    pub fn continue_axis(&mut self, parent: VertexIndex) -> VertexIndex {
        let order = self[parent].order();
        self.attach(parent, order)
    }

    /// Adds the first segment of a new lateral root branching off `parent`
    /// (branching order of `parent` plus one).
    ///
    /// # Returns
    /// The index of the newly created segment.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds.
    pub fn add_lateral(&mut self, parent: VertexIndex) -> VertexIndex {
        let order = self[parent].order() + 1;
        self.attach(parent, order)
    }

    /// Adds the primary axis as a chain of `num_segments` segments, starting
    /// with the base, each with the given `segment_length` and `radius`.
    ///
    /// # Returns
    /// Indices of the new segments from base to tip.
    ///
    /// # Panics
    /// Panics if the tree already has a base or `num_segments` is zero.
    pub fn add_primary_axis(
        &mut self,
        num_segments: usize,
        segment_length: f64,
        radius: f64,
    ) -> Vec<VertexIndex> {
        assert!(num_segments > 0, "An axis needs at least one segment");
        let base = self.add_base();
        self.grow_axis(base, num_segments, segment_length, radius)
    }

    /// Adds a lateral root of `num_segments` segments branching off
    /// `parent`, each with the given `segment_length` and `radius`.
    ///
    /// # Returns
    /// Indices of the new segments from the branching point to the tip.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds or `num_segments` is zero.
    pub fn add_lateral_axis(
        &mut self,
        parent: VertexIndex,
        num_segments: usize,
        segment_length: f64,
        radius: f64,
    ) -> Vec<VertexIndex> {
        assert!(num_segments > 0, "An axis needs at least one segment");
        let first = self.add_lateral(parent);
        self.grow_axis(first, num_segments, segment_length, radius)
    }

    /// Sets the physical length of a segment.
    pub fn set_length(&mut self, vertex: VertexIndex, length: f64) {
        self.segments[vertex].set_length(length);
    }

    /// Sets the radius of a segment.
    pub fn set_radius(&mut self, vertex: VertexIndex, radius: f64) {
        self.segments[vertex].set_radius(radius);
    }

    /// Sets the lateral (radial) conductance `k` of a segment.
    pub fn set_lateral_conductance(&mut self, vertex: VertexIndex, k: f64) {
        self.segments[vertex].set_lateral_conductance(k);
    }

    /// Sets the axial conductivity `K_raw` (per unit length) of a segment.
    pub fn set_axial_conductivity(&mut self, vertex: VertexIndex, k_raw: f64) {
        self.segments[vertex].set_axial_conductivity(k_raw);
    }

    fn attach(&mut self, parent: VertexIndex, order: u32) -> VertexIndex {
        let index = self.segments.len();
        self.segments[parent].push_child(index);
        self.segments.push(Segment::new_segment(index, parent, order));
        index
    }

    /// Sets length and radius on `first` and continues its axis with
    /// `num_segments - 1` further segments.
    fn grow_axis(
        &mut self,
        first: VertexIndex,
        num_segments: usize,
        segment_length: f64,
        radius: f64,
    ) -> Vec<VertexIndex> {
        let mut axis = Vec::with_capacity(num_segments);
        let mut current = first;
        for i in 0..num_segments {
            if i > 0 {
                current = self.continue_axis(current);
            }
            self.set_length(current, segment_length);
            self.set_radius(current, radius);
            axis.push(current);
        }
        axis
    }
}

// ============================================================================
// Getters / Accessors, etc. (pub)
// ============================================================================
impl RootTree {
    /// Returns the index of the base, or `None` if not set yet.
    pub fn base_index(&self) -> Option<VertexIndex> {
        self.base_index
    }

    /// Returns a reference to the base segment.
    ///
    /// # Panics
    /// Panics if the base hasn't been added yet.
    pub fn base(&self) -> &Segment {
        let index = self.base_index.expect("Tree has no base");
        &self.segments[index]
    }

    /// Returns a reference to the segment at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn segment(&self, index: VertexIndex) -> &Segment {
        &self[index]
    }

    /// Returns an iterator over all segments in arena order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the number of segments in this tree.
    pub fn num_vertices(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of root tips (segments without children).
    pub fn num_tips(&self) -> usize {
        self.segments.iter().filter(|s| s.is_tip()).count()
    }

    /// Returns the number of branching points (segments with two or more
    /// children).
    pub fn num_branching_points(&self) -> usize {
        self.segments.iter().filter(|s| s.is_branching()).count()
    }

    /// Returns the highest branching order present, `None` for an empty tree.
    pub fn max_order(&self) -> Option<u32> {
        self.segments.iter().map(Segment::order).max()
    }

    /// Returns the child of `vertex` continuing its axis, if any.
    ///
    /// That is the first child with the same branching order.
    pub fn axis_successor(&self, vertex: VertexIndex) -> Option<VertexIndex> {
        let order = self[vertex].order();
        self[vertex]
            .children()
            .iter()
            .copied()
            .find(|&c| self[c].order() == order)
    }

    /// Returns the sum of all segment lengths; missing lengths are ignored.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().filter_map(Segment::length).sum()
    }

    /// Checks if all segments have a length set.
    pub fn vertices_have_lengths(&self) -> bool {
        self.segments.iter().all(|s| s.length().is_some())
    }

    /// Returns, for each segment, the distance from the base to its distal
    /// face, i.e. the summed lengths of the segment and all its ancestors.
    ///
    /// # Panics
    /// Panics if not all segments have a length, which can be checked first
    /// with `vertices_have_lengths()`.
    pub fn distance_from_base(&self) -> Vec<f64> {
        let mut distances = vec![0.0; self.num_vertices()];
        for v in self.pre_order_iter() {
            let segment = &self[v];
            let length = segment.length().expect("Segment without length");
            distances[v] = segment.parent().map_or(0.0, |p| distances[p]) + length;
        }
        distances
    }

    /// Returns, for each segment, the distance from its proximal face to
    /// the tip of its axis, measured along the axis (segment included).
    ///
    /// # Panics
    /// Panics if not all segments have a length, which can be checked first
    /// with `vertices_have_lengths()`.
    pub fn distance_to_tip(&self) -> Vec<f64> {
        let mut distances = vec![0.0; self.num_vertices()];
        for v in self.post_order_iter() {
            let length = self[v].length().expect("Segment without length");
            distances[v] = length + self.axis_successor(v).map_or(0.0, |s| distances[s]);
        }
        distances
    }

    /// Returns an iterator over the tree in pre-order (parents before
    /// children), starting at the base.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, Self> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before
    /// parents), ending at the base.
    ///
    /// Useful for aggregating data from the tips towards the base, such as
    /// equivalent conductances.
    pub fn post_order_iter(&self) -> PostOrderIter<'_, Self> {
        PostOrderIter::new(self)
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl RootTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Base index is set, within bounds, and the base has no parent
    /// - All segment indices match their position in the arena
    /// - Exactly one segment has no parent
    /// - All child indices are valid and point back to correct parent
    /// - Children continue or increase the branching order by one
    /// - Every segment is reachable from the base exactly once
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(base_index) = self.base_index else {
            return false;
        };
        if base_index >= self.segments.len() || !self.segments[base_index].is_base() {
            return false;
        }

        let mut num_bases = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.index() != index {
                return false;
            }
            if segment.is_base() {
                num_bases += 1;
            }

            for &child in segment.children() {
                if child >= self.segments.len() {
                    return false;
                }
                let child_segment = &self.segments[child];
                if child_segment.parent() != Some(index) {
                    return false;
                }
                let order = segment.order();
                if child_segment.order() != order && child_segment.order() != order + 1 {
                    return false;
                }
            }
        }
        if num_bases != 1 {
            return false;
        }

        // Reachability; a repeated visit means a cycle or shared child
        let mut visited = vec![false; self.segments.len()];
        for v in self.pre_order_iter().take(self.segments.len() + 1) {
            if visited[v] {
                return false;
            }
            visited[v] = true;
        }
        visited.iter().all(|&seen| seen)
    }
}

impl std::ops::Index<VertexIndex> for RootTree {
    type Output = Segment;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.segments[index]
    }
}

impl RootArchitecture for RootTree {
    fn num_vertices(&self) -> usize {
        self.segments.len()
    }

    fn base_index(&self) -> Option<VertexIndex> {
        self.base_index
    }

    fn parent(&self, vertex: VertexIndex) -> Option<VertexIndex> {
        self.segments[vertex].parent()
    }

    fn children(&self, vertex: VertexIndex) -> &[VertexIndex] {
        self.segments[vertex].children()
    }

    fn length(&self, vertex: VertexIndex) -> Option<f64> {
        self.segments[vertex].length()
    }

    fn lateral_conductance(&self, vertex: VertexIndex) -> Option<f64> {
        self.segments[vertex].lateral_conductance()
    }

    fn axial_conductivity(&self, vertex: VertexIndex) -> Option<f64> {
        self.segments[vertex].axial_conductivity()
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl RootTree {
    /// Prints a visual representation of the tree to the console.
    ///
    /// Meant for small trees while debugging; every segment gets a line.
    ///
    /// # Example Output
    /// ```text
    /// Root tree with 4 segments (2 tips):
    /// Base: segment 0
    /// [0] Order 0 (length: 0.100)
    ///   ├─ [1] Order 0 (length: 0.100)
    ///   └─ [2] Order 1 (length: 0.100)
    ///      └─ [3] Order 1 (length: 0.100)
    /// ```
    pub fn print_tree(&self) {
        println!(
            "Root tree with {} segments ({} tips):",
            self.segments.len(),
            self.num_tips()
        );

        if let Some(base_index) = self.base_index {
            println!("Base: segment {}", base_index);
            self.print_vertex(base_index, "", true);
        } else {
            println!("(No base set)");
        }
    }

    /// Helper function to recursively print a segment and its children.
    fn print_vertex(&self, idx: VertexIndex, prefix: &str, is_last: bool) {
        let segment = &self.segments[idx];

        let connector = if prefix.is_empty() {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };

        let length_str = if let Some(length) = segment.length() {
            format!("(length: {:.3})", length)
        } else {
            "(no length)".to_string()
        };

        println!(
            "{}{}[{}] Order {} {}",
            prefix,
            connector,
            idx,
            segment.order(),
            length_str
        );

        let new_prefix = if prefix.is_empty() {
            "  ".to_string()
        } else {
            format!("{}{}  ", prefix, if is_last { " " } else { "│" })
        };

        let children = segment.children();
        for (i, &child) in children.iter().enumerate() {
            self.print_vertex(child, &new_prefix, i + 1 == children.len());
        }
    }
}
