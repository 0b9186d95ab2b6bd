//! Segment module for root architecture representation.

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// SEGMENT
// =#========================================================================#=
/// Represents one discretized segment (vertex) of a root system.
///
/// A segment is either:
/// - **Base**: No parent; boundary flux and potential are imposed here
/// - **Axis segment**: Continues the axis of its parent (same branching order)
/// - **Lateral segment**: First segment of a lateral root (parent order + 1)
///
/// # Invariants
/// - `index` is index in arena
/// - `parent` is `None` only for the base
/// - `children` keeps insertion order, which is the iteration order
///   used by every traversal and by the flux solver
/// - Scalar attributes are optional so that a missing value can be
///   reported instead of silently assumed
#[derive(PartialEq, Debug, Clone)]
pub struct Segment {
    /// Index of this segment in the tree arena
    index: VertexIndex,
    /// Index of the parent segment, `None` for the base
    parent: Option<VertexIndex>,
    /// Indices of the child segments (zero, one, or more)
    children: Vec<VertexIndex>,
    /// Branching order, 0 on the primary axis
    order: u32,
    /// Physical length of the segment
    length: Option<f64>,
    /// Radius of the segment
    radius: Option<f64>,
    /// Lateral (radial) conductance `k`
    lateral_conductance: Option<f64>,
    /// Axial conductivity `K_raw`, i.e. before division by length
    axial_conductivity: Option<f64>,
}

impl Segment {
    /// Creates a new base segment (order 0, no parent).
    ///
    /// # Arguments
    /// * `index` - The unique index of this segment in the tree (arena)
    pub fn new_base(index: VertexIndex) -> Self {
        Segment {
            index,
            parent: None,
            children: Vec::new(),
            order: 0,
            length: None,
            radius: None,
            lateral_conductance: None,
            axial_conductivity: None,
        }
    }

    /// Creates a new non-base segment attached to `parent`.
    ///
    /// # Arguments
    /// * `index` - The unique index of this segment in the tree (arena)
    /// * `parent` - Index of the parent segment
    /// * `order` - Branching order of the axis this segment belongs to
    pub fn new_segment(index: VertexIndex, parent: VertexIndex, order: u32) -> Self {
        Segment {
            parent: Some(parent),
            order,
            ..Segment::new_base(index)
        }
    }

    /// Returns the index of this segment.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the base.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the indices of the children in insertion order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the branching order.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Returns `true` if this segment is the base.
    pub fn is_base(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this segment has no children (root tip).
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if two or more children branch off this segment.
    pub fn is_branching(&self) -> bool {
        self.children.len() > 1
    }

    pub fn length(&self) -> Option<f64> {
        self.length
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn lateral_conductance(&self) -> Option<f64> {
        self.lateral_conductance
    }

    pub fn axial_conductivity(&self) -> Option<f64> {
        self.axial_conductivity
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }

    pub(crate) fn set_length(&mut self, length: f64) {
        self.length = Some(length);
    }

    pub(crate) fn set_radius(&mut self, radius: f64) {
        self.radius = Some(radius);
    }

    pub(crate) fn set_lateral_conductance(&mut self, k: f64) {
        self.lateral_conductance = Some(k);
    }

    pub(crate) fn set_axial_conductivity(&mut self, k_raw: f64) {
        self.axial_conductivity = Some(k_raw);
    }
}
