//! Read-only view of a root architecture as consumed by the flux solver.
//!
//! The [`RootArchitecture`] trait decouples the solver from a concrete tree
//! representation. Any rooted tree with dense vertex indices
//! `0..num_vertices()` and per-vertex `length`, `k` and `K_raw` reads can be
//! solved, e.g. a tree kept by an external architecture generator.
//! [RootTree](crate::model::RootTree) is the built-in implementation.
//!
//! The traversal iterators [PreOrderIter] and [PostOrderIter] work on any
//! implementor and yield vertex indices.

use crate::model::tree::VertexIndex;

// =#========================================================================#=
// ROOT ARCHITECTURE (trait)
// =#========================================================================T=
/// Abstraction over a rooted tree of root segments.
///
/// # Implementing this trait
/// - Vertex indices must be dense, i.e. `0..num_vertices()`.
/// - `children` must return children in a fixed order; the solver sums
///   equivalent conductances in that order, so bit-identical results
///   across runs require a stable order.
/// - `parent(c) == Some(p)` for every `c` in `children(p)`.
///
/// Attribute reads return `None` for missing values, which the solver
/// reports as an error.
pub trait RootArchitecture {
    /// Number of vertices (segments).
    fn num_vertices(&self) -> usize;

    /// Index of the base vertex, or `None` if no base has been set yet.
    fn base_index(&self) -> Option<VertexIndex>;

    /// Parent of `vertex`, `None` for the base.
    fn parent(&self, vertex: VertexIndex) -> Option<VertexIndex>;

    /// Children of `vertex` in a fixed order.
    fn children(&self, vertex: VertexIndex) -> &[VertexIndex];

    /// Physical length of the segment.
    fn length(&self, vertex: VertexIndex) -> Option<f64>;

    /// Lateral (radial) conductance `k` of the segment.
    fn lateral_conductance(&self, vertex: VertexIndex) -> Option<f64>;

    /// Axial conductivity `K_raw` of the segment (per unit length).
    fn axial_conductivity(&self, vertex: VertexIndex) -> Option<f64>;
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
/// Iterator for pre-order traversal (parents before children).
///
/// Stack-based, without recursion. Children are visited in the order
/// returned by [`RootArchitecture::children`].
///
/// The iterator does not guard against cycles; use
/// [RootTree::is_valid](crate::model::RootTree::is_valid) or let the solver
/// validate the structure.
pub struct PreOrderIter<'a, A: RootArchitecture + ?Sized> {
    tree: &'a A,
    stack: Vec<VertexIndex>,
}

impl<'a, A: RootArchitecture + ?Sized> PreOrderIter<'a, A> {
    /// Starts a traversal at the base of `tree` (empty if no base is set).
    pub fn new(tree: &'a A) -> Self {
        let stack = tree.base_index().into_iter().collect();
        PreOrderIter { tree, stack }
    }
}

impl<A: RootArchitecture + ?Sized> Iterator for PreOrderIter<'_, A> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;

        // Reversed, so that the first child is processed first
        self.stack
            .extend(self.tree.children(index).iter().rev().copied());

        Some(index)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Stack-based, without recursion. Each vertex is yielded after all of its
/// descendants.
pub struct PostOrderIter<'a, A: RootArchitecture + ?Sized> {
    tree: &'a A,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a, A: RootArchitecture + ?Sized> PostOrderIter<'a, A> {
    /// Starts a traversal at the base of `tree` (empty if no base is set).
    pub fn new(tree: &'a A) -> Self {
        let stack = tree.base_index().map(|b| (b, false)).into_iter().collect();
        PostOrderIter { tree, stack }
    }
}

impl<A: RootArchitecture + ?Sized> Iterator for PostOrderIter<'_, A> {
    type Item = VertexIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let children = self.tree.children(index);

            if children_visited || children.is_empty() {
                return Some(index);
            }

            self.stack.push((index, true));
            self.stack
                .extend(children.iter().rev().map(|&child| (child, false)));
        }
        None
    }
}
