//! Data model for branched root architectures.
//!
//! # Tree representation
//! Root systems are represented by [RootTree], which uses the arena pattern
//! to store [Segment]s referenced by [VertexIndex]. The base segment is where
//! boundary flux and potential are imposed; every other segment has exactly
//! one parent and any number of children.
//!
//! Each segment carries optional physical attributes:
//!
//! | Attribute | Meaning | Set by |
//! |-----------|---------|--------|
//! | `length` | Segment length | [`RootTree::set_length`], axis helpers |
//! | `radius` | Segment radius | [`RootTree::set_radius`], axis helpers |
//! | `k` | Lateral conductance | [conductance::assign_conductances] or by hand |
//! | `K_raw` | Axial conductivity (per length) | [conductance::assign_conductances] or by hand |
//!
//! # Solver interface
//! The solver reads trees through the [RootArchitecture] trait, so trees
//! kept by other code can be solved without copying them into a
//! [RootTree].

pub mod architecture;
pub mod conductance;
pub mod tree;
pub mod vertex;

pub use architecture::PostOrderIter;
pub use architecture::PreOrderIter;
pub use architecture::RootArchitecture;
pub use tree::RootTree;
pub use tree::VertexIndex;
pub use vertex::Segment;
