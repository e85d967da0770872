//! Generic Binary Space Partitioning framework.
//!
//! This module represents regions of a space as BSP trees whose internal
//! nodes cut their cell with a piece of hyperplane. It is generic over the
//! geometry: a [`Space`] ties together the point, [`Hyperplane`] and
//! [`SubHyperplane`] types of one space.
//!
//! - Building a region from its boundary
//! - Point location with tolerance
//! - Boolean combination (union, intersection, difference, xor, complement)
//!
//! # Example
//!
//! ```ignore
//! use bsp_region::{PolygonsSet, RegionFactory, DEFAULT_TOLERANCE};
//!
//! let a = PolygonsSet::from_box(0.0, 2.0, 0.0, 2.0, DEFAULT_TOLERANCE);
//! let b = PolygonsSet::from_box(1.0, 3.0, 1.0, 3.0, DEFAULT_TOLERANCE);
//!
//! let union = RegionFactory::new().union(&a, &b);
//! assert!((union.size() - 7.0).abs() < 1e-9);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: Leaf or internal node, the tree is strictly owned
//! - [`BspNode`]: Internal node storing a cut fitted to its cell
//! - [`Region`]: A tree plus tolerance and cached size/barycenter
//! - [`RegionFactory`]: Boolean operations through a single tree merge
//! - [`CutSelector`]: Strategy trait for choosing cuts during construction
//! - [`BspTreeVisitor`]: Visitor trait for custom traversal behavior

mod factory;
mod hyperplane;
mod node;
mod region;
mod selector;
mod sub_hyperplane;
mod tree;
mod visitor;

// Re-export main types
pub use factory::{merge, BooleanOp, RegionFactory};
pub use hyperplane::{Hyperplane, Location, Side, Space, DEFAULT_TOLERANCE};
pub use node::{BoundaryFacets, BspNode};
pub use region::{Region, RegionProperties};
pub use selector::{CutSelector, FirstBoundary, LargestBoundary};
pub use sub_hyperplane::{SplitSubHyperplane, SubHyperplane};
pub use tree::{fit_to_cell, BspTree};
pub use visitor::{BoundarySizeVisitor, BspTreeVisitor, LeafCounter};
