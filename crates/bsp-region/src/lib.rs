//! Tolerance-aware regions represented as BSP (Binary Space Partitioning) trees.
//!
//! The [`partitioning`] module holds the geometry-independent machinery:
//! trees, regions and boolean operations. Concrete spaces live in
//! [`euclidean`] (intervals, polygons and nested boundary loops) and
//! [`spherical`] (arcs of the circle).

mod error;
pub mod euclidean;
pub mod partitioning;
pub mod spherical;

pub use error::{PartitionError, Result};
pub use euclidean::oned::{Euclidean1D, IntervalsSet, OrientedPoint};
pub use euclidean::twod::{
    signed_area, BoundaryLoop, Euclidean2D, Line, LoopId, NestedLoops, PolygonsSet, SubLine,
};
pub use partitioning::{
    BooleanOp, BspTree, CutSelector, FirstBoundary, Hyperplane, LargestBoundary, Location, Region,
    RegionFactory, Side, Space, SubHyperplane, DEFAULT_TOLERANCE,
};
pub use spherical::oned::{ArcsSet, LimitAngle, S1Point, Sphere1D};
