//! Euclidean spaces of dimension one and two.

pub mod oned;
pub mod twod;

pub use oned::{Euclidean1D, Interval, IntervalsSet, OrientedPoint, SubOrientedPoint};
pub use twod::{
    BoundaryLoop, Euclidean2D, Line, LoopId, NestedLoops, PolygonsSet, SubLine,
};
