//! Two-dimensional Euclidean space: lines, polygons and nested loops.

mod line;
mod nested_loops;
mod polygons;

pub use line::{Line, SubLine};
pub use nested_loops::{BoundaryLoop, LoopId, LoopNode, NestedLoops};
pub use polygons::{signed_area, PolygonsSet};

use nalgebra::Point2;

use crate::partitioning::{Region, RegionProperties, Space};

/// The Euclidean plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean2D;

impl Space for Euclidean2D {
    type Point = Point2<f64>;
    type Hyperplane = Line;
    type SubHyperplane = SubLine;

    const DIMENSION: usize = 2;

    fn region_properties(region: &Region<Self>) -> RegionProperties<Point2<f64>> {
        polygons::polygon_properties(region)
    }
}
