//! One-dimensional Euclidean space: oriented points and sets of intervals.

use nalgebra::Point1;

use crate::partitioning::{
    BspTree, Hyperplane, Region, RegionProperties, Space, SplitSubHyperplane, SubHyperplane,
};

/// The real line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean1D;

impl Space for Euclidean1D {
    type Point = Point1<f64>;
    type Hyperplane = OrientedPoint;
    type SubHyperplane = SubOrientedPoint;

    const DIMENSION: usize = 1;

    fn region_properties(region: &Region<Self>) -> RegionProperties<Point1<f64>> {
        let intervals = region.intervals();
        if intervals.iter().any(|interval| !interval.is_bounded()) {
            return RegionProperties::unbounded();
        }

        let size: f64 = intervals.iter().map(Interval::size).sum();
        if size <= 0.0 {
            return RegionProperties::empty();
        }
        let moment: f64 = intervals.iter().map(|i| i.size() * i.midpoint()).sum();
        RegionProperties {
            size,
            barycenter: Some(Point1::new(moment / size)),
        }
    }
}

/// A hyperplane of the real line: a point with an orientation.
///
/// When `direct`, the plus side holds the abscissas greater than the location.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedPoint {
    location: f64,
    direct: bool,
    tolerance: f64,
}

impl OrientedPoint {
    /// Creates an oriented point.
    pub fn new(location: f64, direct: bool, tolerance: f64) -> Self {
        Self {
            location,
            direct,
            tolerance,
        }
    }

    /// Abscissa of the point.
    #[inline]
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Returns true if the plus side is toward increasing abscissas.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Returns the same point with the opposite orientation.
    pub fn reversed(&self) -> Self {
        Self {
            direct: !self.direct,
            ..self.clone()
        }
    }
}

impl Hyperplane<Euclidean1D> for OrientedPoint {
    fn offset(&self, point: &Point1<f64>) -> f64 {
        let delta = point.x - self.location;
        if self.direct { delta } else { -delta }
    }

    fn project(&self, _point: &Point1<f64>) -> Point1<f64> {
        Point1::new(self.location)
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn same_hyperplane_as(&self, other: &Self) -> bool {
        self.same_orientation_as(other) && (self.location - other.location).abs() <= self.tolerance
    }

    fn whole_hyperplane(&self) -> SubOrientedPoint {
        SubOrientedPoint::new(self.clone())
    }
}

/// The only sub-hyperplane of an oriented point: the point itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SubOrientedPoint {
    hyperplane: OrientedPoint,
}

impl SubOrientedPoint {
    /// Wraps an oriented point.
    pub fn new(hyperplane: OrientedPoint) -> Self {
        Self { hyperplane }
    }
}

impl SubHyperplane<Euclidean1D> for SubOrientedPoint {
    fn hyperplane(&self) -> &OrientedPoint {
        &self.hyperplane
    }

    fn size(&self) -> f64 {
        0.0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn split(&self, hyperplane: &OrientedPoint) -> SplitSubHyperplane<Self> {
        let offset = hyperplane.offset(&Point1::new(self.hyperplane.location));
        if offset < -hyperplane.tolerance() {
            SplitSubHyperplane::minus_only(self.clone())
        } else if offset > hyperplane.tolerance() {
            SplitSubHyperplane::plus_only(self.clone())
        } else {
            SplitSubHyperplane::hyper()
        }
    }
}

/// A closed interval of the real line, possibly unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Creates an interval.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Length of the interval.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Middle of the interval.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns true if both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// A union of intervals of the real line.
pub type IntervalsSet = Region<Euclidean1D>;

impl Region<Euclidean1D> {
    /// Builds the closed interval `[lower, upper]`.
    ///
    /// Infinite bounds are allowed. An interval with `lower > upper` is empty.
    pub fn from_interval(lower: f64, upper: f64, tolerance: f64) -> Self {
        if lower > upper || lower == f64::INFINITY || upper == f64::NEG_INFINITY {
            return Self::empty(tolerance);
        }

        let lower_cut = || OrientedPoint::new(lower, false, tolerance).whole_hyperplane();
        let upper_cut = || OrientedPoint::new(upper, true, tolerance).whole_hyperplane();
        let inside = || BspTree::leaf(true);
        let outside = || BspTree::leaf(false);

        let tree = match (lower == f64::NEG_INFINITY, upper == f64::INFINITY) {
            (true, true) => inside(),
            (true, false) => BspTree::internal(upper_cut(), outside(), inside()),
            (false, true) => BspTree::internal(lower_cut(), outside(), inside()),
            (false, false) => BspTree::internal(
                lower_cut(),
                outside(),
                BspTree::internal(upper_cut(), outside(), inside()),
            ),
        };
        Self::new(tree, tolerance)
    }

    /// Returns the inside intervals, sorted and with touching intervals merged.
    pub fn intervals(&self) -> Vec<Interval> {
        let mut intervals = Vec::new();
        collect_intervals(self.tree(), f64::NEG_INFINITY, f64::INFINITY, &mut intervals);
        merge_touching(intervals)
    }
}

/// Collects the inside cells of a tree restricted to `[lower, upper]`.
fn collect_intervals(
    tree: &BspTree<Euclidean1D>,
    lower: f64,
    upper: f64,
    out: &mut Vec<Interval>,
) {
    if lower >= upper {
        return;
    }
    let node = match tree {
        BspTree::Leaf { inside: true } => return out.push(Interval::new(lower, upper)),
        BspTree::Leaf { inside: false } => return,
        BspTree::Internal(node) => node,
    };

    let x = node.hyperplane().location();
    let above = (lower.max(x), upper);
    let below = (lower, upper.min(x));
    let (plus, minus) = if node.hyperplane().is_direct() {
        (above, below)
    } else {
        (below, above)
    };
    collect_intervals(node.plus(), plus.0, plus.1, out);
    collect_intervals(node.minus(), minus.0, minus.1, out);
}

/// Sorts intervals and merges the ones sharing an endpoint.
pub(crate) fn merge_touching(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by(|a, b| a.lower.total_cmp(&b.lower));
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.lower <= last.upper => {
                last.upper = last.upper.max(interval.upper);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
