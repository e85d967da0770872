//! Oriented lines of the plane and the sub-lines bounding polygons.

use nalgebra::{Point1, Point2, Vector2};

use super::Euclidean2D;
use crate::euclidean::oned::{Euclidean1D, IntervalsSet, OrientedPoint};
use crate::partitioning::{BspTree, Hyperplane, SplitSubHyperplane, SubHyperplane};

/// Below this value two unit directions are treated as parallel.
const PARALLEL_THRESHOLD: f64 = 1e-10;

/// An oriented line in the plane, represented as `normal · point + origin_offset = 0`.
///
/// The normal is the direction rotated clockwise, so the plus side of the
/// line lies to the right when walking along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    direction: Vector2<f64>,
    origin_offset: f64,
    tolerance: f64,
}

impl Line {
    /// Creates the line directed from `start` to `end`.
    ///
    /// Returns `None` if the points are closer than `tolerance`.
    pub fn from_points(start: Point2<f64>, end: Point2<f64>, tolerance: f64) -> Option<Self> {
        let delta = end - start;
        let length = delta.norm();
        if length <= tolerance {
            return None;
        }
        Some(Self::through(start, delta / length, tolerance))
    }

    /// Creates the line through `point` with the given angle to the x axis.
    pub fn from_angle(point: Point2<f64>, angle: f64, tolerance: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::through(point, Vector2::new(cos, sin), tolerance)
    }

    fn through(point: Point2<f64>, direction: Vector2<f64>, tolerance: f64) -> Self {
        let normal = Vector2::new(direction.y, -direction.x);
        Self {
            direction,
            origin_offset: -normal.dot(&point.coords),
            tolerance,
        }
    }

    /// Unit direction of the line.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    /// Unit normal pointing toward the plus side.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.direction.y, -self.direction.x)
    }

    /// Offset of the origin.
    #[inline]
    pub fn origin_offset(&self) -> f64 {
        self.origin_offset
    }

    /// Angle of the direction with the x axis, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.direction.y.atan2(self.direction.x)
    }

    /// Abscissa of the projection of a point along the line.
    pub fn to_sub_space(&self, point: &Point2<f64>) -> Point1<f64> {
        Point1::new(self.direction.dot(&point.coords))
    }

    /// Point of the line at the given abscissa.
    pub fn to_space(&self, abscissa: f64) -> Point2<f64> {
        Point2::from(self.direction * abscissa - self.normal() * self.origin_offset)
    }

    /// Intersection point with another line, `None` if they are parallel.
    pub fn intersection(&self, other: &Self) -> Option<Point2<f64>> {
        let (n1, n2) = (self.normal(), other.normal());
        let det = n1.x * n2.y - n1.y * n2.x;
        if det.abs() < PARALLEL_THRESHOLD {
            return None;
        }
        let (o1, o2) = (self.origin_offset, other.origin_offset);
        Some(Point2::new(
            (n1.y * o2 - o1 * n2.y) / det,
            (o1 * n2.x - n1.x * o2) / det,
        ))
    }

    /// Returns true if both lines have parallel directions.
    pub fn is_parallel_to(&self, other: &Self) -> bool {
        self.direction.perp(&other.direction).abs() < PARALLEL_THRESHOLD
    }

    /// Returns the same line walked in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            direction: -self.direction,
            origin_offset: -self.origin_offset,
            tolerance: self.tolerance,
        }
    }

    /// Returns true if the point lies on the line, up to tolerance.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        self.offset(point).abs() <= self.tolerance
    }
}

impl Hyperplane<Euclidean2D> for Line {
    fn offset(&self, point: &Point2<f64>) -> f64 {
        self.normal().dot(&point.coords) + self.origin_offset
    }

    fn project(&self, point: &Point2<f64>) -> Point2<f64> {
        point - self.normal() * self.offset(point)
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direction.dot(&other.direction) >= 0.0
    }

    fn same_hyperplane_as(&self, other: &Self) -> bool {
        self.same_orientation_as(other)
            && self.is_parallel_to(other)
            && (self.origin_offset - other.origin_offset).abs() <= self.tolerance
    }

    fn whole_hyperplane(&self) -> SubLine {
        SubLine::new(self.clone(), IntervalsSet::whole(self.tolerance))
    }
}

/// A piece of a line: the line plus the set of its abscissas kept.
#[derive(Debug, Clone)]
pub struct SubLine {
    line: Line,
    remaining: IntervalsSet,
}

impl SubLine {
    /// Creates a sub-line from a line and a set of abscissas along it.
    pub fn new(line: Line, remaining: IntervalsSet) -> Self {
        Self { line, remaining }
    }

    /// Creates the segment from `start` to `end`.
    ///
    /// Returns `None` if the points are closer than `tolerance`.
    pub fn from_endpoints(start: Point2<f64>, end: Point2<f64>, tolerance: f64) -> Option<Self> {
        let line = Line::from_points(start, end, tolerance)?;
        let lower = line.to_sub_space(&start).x;
        let upper = line.to_sub_space(&end).x;
        let remaining = IntervalsSet::from_interval(lower, upper, tolerance);
        Some(Self::new(line, remaining))
    }

    /// Underlying line.
    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Abscissas of the line kept by this sub-line.
    #[inline]
    pub fn remaining(&self) -> &IntervalsSet {
        &self.remaining
    }

    /// Endpoints of the segments making up the sub-line.
    ///
    /// Unbounded ends map to points at infinity.
    pub fn segments(&self) -> Vec<(Point2<f64>, Point2<f64>)> {
        self.remaining
            .intervals()
            .into_iter()
            .map(|interval| (self.end_point(interval.lower), self.end_point(interval.upper)))
            .collect()
    }

    fn end_point(&self, abscissa: f64) -> Point2<f64> {
        if abscissa.is_finite() {
            return self.line.to_space(abscissa);
        }
        let far = self.line.direction() * abscissa.signum();
        Point2::from(far.map(|c| if c == 0.0 { 0.0 } else { c * f64::INFINITY }))
    }

    /// Wraps a split abscissa tree, `None` if nothing remains.
    fn fragment(&self, tree: BspTree<Euclidean1D>) -> Option<Self> {
        let remaining = IntervalsSet::new(tree, self.remaining.tolerance());
        (!remaining.is_empty()).then(|| Self::new(self.line.clone(), remaining))
    }
}

impl SubHyperplane<Euclidean2D> for SubLine {
    fn hyperplane(&self) -> &Line {
        &self.line
    }

    fn size(&self) -> f64 {
        self.remaining.size()
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn split(&self, hyperplane: &Line) -> SplitSubHyperplane<Self> {
        let tolerance = hyperplane.tolerance();
        let slope = hyperplane.normal().dot(&self.line.direction);
        let origin = hyperplane.offset(&self.line.to_space(0.0));

        if slope.abs() < PARALLEL_THRESHOLD {
            return if origin > tolerance {
                SplitSubHyperplane::plus_only(self.clone())
            } else if origin < -tolerance {
                SplitSubHyperplane::minus_only(self.clone())
            } else {
                SplitSubHyperplane::hyper()
            };
        }

        // Abscissas beyond the crossing point are on the plus side when the slope is positive
        let crossing = OrientedPoint::new(-origin / slope, slope > 0.0, self.remaining.tolerance())
            .whole_hyperplane();
        let (tree_plus, tree_minus) = self.remaining.tree().split(&crossing);

        let plus = BspTree::internal(crossing.clone(), tree_plus, BspTree::leaf(false)).condensed();
        let minus = BspTree::internal(crossing, BspTree::leaf(false), tree_minus).condensed();
        SplitSubHyperplane::new(self.fragment(plus), self.fragment(minus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioning::{Side, DEFAULT_TOLERANCE};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn line(a: Point2<f64>, b: Point2<f64>) -> Line {
        Line::from_points(a, b, DEFAULT_TOLERANCE).unwrap()
    }

    fn segment(a: Point2<f64>, b: Point2<f64>) -> SubLine {
        SubLine::from_endpoints(a, b, DEFAULT_TOLERANCE).unwrap()
    }

    #[test]
    fn plus_side_is_on_the_right() {
        let x_axis = line(p(0.0, 0.0), p(1.0, 0.0));

        assert_relative_eq!(x_axis.offset(&p(3.0, -2.0)), 2.0);
        assert_relative_eq!(x_axis.offset(&p(3.0, 2.0)), -2.0);
        assert_eq!(x_axis.side_of(&p(5.0, 0.0)), Side::Hyper);
    }

    #[test]
    fn degenerate_points_make_no_line() {
        assert!(Line::from_points(p(1.0, 1.0), p(1.0, 1.0), DEFAULT_TOLERANCE).is_none());
        assert!(SubLine::from_endpoints(p(1.0, 1.0), p(1.0, 1.0 + 1e-12), DEFAULT_TOLERANCE)
            .is_none());
    }

    #[test]
    fn sub_space_round_trip_stays_on_line() {
        let diagonal = line(p(1.0, 0.0), p(2.0, 1.0));
        let abscissa = diagonal.to_sub_space(&p(4.0, 3.0)).x;
        let back = diagonal.to_space(abscissa);

        assert!(diagonal.contains(&back));
        assert_relative_eq!(back, p(4.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn intersection_of_axes() {
        let horizontal = line(p(-1.0, 2.0), p(1.0, 2.0));
        let vertical = Line::from_angle(p(3.0, 0.0), FRAC_PI_2, DEFAULT_TOLERANCE);

        let crossing = horizontal.intersection(&vertical).unwrap();
        assert_relative_eq!(crossing, p(3.0, 2.0), epsilon = 1e-12);
        assert!(horizontal.intersection(&horizontal.reversed()).is_none());
    }

    #[test]
    fn same_hyperplane_requires_orientation() {
        let a = line(p(0.0, 0.0), p(1.0, 1.0));
        let b = line(p(2.0, 2.0), p(5.0, 5.0));

        assert!(a.same_hyperplane_as(&b));
        assert!(!a.same_hyperplane_as(&b.reversed()));
        assert!(!a.same_hyperplane_as(&line(p(0.0, 1.0), p(1.0, 2.0))));
    }

    #[test]
    fn projection_lands_on_line() {
        let x_axis = line(p(0.0, 0.0), p(1.0, 0.0));
        assert_relative_eq!(x_axis.project(&p(2.0, 5.0)), p(2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(x_axis.angle(), 0.0);
    }

    #[test]
    fn segment_crossing_a_line_splits_in_two() {
        let sub = segment(p(0.0, -1.0), p(0.0, 3.0));
        let x_axis = line(p(0.0, 0.0), p(1.0, 0.0));

        let (plus, minus) = sub.split(&x_axis).into_parts();
        let (plus, minus) = (plus.unwrap(), minus.unwrap());

        // below the x axis is the plus side
        assert_relative_eq!(plus.size(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(minus.size(), 3.0, epsilon = 1e-12);
        let (start, end) = plus.segments()[0];
        assert_relative_eq!(start, p(0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(end, p(0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn segment_on_one_side() {
        let sub = segment(p(0.0, 1.0), p(2.0, 3.0));
        let x_axis = line(p(0.0, 0.0), p(1.0, 0.0));

        assert_eq!(sub.side(&x_axis), Side::Minus);
        assert_eq!(sub.side(&x_axis.reversed()), Side::Plus);
    }

    #[test]
    fn segment_ending_on_line_stays_whole() {
        let sub = segment(p(0.0, 0.0), p(0.0, 2.0));
        let x_axis = line(p(-1.0, 0.0), p(1.0, 0.0));

        assert_eq!(sub.side(&x_axis), Side::Minus);
    }

    #[test]
    fn parallel_and_coincident_segments() {
        let sub = segment(p(0.0, 0.0), p(2.0, 0.0));

        assert_eq!(sub.side(&line(p(0.0, 1.0), p(1.0, 1.0))), Side::Plus);
        assert_eq!(sub.side(&line(p(5.0, 0.0), p(9.0, 0.0))), Side::Hyper);
        assert_eq!(sub.side(&line(p(9.0, 0.0), p(5.0, 0.0))), Side::Hyper);
    }

    #[test]
    fn whole_line_is_unbounded() {
        let whole = line(p(0.0, 0.0), p(1.0, 0.0)).whole_hyperplane();
        assert_eq!(whole.size(), f64::INFINITY);

        let (plus, minus) = whole
            .split(&line(p(2.0, 0.0), p(2.0, 1.0)))
            .into_parts();
        assert_eq!(plus.unwrap().size(), f64::INFINITY);
        assert_eq!(minus.unwrap().size(), f64::INFINITY);
    }
}
