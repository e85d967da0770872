//! Polygonal regions of the plane.

use nalgebra::{Point2, Vector2};

use super::line::{Line, SubLine};
use super::nested_loops::{BoundaryLoop, NestedLoops};
use super::Euclidean2D;
use crate::error::{PartitionError, Result};
use crate::partitioning::{
    BspNode, BspTree, BspTreeVisitor, Hyperplane, Region, RegionProperties, Side,
};

/// A union of polygons, possibly with holes or unbounded.
pub type PolygonsSet = Region<Euclidean2D>;

impl Region<Euclidean2D> {
    /// Builds the polygon bounded by one closed loop of vertices.
    ///
    /// The inside lies to the left of the edges: a counter-clockwise loop is
    /// a finite polygon, a clockwise one is its unbounded complement.
    pub fn from_vertices(vertices: &[Point2<f64>], tolerance: f64) -> Result<Self> {
        let edges = loop_edges(vertices, tolerance);
        if edges.len() < 3 {
            return Err(PartitionError::DegenerateLoop { edges: edges.len() });
        }
        Ok(Self::from_boundary(edges, tolerance))
    }

    /// Builds an axis-aligned rectangle, empty if either side is degenerate.
    pub fn from_box(x_min: f64, x_max: f64, y_min: f64, y_max: f64, tolerance: f64) -> Self {
        if x_max - x_min <= tolerance || y_max - y_min <= tolerance {
            return Self::empty(tolerance);
        }
        let corners = [
            Point2::new(x_min, y_min),
            Point2::new(x_max, y_min),
            Point2::new(x_max, y_max),
            Point2::new(x_min, y_max),
        ];
        Self::from_vertices(&corners, tolerance).unwrap_or_else(|_| Self::empty(tolerance))
    }

    /// Builds the region bounded by several loops given in any orientation.
    ///
    /// Loops are nested by containment and re-oriented so that outer loops
    /// bound finite areas and holes alternate with them.
    pub fn from_loops<I>(loops: I, tolerance: f64) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<BoundaryLoop>,
    {
        let mut nested = NestedLoops::new(tolerance);
        for boundary_loop in loops {
            nested.add(boundary_loop)?;
        }
        nested.correct_orientation();

        let edges: Vec<SubLine> = nested
            .into_loops()
            .iter()
            .flat_map(|vertices| loop_edges(vertices, tolerance))
            .collect();
        Ok(Self::from_boundary(edges, tolerance))
    }
}

/// Edges of a closed loop, skipping the ones shorter than `tolerance`.
pub(crate) fn loop_edges(vertices: &[Point2<f64>], tolerance: f64) -> Vec<SubLine> {
    let n = vertices.len();
    (0..n)
        .filter_map(|i| SubLine::from_endpoints(vertices[i], vertices[(i + 1) % n], tolerance))
        .collect()
}

/// Signed area of a closed loop, positive when counter-clockwise.
pub fn signed_area(vertices: &[Point2<f64>]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| vertices[i].coords.perp(&vertices[(i + 1) % n].coords))
        .sum();
    0.5 * twice
}

/// Computes the area and centroid of a polygons set.
///
/// Leaf cells are clipped out of a box enclosing every finite cut endpoint.
/// An inside cell reaching the box margin is unbounded.
pub(super) fn polygon_properties(region: &PolygonsSet) -> RegionProperties<Point2<f64>> {
    if region.is_empty() {
        return RegionProperties::empty();
    }
    if region.is_full() {
        return RegionProperties::unbounded();
    }

    let mut bounds = CutBounds::default();
    region.tree().visit(&mut bounds);
    let Some((min, max)) = bounds.extent() else {
        return RegionProperties::empty();
    };

    let margin = 1.0 + (max - min).max();
    let outer = [
        Point2::new(min.x - margin, min.y - margin),
        Point2::new(max.x + margin, min.y - margin),
        Point2::new(max.x + margin, max.y + margin),
        Point2::new(min.x - margin, max.y + margin),
    ];
    let mut cells = CellAccumulator {
        inner_min: min - Vector2::repeat(0.5 * margin),
        inner_max: max + Vector2::repeat(0.5 * margin),
        tolerance: region.tolerance(),
        area: 0.0,
        moment: Vector2::zeros(),
        unbounded: false,
    };
    cells.accumulate(region.tree(), outer.to_vec());

    if cells.unbounded {
        return RegionProperties::unbounded();
    }
    if cells.area <= 0.0 {
        return RegionProperties::empty();
    }
    RegionProperties {
        size: cells.area,
        barycenter: Some(Point2::from(cells.moment / cells.area)),
    }
}

/// Collects a finite point of every cut, and the finite cut endpoints.
#[derive(Debug, Default)]
struct CutBounds {
    min: Option<Point2<f64>>,
    max: Option<Point2<f64>>,
}

impl CutBounds {
    fn include(&mut self, point: Point2<f64>) {
        self.min = Some(self.min.map_or(point, |min| min.inf(&point)));
        self.max = Some(self.max.map_or(point, |max| max.sup(&point)));
    }

    fn extent(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        Some((self.min?, self.max?))
    }
}

impl BspTreeVisitor<Euclidean2D> for CutBounds {
    fn visit_internal(&mut self, node: &BspNode<Euclidean2D>) {
        let mut any_finite = false;
        for (start, end) in node.cut().segments() {
            for point in [start, end] {
                if point.x.is_finite() && point.y.is_finite() {
                    any_finite = true;
                    self.include(point);
                }
            }
        }
        if !any_finite {
            self.include(node.hyperplane().to_space(0.0));
        }
    }
}

struct CellAccumulator {
    inner_min: Point2<f64>,
    inner_max: Point2<f64>,
    tolerance: f64,
    area: f64,
    moment: Vector2<f64>,
    unbounded: bool,
}

impl CellAccumulator {
    fn accumulate(&mut self, tree: &BspTree<Euclidean2D>, cell: Vec<Point2<f64>>) {
        if cell.len() < 3 || self.unbounded {
            return;
        }
        let node = match tree {
            BspTree::Leaf { inside: true } => return self.add_cell(&cell),
            BspTree::Leaf { inside: false } => return,
            BspTree::Internal(node) => node,
        };
        let (plus, minus) = clip(&cell, node.hyperplane());
        self.accumulate(node.plus(), plus);
        self.accumulate(node.minus(), minus);
    }

    fn add_cell(&mut self, cell: &[Point2<f64>]) {
        let area = signed_area(cell);
        if area <= self.tolerance {
            return;
        }
        let escapes = cell.iter().any(|v| {
            v.x < self.inner_min.x
                || v.y < self.inner_min.y
                || v.x > self.inner_max.x
                || v.y > self.inner_max.y
        });
        if escapes {
            log::trace!("inside cell of area {area} reaches the bounding box margin");
            self.unbounded = true;
            return;
        }

        let n = cell.len();
        let moment: Vector2<f64> = (0..n)
            .map(|i| {
                let (a, b) = (cell[i].coords, cell[(i + 1) % n].coords);
                (a + b) * a.perp(&b)
            })
            .sum();
        self.area += area;
        self.moment += moment / 6.0;
    }
}

/// Splits a convex polygon by a line into its plus and minus parts.
///
/// Walks the polygon edges and builds two vertex lists, adding intersection
/// points when edges cross the line. Parts with fewer than three vertices
/// come back empty.
fn clip(polygon: &[Point2<f64>], line: &Line) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
    let n = polygon.len();
    let mut plus = Vec::with_capacity(n + 1);
    let mut minus = Vec::with_capacity(n + 1);

    let offsets: Vec<f64> = polygon.iter().map(|v| line.offset(v)).collect();
    let sides: Vec<Side> = polygon.iter().map(|v| line.side_of(v)).collect();

    for i in 0..n {
        let j = (i + 1) % n;
        let current = polygon[i];

        match sides[i] {
            Side::Plus => plus.push(current),
            Side::Minus => minus.push(current),
            Side::Hyper | Side::Both => {
                plus.push(current);
                minus.push(current);
            }
        }

        if matches!(
            (sides[i], sides[j]),
            (Side::Plus, Side::Minus) | (Side::Minus, Side::Plus)
        ) {
            let t = offsets[i] / (offsets[i] - offsets[j]);
            let crossing = current + (polygon[j] - current) * t;
            plus.push(crossing);
            minus.push(crossing);
        }
    }

    if plus.len() < 3 {
        plus.clear();
    }
    if minus.len() < 3 {
        minus.clear();
    }
    (plus, minus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioning::{LargestBoundary, Location, DEFAULT_TOLERANCE};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn triangle_area_and_barycenter() {
        let triangle =
            PolygonsSet::from_vertices(&[p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)], DEFAULT_TOLERANCE)
                .unwrap();

        assert_relative_eq!(triangle.size(), 4.5, epsilon = 1e-9);
        let barycenter = triangle.barycenter().unwrap();
        assert_relative_eq!(barycenter.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(barycenter.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(triangle.boundary_size(), 6.0 + 18f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn box_properties() {
        let rectangle = PolygonsSet::from_box(-1.0, 2.0, 0.0, 2.0, DEFAULT_TOLERANCE);

        assert_relative_eq!(rectangle.size(), 6.0, epsilon = 1e-9);
        assert_relative_eq!(rectangle.boundary_size(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(*rectangle.barycenter().unwrap(), p(0.5, 1.0), epsilon = 1e-9);
        assert_eq!(rectangle.check_point(&p(2.0, 1.0)), Location::Boundary);
    }

    #[test]
    fn flat_box_is_empty() {
        assert!(PolygonsSet::from_box(0.0, 0.0, 0.0, 5.0, DEFAULT_TOLERANCE).is_empty());
        assert!(PolygonsSet::from_box(3.0, 1.0, 0.0, 5.0, DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn clockwise_loop_is_unbounded() {
        let clockwise = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        let region = PolygonsSet::from_vertices(&clockwise, DEFAULT_TOLERANCE).unwrap();

        assert_eq!(region.size(), f64::INFINITY);
        assert!(region.barycenter().is_none());
        assert_eq!(region.check_point(&p(0.5, 0.5)), Location::Outside);
        assert_relative_eq!(region.complement().size(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn half_plane_is_unbounded() {
        let line = Line::from_points(p(5.0, 5.0), p(6.0, 5.0), DEFAULT_TOLERANCE).unwrap();
        let half_plane =
            PolygonsSet::from_boundary(vec![line.whole_hyperplane()], DEFAULT_TOLERANCE);

        assert_eq!(half_plane.size(), f64::INFINITY);
        assert!(half_plane.contains_point(&p(0.0, 100.0)));
        assert!(!half_plane.contains_point(&p(0.0, 0.0)));
    }

    #[test]
    fn degenerate_loops_are_rejected() {
        let flat = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)];
        let err = PolygonsSet::from_vertices(&flat, DEFAULT_TOLERANCE).unwrap_err();
        assert_eq!(err, PartitionError::DegenerateLoop { edges: 2 });
    }

    #[test]
    fn repeated_vertices_are_skipped() {
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert_eq!(loop_edges(&square, DEFAULT_TOLERANCE).len(), 4);
    }

    #[test]
    fn loops_with_hole() {
        let outer = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        let hole = vec![p(0.25, 0.25), p(0.75, 0.25), p(0.75, 0.75), p(0.25, 0.75)];
        let region = PolygonsSet::from_loops([outer, hole], DEFAULT_TOLERANCE).unwrap();

        assert_relative_eq!(region.size(), 0.75, epsilon = 1e-9);
        assert_relative_eq!(region.boundary_size(), 6.0, epsilon = 1e-9);
        assert_eq!(region.check_point(&p(0.5, 0.5)), Location::Outside);
        assert_eq!(region.check_point(&p(0.1, 0.5)), Location::Inside);
    }

    #[test]
    fn selector_does_not_change_the_region() {
        // L shape
        let vertices = [
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ];
        let edges = loop_edges(&vertices, DEFAULT_TOLERANCE);
        let first = PolygonsSet::from_boundary(edges.clone(), DEFAULT_TOLERANCE);
        let largest = PolygonsSet::build(edges, DEFAULT_TOLERANCE, &LargestBoundary);

        assert_relative_eq!(first.size(), 6.0, epsilon = 1e-9);
        assert_relative_eq!(largest.size(), 6.0, epsilon = 1e-9);
        assert_eq!(largest.check_point(&p(2.0, 2.0)), Location::Outside);
        assert_eq!(largest.check_point(&p(0.5, 2.0)), Location::Inside);
    }

    #[test]
    fn signed_area_follows_winding() {
        let ccw = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)];
        let mut cw = ccw.to_vec();
        cw.reverse();

        assert_relative_eq!(signed_area(&ccw), 2.0);
        assert_relative_eq!(signed_area(&cw), -2.0);
    }

    #[test]
    fn clip_square_through_middle() {
        let square = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        let vertical = Line::from_points(p(1.0, -5.0), p(1.0, 5.0), DEFAULT_TOLERANCE).unwrap();

        let (plus, minus) = clip(&square, &vertical);
        // plus side is to the right of an upward line
        assert_relative_eq!(signed_area(&plus), 2.0, epsilon = 1e-12);
        assert_relative_eq!(signed_area(&minus), 2.0, epsilon = 1e-12);
        assert!(plus.iter().all(|v| v.x >= 1.0 - 1e-12));
    }

    /// Star-shaped polygon around the origin, counter-clockwise.
    fn star(radii: &[f64]) -> Vec<Point2<f64>> {
        let n = radii.len() as f64;
        radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let (sin, cos) = (TAU * i as f64 / n).sin_cos();
                p(r * cos, r * sin)
            })
            .collect()
    }

    /// Even-odd ray casting along +x.
    fn ray_cast(vertices: &[Point2<f64>], point: &Point2<f64>) -> bool {
        let n = vertices.len();
        let mut inside = false;
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn distance_to_loop(vertices: &[Point2<f64>], point: &Point2<f64>) -> f64 {
        let n = vertices.len();
        (0..n)
            .map(|i| {
                let (a, b) = (vertices[i], vertices[(i + 1) % n]);
                let ab = b - a;
                let t = ((point - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
                (point - (a + ab * t)).norm()
            })
            .fold(f64::INFINITY, f64::min)
    }

    proptest! {
        #[test]
        fn containment_matches_ray_casting(
            radii in prop::collection::vec(0.5f64..2.0, 3..12),
            x in -2.5f64..2.5,
            y in -2.5f64..2.5,
        ) {
            let vertices = star(&radii);
            let point = p(x, y);
            prop_assume!(distance_to_loop(&vertices, &point) > 1e-6);

            let region = PolygonsSet::from_vertices(&vertices, DEFAULT_TOLERANCE).unwrap();
            let expected = if ray_cast(&vertices, &point) {
                Location::Inside
            } else {
                Location::Outside
            };
            prop_assert_eq!(region.check_point(&point), expected);
            prop_assert!((region.size() - signed_area(&vertices)).abs() < 1e-8);
        }

        #[test]
        fn reversed_loop_is_normalized(radii in prop::collection::vec(0.5f64..2.0, 3..12)) {
            let vertices = star(&radii);
            let mut reversed = vertices.clone();
            reversed.reverse();

            let direct = PolygonsSet::from_loops([vertices.clone()], DEFAULT_TOLERANCE).unwrap();
            let normalized = PolygonsSet::from_loops([reversed], DEFAULT_TOLERANCE).unwrap();

            prop_assert!((direct.size() - normalized.size()).abs() < 1e-8);
            prop_assert!(direct.contains(&normalized));
            prop_assert!(normalized.contains(&direct));
            prop_assert_eq!(normalized.check_point(&Point2::origin()), Location::Inside);
        }
    }
}
