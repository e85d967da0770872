//! Visitor pattern for BSP tree traversal.
//!
//! Visitors allow custom processing of nodes during tree traversal
//! without coupling traversal logic to specific use cases.

use super::{BspNode, Space, SubHyperplane};

/// Visitor for processing nodes during BSP tree traversal.
///
/// See [`BspTree::visit`](super::BspTree::visit) for the traversal order.
pub trait BspTreeVisitor<S: Space> {
    /// Called for each internal node.
    fn visit_internal(&mut self, node: &BspNode<S>);

    /// Called for each leaf.
    fn visit_leaf(&mut self, _inside: bool) {}
}

/// Accumulates the size of the region boundary.
///
/// Only the fragments of each cut that separate inside from outside count.
#[derive(Debug, Default)]
pub struct BoundarySizeVisitor {
    size: f64,
}

impl BoundarySizeVisitor {
    /// Creates a visitor with a zero accumulated size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated boundary size.
    pub fn size(&self) -> f64 {
        self.size
    }
}

impl<S: Space> BspTreeVisitor<S> for BoundarySizeVisitor {
    fn visit_internal(&mut self, node: &BspNode<S>) {
        self.size += node.boundary_facets().iter().map(|f| f.size()).sum::<f64>();
    }
}

/// Counts inside and outside leaves.
#[derive(Debug, Default)]
pub struct LeafCounter {
    pub inside: usize,
    pub outside: usize,
}

impl<S: Space> BspTreeVisitor<S> for LeafCounter {
    fn visit_internal(&mut self, _node: &BspNode<S>) {}

    fn visit_leaf(&mut self, inside: bool) {
        if inside {
            self.inside += 1;
        } else {
            self.outside += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euclidean::twod::PolygonsSet;
    use crate::partitioning::DEFAULT_TOLERANCE;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    #[test]
    fn boundary_size_of_square() {
        let square = PolygonsSet::from_box(0.0, 2.0, 0.0, 2.0, DEFAULT_TOLERANCE);
        let mut visitor = BoundarySizeVisitor::new();
        square.tree().visit(&mut visitor);

        assert_relative_eq!(visitor.size(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn leaf_counter_counts_both_kinds() {
        let triangle = PolygonsSet::from_vertices(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
            DEFAULT_TOLERANCE,
        )
        .unwrap();
        let mut counter = LeafCounter::default();
        triangle.tree().visit(&mut counter);

        assert_eq!(counter.inside, 1);
        assert_eq!(counter.outside, 3);
        assert_eq!(counter.inside + counter.outside, triangle.tree().leaf_count());
    }
}
