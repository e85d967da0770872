//! Cut selection strategies for BSP tree construction.
//!
//! The choice of cut affects tree balance and the number of boundary splits
//! during construction. Different strategies offer different trade-offs
//! between build time and tree quality.

use super::{Space, SubHyperplane};

/// Strategy for selecting which boundary element's hyperplane cuts a cell.
///
/// Different strategies can optimize for:
/// - Build speed (simple selection)
/// - Fewer splits (large boundary pieces first)
pub trait CutSelector<S: Space> {
    /// Select the index of the boundary element to use as the next cut.
    ///
    /// Returns `None` if the slice is empty.
    fn select(&self, boundary: &[S::SubHyperplane]) -> Option<usize>;
}

/// Selects the first boundary element in the list.
///
/// This is the simplest and fastest selector, and keeps construction
/// deterministic with respect to input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstBoundary;

impl<S: Space> CutSelector<S> for FirstBoundary {
    fn select(&self, boundary: &[S::SubHyperplane]) -> Option<usize> {
        (!boundary.is_empty()).then_some(0)
    }
}

/// Selects the largest boundary element, the first one on ties.
///
/// Large pieces are less likely to be split by later cuts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestBoundary;

impl<S: Space> CutSelector<S> for LargestBoundary {
    fn select(&self, boundary: &[S::SubHyperplane]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, sub) in boundary.iter().enumerate() {
            let size = sub.size();
            if best.is_none_or(|(_, best_size)| size.total_cmp(&best_size).is_gt()) {
                best = Some((index, size));
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euclidean::twod::{Euclidean2D, SubLine};
    use crate::partitioning::DEFAULT_TOLERANCE;
    use nalgebra::Point2;

    fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> SubLine {
        SubLine::from_endpoints(Point2::new(x0, y0), Point2::new(x1, y1), DEFAULT_TOLERANCE)
            .unwrap()
    }

    #[test]
    fn first_boundary_empty_list() {
        let boundary: Vec<SubLine> = vec![];
        assert!(CutSelector::<Euclidean2D>::select(&FirstBoundary, &boundary).is_none());
    }

    #[test]
    fn first_boundary_multiple() {
        let boundary = vec![segment(0.0, 0.0, 1.0, 0.0), segment(0.0, 0.0, 5.0, 0.0)];
        assert_eq!(CutSelector::<Euclidean2D>::select(&FirstBoundary, &boundary), Some(0));
    }

    #[test]
    fn largest_boundary_picks_longest() {
        let boundary = vec![
            segment(0.0, 0.0, 1.0, 0.0),
            segment(0.0, 1.0, 4.0, 1.0),
            segment(0.0, 2.0, 2.0, 2.0),
        ];
        assert_eq!(CutSelector::<Euclidean2D>::select(&LargestBoundary, &boundary), Some(1));
    }

    #[test]
    fn largest_boundary_keeps_first_on_ties() {
        let boundary = vec![segment(0.0, 0.0, 1.0, 0.0), segment(0.0, 1.0, 1.0, 1.0)];
        assert_eq!(CutSelector::<Euclidean2D>::select(&LargestBoundary, &boundary), Some(0));
    }
}
