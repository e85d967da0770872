//! Regions of a space backed by a BSP tree.

use std::cell::OnceCell;

use super::selector::CutSelector;
use super::visitor::BoundarySizeVisitor;
use super::{BspTree, Location, RegionFactory, Space};

/// Size and barycenter of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProperties<P> {
    /// Measure of the region, infinite when unbounded.
    pub size: f64,
    /// Center of mass, `None` for empty, degenerate or unbounded regions.
    pub barycenter: Option<P>,
}

impl<P> RegionProperties<P> {
    /// Properties of a region with no measurable inside.
    pub fn empty() -> Self {
        Self {
            size: 0.0,
            barycenter: None,
        }
    }

    /// Properties of an unbounded region.
    pub fn unbounded() -> Self {
        Self {
            size: f64::INFINITY,
            barycenter: None,
        }
    }
}

/// A set of points of a space, represented by a BSP tree.
///
/// Regions are immutable values: boolean operations build new regions.
/// Derived quantities (size, barycenter) are computed on first use and
/// cached until the tree is replaced.
#[derive(Debug, Clone)]
pub struct Region<S: Space> {
    tree: BspTree<S>,
    tolerance: f64,
    properties: OnceCell<RegionProperties<S::Point>>,
}

impl<S: Space> Region<S> {
    /// Creates a region from an existing tree.
    pub fn new(tree: BspTree<S>, tolerance: f64) -> Self {
        Self {
            tree,
            tolerance,
            properties: OnceCell::new(),
        }
    }

    /// Creates a region covering the whole space.
    pub fn whole(tolerance: f64) -> Self {
        Self::new(BspTree::leaf(true), tolerance)
    }

    /// Creates an empty region.
    pub fn empty(tolerance: f64) -> Self {
        Self::new(BspTree::leaf(false), tolerance)
    }

    /// Builds a region from its boundary.
    ///
    /// The inside must lie on the minus side of every boundary element. An
    /// empty boundary yields the whole space.
    pub fn from_boundary(boundary: Vec<S::SubHyperplane>, tolerance: f64) -> Self {
        Self::new(BspTree::from_boundary(boundary), tolerance)
    }

    /// Builds a region from its boundary with a custom [`CutSelector`].
    pub fn build<C: CutSelector<S>>(
        boundary: Vec<S::SubHyperplane>,
        tolerance: f64,
        selector: &C,
    ) -> Self {
        Self::new(BspTree::build(boundary, selector), tolerance)
    }

    /// Returns the underlying tree.
    #[inline]
    pub fn tree(&self) -> &BspTree<S> {
        &self.tree
    }

    /// Consumes the region, returning its tree.
    pub fn into_tree(self) -> BspTree<S> {
        self.tree
    }

    /// Replaces the underlying tree, dropping cached properties.
    pub fn set_tree(&mut self, tree: BspTree<S>) {
        self.tree = tree;
        self.properties = OnceCell::new();
    }

    /// Tolerance below which points are considered identical.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns true if no leaf is inside.
    pub fn is_empty(&self) -> bool {
        !self.tree.has_inside()
    }

    /// Returns true if no leaf is outside.
    pub fn is_full(&self) -> bool {
        !self.tree.has_outside()
    }

    /// Locates a point relative to the region.
    pub fn check_point(&self, point: &S::Point) -> Location {
        self.tree.check_point(point)
    }

    /// Returns true if the point is inside or on the boundary.
    pub fn contains_point(&self, point: &S::Point) -> bool {
        self.check_point(point) != Location::Outside
    }

    /// Returns true if every point of `other` belongs to this region.
    ///
    /// `other` is contained when its intersection with the outside of this
    /// region is empty. The test is not strict: a region contains itself.
    pub fn contains(&self, other: &Self) -> bool {
        let factory = RegionFactory::new();
        factory
            .intersection(&factory.complement(self), other)
            .is_empty()
    }

    /// Returns the complementary region.
    pub fn complement(&self) -> Self {
        RegionFactory::new().complement(self)
    }

    /// Measure of the region, infinite when unbounded.
    pub fn size(&self) -> f64 {
        self.properties().size
    }

    /// Center of mass of the region.
    pub fn barycenter(&self) -> Option<&S::Point> {
        self.properties().barycenter.as_ref()
    }

    /// Measure of the region boundary.
    pub fn boundary_size(&self) -> f64 {
        let mut visitor = BoundarySizeVisitor::new();
        self.tree.visit(&mut visitor);
        visitor.size()
    }

    fn properties(&self) -> &RegionProperties<S::Point> {
        self.properties.get_or_init(|| S::region_properties(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euclidean::oned::IntervalsSet;
    use crate::partitioning::DEFAULT_TOLERANCE;
    use approx::assert_relative_eq;
    use nalgebra::Point1;

    #[test]
    fn whole_and_empty() {
        let whole = IntervalsSet::whole(DEFAULT_TOLERANCE);
        let empty = IntervalsSet::empty(DEFAULT_TOLERANCE);

        assert!(whole.is_full());
        assert!(!whole.is_empty());
        assert!(empty.is_empty());
        assert_eq!(whole.size(), f64::INFINITY);
        assert_eq!(empty.size(), 0.0);
        assert!(empty.barycenter().is_none());
    }

    #[test]
    fn contains_is_not_strict() {
        let interval = IntervalsSet::from_interval(1.0, 3.0, DEFAULT_TOLERANCE);
        assert!(interval.contains(&interval));
    }

    #[test]
    fn contains_sub_interval() {
        let outer = IntervalsSet::from_interval(0.0, 10.0, DEFAULT_TOLERANCE);
        let inner = IntervalsSet::from_interval(2.0, 3.0, DEFAULT_TOLERANCE);
        let straddling = IntervalsSet::from_interval(9.0, 11.0, DEFAULT_TOLERANCE);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&straddling));
    }

    #[test]
    fn contains_point_includes_boundary() {
        let interval = IntervalsSet::from_interval(1.0, 3.0, DEFAULT_TOLERANCE);

        assert!(interval.contains_point(&Point1::new(1.0)));
        assert!(interval.contains_point(&Point1::new(2.0)));
        assert!(!interval.contains_point(&Point1::new(3.5)));
    }

    #[test]
    fn set_tree_drops_cached_size() {
        let mut region = IntervalsSet::from_interval(1.0, 3.0, DEFAULT_TOLERANCE);
        assert_relative_eq!(region.size(), 2.0);

        let other = IntervalsSet::from_interval(0.0, 5.0, DEFAULT_TOLERANCE);
        region.set_tree(other.into_tree());
        assert_relative_eq!(region.size(), 5.0);
    }

    #[test]
    fn complement_of_interval_is_unbounded() {
        let interval = IntervalsSet::from_interval(1.0, 3.0, DEFAULT_TOLERANCE);
        let complement = interval.complement();

        assert_eq!(complement.size(), f64::INFINITY);
        assert!(complement.contains_point(&Point1::new(0.0)));
        assert!(!complement.contains_point(&Point1::new(2.0)));
        // the input is left untouched
        assert_relative_eq!(interval.size(), 2.0);
    }
}
