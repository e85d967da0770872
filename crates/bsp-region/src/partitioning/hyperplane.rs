//! Spaces and the hyperplanes that divide them.

use std::fmt::Debug;

use super::{Region, RegionProperties, SubHyperplane};

/// Default tolerance for hyperplane classification.
/// Points within this distance of a hyperplane are considered "on" it.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Position of a piece of geometry relative to a hyperplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Entirely on the plus side (positive offsets)
    Plus,
    /// Entirely on the minus side (negative offsets)
    Minus,
    /// Parts on both sides (straddles the hyperplane)
    Both,
    /// Lies in the hyperplane itself (within tolerance)
    Hyper,
}

/// Location of a point relative to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Strictly inside the region
    Inside,
    /// Strictly outside the region
    Outside,
    /// On the region boundary (within tolerance)
    Boundary,
}

/// A space that can be partitioned by hyperplanes.
///
/// Implementors are marker types tying together the point, hyperplane and
/// sub-hyperplane types of one geometry. The dimension-specific measure of a
/// region also lives here since it cannot be computed generically.
pub trait Space: Sized + Clone + Debug + 'static {
    /// Point of the space.
    type Point: Clone + Debug + PartialEq;
    /// Dividing surface of the space.
    type Hyperplane: Hyperplane<Self>;
    /// Bounded piece of a [`Space::Hyperplane`].
    type SubHyperplane: SubHyperplane<Self>;

    /// Dimension of the space.
    const DIMENSION: usize;

    /// Computes the size and barycenter of a region.
    ///
    /// The size must be infinite for unbounded regions.
    fn region_properties(region: &Region<Self>) -> RegionProperties<Self::Point>;
}

/// An infinite, oriented dividing surface of a space.
///
/// The sign of [`Hyperplane::offset`] defines the plus and minus sides.
pub trait Hyperplane<S: Space>: Clone + Debug {
    /// Signed distance from the hyperplane to a point.
    /// - Positive: point is on the plus side
    /// - Negative: point is on the minus side
    /// - Within tolerance of zero: point is on the hyperplane
    fn offset(&self, point: &S::Point) -> f64;

    /// Projects a point onto the hyperplane.
    fn project(&self, point: &S::Point) -> S::Point;

    /// Tolerance below which points are considered to lie on the hyperplane.
    fn tolerance(&self) -> f64;

    /// Checks if both hyperplanes have the same orientation.
    ///
    /// Only meaningful for hyperplanes that are parallel or identical.
    fn same_orientation_as(&self, other: &Self) -> bool;

    /// Checks if both hyperplanes share location and orientation, up to tolerance.
    fn same_hyperplane_as(&self, other: &Self) -> bool;

    /// Builds a sub-hyperplane covering the whole hyperplane.
    fn whole_hyperplane(&self) -> S::SubHyperplane;

    /// Builds a region covering the whole space.
    fn whole_space(&self) -> Region<S> {
        Region::whole(self.tolerance())
    }

    /// Classifies which side of the hyperplane a point lies on.
    ///
    /// Only returns [`Side::Plus`], [`Side::Minus`] or [`Side::Hyper`].
    fn side_of(&self, point: &S::Point) -> Side {
        let offset = self.offset(point);
        if offset > self.tolerance() {
            Side::Plus
        } else if offset < -self.tolerance() {
            Side::Minus
        } else {
            Side::Hyper
        }
    }
}
