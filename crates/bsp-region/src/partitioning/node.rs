//! BSP tree internal node implementation.

use super::{BspTree, Space, SubHyperplane};

/// An internal node of a BSP tree.
///
/// Each node partitions its cell with a cut sub-hyperplane. The cut is always
/// the part of its hyperplane lying inside the node's cell. Points on the plus
/// side of the cut hyperplane belong to the `plus` subtree, points on the
/// minus side to the `minus` subtree.
#[derive(Debug, Clone)]
pub struct BspNode<S: Space> {
    /// The cut sub-hyperplane, fitted to the node's cell.
    cut: S::SubHyperplane,

    /// Subtree covering the plus side of the cut.
    plus: BspTree<S>,

    /// Subtree covering the minus side of the cut.
    minus: BspTree<S>,
}

/// Parts of a cut that separate inside from outside.
///
/// - `facing_plus`: fragments with the outside on the plus side of the cut
/// - `facing_minus`: fragments with the outside on the minus side of the cut
#[derive(Debug, Clone)]
pub struct BoundaryFacets<T> {
    pub facing_plus: Vec<T>,
    pub facing_minus: Vec<T>,
}

impl<T> BoundaryFacets<T> {
    /// Iterates over all boundary fragments regardless of facing.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.facing_plus.iter().chain(self.facing_minus.iter())
    }

    /// Returns true if the cut does not contribute to the boundary.
    pub fn is_empty(&self) -> bool {
        self.facing_plus.is_empty() && self.facing_minus.is_empty()
    }
}

impl<S: Space> BspNode<S> {
    /// Creates a node from its cut and children.
    pub fn new(cut: S::SubHyperplane, plus: BspTree<S>, minus: BspTree<S>) -> Self {
        Self { cut, plus, minus }
    }

    /// Returns a reference to the cut sub-hyperplane.
    #[inline]
    pub fn cut(&self) -> &S::SubHyperplane {
        &self.cut
    }

    /// Returns the hyperplane of the cut.
    #[inline]
    pub fn hyperplane(&self) -> &S::Hyperplane {
        self.cut.hyperplane()
    }

    /// Returns the plus side subtree.
    #[inline]
    pub fn plus(&self) -> &BspTree<S> {
        &self.plus
    }

    /// Returns the minus side subtree.
    #[inline]
    pub fn minus(&self) -> &BspTree<S> {
        &self.minus
    }

    /// Consumes the node, returning `(cut, plus, minus)`.
    pub fn into_parts(self) -> (S::SubHyperplane, BspTree<S>, BspTree<S>) {
        (self.cut, self.plus, self.minus)
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.plus.leaf_count() + self.minus.leaf_count()
    }

    /// Returns the depth of this subtree (leaves count as depth 1).
    pub fn depth(&self) -> usize {
        1 + self.plus.depth().max(self.minus.depth())
    }

    /// Characterizes the cut into its boundary fragments.
    ///
    /// A fragment belongs to the region boundary when the cells touching it
    /// from the two sides disagree on inside/outside.
    pub fn boundary_facets(&self) -> BoundaryFacets<S::SubHyperplane> {
        let (plus_outside, plus_inside) = self.plus.characterize(self.cut.clone());

        let mut facing_plus = Vec::new();
        for fragment in plus_outside {
            let (_, minus_inside) = self.minus.characterize(fragment);
            facing_plus.extend(minus_inside);
        }

        let mut facing_minus = Vec::new();
        for fragment in plus_inside {
            let (minus_outside, _) = self.minus.characterize(fragment);
            facing_minus.extend(minus_outside);
        }

        BoundaryFacets {
            facing_plus,
            facing_minus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euclidean::oned::{Euclidean1D, OrientedPoint};
    use crate::partitioning::{Hyperplane, DEFAULT_TOLERANCE};

    fn cut_at(location: f64, direct: bool) -> BspNode<Euclidean1D> {
        BspNode::new(
            OrientedPoint::new(location, direct, DEFAULT_TOLERANCE).whole_hyperplane(),
            BspTree::leaf(false),
            BspTree::leaf(true),
        )
    }

    #[test]
    fn new_node_has_two_leaves() {
        let node = cut_at(1.0, true);

        assert_eq!(node.leaf_count(), 2);
        assert_eq!(node.depth(), 2);
        assert_eq!(node.plus().inside(), Some(false));
        assert_eq!(node.minus().inside(), Some(true));
    }

    #[test]
    fn depth_calculation() {
        let inner = cut_at(2.0, true);
        let root = BspNode::new(
            OrientedPoint::new(0.0, false, DEFAULT_TOLERANCE).whole_hyperplane(),
            BspTree::leaf(false),
            BspTree::from(inner),
        );

        // root -> minus -> leaf (depth 3)
        assert_eq!(root.depth(), 3);
        assert_eq!(root.leaf_count(), 3);
    }

    #[test]
    fn separating_cut_is_boundary() {
        let node = cut_at(1.0, true);
        let facets = node.boundary_facets();

        // outside on plus side, inside on minus side
        assert_eq!(facets.facing_plus.len(), 1);
        assert!(facets.facing_minus.is_empty());
    }

    #[test]
    fn cut_between_equal_leaves_is_not_boundary() {
        let node = BspNode::<Euclidean1D>::new(
            OrientedPoint::new(1.0, true, DEFAULT_TOLERANCE).whole_hyperplane(),
            BspTree::leaf(true),
            BspTree::leaf(true),
        );

        assert!(node.boundary_facets().is_empty());
    }
}
