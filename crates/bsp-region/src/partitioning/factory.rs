//! Boolean operations on regions.
//!
//! All operations share one tree merge, parametrized by the rule combining a
//! leaf of one tree with a subtree of the other.

use std::marker::PhantomData;

use super::{BspTree, Region, Space};

/// Boolean operator applied when merging two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Points in either region
    Union,
    /// Points in both regions
    Intersection,
    /// Points in the first region but not in the second
    Difference,
    /// Points in exactly one region
    Xor,
}

impl BooleanOp {
    /// Combines a leaf of one tree with the matching subtree of the other.
    ///
    /// `leaf_from_first` tells which operand the leaf comes from; only
    /// [`BooleanOp::Difference`] is sensitive to it.
    fn merge_leaf<S: Space>(
        self,
        leaf_inside: bool,
        tree: &BspTree<S>,
        leaf_from_first: bool,
    ) -> BspTree<S> {
        match self {
            Self::Union if leaf_inside => BspTree::leaf(true),
            Self::Union => tree.clone(),
            Self::Intersection if leaf_inside => tree.clone(),
            Self::Intersection => BspTree::leaf(false),
            Self::Xor if leaf_inside => tree.complement(),
            Self::Xor => tree.clone(),
            Self::Difference => match (leaf_from_first, leaf_inside) {
                (true, true) => tree.complement(),
                (true, false) | (false, true) => BspTree::leaf(false),
                (false, false) => tree.clone(),
            },
        }
    }
}

/// Merges two trees covering the same cell.
///
/// `first` drives the recursion: at each of its internal nodes, `second` is
/// split by the node's cut and both halves are merged recursively.
pub fn merge<S: Space>(first: &BspTree<S>, second: &BspTree<S>, op: BooleanOp) -> BspTree<S> {
    if let Some(inside) = first.inside() {
        return op.merge_leaf(inside, second, true);
    }
    if let Some(inside) = second.inside() {
        return op.merge_leaf(inside, first, false);
    }

    let Some(node) = first.node() else {
        return first.clone();
    };
    let (second_plus, second_minus) = second.split(node.cut());
    let plus = merge(node.plus(), &second_plus, op);
    let minus = merge(node.minus(), &second_minus, op);
    BspTree::internal(node.cut().clone(), plus, minus).condensed()
}

/// Stateless library of boolean operations on regions.
///
/// Operands are never modified; results are new regions using the
/// tolerance of the first operand.
#[derive(Debug, Clone, Copy)]
pub struct RegionFactory<S> {
    _space: PhantomData<S>,
}

impl<S: Space> Default for RegionFactory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> RegionFactory<S> {
    /// Creates a factory.
    pub fn new() -> Self {
        Self {
            _space: PhantomData,
        }
    }

    /// Applies a boolean operator to two regions.
    pub fn combine(&self, first: &Region<S>, second: &Region<S>, op: BooleanOp) -> Region<S> {
        Region::new(merge(first.tree(), second.tree(), op), first.tolerance())
    }

    /// Points belonging to either region.
    pub fn union(&self, first: &Region<S>, second: &Region<S>) -> Region<S> {
        self.combine(first, second, BooleanOp::Union)
    }

    /// Points belonging to both regions.
    pub fn intersection(&self, first: &Region<S>, second: &Region<S>) -> Region<S> {
        self.combine(first, second, BooleanOp::Intersection)
    }

    /// Points of `first` that do not belong to `second`.
    pub fn difference(&self, first: &Region<S>, second: &Region<S>) -> Region<S> {
        self.combine(first, second, BooleanOp::Difference)
    }

    /// Points belonging to exactly one region.
    pub fn xor(&self, first: &Region<S>, second: &Region<S>) -> Region<S> {
        self.combine(first, second, BooleanOp::Xor)
    }

    /// Points not belonging to the region.
    pub fn complement(&self, region: &Region<S>) -> Region<S> {
        Region::new(region.tree().complement(), region.tolerance())
    }

    /// Union of any number of regions, `None` if there are none.
    pub fn union_all<'a, I>(&self, regions: I) -> Option<Region<S>>
    where
        I: IntoIterator<Item = &'a Region<S>>,
    {
        let mut regions = regions.into_iter();
        let first = regions.next()?.clone();
        Some(regions.fold(first, |acc, region| self.union(&acc, region)))
    }
}
