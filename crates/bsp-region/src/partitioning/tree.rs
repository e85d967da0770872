//! BSP tree construction, point location and splitting.

use super::node::BspNode;
use super::selector::{CutSelector, FirstBoundary};
use super::visitor::BspTreeVisitor;
use super::{Hyperplane, Location, Side, Space, SubHyperplane};

/// A Binary Space Partitioning tree representing a region.
///
/// A tree is either a leaf tagged inside/outside, or an internal node whose
/// cut sub-hyperplane partitions the node's cell between a plus subtree and a
/// minus subtree. Every node exclusively owns its children.
///
/// # Construction
///
/// Trees are built from the boundary of a region using a [`CutSelector`] to
/// choose the cut of each node:
///
/// ```ignore
/// use bsp_region::{BspTree, FirstBoundary};
///
/// let boundary: Vec<SubLine> = /* ... */;
/// let tree = BspTree::build(boundary, &FirstBoundary);
/// ```
///
/// Leaves reached through a minus child are inside, leaves reached through a
/// plus child are outside: boundaries must have the inside on the minus side
/// of their hyperplanes.
#[derive(Debug, Clone)]
pub enum BspTree<S: Space> {
    /// A cell entirely inside or outside the region.
    Leaf { inside: bool },
    /// A cell partitioned by a cut.
    Internal(Box<BspNode<S>>),
}

impl<S: Space> BspTree<S> {
    /// Creates a leaf.
    #[inline]
    pub fn leaf(inside: bool) -> Self {
        Self::Leaf { inside }
    }

    /// Creates an internal node from its cut and children.
    pub fn internal(cut: S::SubHyperplane, plus: Self, minus: Self) -> Self {
        Self::Internal(Box::new(BspNode::new(cut, plus, minus)))
    }

    /// Builds a tree from boundary sub-hyperplanes.
    ///
    /// Uses the provided [`CutSelector`] to choose the cut of each node.
    /// Boundary elements spanning a cut are split, elements lying in a cut are
    /// absorbed by it. Returns the whole space if the boundary is empty.
    pub fn build<C: CutSelector<S>>(boundary: Vec<S::SubHyperplane>, selector: &C) -> Self {
        let mut cell = Vec::new();
        let tree = build_node(boundary, selector, &mut cell, true);
        log::trace!(
            "built BSP tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        tree
    }

    /// Builds a tree using the default cut selector ([`FirstBoundary`]).
    pub fn from_boundary(boundary: Vec<S::SubHyperplane>) -> Self {
        Self::build(boundary, &FirstBoundary)
    }

    /// Checks if this tree is a single leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the inside flag of a leaf, `None` for internal nodes.
    #[inline]
    pub fn inside(&self) -> Option<bool> {
        match self {
            Self::Leaf { inside } => Some(*inside),
            Self::Internal(_) => None,
        }
    }

    /// Returns the internal node, `None` for leaves.
    #[inline]
    pub fn node(&self) -> Option<&BspNode<S>> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal(node) => Some(node.as_ref()),
        }
    }

    /// Returns the number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.node().map_or(1, BspNode::leaf_count)
    }

    /// Returns the depth of the tree (1 for a single leaf).
    pub fn depth(&self) -> usize {
        self.node().map_or(1, BspNode::depth)
    }

    /// Returns true if at least one leaf is inside.
    pub fn has_inside(&self) -> bool {
        match self {
            Self::Leaf { inside } => *inside,
            Self::Internal(node) => node.plus().has_inside() || node.minus().has_inside(),
        }
    }

    /// Returns true if at least one leaf is outside.
    pub fn has_outside(&self) -> bool {
        match self {
            Self::Leaf { inside } => !*inside,
            Self::Internal(node) => node.plus().has_outside() || node.minus().has_outside(),
        }
    }

    /// Locates a point relative to the region.
    ///
    /// Points within tolerance of a cut are checked in both subtrees; they are
    /// on the boundary unless both subtrees agree.
    pub fn check_point(&self, point: &S::Point) -> Location {
        match self {
            Self::Leaf { inside: true } => Location::Inside,
            Self::Leaf { inside: false } => Location::Outside,
            Self::Internal(node) => match node.hyperplane().side_of(point) {
                Side::Plus => node.plus().check_point(point),
                Side::Minus => node.minus().check_point(point),
                Side::Both | Side::Hyper => {
                    let plus = node.plus().check_point(point);
                    let minus = node.minus().check_point(point);
                    if plus == minus {
                        plus
                    } else {
                        Location::Boundary
                    }
                }
            },
        }
    }

    /// Splits the tree by a sub-hyperplane lying in the tree's cell.
    ///
    /// Returns `(plus, minus)`: the parts of the tree on the plus and minus
    /// sides of the sub-hyperplane. Each part is only meaningful on its side.
    pub fn split(&self, sub: &S::SubHyperplane) -> (Self, Self) {
        let node = match self {
            Self::Leaf { .. } => return (self.clone(), self.clone()),
            Self::Internal(node) => node,
        };

        let cut_hyperplane = node.hyperplane();
        let sub_hyperplane = sub.hyperplane();
        let sub_split = sub.split(cut_hyperplane);

        match sub_split.side() {
            Side::Plus => {
                // The minus child lies entirely on one side of the sub-hyperplane
                let (plus, minus) = node.plus().split(sub);
                if node.cut().side(sub_hyperplane) == Side::Plus {
                    let plus = Self::internal(node.cut().clone(), plus, node.minus().clone());
                    (plus.condensed(), minus)
                } else {
                    let minus = Self::internal(node.cut().clone(), minus, node.minus().clone());
                    (plus, minus.condensed())
                }
            }
            Side::Minus => {
                // The plus child lies entirely on one side of the sub-hyperplane
                let (plus, minus) = node.minus().split(sub);
                if node.cut().side(sub_hyperplane) == Side::Plus {
                    let plus = Self::internal(node.cut().clone(), node.plus().clone(), plus);
                    (plus.condensed(), minus)
                } else {
                    let minus = Self::internal(node.cut().clone(), node.plus().clone(), minus);
                    (plus, minus.condensed())
                }
            }
            Side::Both => {
                let (Some(sub_plus), Some(sub_minus)) = sub_split.into_parts() else {
                    return (self.clone(), self.clone());
                };
                let (plus_plus, plus_minus) = node.plus().split(&sub_plus);
                let (minus_plus, minus_minus) = node.minus().split(&sub_minus);

                // A missing cut fragment means that half lies on a single side of the cut
                let (cut_plus, cut_minus) = node.cut().split(sub_hyperplane).into_parts();
                let plus = match cut_plus {
                    Some(cut) => Self::internal(cut, plus_plus, minus_plus).condensed(),
                    None => plus_plus,
                };
                let minus = match cut_minus {
                    Some(cut) => Self::internal(cut, plus_minus, minus_minus).condensed(),
                    None => minus_minus,
                };
                (plus, minus)
            }
            Side::Hyper => {
                if sub_hyperplane.same_orientation_as(cut_hyperplane) {
                    (node.plus().clone(), node.minus().clone())
                } else {
                    (node.minus().clone(), node.plus().clone())
                }
            }
        }
    }

    /// Returns the tree of the complementary region.
    ///
    /// Every leaf flag is flipped, cuts are kept as they are.
    pub fn complement(&self) -> Self {
        match self {
            Self::Leaf { inside } => Self::leaf(!inside),
            Self::Internal(node) => Self::internal(
                node.cut().clone(),
                node.plus().complement(),
                node.minus().complement(),
            ),
        }
    }

    /// Collapses an internal node whose children are leaves with the same flag.
    pub fn condensed(self) -> Self {
        match self {
            Self::Internal(node) => match (node.plus().inside(), node.minus().inside()) {
                (Some(plus), Some(minus)) if plus == minus => Self::leaf(plus),
                _ => Self::Internal(node),
            },
            leaf => leaf,
        }
    }

    /// Visits every node of the tree, parent first, plus subtree before minus subtree.
    pub fn visit<V: BspTreeVisitor<S>>(&self, visitor: &mut V) {
        match self {
            Self::Leaf { inside } => visitor.visit_leaf(*inside),
            Self::Internal(node) => {
                visitor.visit_internal(node);
                node.plus().visit(visitor);
                node.minus().visit(visitor);
            }
        }
    }

    /// Splits a sub-hyperplane lying in this tree's cell down to the leaves.
    ///
    /// Returns `(outside, inside)`: the fragments reaching outside leaves and
    /// the fragments reaching inside leaves.
    pub(crate) fn characterize(
        &self,
        sub: S::SubHyperplane,
    ) -> (Vec<S::SubHyperplane>, Vec<S::SubHyperplane>) {
        let mut outside = Vec::new();
        let mut inside = Vec::new();
        self.characterize_into(sub, &mut outside, &mut inside);
        (outside, inside)
    }

    fn characterize_into(
        &self,
        sub: S::SubHyperplane,
        outside: &mut Vec<S::SubHyperplane>,
        inside: &mut Vec<S::SubHyperplane>,
    ) {
        let node = match self {
            Self::Leaf { inside: true } => return inside.push(sub),
            Self::Leaf { inside: false } => return outside.push(sub),
            Self::Internal(node) => node,
        };

        match sub.split(node.hyperplane()).into_parts() {
            (Some(plus), Some(minus)) => {
                node.plus().characterize_into(plus, outside, inside);
                node.minus().characterize_into(minus, outside, inside);
            }
            (Some(plus), None) => node.plus().characterize_into(plus, outside, inside),
            (None, Some(minus)) => node.minus().characterize_into(minus, outside, inside),
            // Fitted cuts never share a hyperplane with an ancestor
            (None, None) => node.plus().characterize_into(sub, outside, inside),
        }
    }
}

impl<S: Space> From<BspNode<S>> for BspTree<S> {
    fn from(node: BspNode<S>) -> Self {
        Self::Internal(Box::new(node))
    }
}

/// Restricts a sub-hyperplane to a convex cell.
///
/// The cell is the list of `(hyperplane, on_plus_side)` constraints collected
/// from the root. Returns `None` if nothing of the sub-hyperplane remains.
pub fn fit_to_cell<S: Space>(
    sub: S::SubHyperplane,
    cell: &[(S::Hyperplane, bool)],
) -> Option<S::SubHyperplane> {
    let mut fitted = sub;
    for (hyperplane, on_plus_side) in cell {
        let (plus, minus) = fitted.split(hyperplane).into_parts();
        fitted = if *on_plus_side { plus? } else { minus? };
    }
    (!fitted.is_empty()).then_some(fitted)
}

/// Recursively builds a subtree from the boundary fragments lying in its cell.
fn build_node<S: Space, C: CutSelector<S>>(
    mut boundary: Vec<S::SubHyperplane>,
    selector: &C,
    cell: &mut Vec<(S::Hyperplane, bool)>,
    inside: bool,
) -> BspTree<S> {
    // Search for a boundary hyperplane that still crosses the cell
    let cut = loop {
        let Some(index) = selector.select(&boundary) else {
            return BspTree::leaf(inside);
        };
        let candidate = boundary.remove(index);
        let whole = candidate.hyperplane().whole_hyperplane();
        if let Some(fitted) = fit_to_cell::<S>(whole, cell) {
            break fitted;
        }
    };
    let hyperplane = cut.hyperplane().clone();

    // Distribute the remaining fragments between the two sides
    let mut plus_list = Vec::new();
    let mut minus_list = Vec::new();
    for other in boundary {
        let (plus, minus) = other.split(&hyperplane).into_parts();
        plus_list.extend(plus);
        minus_list.extend(minus);
    }

    cell.push((hyperplane.clone(), true));
    let plus = build_node(plus_list, selector, cell, false);
    cell.pop();

    cell.push((hyperplane, false));
    let minus = build_node(minus_list, selector, cell, true);
    cell.pop();

    BspTree::internal(cut, plus, minus)
}
