//! The circle: limit angles and sets of arcs.

use std::f64::consts::TAU;

use crate::error::{PartitionError, Result};
use crate::euclidean::oned::{merge_touching, Interval};
use crate::partitioning::{
    BspTree, Hyperplane, Region, RegionProperties, Space, SplitSubHyperplane, SubHyperplane,
};

/// Offsets below this value put a limit angle on the minus side of another.
const SPLIT_THRESHOLD: f64 = 1e-10;

/// The unit circle, parametrized by angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sphere1D;

impl Space for Sphere1D {
    type Point = S1Point;
    type Hyperplane = LimitAngle;
    type SubHyperplane = SubLimitAngle;

    const DIMENSION: usize = 1;

    fn region_properties(region: &Region<Self>) -> RegionProperties<S1Point> {
        if let Some(inside) = region.tree().inside() {
            return RegionProperties {
                size: if inside { TAU } else { 0.0 },
                barycenter: None,
            };
        }

        let arcs = region.arcs();
        let size: f64 = arcs.iter().map(Arc::size).sum();
        if size <= 0.0 {
            return RegionProperties::empty();
        }
        let moment: f64 = arcs.iter().map(|arc| arc.size() * arc.midpoint()).sum();
        RegionProperties {
            size,
            barycenter: Some(S1Point::new(moment / size)),
        }
    }
}

/// A point of the circle, stored as an angle in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S1Point {
    alpha: f64,
}

impl S1Point {
    /// Creates a point from any angle, normalized to `[0, 2π)`.
    pub fn new(alpha: f64) -> Self {
        let alpha = alpha.rem_euclid(TAU);
        Self {
            alpha: if alpha >= TAU { 0.0 } else { alpha },
        }
    }

    /// Normalized angle.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

/// A hyperplane of the circle: an angle with an orientation.
///
/// When `direct`, the plus side holds the angles greater than the location.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitAngle {
    location: S1Point,
    direct: bool,
    tolerance: f64,
}

impl LimitAngle {
    /// Creates a limit angle.
    pub fn new(location: S1Point, direct: bool, tolerance: f64) -> Self {
        Self {
            location,
            direct,
            tolerance,
        }
    }

    /// Angle of the limit.
    #[inline]
    pub fn location(&self) -> S1Point {
        self.location
    }

    /// Returns true if the plus side is toward increasing angles.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    /// Returns the same angle with the opposite orientation.
    pub fn reversed(&self) -> Self {
        Self {
            direct: !self.direct,
            ..self.clone()
        }
    }
}

impl Hyperplane<Sphere1D> for LimitAngle {
    fn offset(&self, point: &S1Point) -> f64 {
        let delta = point.alpha - self.location.alpha;
        if self.direct { delta } else { -delta }
    }

    fn project(&self, _point: &S1Point) -> S1Point {
        self.location
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn same_hyperplane_as(&self, other: &Self) -> bool {
        self.same_orientation_as(other)
            && (self.location.alpha - other.location.alpha).abs() <= self.tolerance
    }

    fn whole_hyperplane(&self) -> SubLimitAngle {
        SubLimitAngle::new(self.clone())
    }
}

/// The only sub-hyperplane of a limit angle: the angle itself.
///
/// Splitting never reports the angle as lying in the cutting hyperplane:
/// angles within the threshold go to the plus side.
#[derive(Debug, Clone, PartialEq)]
pub struct SubLimitAngle {
    hyperplane: LimitAngle,
}

impl SubLimitAngle {
    /// Wraps a limit angle.
    pub fn new(hyperplane: LimitAngle) -> Self {
        Self { hyperplane }
    }
}

impl SubHyperplane<Sphere1D> for SubLimitAngle {
    fn hyperplane(&self) -> &LimitAngle {
        &self.hyperplane
    }

    fn size(&self) -> f64 {
        0.0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn split(&self, hyperplane: &LimitAngle) -> SplitSubHyperplane<Self> {
        if hyperplane.offset(&self.hyperplane.location) < -SPLIT_THRESHOLD {
            SplitSubHyperplane::minus_only(self.clone())
        } else {
            SplitSubHyperplane::plus_only(self.clone())
        }
    }
}

/// An arc of the circle from `lower` to `upper`, counter-clockwise.
///
/// `lower` lies in `[0, 2π)`; `upper` may exceed `2π` for arcs crossing zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub lower: f64,
    pub upper: f64,
}

impl Arc {
    /// Angular length of the arc.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Middle angle of the arc, not normalized.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// A union of arcs of the circle.
pub type ArcsSet = Region<Sphere1D>;

impl Region<Sphere1D> {
    /// Builds the arc from `lower` to `upper`.
    ///
    /// Angles need not be normalized. A span of `2π` or more covers the
    /// whole circle, a zero span is empty.
    ///
    /// # Errors
    ///
    /// [`PartitionError::InvalidInterval`] if `lower > upper`.
    pub fn from_arc(lower: f64, upper: f64, tolerance: f64) -> Result<Self> {
        if lower > upper {
            return Err(PartitionError::InvalidInterval { lower, upper });
        }
        if upper - lower >= TAU {
            return Ok(Self::whole(tolerance));
        }
        if upper == lower {
            return Ok(Self::empty(tolerance));
        }

        let start = S1Point::new(lower).alpha();
        let end = start + (upper - lower);
        let cut = |alpha: f64, direct: bool| {
            LimitAngle::new(S1Point::new(alpha), direct, tolerance).whole_hyperplane()
        };

        // An arc ending on zero needs no upper cut: a cut at zero has no minus side.
        let tree = if (end - TAU).abs() <= tolerance {
            BspTree::internal(cut(start, false), BspTree::leaf(false), BspTree::leaf(true))
        } else if end < TAU {
            BspTree::internal(
                cut(start, false),
                BspTree::leaf(false),
                BspTree::internal(cut(end, true), BspTree::leaf(false), BspTree::leaf(true)),
            )
        } else {
            BspTree::internal(
                cut(start, false),
                BspTree::internal(cut(end - TAU, true), BspTree::leaf(false), BspTree::leaf(true)),
                BspTree::leaf(true),
            )
        };
        Ok(Self::new(tree, tolerance))
    }

    /// Returns the inside arcs, sorted, with the arc crossing zero merged.
    pub fn arcs(&self) -> Vec<Arc> {
        let mut cells = Vec::new();
        collect_arcs(self.tree(), 0.0, TAU, &mut cells);
        let mut arcs: Vec<Arc> = merge_touching(cells)
            .into_iter()
            .map(|cell| Arc {
                lower: cell.lower,
                upper: cell.upper,
            })
            .collect();

        if arcs.len() > 1 {
            let (first, last) = (arcs[0], arcs[arcs.len() - 1]);
            if first.lower <= 0.0 && last.upper >= TAU {
                arcs.remove(0);
                if let Some(wrapping) = arcs.last_mut() {
                    wrapping.upper = TAU + first.upper;
                }
            }
        }
        arcs
    }
}

fn collect_arcs(tree: &BspTree<Sphere1D>, lower: f64, upper: f64, out: &mut Vec<Interval>) {
    if lower >= upper {
        return;
    }
    let node = match tree {
        BspTree::Leaf { inside: true } => return out.push(Interval::new(lower, upper)),
        BspTree::Leaf { inside: false } => return,
        BspTree::Internal(node) => node,
    };

    let alpha = node.hyperplane().location().alpha();
    let above = (lower.max(alpha), upper);
    let below = (lower, upper.min(alpha));
    let (plus, minus) = if node.hyperplane().is_direct() {
        (above, below)
    } else {
        (below, above)
    };
    collect_arcs(node.plus(), plus.0, plus.1, out);
    collect_arcs(node.minus(), minus.0, minus.1, out);
}
