//! Nesting and orientation of polygon boundary loops.
//!
//! Loops are inserted one at a time into a containment forest. Once every
//! loop is known, [`NestedLoops::correct_orientation`] rewrites the vertex
//! order of each loop so that top-level loops bound finite areas
//! (counter-clockwise) and each nesting level alternates.

use nalgebra::Point2;

use super::polygons::PolygonsSet;
use crate::error::{PartitionError, Result};
use crate::partitioning::RegionFactory;

/// A boundary loop as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryLoop {
    /// A closed loop: the last vertex connects back to the first.
    Closed(Vec<Point2<f64>>),
    /// An open chain of vertices, which cannot bound a region.
    Open(Vec<Point2<f64>>),
}

impl BoundaryLoop {
    /// Reads a loop where a leading `None` marks an open chain.
    ///
    /// A `None` anywhere else is a broken chain and also reads as open.
    pub fn from_sentinel(vertices: Vec<Option<Point2<f64>>>) -> Self {
        let open = vertices.iter().any(Option::is_none);
        let points = vertices.into_iter().flatten().collect();
        if open {
            Self::Open(points)
        } else {
            Self::Closed(points)
        }
    }

    /// Returns true for closed loops.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }
}

impl From<Vec<Point2<f64>>> for BoundaryLoop {
    fn from(vertices: Vec<Point2<f64>>) -> Self {
        Self::Closed(vertices)
    }
}

impl From<&[Point2<f64>]> for BoundaryLoop {
    fn from(vertices: &[Point2<f64>]) -> Self {
        Self::Closed(vertices.to_vec())
    }
}

/// Identifier of a loop, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(usize);

impl LoopId {
    /// Position of the loop in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One loop of the containment forest.
#[derive(Debug, Clone)]
pub struct LoopNode {
    id: LoopId,
    vertices: Vec<Point2<f64>>,
    /// Loops directly enclosed by this one.
    surrounded: Vec<LoopNode>,
    /// Finite region bounded by the loop.
    polygon: PolygonsSet,
    /// True when the vertices as supplied already bound a finite area.
    original_is_clockwise: bool,
    /// Same flag for the current vertex order.
    clockwise: bool,
}

impl LoopNode {
    fn build(id: LoopId, boundary: BoundaryLoop, tolerance: f64) -> Result<Self> {
        let BoundaryLoop::Closed(vertices) = boundary else {
            return Err(PartitionError::OpenLoop);
        };

        let polygon = PolygonsSet::from_vertices(&vertices, tolerance)?;
        let (polygon, original_is_clockwise) = if polygon.size().is_infinite() {
            (polygon.complement(), false)
        } else {
            (polygon, true)
        };

        Ok(Self {
            id,
            vertices,
            surrounded: Vec::new(),
            polygon,
            original_is_clockwise,
            clockwise: original_is_clockwise,
        })
    }

    /// Identifier of the loop.
    pub fn id(&self) -> LoopId {
        self.id
    }

    /// Vertices in their current order.
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Loops directly enclosed by this one.
    pub fn surrounded(&self) -> &[LoopNode] {
        &self.surrounded
    }

    /// Finite region bounded by the loop, whatever its vertex order.
    pub fn polygon(&self) -> &PolygonsSet {
        &self.polygon
    }

    /// Returns true if the loop was supplied in the finite-area order.
    pub fn original_is_clockwise(&self) -> bool {
        self.original_is_clockwise
    }

    /// Reorders the vertices of this loop and its descendants.
    ///
    /// `clockwise` is the finite-area order for this loop; enclosed loops
    /// get the opposite order.
    fn set_clockwise(&mut self, clockwise: bool) {
        if self.clockwise != clockwise {
            self.vertices.reverse();
            self.clockwise = clockwise;
        }
        for child in &mut self.surrounded {
            child.set_clockwise(!clockwise);
        }
    }

    fn find(&self, id: LoopId) -> Option<&LoopNode> {
        if self.id == id {
            return Some(self);
        }
        self.surrounded.iter().find_map(|child| child.find(id))
    }

    fn collect_into(self, out: &mut Vec<(LoopId, Vec<Point2<f64>>)>) {
        out.push((self.id, self.vertices));
        for child in self.surrounded {
            child.collect_into(out);
        }
    }
}

/// Containment forest of boundary loops.
#[derive(Debug, Clone)]
pub struct NestedLoops {
    tolerance: f64,
    surrounded: Vec<LoopNode>,
    count: usize,
}

impl NestedLoops {
    /// Creates an empty forest.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            surrounded: Vec::new(),
            count: 0,
        }
    }

    /// Tolerance shared by every loop.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of loops inserted.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no loop was inserted.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Top-level loops.
    pub fn roots(&self) -> &[LoopNode] {
        &self.surrounded
    }

    /// Inserts a loop into the forest.
    ///
    /// The loop goes under the first loop enclosing it. Loops it encloses
    /// become its children. On error the forest is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`PartitionError::OpenLoop`] for an open chain
    /// - [`PartitionError::DegenerateLoop`] for fewer than three edges
    /// - [`PartitionError::CrossingLoops`] if the loop partially overlaps another
    pub fn add(&mut self, boundary: impl Into<BoundaryLoop>) -> Result<LoopId> {
        let id = LoopId(self.count);
        let node = LoopNode::build(id, boundary.into(), self.tolerance)?;
        insert(&mut self.surrounded, node, 0)?;
        self.count += 1;
        Ok(id)
    }

    /// Reorders every loop: top-level loops bound finite areas, holes alternate.
    pub fn correct_orientation(&mut self) {
        for node in &mut self.surrounded {
            node.set_clockwise(true);
        }
    }

    /// Returns the corrected loops in insertion order, leaving the forest as is.
    pub fn oriented_loops(&self) -> Vec<Vec<Point2<f64>>> {
        let mut corrected = self.clone();
        corrected.correct_orientation();
        corrected.into_loops()
    }

    /// Vertices of a loop in their current order.
    pub fn loop_vertices(&self, id: LoopId) -> Option<&[Point2<f64>]> {
        self.surrounded
            .iter()
            .find_map(|node| node.find(id))
            .map(LoopNode::vertices)
    }

    /// Consumes the forest, returning the loops in insertion order.
    pub fn into_loops(self) -> Vec<Vec<Point2<f64>>> {
        let mut loops = Vec::with_capacity(self.count);
        for node in self.surrounded {
            node.collect_into(&mut loops);
        }
        loops.sort_by_key(|(id, _)| *id);
        loops.into_iter().map(|(_, vertices)| vertices).collect()
    }
}

/// Inserts a node among siblings, descending into the first one enclosing it.
fn insert(siblings: &mut Vec<LoopNode>, mut node: LoopNode, depth: usize) -> Result<()> {
    if let Some(parent) = siblings
        .iter_mut()
        .find(|sibling| sibling.polygon.contains(&node.polygon))
    {
        return insert(&mut parent.surrounded, node, depth + 1);
    }

    let absorbed: Vec<bool> = siblings
        .iter()
        .map(|sibling| node.polygon.contains(&sibling.polygon))
        .collect();

    let factory = RegionFactory::new();
    let crosses = siblings.iter().zip(&absorbed).any(|(sibling, &absorbed)| {
        !absorbed && !factory.intersection(&node.polygon, &sibling.polygon).is_empty()
    });
    if crosses {
        return Err(PartitionError::CrossingLoops);
    }

    for (sibling, absorbed) in std::mem::take(siblings).into_iter().zip(absorbed) {
        if absorbed {
            node.surrounded.push(sibling);
        } else {
            siblings.push(sibling);
        }
    }
    log::debug!(
        "loop {} inserted at depth {depth}, enclosing {} loops",
        node.id.index(),
        node.surrounded.len()
    );
    siblings.push(node);
    Ok(())
}
