//! Error type shared by region construction and nested loop handling.

use thiserror::Error;

/// Failures reported while building regions from user supplied boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// A boundary loop does not close on itself.
    #[error("an outline boundary loop is open")]
    OpenLoop,

    /// Two loops partially overlap: neither contains the other and they are not disjoint.
    #[error("some outline boundary loops cross each other")]
    CrossingLoops,

    /// A loop has too few non-degenerate edges to enclose anything.
    #[error("boundary loop needs at least 3 non-degenerate edges, got {edges}")]
    DegenerateLoop { edges: usize },

    /// An interval or arc whose lower bound exceeds its upper bound.
    #[error("interval lower bound {lower} exceeds upper bound {upper}")]
    InvalidInterval { lower: f64, upper: f64 },
}

pub type Result<T> = std::result::Result<T, PartitionError>;
