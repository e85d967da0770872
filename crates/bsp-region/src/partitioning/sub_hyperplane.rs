//! Bounded pieces of hyperplanes and their splitting.

use std::fmt::Debug;

use super::{Side, Space};

/// A bounded piece of a hyperplane.
///
/// The extent is described by a region of the hyperplane's own space,
/// expressed in the hyperplane's local frame. Sub-hyperplanes are immutable:
/// splitting produces new values.
pub trait SubHyperplane<S: Space>: Clone + Debug {
    /// Returns the underlying hyperplane.
    fn hyperplane(&self) -> &S::Hyperplane;

    /// Measure of the sub-hyperplane in the hyperplane's own dimension.
    ///
    /// Point-like boundaries (1D spaces) have size 0.
    fn size(&self) -> f64;

    /// Returns true if nothing of the hyperplane remains.
    fn is_empty(&self) -> bool;

    /// Splits the sub-hyperplane by a hyperplane.
    ///
    /// # Return values by side
    ///
    /// - **Plus**: `(Some(self), None)`
    /// - **Minus**: `(None, Some(self))`
    /// - **Both**: `(Some(plus_part), Some(minus_part))`
    /// - **Hyper**: `(None, None)`, the sub-hyperplane lies in the cutting hyperplane
    fn split(&self, hyperplane: &S::Hyperplane) -> SplitSubHyperplane<Self>
    where
        Self: Sized;

    /// Classifies the sub-hyperplane relative to a hyperplane.
    fn side(&self, hyperplane: &S::Hyperplane) -> Side
    where
        Self: Sized,
    {
        self.split(hyperplane).side()
    }
}

/// The two fragments produced by [`SubHyperplane::split`].
#[derive(Debug, Clone)]
pub struct SplitSubHyperplane<T> {
    plus: Option<T>,
    minus: Option<T>,
}

impl<T> SplitSubHyperplane<T> {
    /// Creates a split from its two fragments.
    pub fn new(plus: Option<T>, minus: Option<T>) -> Self {
        Self { plus, minus }
    }

    /// Split result for geometry entirely on the plus side.
    pub fn plus_only(part: T) -> Self {
        Self::new(Some(part), None)
    }

    /// Split result for geometry entirely on the minus side.
    pub fn minus_only(part: T) -> Self {
        Self::new(None, Some(part))
    }

    /// Split result for geometry lying in the cutting hyperplane.
    pub fn hyper() -> Self {
        Self::new(None, None)
    }

    /// Fragment on the plus side, if any.
    #[inline]
    pub fn plus(&self) -> Option<&T> {
        self.plus.as_ref()
    }

    /// Fragment on the minus side, if any.
    #[inline]
    pub fn minus(&self) -> Option<&T> {
        self.minus.as_ref()
    }

    /// Consumes the split, returning `(plus, minus)`.
    pub fn into_parts(self) -> (Option<T>, Option<T>) {
        (self.plus, self.minus)
    }

    /// Side of the split geometry relative to the cutting hyperplane.
    pub fn side(&self) -> Side {
        match (&self.plus, &self.minus) {
            (Some(_), Some(_)) => Side::Both,
            (Some(_), None) => Side::Plus,
            (None, Some(_)) => Side::Minus,
            (None, None) => Side::Hyper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_follows_fragments() {
        assert_eq!(SplitSubHyperplane::plus_only(1).side(), Side::Plus);
        assert_eq!(SplitSubHyperplane::minus_only(1).side(), Side::Minus);
        assert_eq!(SplitSubHyperplane::new(Some(1), Some(2)).side(), Side::Both);
        assert_eq!(SplitSubHyperplane::<i32>::hyper().side(), Side::Hyper);
    }

    #[test]
    fn into_parts_keeps_order() {
        let split = SplitSubHyperplane::new(Some("plus"), Some("minus"));
        assert_eq!(split.plus(), Some(&"plus"));
        assert_eq!(split.into_parts(), (Some("plus"), Some("minus")));
    }
}
