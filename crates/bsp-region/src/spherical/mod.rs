//! Spherical spaces.

pub mod oned;

pub use oned::{Arc, ArcsSet, LimitAngle, S1Point, Sphere1D, SubLimitAngle};
