//! Kitchen rules: assembling a plate and judging it.

pub mod builder;
pub mod matcher;

pub use builder::{OrderBuilder, Placement, PlacementError, PlacementStep};
pub use matcher::{compare, matches, Mismatch, Verdict};
