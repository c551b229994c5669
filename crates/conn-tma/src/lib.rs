//! Bearings-only target motion analysis.
//!
//! Pure functions over plain data: given a tracker's bearing history and the
//! ownship leg history covering its span, estimate the target's range,
//! course, and speed. No ECS dependency.

pub mod legs;
pub mod solver;

pub use legs::LegHistory;
pub use solver::solve;

#[cfg(test)]
mod tests;
