//! Simulation engine for the CONN tactical trainer.
//!
//! Owns the hecs ECS world, applies queued commands at tick boundaries,
//! runs systems in a fixed order, and publishes `TacticalSnapshot`s.
//! Completely headless, enabling deterministic testing.

pub mod engagement;
pub mod engine;
pub mod scenario;
pub mod systems;
pub mod trackers;
pub mod world_setup;

pub use conn_core as core;
pub use engine::TacticalEngine;
