//! Systems run by the engine each tick, in the fixed order of `engine.rs`.
//!
//! Systems are free functions over `&mut World` plus the engine-owned stores;
//! they do not own state.

pub mod contact_ai;
pub mod mission;
pub mod movement;
pub mod sensor;
pub mod snapshot;
pub mod tma;
pub mod weapons;
