//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods; logic lives in the
//! engine's systems. `Position` and `Kinematics` from `types.rs` double as
//! components.

use serde::{Deserialize, Serialize};

use crate::enums::{AiControl, Behavior, VesselClass};

/// Marks the player's boat. Exactly one per world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ownship;

/// Marks a contact entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Contact;

/// Identity and scoring data for a contact. Consulted by classification and
/// mission grading only — never by the solver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactMeta {
    /// Stable id referenced by commands and observations.
    pub contact_id: u32,
    pub class: VesselClass,
    /// Scenario-assigned hostility flag.
    pub hostile: bool,
}

/// AI control state for a contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiState {
    pub control: AiControl,
    pub behavior: Behavior,
    /// Seconds the current behavior leg has been held (patrol timing).
    pub leg_elapsed_secs: f64,
    /// Accumulated seconds inside attack range (pursue timing).
    pub attack_dwell_secs: f64,
}

impl AiState {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            control: AiControl::Active,
            behavior,
            leg_elapsed_secs: 0.0,
            attack_dwell_secs: 0.0,
        }
    }
}
