//! Scenario definitions.
//!
//! A `ScenarioDef` is the initial-truth snapshot the external mission loader
//! supplies; the core never parses scenario files itself. Two canned
//! scenarios are provided for tests and demos.

use serde::{Deserialize, Serialize};

use conn_core::enums::{Behavior, VesselClass};
use conn_core::types::Position;

/// Initial ownship state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnshipInit {
    pub position: Position,
    pub course_deg: f64,
    pub speed_kts: f64,
    pub depth_ft: f64,
}

/// Initial state for one contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactInit {
    pub position: Position,
    pub course_deg: f64,
    pub speed_kts: f64,
    pub depth_ft: f64,
    pub class: VesselClass,
    pub behavior: Behavior,
    pub hostile: bool,
}

/// A complete initial-truth snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDef {
    pub name: String,
    pub ownship: OwnshipInit,
    pub contacts: Vec<ContactInit>,
}

impl ContactInit {
    /// A contact placed at a true bearing and range from the origin.
    pub fn at_bearing(
        bearing_deg: f64,
        range_yd: f64,
        course_deg: f64,
        speed_kts: f64,
        depth_ft: f64,
        class: VesselClass,
        behavior: Behavior,
        hostile: bool,
    ) -> Self {
        Self {
            position: Position::default().offset(bearing_deg, range_yd),
            course_deg,
            speed_kts,
            depth_ft,
            class,
            behavior,
            hostile,
        }
    }
}

/// "Safety of Navigation": two neutral surface contacts, no hostiles.
/// Bearings-only tracking practice against merchant traffic.
pub fn safety_of_navigation() -> ScenarioDef {
    ScenarioDef {
        name: "Safety of Navigation".into(),
        ownship: OwnshipInit {
            position: Position::default(),
            course_deg: 0.0,
            speed_kts: 5.0,
            depth_ft: 150.0,
        },
        contacts: vec![
            ContactInit::at_bearing(
                30.0,
                6_000.0,
                210.0,
                12.0,
                0.0,
                VesselClass::Merchant,
                Behavior::Transit,
                false,
            ),
            ContactInit::at_bearing(
                300.0,
                9_000.0,
                120.0,
                15.0,
                0.0,
                VesselClass::Warship,
                Behavior::Patrol,
                false,
            ),
        ],
    }
}

/// "Ambush": a merchant for cover and a hostile submarine closing ownship.
pub fn ambush() -> ScenarioDef {
    ScenarioDef {
        name: "Ambush".into(),
        ownship: OwnshipInit {
            position: Position::default(),
            course_deg: 0.0,
            speed_kts: 5.0,
            depth_ft: 200.0,
        },
        contacts: vec![
            ContactInit::at_bearing(
                45.0,
                8_000.0,
                270.0,
                12.0,
                0.0,
                VesselClass::Merchant,
                Behavior::Transit,
                false,
            ),
            ContactInit::at_bearing(
                135.0,
                6_000.0,
                315.0,
                8.0,
                300.0,
                VesselClass::Sub,
                Behavior::Pursue,
                true,
            ),
        ],
    }
}
