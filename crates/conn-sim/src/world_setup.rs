//! Entity spawn factories for setting up the simulation world.

use hecs::World;

use conn_core::components::{AiState, Contact, ContactMeta, Ownship};
use conn_core::types::Kinematics;

use crate::scenario::{ContactInit, OwnshipInit, ScenarioDef};

/// Build a fresh world from a scenario snapshot.
/// Contact ids are assigned in scenario order starting at 1.
pub fn setup_world(scenario: &ScenarioDef) -> World {
    let mut world = World::new();
    spawn_ownship(&mut world, &scenario.ownship);
    for (i, init) in scenario.contacts.iter().enumerate() {
        spawn_contact(&mut world, init, i as u32 + 1);
    }
    world
}

/// Spawn the player's boat.
pub fn spawn_ownship(world: &mut World, init: &OwnshipInit) -> hecs::Entity {
    world.spawn((
        Ownship,
        init.position,
        Kinematics::new(init.course_deg, init.speed_kts, init.depth_ft),
    ))
}

/// Spawn a contact under autonomous control.
pub fn spawn_contact(world: &mut World, init: &ContactInit, contact_id: u32) -> hecs::Entity {
    world.spawn((
        Contact,
        init.position,
        Kinematics::new(init.course_deg, init.speed_kts, init.depth_ft),
        ContactMeta {
            contact_id,
            class: init.class,
            hostile: init.hostile,
        },
        AiState::new(init.behavior),
    ))
}
