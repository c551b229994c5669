//! Kinematic integration: position advances along course at speed each tick.

use hecs::World;

use conn_core::components::Ownship;
use conn_core::types::{Kinematics, Position};

/// Advance all entities with Position + Kinematics by `dt` seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, kin)) in world.query_mut::<(&mut Position, &Kinematics)>() {
        let dist = kin.speed_yds_per_sec() * dt;
        *pos = pos.offset(kin.course_deg, dist);
    }
}

/// Ownship position and kinematics, if spawned.
pub fn ownship_state(world: &World) -> Option<(Position, Kinematics)> {
    let mut q = world.query::<(&Ownship, &Position, &Kinematics)>();
    q.iter().next().map(|(_, (_, pos, kin))| (*pos, *kin))
}
