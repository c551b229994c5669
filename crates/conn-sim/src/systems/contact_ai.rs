//! Contact AI system: advances autonomous contact kinematics each tick.
//!
//! Contacts under `Overridden` control are skipped entirely — a manual
//! update was applied during command processing this tick or earlier, and
//! no AI motion may intervene until an explicit resume.

use hecs::World;

use conn_core::components::{AiState, Contact, ContactMeta};
use conn_core::enums::AiControl;
use conn_core::types::{Kinematics, Position};

use conn_contact_ai::fsm::{evaluate, ContactContext};
use conn_contact_ai::profiles::params_for;

use super::movement;

/// Evaluate behavior for every `Active` contact and apply the updates.
/// Returns true when a pursuer pressed its attack home (ownship lost).
pub fn run(world: &mut World, dt: f64) -> bool {
    let Some((own_pos, _)) = movement::ownship_state(world) else {
        return false;
    };

    // Collect updates in a buffer to avoid borrow issues with hecs.
    let mut updates: Vec<(hecs::Entity, f64, f64, bool)> = Vec::new();
    let mut attacked = false;

    {
        let mut query =
            world.query::<(&Contact, &ContactMeta, &Position, &Kinematics, &mut AiState)>();
        for (entity, (_, meta, pos, kin, ai)) in query.iter() {
            if ai.control == AiControl::Overridden {
                continue;
            }

            let params = params_for(meta.class);
            let range = own_pos.range_to(pos);

            ai.leg_elapsed_secs += dt;
            if range <= params.attack_range_yd {
                ai.attack_dwell_secs += dt;
            } else {
                ai.attack_dwell_secs = 0.0;
            }

            let ctx = ContactContext {
                behavior: ai.behavior,
                position: *pos,
                course_deg: kin.course_deg,
                speed_kts: kin.speed_kts,
                own_position: own_pos,
                range_to_ownship_yd: range,
                elapsed_in_leg_secs: ai.leg_elapsed_secs,
                time_in_attack_range_secs: ai.attack_dwell_secs,
            };

            let update = evaluate(&ctx, &params);
            if update.attack {
                attacked = true;
            }
            if update.changed {
                updates.push((entity, update.course_deg, update.speed_kts, true));
            }
        }
    }

    for (entity, course, speed, reset_leg) in updates {
        if let Ok(mut kin) = world.get::<&mut Kinematics>(entity) {
            kin.course_deg = course.rem_euclid(360.0);
            kin.speed_kts = speed;
        }
        if reset_leg {
            if let Ok(mut ai) = world.get::<&mut AiState>(entity) {
                ai.leg_elapsed_secs = 0.0;
            }
        }
    }

    attacked
}
