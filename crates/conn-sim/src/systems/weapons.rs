//! Weapon control system: tube loading, lock countdown with per-tick
//! geometry re-checks, and weapon run-out with Pk resolution.

use std::collections::BTreeMap;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use conn_core::components::{Contact, ContactMeta};
use conn_core::config::WeaponConfig;
use conn_core::enums::{EngagementPhase, TubeStatus};
use conn_core::events::SimEvent;
use conn_core::types::{Kinematics, Position};

use crate::engagement::EngagementState;
use crate::trackers::TrackerTable;

use super::movement;

/// Find a contact entity by its stable id.
pub fn contact_by_id(
    world: &World,
    contact_id: u32,
) -> Option<(hecs::Entity, Position, Kinematics)> {
    let mut q = world.query::<(&Contact, &ContactMeta, &Position, &Kinematics)>();
    q.iter()
        .find(|(_, (_, meta, _, _))| meta.contact_id == contact_id)
        .map(|(entity, (_, _, pos, kin))| (entity, *pos, *kin))
}

/// Lock geometry gate: the tracker must be alive, its linked contact must
/// exist, and the contact must be at or below the search ceiling. Returns
/// the contact's entity and true range when valid.
pub fn lock_geometry(
    world: &World,
    trackers: &TrackerTable,
    cfg: &WeaponConfig,
    tracker_id: u32,
) -> Option<(hecs::Entity, f64)> {
    trackers.get(tracker_id)?;
    let contact_id = trackers.linked_contact(tracker_id)?;
    let (entity, pos, kin) = contact_by_id(world, contact_id)?;
    if kin.depth_ft < cfg.search_ceiling_ft {
        return None;
    }
    let (own_pos, _) = movement::ownship_state(world)?;
    Some((entity, own_pos.range_to(&pos)))
}

/// Advance tube loading and every in-progress engagement by one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    engagements: &mut BTreeMap<u32, EngagementState>,
    trackers: &mut TrackerTable,
    tubes: &mut [TubeStatus],
    rng: &mut ChaCha8Rng,
    cfg: &WeaponConfig,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    // Tube loading countdowns.
    for (index, tube) in tubes.iter_mut().enumerate() {
        if let TubeStatus::Loading { remaining_secs } = tube {
            *remaining_secs -= dt;
            if *remaining_secs <= 0.0 {
                *tube = TubeStatus::Loaded;
                events.push(SimEvent::TubeLoaded { index });
            }
        }
    }

    let ids: Vec<u32> = engagements.keys().copied().collect();
    for tracker_id in ids {
        let Some(phase) = engagements.get(&tracker_id).map(|e| e.phase) else {
            continue;
        };
        match phase {
            EngagementPhase::Detecting | EngagementPhase::Locked => {
                if lock_geometry(world, trackers, cfg, tracker_id).is_none() {
                    // Target lost or geometry invalidated mid-countdown:
                    // engagement back to idle, reported as an event.
                    engagements.remove(&tracker_id);
                    events.push(SimEvent::GeometryInvalid { tracker_id });
                    tracing::debug!(tracker_id, "lock geometry invalidated");
                    continue;
                }
                if phase == EngagementPhase::Detecting {
                    if let Some(eng) = engagements.get_mut(&tracker_id) {
                        eng.remaining_secs -= dt;
                        if eng.remaining_secs <= 0.0 {
                            eng.phase = EngagementPhase::Locked;
                            eng.remaining_secs = 0.0;
                            events.push(SimEvent::LockAcquired { tracker_id });
                        }
                    }
                }
            }
            EngagementPhase::Fired => {
                let Some(eng) = engagements.get_mut(&tracker_id) else {
                    continue;
                };
                eng.remaining_secs -= dt;
                if eng.remaining_secs > 0.0 {
                    continue;
                }
                let pk = eng.pk;
                let hit = rng.gen_bool(pk.clamp(0.0, 1.0));
                engagements.remove(&tracker_id);
                events.push(SimEvent::WeaponResolved { tracker_id, hit });

                if hit {
                    if let Some(contact_id) = trackers.linked_contact(tracker_id) {
                        if let Some((entity, _, _)) = contact_by_id(world, contact_id) {
                            let _ = world.despawn(entity);
                            events.push(SimEvent::ContactDestroyed { contact_id });
                        }
                    }
                    if trackers.drop_tracker(tracker_id) {
                        events.push(SimEvent::TrackerDropped { tracker_id });
                    }
                }
            }
        }
    }
}
