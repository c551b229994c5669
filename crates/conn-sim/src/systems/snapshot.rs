//! Snapshot system: builds the complete `TacticalSnapshot` published to the
//! UI after each tick. Read-only — never modifies the world or the stores.

use std::collections::BTreeMap;

use hecs::World;

use conn_core::components::{AiState, Contact, ContactMeta};
use conn_core::enums::{AiControl, AlertLevel, Classification, MissionOutcome, TubeStatus};
use conn_core::events::SimEvent;
use conn_core::state::*;
use conn_core::types::{Kinematics, Position, SimTime};

use crate::engagement::EngagementState;
use crate::trackers::TrackerTable;

use super::movement;

/// Build the snapshot for this tick.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    time_scale: f64,
    alert: AlertLevel,
    outcome: MissionOutcome,
    trackers: &TrackerTable,
    engagements: &BTreeMap<u32, EngagementState>,
    tubes: &[TubeStatus],
    detections: &[DetectionView],
    ownship_destroyed: bool,
    reveal_truth: bool,
    events: Vec<SimEvent>,
) -> TacticalSnapshot {
    TacticalSnapshot {
        time,
        time_scale,
        mission: build_mission(world, alert, outcome, trackers),
        ownship: build_ownship(world, ownship_destroyed),
        trackers: build_trackers(world, trackers, engagements),
        tubes: tubes.to_vec(),
        detections: detections.to_vec(),
        truth: reveal_truth.then(|| build_truth(world)),
        events,
    }
}

fn build_mission(
    world: &World,
    alert: AlertLevel,
    outcome: MissionOutcome,
    trackers: &TrackerTable,
) -> MissionView {
    let mut counts: BTreeMap<u32, (Classification, u32)> = BTreeMap::new();
    for tracker in trackers.iter() {
        // Count live linked contacts per reported classification.
        let Some(contact_id) = trackers.linked_contact(tracker.id) else {
            continue;
        };
        let alive = {
            let mut q = world.query::<(&Contact, &ContactMeta)>();
            q.iter().any(|(_, (_, meta))| meta.contact_id == contact_id)
        };
        if alive {
            let key = tracker.classification as u32;
            counts
                .entry(key)
                .and_modify(|(_, n)| *n += 1)
                .or_insert((tracker.classification, 1));
        }
    }
    MissionView {
        alert,
        outcome,
        classified_counts: counts.into_values().collect(),
    }
}

fn build_ownship(world: &World, destroyed: bool) -> OwnshipView {
    let (position, kinematics) = movement::ownship_state(world).unwrap_or_default();
    OwnshipView {
        position,
        kinematics,
        destroyed,
    }
}

fn build_trackers(
    world: &World,
    trackers: &TrackerTable,
    engagements: &BTreeMap<u32, EngagementState>,
) -> Vec<TrackerView> {
    trackers
        .iter()
        .map(|tracker| {
            let ai_control = trackers
                .linked_contact(tracker.id)
                .and_then(|cid| contact_ai_control(world, cid))
                .unwrap_or(AiControl::Active);
            TrackerView {
                tracker_id: tracker.id,
                classification: tracker.classification,
                latest_bearing_deg: tracker.history.last().map(|o| o.bearing_deg),
                observation_count: tracker.history.len(),
                solution: tracker.solution,
                ai_control,
                engagement: engagements.get(&tracker.id).map(|e| EngagementView {
                    phase: e.phase,
                    remaining_secs: e.remaining_secs,
                    tube: e.tube,
                }),
            }
        })
        .collect()
}

fn contact_ai_control(world: &World, contact_id: u32) -> Option<AiControl> {
    let mut q = world.query::<(&Contact, &ContactMeta, &AiState)>();
    q.iter()
        .find(|(_, (_, meta, _))| meta.contact_id == contact_id)
        .map(|(_, (_, _, ai))| ai.control)
}

fn build_truth(world: &World) -> TruthView {
    let mut contacts: Vec<TruthContactView> = {
        let mut q = world.query::<(&Contact, &ContactMeta, &Position, &Kinematics, &AiState)>();
        q.iter()
            .map(|(_, (_, meta, pos, kin, ai))| TruthContactView {
                contact_id: meta.contact_id,
                position: *pos,
                kinematics: *kin,
                class: meta.class,
                ai_control: ai.control,
                hostile: meta.hostile,
            })
            .collect()
    };
    contacts.sort_by_key(|c| c.contact_id);
    TruthView { contacts }
}
