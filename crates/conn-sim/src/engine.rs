//! Simulation engine — the core of the trainer.
//!
//! `TacticalEngine` owns the hecs ECS world and all session state, applies
//! queued commands at tick boundaries, runs the systems in a fixed order,
//! and produces `TacticalSnapshot`s. One tick is an atomic unit of work:
//! external collaborators only ever see the state between ticks.

use std::collections::{BTreeMap, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use conn_core::commands::{Command, ManualUpdate};
use conn_core::components::{AiState, Contact, ContactMeta, Ownship};
use conn_core::config::{SensorConfig, TmaConfig, TrackerConfig, WeaponConfig};
use conn_core::constants::{DT, MAX_TIME_SCALE};
use conn_core::enums::{
    AiControl, AlertLevel, Classification, EngagementPhase, MissionOutcome, TubeStatus,
};
use conn_core::error::CommandError;
use conn_core::events::SimEvent;
use conn_core::state::{DetectionView, TacticalSnapshot};
use conn_core::types::{Kinematics, SimTime};

use conn_tma::LegHistory;

use crate::engagement::EngagementState;
use crate::scenario::ScenarioDef;
use crate::systems;
use crate::trackers::TrackerTable;
use crate::world_setup;

/// Configuration for a simulation session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same session.
    pub seed: u64,
    /// Initial time scale (1.0 = real time).
    pub time_scale: f64,
    pub sensor: SensorConfig,
    pub tracker: TrackerConfig,
    pub tma: TmaConfig,
    pub weapons: WeaponConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            sensor: SensorConfig::default(),
            tracker: TrackerConfig::default(),
            tma: TmaConfig::default(),
            weapons: WeaponConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct TacticalEngine {
    world: World,
    scenario: ScenarioDef,
    config: SimConfig,
    time: SimTime,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<Command>,
    events: Vec<SimEvent>,
    trackers: TrackerTable,
    engagements: BTreeMap<u32, EngagementState>,
    tubes: Vec<TubeStatus>,
    legs: LegHistory,
    detections: Vec<DetectionView>,
    next_sample_secs: f64,
    ownship_destroyed: bool,
    alert: AlertLevel,
    outcome: MissionOutcome,
    ever_alerted: bool,
    reveal_truth: bool,
}

impl TacticalEngine {
    /// Create an engine initialized from a scenario snapshot.
    pub fn new(scenario: ScenarioDef, config: SimConfig) -> Self {
        let time_scale = config.time_scale;
        let mut engine = Self {
            world: World::new(),
            scenario,
            config,
            time: SimTime::default(),
            time_scale,
            rng: ChaCha8Rng::seed_from_u64(0),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            trackers: TrackerTable::default(),
            engagements: BTreeMap::new(),
            tubes: Vec::new(),
            legs: LegHistory::default(),
            detections: Vec::new(),
            next_sample_secs: 0.0,
            ownship_destroyed: false,
            alert: AlertLevel::Normal,
            outcome: MissionOutcome::InProgress,
            ever_alerted: false,
            reveal_truth: false,
        };
        engine.reset();
        engine
    }

    /// Replace the scenario snapshot and re-initialize the session from it.
    /// The external mission loader calls this to switch missions; the
    /// `ResetMission` command replays the stored snapshot instead.
    pub fn load_scenario(&mut self, scenario: ScenarioDef) {
        self.scenario = scenario;
        self.reset();
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> TacticalSnapshot {
        self.process_commands();

        let dt = DT * self.time_scale;
        if self.outcome == MissionOutcome::InProgress && dt > 0.0 {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.time_scale,
            self.alert,
            self.outcome,
            &self.trackers,
            &self.engagements,
            &self.tubes,
            &self.detections,
            self.ownship_destroyed,
            self.reveal_truth,
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn alert(&self) -> AlertLevel {
        self.alert
    }

    pub fn outcome(&self) -> MissionOutcome {
        self.outcome
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the tracker set.
    pub fn trackers(&self) -> &TrackerTable {
        &self.trackers
    }

    #[cfg(test)]
    pub fn engagements(&self) -> &BTreeMap<u32, EngagementState> {
        &self.engagements
    }

    /// Re-initialize every component from the original scenario snapshot.
    fn reset(&mut self) {
        self.world = world_setup::setup_world(&self.scenario);
        self.time = SimTime::default();
        self.time_scale = self.config.time_scale;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.command_queue.clear();
        self.events.clear();
        self.trackers = TrackerTable::default();
        self.engagements.clear();
        self.tubes = vec![TubeStatus::Empty; self.config.weapons.tube_count];
        self.legs = LegHistory::new(
            0.0,
            self.scenario.ownship.position,
            self.scenario.ownship.course_deg,
            self.scenario.ownship.speed_kts,
        );
        self.detections.clear();
        self.next_sample_secs = 0.0;
        self.ownship_destroyed = false;
        self.alert = AlertLevel::Normal;
        self.outcome = MissionOutcome::InProgress;
        self.ever_alerted = false;
        self.reveal_truth = false;
    }

    /// Process all queued commands in arrival order. A rejected command has
    /// no effect: it is logged and surfaced as a `CommandRejected` event.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.handle_command(&command) {
                tracing::warn!(?command, %reason, "command rejected");
                self.events.push(SimEvent::CommandRejected { reason });
            }
        }
    }

    fn handle_command(&mut self, command: &Command) -> Result<(), CommandError> {
        match *command {
            Command::DesignateTracker { contact_id } => {
                let (_, pos, _) = systems::weapons::contact_by_id(&self.world, contact_id)
                    .ok_or(CommandError::NotFound)?;
                let tracker_id = self
                    .trackers
                    .designate(contact_id, self.time.elapsed_secs)?;
                let bearing_deg = systems::movement::ownship_state(&self.world)
                    .map(|(own, _)| own.bearing_to(&pos))
                    .unwrap_or(0.0);
                self.events.push(SimEvent::TrackerDesignated {
                    tracker_id,
                    bearing_deg,
                });
                Ok(())
            }
            Command::DropTracker { tracker_id } => {
                // Losing the tracker cancels any engagement unconditionally.
                self.engagements.remove(&tracker_id);
                if self.trackers.drop_tracker(tracker_id) {
                    self.events.push(SimEvent::TrackerDropped { tracker_id });
                }
                // Idempotent: dropping a missing tracker is not an error.
                Ok(())
            }
            Command::RecordManualUpdate { contact_id, update } => {
                self.apply_manual_update(contact_id, update)
            }
            Command::ResumeAi { contact_id } => {
                let entity = self
                    .find_contact_entity(contact_id)
                    .ok_or(CommandError::NotFound)?;
                if let Ok(mut ai) = self.world.get::<&mut AiState>(entity) {
                    ai.control = AiControl::Active;
                }
                Ok(())
            }
            Command::StartLock { tracker_id } => self.start_lock(tracker_id),
            Command::AbortLock { tracker_id } => {
                let engagement = self
                    .engagements
                    .get(&tracker_id)
                    .ok_or(CommandError::NotFound)?;
                if engagement.phase == EngagementPhase::Fired {
                    // Weapon already away.
                    return Err(CommandError::InvalidState);
                }
                self.engagements.remove(&tracker_id);
                self.events.push(SimEvent::LockAborted { tracker_id });
                Ok(())
            }
            Command::LoadTube { index } => {
                let tube = self
                    .tubes
                    .get_mut(index)
                    .ok_or(CommandError::NotFound)?;
                if !matches!(tube, TubeStatus::Empty) {
                    return Err(CommandError::TubeBusy);
                }
                *tube = TubeStatus::Loading {
                    remaining_secs: self.config.weapons.load_time_secs,
                };
                Ok(())
            }
            Command::Fire { tracker_id } => self.fire(tracker_id),
            Command::SetOwnshipCourse { course_deg } => {
                self.set_ownship_kinematics(|kin| kin.course_deg = course_deg.rem_euclid(360.0))
            }
            Command::SetOwnshipSpeed { speed_kts } => {
                self.set_ownship_kinematics(|kin| kin.speed_kts = speed_kts.max(0.0))
            }
            Command::SetOwnshipDepth { depth_ft } => {
                self.set_ownship_kinematics(|kin| kin.depth_ft = depth_ft.max(0.0))
            }
            Command::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                Ok(())
            }
            Command::RevealTruth { on } => {
                self.reveal_truth = on;
                Ok(())
            }
            Command::ResetMission => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Apply a manual kinematic update and flip the contact to `Overridden`
    /// in the same step — no AI motion can intervene this tick.
    fn apply_manual_update(
        &mut self,
        contact_id: u32,
        update: ManualUpdate,
    ) -> Result<(), CommandError> {
        let entity = self
            .find_contact_entity(contact_id)
            .ok_or(CommandError::NotFound)?;
        if let Ok(mut kin) = self.world.get::<&mut Kinematics>(entity) {
            if let Some(course) = update.course_deg {
                kin.course_deg = course.rem_euclid(360.0);
            }
            if let Some(speed) = update.speed_kts {
                kin.speed_kts = speed.max(0.0);
            }
            if let Some(depth) = update.depth_ft {
                kin.depth_ft = depth.max(0.0);
            }
        }
        if let Ok(mut ai) = self.world.get::<&mut AiState>(entity) {
            ai.control = AiControl::Overridden;
        }
        Ok(())
    }

    fn start_lock(&mut self, tracker_id: u32) -> Result<(), CommandError> {
        let tracker = self
            .trackers
            .get(tracker_id)
            .ok_or(CommandError::NotFound)?;
        // No firing solution, nothing to lock on.
        if tracker.solution.is_none() {
            return Err(CommandError::InvalidState);
        }
        if self.engagements.contains_key(&tracker_id) {
            // Already detecting, locked, or fired.
            return Err(CommandError::InvalidState);
        }
        // A target above the search ceiling never reaches Detecting.
        let (_, range_yd) =
            systems::weapons::lock_geometry(&self.world, &self.trackers, &self.config.weapons, tracker_id)
                .ok_or(CommandError::InvalidState)?;

        let cfg = &self.config.weapons;
        let countdown_secs = cfg.base_lock_secs * (1.0 + range_yd / cfg.lock_range_factor_yd);
        self.engagements
            .insert(tracker_id, EngagementState::detecting(tracker_id, countdown_secs));
        self.events.push(SimEvent::LockStarted {
            tracker_id,
            countdown_secs,
        });
        Ok(())
    }

    fn fire(&mut self, tracker_id: u32) -> Result<(), CommandError> {
        if self.trackers.get(tracker_id).is_none() {
            return Err(CommandError::NotFound);
        }
        // Tracker known but no lock sequence underway: an idle fire is an
        // illegal transition, not a missing target.
        let engagement = self
            .engagements
            .get(&tracker_id)
            .ok_or(CommandError::InvalidState)?;
        if engagement.phase != EngagementPhase::Locked {
            return Err(CommandError::InvalidState);
        }
        let tube = self
            .tubes
            .iter()
            .position(|t| matches!(t, TubeStatus::Loaded))
            .ok_or(CommandError::InvalidState)?;
        let (_, range_yd) =
            systems::weapons::lock_geometry(&self.world, &self.trackers, &self.config.weapons, tracker_id)
                .ok_or(CommandError::InvalidState)?;

        let cfg = &self.config.weapons;
        // A tight solution improves the shot; a flat spread degrades it.
        let pk = match self.trackers.get(tracker_id).and_then(|t| t.solution) {
            Some(solution) => cfg.base_pk * (1.0 - 0.3 * solution.spread),
            None => cfg.base_pk * 0.5,
        };
        let run_secs = range_yd / (cfg.weapon_speed_kts * conn_core::constants::KNOTS_TO_YDS_PER_SEC);

        self.tubes[tube] = TubeStatus::Empty;
        if let Some(eng) = self.engagements.get_mut(&tracker_id) {
            eng.phase = EngagementPhase::Fired;
            eng.remaining_secs = run_secs;
            eng.tube = Some(tube);
            eng.pk = pk;
        }
        self.events.push(SimEvent::WeaponFired { tracker_id, tube });
        Ok(())
    }

    fn set_ownship_kinematics(
        &mut self,
        apply: impl FnOnce(&mut Kinematics),
    ) -> Result<(), CommandError> {
        let entity = {
            let mut q = self.world.query::<(&Ownship, &Kinematics)>();
            q.iter().next().map(|(e, _)| e)
        }
        .ok_or(CommandError::NotFound)?;
        if let Ok(mut kin) = self.world.get::<&mut Kinematics>(entity) {
            apply(&mut kin);
        }
        self.record_ownship_leg();
        Ok(())
    }

    /// Check ownship kinematics against the open leg; a course or speed
    /// change opens a new leg, which is a solver recompute trigger.
    fn record_ownship_leg(&mut self) {
        if let Some((pos, kin)) = systems::movement::ownship_state(&self.world) {
            if self
                .legs
                .observe(self.time.elapsed_secs, pos, kin.course_deg, kin.speed_kts)
            {
                tracing::debug!(
                    t = self.time.elapsed_secs,
                    course = kin.course_deg,
                    speed = kin.speed_kts,
                    "ownship leg opened"
                );
                self.trackers.mark_all_dirty();
            }
        }
    }

    fn find_contact_entity(&self, contact_id: u32) -> Option<hecs::Entity> {
        let mut q = self.world.query::<(&Contact, &ContactMeta)>();
        q.iter()
            .find(|(_, (_, meta))| meta.contact_id == contact_id)
            .map(|(e, _)| e)
    }

    /// Run all systems in order for one tick of `dt` seconds.
    fn run_systems(&mut self, dt: f64) {
        // 1. Clock advances ground truth.
        systems::movement::run(&mut self.world, dt);

        // 2. Sonar samples bearings on its own cadence.
        if self.time.elapsed_secs >= self.next_sample_secs {
            self.next_sample_secs = self.time.elapsed_secs + self.config.sensor.sample_interval_secs;
            let observations = systems::sensor::run(
                &self.world,
                &mut self.rng,
                &self.config.sensor,
                self.time.elapsed_secs,
            );

            // 3. Route observations: designated sources feed their tracker,
            //    the rest surface as raw detections for designation.
            self.detections.clear();
            for obs in observations {
                match self.trackers.tracker_for_contact(obs.contact_id) {
                    Some(tracker_id) => self.trackers.record_observation(
                        tracker_id,
                        obs,
                        self.config.tracker.history_retention_secs,
                    ),
                    None => self.detections.push(DetectionView {
                        contact_id: obs.contact_id,
                        bearing_deg: obs.bearing_deg,
                    }),
                }
            }
        }

        // 4. Classification threshold.
        self.classify_trackers();

        // 5. Solver recompute for dirty trackers.
        systems::tma::run(&mut self.trackers, &self.legs, &self.config.tma);

        // 6. Contact AI (skips overridden contacts).
        if systems::contact_ai::run(&mut self.world, dt) {
            self.ownship_destroyed = true;
        }

        // 7. Weapon control.
        systems::weapons::run(
            &mut self.world,
            &mut self.engagements,
            &mut self.trackers,
            &mut self.tubes,
            &mut self.rng,
            &self.config.weapons,
            dt,
            &mut self.events,
        );

        // 8. Mission evaluation, with terminal latch.
        let eval = systems::mission::evaluate(
            &self.world,
            &self.trackers,
            &self.engagements,
            self.ownship_destroyed,
            self.ever_alerted,
        );
        self.alert = eval.alert;
        if self.alert != AlertLevel::Normal {
            self.ever_alerted = true;
        }
        if eval.outcome != MissionOutcome::InProgress {
            self.outcome = eval.outcome;
            tracing::info!(outcome = ?eval.outcome, tick = self.time.tick, "mission over");
            self.events.push(SimEvent::MissionOver {
                outcome: eval.outcome,
            });
        }
    }

    /// Report `Unknown` until the accumulation threshold is met, then the
    /// truth class via the side-table (never consulted by the solver).
    fn classify_trackers(&mut self) {
        let now = self.time.elapsed_secs;
        let threshold = self.config.tracker.classify_after_secs;
        let ids = self.trackers.ids();
        for tracker_id in ids {
            let due = match self.trackers.get(tracker_id) {
                Some(t) => {
                    t.classification == Classification::Unknown
                        && now - t.designated_at_secs >= threshold
                }
                None => false,
            };
            if !due {
                continue;
            }
            let Some(contact_id) = self.trackers.linked_contact(tracker_id) else {
                continue;
            };
            let class = {
                let mut q = self.world.query::<(&Contact, &ContactMeta)>();
                q.iter()
                    .find(|(_, (_, meta))| meta.contact_id == contact_id)
                    .map(|(_, (_, meta))| meta.class)
            };
            if let Some(class) = class {
                let classification = class.as_classification();
                if let Some(tracker) = self.trackers.get_mut(tracker_id) {
                    tracker.classification = classification;
                }
                self.events.push(SimEvent::TrackerClassified {
                    tracker_id,
                    classification,
                });
            }
        }
    }
}
