//! Passive sonar model.
//!
//! Pure function of the world snapshot, the sensor configuration, and the
//! engine's RNG stream: one noisy bearing candidate per detectable contact.
//! A contact inside the baffle arc astern is never detected regardless of
//! range — a hard exclusion, not a probability.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use conn_core::components::{Contact, ContactMeta};
use conn_core::config::SensorConfig;
use conn_core::enums::VesselClass;
use conn_core::tma::BearingObservation;
use conn_core::types::{angle_diff_deg, Kinematics, Position};

use super::movement;

/// Probability of detection at a given range and radiated source level.
///
/// Guaranteed inside `sure_detect_range_yd`, impossible beyond
/// `max_range_yd`, logistic in propagation loss (20·log10 r) against the
/// contact's source level between.
pub fn detection_probability(range_yd: f64, source_db: f64, cfg: &SensorConfig) -> f64 {
    if range_yd <= cfg.sure_detect_range_yd {
        return 1.0;
    }
    if range_yd >= cfg.max_range_yd {
        return 0.0;
    }
    let loss_db = 20.0 * (range_yd / cfg.sure_detect_range_yd).log10();
    let budget_db = 20.0 * (cfg.max_range_yd / cfg.sure_detect_range_yd).log10();
    let x = (budget_db / 2.0 + source_db - loss_db) / cfg.detect_slope_db;
    1.0 / (1.0 + (-x).exp())
}

/// Radiated source level for a vessel class (dB offset).
fn source_level_db(class: VesselClass, cfg: &SensorConfig) -> f64 {
    match class {
        VesselClass::Merchant => cfg.source_level_merchant_db,
        VesselClass::Warship => cfg.source_level_warship_db,
        VesselClass::Sub => cfg.source_level_sub_db,
    }
}

/// Bearing noise standard deviation at a given range (degrees).
fn noise_sigma_deg(range_yd: f64, cfg: &SensorConfig) -> f64 {
    cfg.base_noise_deg * (1.0 + range_yd / cfg.noise_ref_range_yd)
}

/// True when a contact bearing sits inside ownship's baffle arc.
fn in_baffles(true_bearing_deg: f64, own_course_deg: f64, cfg: &SensorConfig) -> bool {
    let relative = angle_diff_deg(true_bearing_deg, own_course_deg);
    angle_diff_deg(relative, 180.0).abs() <= cfg.baffle_half_width_deg
}

/// Sample bearings for all live contacts. Contacts are visited in contact-id
/// order so the RNG stream is consumed deterministically.
pub fn run(
    world: &World,
    rng: &mut ChaCha8Rng,
    cfg: &SensorConfig,
    now_secs: f64,
) -> Vec<BearingObservation> {
    let Some((own_pos, own_kin)) = movement::ownship_state(world) else {
        return Vec::new();
    };

    let mut candidates: Vec<(u32, VesselClass, Position)> = {
        let mut q = world.query::<(&Contact, &ContactMeta, &Position, &Kinematics)>();
        q.iter()
            .map(|(_, (_, meta, pos, _))| (meta.contact_id, meta.class, *pos))
            .collect()
    };
    candidates.sort_by_key(|&(id, _, _)| id);

    let mut observations = Vec::new();
    for (contact_id, class, pos) in candidates {
        let bearing = own_pos.bearing_to(&pos);
        if in_baffles(bearing, own_kin.course_deg, cfg) {
            continue;
        }
        let range = own_pos.range_to(&pos);
        let pd = detection_probability(range, source_level_db(class, cfg), cfg);
        if pd < 1.0 && !rng.gen_bool(pd.clamp(0.0, 1.0)) {
            continue;
        }

        let sigma = noise_sigma_deg(range, cfg);
        let noise = Normal::new(0.0, sigma)
            .map(|n| n.sample(rng))
            .unwrap_or(0.0);
        observations.push(BearingObservation {
            time_secs: now_secs,
            bearing_deg: (bearing + noise).rem_euclid(360.0),
            contact_id,
        });
    }
    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pd_monotonic_in_range() {
        let cfg = SensorConfig::default();
        let pd_close = detection_probability(2_000.0, 0.0, &cfg);
        let pd_mid = detection_probability(15_000.0, 0.0, &cfg);
        let pd_far = detection_probability(35_000.0, 0.0, &cfg);
        assert!(pd_close > pd_mid, "close {pd_close} vs mid {pd_mid}");
        assert!(pd_mid > pd_far, "mid {pd_mid} vs far {pd_far}");
    }

    #[test]
    fn test_pd_boundaries() {
        let cfg = SensorConfig::default();
        assert_eq!(detection_probability(500.0, 0.0, &cfg), 1.0);
        assert_eq!(detection_probability(cfg.max_range_yd + 1.0, 0.0, &cfg), 0.0);
    }

    #[test]
    fn test_quiet_class_detects_worse_at_range() {
        let cfg = SensorConfig::default();
        let range = 8_000.0;
        let pd_merchant = detection_probability(range, source_level_db(VesselClass::Merchant, &cfg), &cfg);
        let pd_warship = detection_probability(range, source_level_db(VesselClass::Warship, &cfg), &cfg);
        let pd_sub = detection_probability(range, source_level_db(VesselClass::Sub, &cfg), &cfg);
        assert!(pd_merchant > pd_warship, "merchant {pd_merchant} vs warship {pd_warship}");
        assert!(pd_warship > pd_sub, "warship {pd_warship} vs sub {pd_sub}");
        // Hard cutoffs stay class-independent.
        assert_eq!(
            detection_probability(500.0, source_level_db(VesselClass::Sub, &cfg), &cfg),
            1.0
        );
    }

    #[test]
    fn test_baffle_arc_is_hard_exclusion() {
        let cfg = SensorConfig::default();
        // Ownship heading north: dead astern is 180 true.
        assert!(in_baffles(180.0, 0.0, &cfg));
        assert!(in_baffles(180.0 + cfg.baffle_half_width_deg - 1.0, 0.0, &cfg));
        assert!(!in_baffles(180.0 + cfg.baffle_half_width_deg + 1.0, 0.0, &cfg));
        assert!(!in_baffles(0.0, 0.0, &cfg));
        // Heading east: astern is 270 true.
        assert!(in_baffles(270.0, 90.0, &cfg));
    }

    #[test]
    fn test_noise_grows_with_range() {
        let cfg = SensorConfig::default();
        assert!(noise_sigma_deg(20_000.0, &cfg) > noise_sigma_deg(2_000.0, &cfg));
    }
}
