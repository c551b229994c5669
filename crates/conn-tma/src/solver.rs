//! The bearings-only solver: range triangulation over a candidate grid plus
//! velocity triage.
//!
//! Every call is a full recompute from {bearing history, leg history} — no
//! incremental state is carried between calls, so a solution is always
//! reproducible from stored history alone.
//!
//! Candidate geometry: a target at assumed range R along the first observed
//! bearing, moving with a candidate (course, speed), produces a predicted
//! bearing track over ownship's reconstructed positions. The score of a
//! candidate is the mean squared bearing residual against the observed
//! history. With bearings from a single ownship leg the score curve over R
//! is nearly flat (scale-invariant geometry); a maneuver bends it into a
//! valley whose minima are the range candidates.

use conn_core::config::TmaConfig;
use conn_core::error::SolveError;
use conn_core::tma::{BearingObservation, RangeSolution, TmaSolution};
use conn_core::types::{angle_diff_deg, Position};

use crate::legs::LegHistory;

const KNOTS_TO_YDS_PER_SEC: f64 = conn_core::constants::KNOTS_TO_YDS_PER_SEC;

/// Guard added to the best score before the ambiguity ratio is applied, so
/// a noiseless history does not collapse the threshold to exactly zero. The
/// floor itself scales with the observed fit noise.
const MIN_SCORE_DEG2: f64 = 1e-4;

/// Solve for a target solution from bearing history and ownship legs.
///
/// Fails with `InsufficientData` below two observations; otherwise always
/// produces a solution, with the range left `Ambiguous` when the maneuver
/// baseline cannot resolve it.
pub fn solve(
    bearings: &[BearingObservation],
    legs: &LegHistory,
    cfg: &TmaConfig,
) -> Result<TmaSolution, SolveError> {
    if bearings.len() < 2 || legs.is_empty() {
        return Err(SolveError::InsufficientData);
    }

    // Ownship position at each observation time, from leg dead reckoning.
    let own_track: Vec<(f64, Position)> = bearings
        .iter()
        .map(|obs| {
            let pos = legs
                .position_at(obs.time_secs)
                .ok_or(SolveError::InsufficientData)?;
            Ok((obs.time_secs, pos))
        })
        .collect::<Result<_, SolveError>>()?;

    let distinct_legs = legs.distinct_legs_spanning(bearings.iter().map(|o| o.time_secs));

    // Range-score curve: best velocity-triage score at each candidate range.
    let grid = log_range_grid(cfg);
    let mut curve: Vec<RangeFit> = Vec::with_capacity(grid.len());
    for &range in &grid {
        curve.push(fit_at_range(range, bearings, &own_track, cfg));
    }

    let best_idx = argmin(&curve);
    let s_min = curve[best_idx].score;
    // The ambiguity band scales with the fit noise itself: under low bearing
    // noise only a genuinely competitive second valley survives, instead of
    // one propped up by a fixed floor.
    let threshold = (s_min + MIN_SCORE_DEG2) * cfg.ambiguity_ratio;

    // Fewer than two legs: the whole candidate family fits. Range stays
    // null; report the full bracket and a course/speed guess with max spread.
    if distinct_legs < 2 {
        let best = refine_velocity(grid[best_idx], curve[best_idx], bearings, &own_track, cfg);
        tracing::debug!(
            obs = bearings.len(),
            legs = distinct_legs,
            "single-leg geometry, range unresolved"
        );
        return Ok(TmaSolution {
            range: RangeSolution::Ambiguous {
                near_yd: cfg.min_range_yd,
                far_yd: cfg.max_range_yd,
            },
            course_deg: best.course_deg,
            speed_kts: best.speed_kts,
            spread: 1.0,
            rms_residual_deg: best.score.sqrt(),
        });
    }

    // Contiguous below-threshold segments of the curve; each is one
    // candidate minimum (near/far pair when two survive).
    let segments = below_threshold_segments(&curve, threshold);
    let spread = log_width(&grid, &segments, cfg);

    if segments.len() >= 2 {
        // Two geometrically consistent ranges: the R1/R2 ambiguity pair.
        let mut minima: Vec<(f64, f64)> = segments
            .iter()
            .map(|&(lo, hi)| {
                let i = (lo..=hi)
                    .min_by(|&a, &b| cmp_score(&curve, a, b))
                    .unwrap_or(lo);
                (grid[i], curve[i].score)
            })
            .collect();
        minima.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (r_a, _) = minima[0];
        let (r_b, _) = minima[1];
        let best = refine_velocity(grid[best_idx], curve[best_idx], bearings, &own_track, cfg);
        return Ok(TmaSolution {
            range: RangeSolution::Ambiguous {
                near_yd: r_a.min(r_b),
                far_yd: r_a.max(r_b),
            },
            course_deg: best.course_deg,
            speed_kts: best.speed_kts,
            spread,
            rms_residual_deg: best.score.sqrt(),
        });
    }

    // Single surviving minimum: narrow the range between the neighboring
    // grid points, re-fitting the velocity at every probe so the range and
    // velocity estimates converge jointly.
    let lo = grid[best_idx.saturating_sub(1)];
    let hi = grid[(best_idx + 1).min(grid.len() - 1)];
    let (range_yd, best) = refine_range(lo, hi, bearings, &own_track, cfg);

    Ok(TmaSolution {
        range: RangeSolution::Resolved { range_yd },
        course_deg: best.course_deg,
        speed_kts: best.speed_kts,
        spread,
        rms_residual_deg: best.score.sqrt(),
    })
}

/// Best-fit velocity cell at one candidate range.
#[derive(Debug, Clone, Copy)]
struct RangeFit {
    course_deg: f64,
    speed_kts: f64,
    score: f64,
}

/// Mean squared bearing residual (deg²) for one candidate geometry.
fn score_candidate(
    anchor: Position,
    course_deg: f64,
    speed_kts: f64,
    t0: f64,
    bearings: &[BearingObservation],
    own_track: &[(f64, Position)],
) -> f64 {
    let spd = speed_kts * KNOTS_TO_YDS_PER_SEC;
    let mut sum = 0.0;
    for (obs, (t, own)) in bearings.iter().zip(own_track) {
        let target = anchor.offset(course_deg, spd * (t - t0));
        let predicted = own.bearing_to(&target);
        let r = angle_diff_deg(obs.bearing_deg, predicted);
        sum += r * r;
    }
    sum / bearings.len() as f64
}

/// Coarse velocity-triage sweep at a fixed candidate range.
fn fit_at_range(
    range_yd: f64,
    bearings: &[BearingObservation],
    own_track: &[(f64, Position)],
    cfg: &TmaConfig,
) -> RangeFit {
    let t0 = bearings[0].time_secs;
    let anchor = own_track[0].1.offset(bearings[0].bearing_deg, range_yd);

    let mut best = RangeFit {
        course_deg: 0.0,
        speed_kts: 0.0,
        score: f64::INFINITY,
    };

    let mut course = 0.0;
    while course < 360.0 {
        let mut speed = 0.0;
        while speed <= cfg.max_speed_kts {
            let score = score_candidate(anchor, course, speed, t0, bearings, own_track);
            if score < best.score {
                best = RangeFit {
                    course_deg: course,
                    speed_kts: speed,
                    score,
                };
            }
            speed += cfg.speed_step_kts;
        }
        course += cfg.course_step_deg;
    }
    best
}

/// Refine the velocity cell around a coarse best fit, halving the grid step
/// each pass. Coarser grids converge faster but with larger error; the
/// refinement passes recover accuracy around the winning cell only.
fn refine_velocity(
    range_yd: f64,
    coarse: RangeFit,
    bearings: &[BearingObservation],
    own_track: &[(f64, Position)],
    cfg: &TmaConfig,
) -> RangeFit {
    let t0 = bearings[0].time_secs;
    let anchor = own_track[0].1.offset(bearings[0].bearing_deg, range_yd);

    let mut best = coarse;
    let mut course_step = cfg.course_step_deg / 2.0;
    let mut speed_step = cfg.speed_step_kts / 2.0;

    for _ in 0..cfg.refine_passes {
        let center = best;
        for ci in -2i32..=2 {
            for si in -2i32..=2 {
                let course = (center.course_deg + ci as f64 * course_step).rem_euclid(360.0);
                let speed = (center.speed_kts + si as f64 * speed_step)
                    .clamp(0.0, cfg.max_speed_kts);
                let score = score_candidate(anchor, course, speed, t0, bearings, own_track);
                if score < best.score {
                    best = RangeFit {
                        course_deg: course,
                        speed_kts: speed,
                        score,
                    };
                }
            }
        }
        course_step /= 2.0;
        speed_step /= 2.0;
    }
    best
}

/// Golden-section search for the range minimum between two bracket points.
///
/// Works in log-range so the stopping tolerance is relative. Each probe
/// re-runs the coarse velocity sweep plus the refinement passes at that
/// range; scoring range candidates against the coarse grid alone would bias
/// the minimum by whatever the grid mismatch happens to be.
fn refine_range(
    lo: f64,
    hi: f64,
    bearings: &[BearingObservation],
    own_track: &[(f64, Position)],
    cfg: &TmaConfig,
) -> (f64, RangeFit) {
    const INV_PHI: f64 = 0.618_033_988_749_895;
    // 0.1% relative range tolerance.
    const TOL_LOG: f64 = 1e-3;

    let score_at = |range_yd: f64| {
        let coarse = fit_at_range(range_yd, bearings, own_track, cfg);
        refine_velocity(range_yd, coarse, bearings, own_track, cfg)
    };

    let (mut a, mut b) = (lo.ln(), hi.ln());
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = score_at(c.exp());
    let mut fd = score_at(d.exp());
    while b - a > TOL_LOG {
        if fc.score <= fd.score {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = score_at(c.exp());
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = score_at(d.exp());
        }
    }
    if fc.score <= fd.score {
        (c.exp(), fc)
    } else {
        (d.exp(), fd)
    }
}

fn log_range_grid(cfg: &TmaConfig) -> Vec<f64> {
    let n = cfg.range_grid_points.max(2);
    let log_lo = cfg.min_range_yd.ln();
    let log_hi = cfg.max_range_yd.ln();
    (0..n)
        .map(|i| (log_lo + (log_hi - log_lo) * i as f64 / (n - 1) as f64).exp())
        .collect()
}

fn argmin(curve: &[RangeFit]) -> usize {
    let mut idx = 0;
    for i in 1..curve.len() {
        if curve[i].score < curve[idx].score {
            idx = i;
        }
    }
    idx
}

fn cmp_score(curve: &[RangeFit], a: usize, b: usize) -> std::cmp::Ordering {
    curve[a].score.total_cmp(&curve[b].score)
}

/// Contiguous index segments of the curve with score at or below threshold.
fn below_threshold_segments(curve: &[RangeFit], threshold: f64) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;
    for (i, fit) in curve.iter().enumerate() {
        if fit.score <= threshold {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            segments.push((s, i - 1));
        }
    }
    if let Some(s) = start {
        segments.push((s, curve.len() - 1));
    }
    segments
}

/// Probable-error spread: the total log-range width of the below-threshold
/// valley, normalized by the grid's full log-range span. A tight minimum
/// reads near zero; a flat curve (short baseline) reads near one.
fn log_width(grid: &[f64], segments: &[(usize, usize)], cfg: &TmaConfig) -> f64 {
    let span = (cfg.max_range_yd / cfg.min_range_yd).ln();
    let mut width = 0.0;
    for &(lo, hi) in segments {
        // A single-point segment still occupies one grid cell of width.
        let hi_r = grid[(hi + 1).min(grid.len() - 1)];
        let lo_r = grid[lo];
        width += (hi_r / lo_r).ln();
    }
    (width / span).clamp(0.0, 1.0)
}
