//! Replicas that apply the same session log must agree, whatever pace the
//! host drives them at.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use multiblaster_core::commands::{PlayerInput, TimedEvent};
use multiblaster_core::components::ClientMetrics;
use multiblaster_core::constants::{FIELD_SIZE, MAX_AXIS_SPEED, PROJECTILE_MAX_AGE};
use multiblaster_core::state::WorldSnapshot;
use multiblaster_core::types::PlayerId;
use multiblaster_sim::{SimConfig, SimulationEngine};

const INITIALS: [&str; 4] = ["AB", "CD", "EF", "AB"];

/// A busy random session: joins, leaves, thrusting, firing and renames.
fn generate_log(seed: u64, players: u64, duration_ms: u64) -> Vec<TimedEvent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut log: Vec<TimedEvent> = (0..players)
        .map(|id| TimedEvent::joined(id * 7, PlayerId(id)))
        .collect();

    let mut time_ms = players * 7;
    while time_ms < duration_ms {
        time_ms += rng.gen_range(1..40);
        let player_id = PlayerId(rng.gen_range(0..players));
        let input = match rng.gen_range(0..10) {
            0 => PlayerInput::LeftThruster {
                active: rng.gen_bool(0.5),
            },
            1 => PlayerInput::RightThruster {
                active: rng.gen_bool(0.5),
            },
            2 | 3 => PlayerInput::ForwardThruster {
                active: rng.gen_bool(0.7),
            },
            4..=7 => PlayerInput::FireBlaster,
            8 => PlayerInput::SetInitials {
                initials: INITIALS[rng.gen_range(0..INITIALS.len())].to_owned(),
            },
            _ => PlayerInput::SendMetrics {
                metrics: ClientMetrics {
                    fps: rng.gen_range(20.0..60.0),
                    latency_ms: rng.gen_range(10.0..200.0),
                    backlog: rng.gen_range(0.0..5.0),
                },
            },
        };
        log.push(TimedEvent::input(time_ms, player_id, input));

        if rng.gen_ratio(1, 200) {
            log.push(TimedEvent::left(time_ms, player_id));
            log.push(TimedEvent::joined(time_ms, player_id));
        }
    }
    log
}

fn replay(seed: u64, log: &[TimedEvent], end_ms: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed });
    engine.apply_all(log.iter().cloned());
    engine.run_until(end_ms);
    engine
}

/// Snapshot JSON without the per-drain event list.
fn state_json(mut snapshot: WorldSnapshot) -> String {
    snapshot.events.clear();
    serde_json::to_string(&snapshot).unwrap()
}

#[test]
fn test_same_log_same_seed_is_byte_identical() {
    let log = generate_log(7, 4, 20_000);
    let mut a = replay(99, &log, 21_000);
    let mut b = replay(99, &log, 21_000);

    let json_a = serde_json::to_string(&a.snapshot()).unwrap();
    let json_b = serde_json::to_string(&b.snapshot()).unwrap();
    assert_eq!(json_a, json_b, "replicas diverged on the same log");
}

#[test]
fn test_replicas_agree_after_every_event() {
    let log = generate_log(11, 3, 5_000);
    let mut a = SimulationEngine::new(SimConfig::default());
    let mut b = SimulationEngine::new(SimConfig::default());

    for entry in &log {
        a.apply(entry.clone());
        b.apply(entry.clone());
        assert_eq!(
            serde_json::to_string(&a.snapshot()).unwrap(),
            serde_json::to_string(&b.snapshot()).unwrap(),
            "diverged at t={}",
            entry.time_ms
        );
    }
}

#[test]
fn test_host_pacing_does_not_change_outcome() {
    let log = generate_log(3, 4, 10_000);
    let mut smooth = replay(5, &log, 11_000);

    // Same log, but the host drives the clock in uneven bursts between events.
    let mut bursty = SimulationEngine::new(SimConfig { seed: 5 });
    let mut pacing = ChaCha8Rng::seed_from_u64(1234);
    for entry in &log {
        let now = bursty.time().now_ms;
        if entry.time_ms > now && pacing.gen_bool(0.5) {
            bursty.run_until(pacing.gen_range(now..=entry.time_ms));
        }
        bursty.apply(entry.clone());
    }
    bursty.run_until(11_000);

    assert_eq!(state_json(smooth.snapshot()), state_json(bursty.snapshot()));
}

#[test]
fn test_different_seeds_diverge() {
    let log = generate_log(7, 2, 1_000);
    let mut a = replay(1, &log, 1_000);
    let mut b = replay(2, &log, 1_000);
    assert_ne!(state_json(a.snapshot()), state_json(b.snapshot()));
}

#[test]
fn test_state_stays_in_bounds_over_long_session() {
    let log = generate_log(21, 5, 60_000);
    let mut engine = SimulationEngine::new(SimConfig::default());

    for chunk in log.chunks(50) {
        engine.apply_all(chunk.iter().cloned());
        let snapshot = engine.snapshot();

        for ship in &snapshot.ships {
            assert!((0.0..FIELD_SIZE).contains(&ship.position.x), "{:?}", ship.position);
            assert!((0.0..FIELD_SIZE).contains(&ship.position.y), "{:?}", ship.position);
            assert!(ship.velocity.x.abs() <= MAX_AXIS_SPEED);
            assert!(ship.velocity.y.abs() <= MAX_AXIS_SPEED);
            assert!((0.0..TAU).contains(&ship.heading), "heading {}", ship.heading);
        }
        for projectile in &snapshot.projectiles {
            assert!((0.0..FIELD_SIZE).contains(&projectile.position.x));
            assert!((0.0..FIELD_SIZE).contains(&projectile.position.y));
            assert!(projectile.age <= PROJECTILE_MAX_AGE);
        }

        // Unique initials across live ships.
        let mut named: Vec<&str> = snapshot
            .ships
            .iter()
            .map(|s| s.initials.as_str())
            .filter(|i| !i.is_empty())
            .collect();
        let total = named.len();
        named.sort_unstable();
        named.dedup();
        assert_eq!(named.len(), total, "initials held twice");

        // Every named ship's score is covered by the ledger.
        for ship in snapshot.ships.iter().filter(|s| !s.initials.is_empty()) {
            let best = snapshot.highscores.get(&ship.initials).copied().unwrap_or(0);
            assert!(best >= ship.score, "{} best {} < score {}", ship.initials, best, ship.score);
        }
    }
}

#[test]
fn test_replay_from_json_log() {
    let log = generate_log(8, 3, 3_000);
    let json = serde_json::to_string(&log).unwrap();
    let parsed: Vec<TimedEvent> = serde_json::from_str(&json).unwrap();

    let direct = replay(42, &log, 3_000).snapshot();
    let from_json = replay(42, &parsed, 3_000).snapshot();
    // Metrics floats may shift in the last bit through JSON; the simulated state may not.
    assert_eq!(
        serde_json::to_string(&direct.ships).unwrap(),
        serde_json::to_string(&from_json.ships).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&direct.projectiles).unwrap(),
        serde_json::to_string(&from_json.projectiles).unwrap()
    );
    assert_eq!(direct.highscores, from_json.highscores);
}
