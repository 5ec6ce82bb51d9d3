#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use glam::DVec2;

    use crate::commands::{PlayerInput, SessionEvent, TimedEvent};
    use crate::components::ClientMetrics;
    use crate::constants::*;
    use crate::enums::HitState;
    use crate::events::SimEvent;
    use crate::state::{MetricStat, MetricsSummary, WorldSnapshot};
    use crate::types::*;

    // ---- Wrap helpers ----

    #[test]
    fn test_wrap_coordinate_keeps_in_range_values() {
        assert_eq!(wrap_coordinate(0.0), 0.0);
        assert_eq!(wrap_coordinate(512.5), 512.5);
        assert_eq!(wrap_coordinate(999.0), 999.0);
    }

    #[test]
    fn test_wrap_coordinate_crosses_edges() {
        assert!((wrap_coordinate(1005.0) - 5.0).abs() < 1e-9);
        assert!((wrap_coordinate(-5.0) - 995.0).abs() < 1e-9);
        // The upper bound itself maps back to the origin.
        assert_eq!(wrap_coordinate(FIELD_SIZE), 0.0);
    }

    #[test]
    fn test_wrap_coordinate_tiny_negative_stays_below_field_size() {
        let wrapped = wrap_coordinate(-1e-17);
        assert!(
            (0.0..FIELD_SIZE).contains(&wrapped),
            "tiny negative wrapped to {wrapped}"
        );
    }

    #[test]
    fn test_wrap_position_both_axes() {
        let wrapped = wrap_position(DVec2::new(-10.0, 1010.0));
        assert!((wrapped.x - 990.0).abs() < 1e-9);
        assert!((wrapped.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-0.2) - (TAU - 0.2)).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.2) - 0.2).abs() < 1e-12);
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(1.0), 1.0);
    }

    #[test]
    fn test_clamp_velocity_per_axis() {
        let clamped = clamp_velocity(DVec2::new(12.0, -30.0));
        assert_eq!(clamped, DVec2::new(MAX_AXIS_SPEED, -MAX_AXIS_SPEED));

        let untouched = clamp_velocity(DVec2::new(3.0, -4.0));
        assert_eq!(untouched, DVec2::new(3.0, -4.0));
    }

    #[test]
    fn test_heading_vector_axes() {
        let east = heading_vector(0.0);
        assert!((east.x - 1.0).abs() < 1e-12);
        assert!(east.y.abs() < 1e-12);

        let south = heading_vector(std::f64::consts::FRAC_PI_2);
        assert!(south.x.abs() < 1e-12);
        assert!((south.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spawn_area_inside_field() {
        assert!(SPAWN_MARGIN + SPAWN_SPAN <= FIELD_SIZE - SPAWN_MARGIN + 1e-9);
        assert!((SPAWN_SPAN - 920.0).abs() < 1e-9);
    }

    // ---- Wire format ----

    /// Session events use a `type` tag so the replication layer can log them as plain JSON.
    #[test]
    fn test_session_event_wire_format() {
        let event = TimedEvent::input(150, PlayerId(7), PlayerInput::FireBlaster);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"time_ms":150,"event":{"type":"Input","player_id":7,"input":{"type":"FireBlaster"}}}"#
        );

        let back: TimedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_session_event_parses_hand_written_log() {
        let log = r#"[
            {"time_ms": 0, "event": {"type": "Joined", "player_id": 1}},
            {"time_ms": 20, "event": {"type": "Input", "player_id": 1,
                "input": {"type": "SetInitials", "initials": "AB"}}},
            {"time_ms": 40, "event": {"type": "Input", "player_id": 1,
                "input": {"type": "ForwardThruster", "active": true}}},
            {"time_ms": 90, "event": {"type": "Left", "player_id": 1}}
        ]"#;
        let events: Vec<TimedEvent> = serde_json::from_str(log).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[1].event,
            SessionEvent::Input {
                player_id: PlayerId(1),
                input: PlayerInput::SetInitials {
                    initials: "AB".into()
                },
            }
        );
        assert_eq!(events[3].event, SessionEvent::Left { player_id: PlayerId(1) });
    }

    #[test]
    fn test_hit_state_serde() {
        let json = serde_json::to_string(&HitState::Debris(12)).unwrap();
        let back: HitState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HitState::Debris(12));
        assert!(back.is_debris());
        assert!(!HitState::Alive.is_debris());
    }

    #[test]
    fn test_sim_event_serde() {
        let event = SimEvent::ShipHit {
            victim: PlayerId(2),
            shooter: None,
            projectile_id: 9,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"ShipHit""#));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    /// An empty snapshot stays small enough to broadcast every tick.
    #[test]
    fn test_empty_snapshot_serde() {
        let snapshot = WorldSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time, snapshot.time);
        assert!(back.ships.is_empty());
        assert!(
            json.len() < 512,
            "Empty snapshot should be <512B, was {} bytes",
            json.len()
        );
    }

    // ---- Metrics ----

    #[test]
    fn test_metric_stat_from_samples() {
        assert_eq!(MetricStat::from_samples(Vec::<f64>::new()), None);

        let stat = MetricStat::from_samples([10.0, 30.0, 20.0]).unwrap();
        assert!((stat.avg - 20.0).abs() < 1e-12);
        assert_eq!(stat.min, 10.0);
        assert_eq!(stat.max, 30.0);
    }

    #[test]
    fn test_metrics_summary_counts_reporters() {
        let reports = [
            ClientMetrics {
                fps: 60.0,
                latency_ms: 40.0,
                backlog: 0.0,
            },
            ClientMetrics {
                fps: 30.0,
                latency_ms: 120.0,
                backlog: 4.0,
            },
        ];
        let summary = MetricsSummary::from_reports(3, reports.iter());
        assert_eq!(summary.players, 3);
        assert_eq!(summary.reporting, 2);
        assert_eq!(summary.fps.unwrap().max, 60.0);
        assert!((summary.latency_ms.unwrap().avg - 80.0).abs() < 1e-12);
        assert_eq!(summary.backlog.unwrap().min, 0.0);
    }
}
