//! World snapshot: the read-only view handed to rendering and UI after each step.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::{ClientMetrics, Thrusters};
use crate::enums::HitState;
use crate::events::SimEvent;
use crate::types::{HighscoreTable, PlayerId, SimTime};

/// Complete visible world state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    /// Live ships in join order.
    pub ships: Vec<ShipView>,
    /// Live projectiles in creation order.
    pub projectiles: Vec<ProjectileView>,
    pub highscores: HighscoreTable,
    /// Ledger merged with unnamed live ships, best first.
    pub leaderboard: Vec<LeaderboardEntry>,
    pub metrics: MetricsSummary,
    /// Events since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A live ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub player_id: PlayerId,
    pub initials: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub thrusters: Thrusters,
    pub score: u32,
    pub hit_state: HitState,
    pub spawn_protected: bool,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub owner: PlayerId,
    pub position: DVec2,
    pub age: u32,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub label: String,
    pub score: u32,
}

/// Aggregate of the metrics players reported through the log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Live ships, reporting or not.
    pub players: usize,
    /// Ships that have reported at least once.
    pub reporting: usize,
    pub fps: Option<MetricStat>,
    pub latency_ms: Option<MetricStat>,
    pub backlog: Option<MetricStat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStat {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricStat {
    /// Summarize a set of samples. Returns `None` when there are none.
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in samples {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        (count > 0).then(|| Self {
            avg: sum / count as f64,
            min,
            max,
        })
    }
}

impl MetricsSummary {
    pub fn from_reports<'a>(
        players: usize,
        reports: impl IntoIterator<Item = &'a ClientMetrics>,
    ) -> Self {
        let reports: Vec<&ClientMetrics> = reports.into_iter().collect();
        Self {
            players,
            reporting: reports.len(),
            fps: MetricStat::from_samples(reports.iter().map(|m| m.fps)),
            latency_ms: MetricStat::from_samples(reports.iter().map(|m| m.latency_ms)),
            backlog: MetricStat::from_samples(reports.iter().map(|m| m.backlog)),
        }
    }
}
