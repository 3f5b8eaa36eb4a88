// Player records as delivered by the roster importer.

use serde::{Deserialize, Serialize};

/// Per-player season totals plus the derived per-match rates.
///
/// The rate fields are what the score model reads. They are computed once,
/// when the record is built, and treated as authoritative afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub matches: u32,
    pub goals: f64,
    pub assists: f64,
    pub points: f64,
    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub points_per_match: f64,
}

impl Player {
    /// Build a player from season totals, deriving the per-match rates.
    ///
    /// A player with zero matches gets zero rates rather than NaN.
    pub fn from_totals(
        name: impl Into<String>,
        matches: u32,
        goals: f64,
        assists: f64,
        points: f64,
    ) -> Self {
        Player {
            name: name.into(),
            matches,
            goals,
            assists,
            points,
            goals_per_match: per_match(goals, matches),
            assists_per_match: per_match(assists, matches),
            points_per_match: per_match(points, matches),
        }
    }

    /// Whether all three rate fields are finite and non-negative.
    pub fn has_valid_rates(&self) -> bool {
        [
            self.goals_per_match,
            self.assists_per_match,
            self.points_per_match,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

fn per_match(total: f64, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        total / matches as f64
    }
}
