// Two-team partitioning: greedy and exhaustive strategies behind one entry point.
//
// Both strategies work on a private, score-sorted list of input indices and
// hand back index assignments; players are only cloned once, when the final
// `TeamSplit` is assembled. The caller's slice is never reordered.

pub mod exhaustive;
pub mod greedy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, ScoreWeights};
use crate::player::Player;
use crate::score::{compute_score, compute_team_score};

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

/// How players are distributed between the two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Descending-score greedy assignment followed by a size-parity pass.
    /// O(n log n), not guaranteed optimal.
    #[default]
    Greedy,
    /// Pruned search over every size-valid bipartition. Optimal, but
    /// exponential in roster size.
    Exhaustive,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "exhaustive" => Ok(Strategy::Exhaustive),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'greedy' or 'exhaustive')"
            )),
        }
    }
}

/// Which player the greedy strategy moves when the teams end up more than
/// one member apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCorrection {
    /// Move the member whose transfer leaves the smallest score difference.
    /// Ties go to the member added last.
    #[default]
    BestMove,
    /// Move the member added last.
    LastAdded,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("player '{name}' has invalid stats: {reason}")]
    InvalidPlayer { name: String, reason: String },
}

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Two disjoint teams covering every input player.
///
/// Members appear in the order they were assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
}

impl TeamSplit {
    /// Total scores of (team A, team B).
    pub fn scores(&self, weights: &ScoreWeights) -> (f64, f64) {
        (
            compute_team_score(&self.team_a, weights),
            compute_team_score(&self.team_b, weights),
        )
    }

    /// Absolute score difference between the teams.
    pub fn difference(&self, weights: &ScoreWeights) -> f64 {
        let (a, b) = self.scores(weights);
        (a - b).abs()
    }

    /// Number of players across both teams.
    pub fn len(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_pair(self) -> (Vec<Player>, Vec<Player>) {
        (self.team_a, self.team_b)
    }
}

// ---------------------------------------------------------------------------
// Internal plumbing shared by the strategies
// ---------------------------------------------------------------------------

/// An input position paired with its precomputed score.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scored {
    pub index: usize,
    pub score: f64,
}

/// Input indices per team, in assignment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub team_a: Vec<usize>,
    pub team_b: Vec<usize>,
}

/// Score every player and sort descending. The sort is stable, so equal
/// scores keep their input order.
fn rank_players(
    players: &[Player],
    weights: &ScoreWeights,
) -> Result<Vec<Scored>, PartitionError> {
    let mut ranked = Vec::with_capacity(players.len());
    for (index, player) in players.iter().enumerate() {
        if !player.has_valid_rates() {
            return Err(PartitionError::InvalidPlayer {
                name: player.name.clone(),
                reason: "per-match rates must be finite and non-negative".into(),
            });
        }
        let score = compute_score(player, weights);
        if !score.is_finite() {
            return Err(PartitionError::InvalidPlayer {
                name: player.name.clone(),
                reason: format!("score is not finite ({score})"),
            });
        }
        ranked.push(Scored { index, score });
    }
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(ranked)
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Scores players and splits them into two teams with the configured strategy.
#[derive(Debug, Clone)]
pub struct Partitioner {
    weights: ScoreWeights,
    strategy: Strategy,
    size_correction: SizeCorrection,
}

impl Partitioner {
    pub fn new(weights: ScoreWeights, strategy: Strategy) -> Self {
        Partitioner {
            weights,
            strategy,
            size_correction: SizeCorrection::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Partitioner {
            weights: config.weights,
            strategy: config.partition.strategy,
            size_correction: config.partition.size_correction,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_size_correction(mut self, size_correction: SizeCorrection) -> Self {
        self.size_correction = size_correction;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Split `players` into two teams.
    ///
    /// Every player lands in exactly one team and the team sizes differ by at
    /// most one. Empty input yields two empty teams; a single player goes to
    /// team A. Fails only when a player's rates are NaN, infinite or
    /// negative.
    pub fn split(&self, players: &[Player]) -> Result<TeamSplit, PartitionError> {
        let ranked = rank_players(players, &self.weights)?;
        debug!(
            "splitting {} players with the {} strategy",
            ranked.len(),
            self.strategy
        );

        let assignment = match self.strategy {
            Strategy::Greedy => greedy::assign(&ranked, self.size_correction),
            Strategy::Exhaustive => exhaustive::assign(&ranked),
        };

        let split = TeamSplit {
            team_a: assignment.team_a.iter().map(|&i| players[i].clone()).collect(),
            team_b: assignment.team_b.iter().map(|&i| players[i].clone()).collect(),
        };

        let (score_a, score_b) = split.scores(&self.weights);
        info!(
            "{} split: team A {} players ({:.2}), team B {} players ({:.2})",
            self.strategy,
            split.team_a.len(),
            score_a,
            split.team_b.len(),
            score_b
        );

        Ok(split)
    }
}

/// One-shot helper: `Partitioner::new(*weights, strategy).split(players)`.
pub fn select_teams(
    players: &[Player],
    weights: &ScoreWeights,
    strategy: Strategy,
) -> Result<TeamSplit, PartitionError> {
    Partitioner::new(*weights, strategy).split(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
