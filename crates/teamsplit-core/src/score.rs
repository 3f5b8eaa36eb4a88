// Player and team scoring from weighted per-match rates.

use crate::config::ScoreWeights;
use crate::player::Player;

/// Linear combination of the three per-match rates.
///
/// No normalization or clamping: an all-zero player scores 0 and the result
/// grows with every rate as long as the weights are non-negative.
pub fn compute_score(player: &Player, weights: &ScoreWeights) -> f64 {
    player.goals_per_match * weights.goal_weight
        + player.assists_per_match * weights.assist_weight
        + player.points_per_match * weights.point_weight
}

/// Sum of member scores. An empty team scores 0.
pub fn compute_team_score(team: &[Player], weights: &ScoreWeights) -> f64 {
    team.iter().map(|p| compute_score(p, weights)).sum()
}
