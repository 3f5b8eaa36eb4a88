// Presentation helpers: best player, averages, leaderboard, team reports.

use serde::Serialize;

use crate::config::ScoreWeights;
use crate::partition::{Strategy, TeamSplit};
use crate::player::Player;
use crate::score::compute_score;

// ---------------------------------------------------------------------------
// Roster summaries
// ---------------------------------------------------------------------------

/// Highest-scoring player. The earliest one wins ties.
pub fn best_player<'a>(players: &'a [Player], weights: &ScoreWeights) -> Option<&'a Player> {
    let mut best: Option<(&Player, f64)> = None;
    for player in players {
        let score = compute_score(player, weights);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((player, score)),
        }
    }
    best.map(|(p, _)| p)
}

/// Mean per-match rates across a group of players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageRates {
    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub points_per_match: f64,
}

/// Average the per-match rates. All zeros for an empty slice.
pub fn average_rates(players: &[Player]) -> AverageRates {
    if players.is_empty() {
        return AverageRates::default();
    }
    let n = players.len() as f64;
    AverageRates {
        goals_per_match: players.iter().map(|p| p.goals_per_match).sum::<f64>() / n,
        assists_per_match: players.iter().map(|p| p.assists_per_match).sum::<f64>() / n,
        points_per_match: players.iter().map(|p| p.points_per_match).sum::<f64>() / n,
    }
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub name: String,
    pub score: f64,
}

/// Players ordered by descending score, ranks starting at 1. Equal scores
/// keep roster order.
pub fn leaderboard(players: &[Player], weights: &ScoreWeights) -> Vec<RankedPlayer> {
    let mut scored: Vec<(&Player, f64)> = players
        .iter()
        .map(|p| (p, compute_score(p, weights)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (p, score))| RankedPlayer {
            rank: i + 1,
            name: p.name.clone(),
            score,
        })
        .collect()
}

/// Serializable roster overview for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub best_player: Option<String>,
    pub averages: AverageRates,
    pub leaderboard: Vec<RankedPlayer>,
}

impl RosterSummary {
    pub fn new(players: &[Player], weights: &ScoreWeights) -> Self {
        RosterSummary {
            best_player: best_player(players, weights).map(|p| p.name.clone()),
            averages: average_rates(players),
            leaderboard: leaderboard(players, weights),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(best) = &self.best_player {
            out.push_str(&format!("Best player: {best}\n"));
        }
        out.push_str(&format!(
            "Average per match: Goals {:.2} | Assists {:.2} | Points {:.2}\n\n",
            self.averages.goals_per_match,
            self.averages.assists_per_match,
            self.averages.points_per_match
        ));
        for row in &self.leaderboard {
            out.push_str(&format!("{:>3}. {:<28} {:>6.2}\n", row.rank, row.name, row.score));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Split reports
// ---------------------------------------------------------------------------

/// Serializable summary of one split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub strategy: Strategy,
    pub team_a: TeamReport,
    pub team_b: TeamReport,
    pub difference: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub score: f64,
    pub players: Vec<PlayerLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerLine {
    pub name: String,
    pub score: f64,
    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub points_per_match: f64,
}

impl PlayerLine {
    fn new(player: &Player, weights: &ScoreWeights) -> Self {
        PlayerLine {
            name: player.name.clone(),
            score: compute_score(player, weights),
            goals_per_match: player.goals_per_match,
            assists_per_match: player.assists_per_match,
            points_per_match: player.points_per_match,
        }
    }
}

impl TeamReport {
    fn new(team: &[Player], weights: &ScoreWeights) -> Self {
        let players: Vec<PlayerLine> = team.iter().map(|p| PlayerLine::new(p, weights)).collect();
        TeamReport {
            score: players.iter().map(|p| p.score).sum(),
            players,
        }
    }
}

impl SplitReport {
    pub fn new(split: &TeamSplit, weights: &ScoreWeights, strategy: Strategy) -> Self {
        let team_a = TeamReport::new(&split.team_a, weights);
        let team_b = TeamReport::new(&split.team_b, weights);
        SplitReport {
            strategy,
            difference: (team_a.score - team_b.score).abs(),
            team_a,
            team_b,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Same layout as `format_teams`, headed by the strategy used.
    pub fn to_text(&self) -> String {
        format!(
            "Strategy: {}\n\n{}",
            self.strategy,
            render_text(&self.team_a, &self.team_b)
        )
    }
}

fn format_team(label: &str, team: &TeamReport) -> String {
    let mut out = format!("{label} (Total Score: {:.2})\n", team.score);
    for p in &team.players {
        out.push_str(&format!(
            "  - {}\n    Score: {:.2} | Goals: {:.2} | Assists: {:.2} | Points: {:.2}\n",
            p.name, p.score, p.goals_per_match, p.assists_per_match, p.points_per_match
        ));
    }
    out
}

fn render_text(team_a: &TeamReport, team_b: &TeamReport) -> String {
    format!(
        "{}\n{}\nDifference: {:.2}\n",
        format_team("Team A", team_a),
        format_team("Team B", team_b),
        (team_a.score - team_b.score).abs()
    )
}

/// Plain-text rendering of a split, suitable for pasting into a message.
pub fn format_teams(split: &TeamSplit, weights: &ScoreWeights) -> String {
    render_text(
        &TeamReport::new(&split.team_a, weights),
        &TeamReport::new(&split.team_b, weights),
    )
}
