// Integration tests for teamsplit-core.
//
// These run the library end to end through its public API: CSV roster
// import, selection, both partition strategies, config bootstrap and the
// reports built from a split.

use std::path::{Path, PathBuf};

use teamsplit_core::config::{self, ScoreWeights};
use teamsplit_core::partition::{select_teams, Partitioner, SizeCorrection, Strategy, TeamSplit};
use teamsplit_core::player::Player;
use teamsplit_core::report::{self, RosterSummary, SplitReport};
use teamsplit_core::roster;
use teamsplit_core::score::{compute_score, compute_team_score};
use teamsplit_core::selection;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURES).join(name)
}

fn league_roster() -> Vec<Player> {
    roster::load_roster(&fixture("roster.csv")).expect("fixture roster should load")
}

fn sorted_names(players: &[Player]) -> Vec<String> {
    let mut names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
    names.sort();
    names
}

fn assert_valid_split(input: &[Player], split: &TeamSplit) {
    let mut combined = split.team_a.clone();
    combined.extend(split.team_b.iter().cloned());
    assert_eq!(sorted_names(&combined), sorted_names(input));
    assert!(split.team_a.len().abs_diff(split.team_b.len()) <= 1);
}

/// Smallest achievable difference over every size-valid bipartition.
fn brute_force_difference(players: &[Player], weights: &ScoreWeights) -> f64 {
    let scores: Vec<f64> = players.iter().map(|p| compute_score(p, weights)).collect();
    let n = scores.len();
    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << n) {
        let size_a = mask.count_ones() as usize;
        if size_a.abs_diff(n - size_a) > 1 {
            continue;
        }
        let (mut a, mut b) = (0.0, 0.0);
        for (i, s) in scores.iter().enumerate() {
            if mask & (1 << i) != 0 {
                a += s;
            } else {
                b += s;
            }
        }
        best = best.min((a - b).abs());
    }
    best
}

// ===========================================================================
// Roster import
// ===========================================================================

#[test]
fn fixture_roster_skips_bad_rows() {
    let players = league_roster();

    // Duplicate, zero-match and malformed rows are dropped.
    assert_eq!(players.len(), 10);
    assert_eq!(players[0].name, "Jan Dvořák");
    assert_eq!(players[0].matches, 18);
    assert!(players.iter().all(|p| p.name != "Radek Beneš"));
    assert!(players.iter().all(|p| p.name != "Broken Row"));
}

// ===========================================================================
// Partitioning
// ===========================================================================

#[test]
fn both_strategies_split_the_league() {
    let players = league_roster();
    let weights = ScoreWeights::default();

    let greedy = select_teams(&players, &weights, Strategy::Greedy).unwrap();
    let exhaustive = select_teams(&players, &weights, Strategy::Exhaustive).unwrap();

    assert_valid_split(&players, &greedy);
    assert_valid_split(&players, &exhaustive);
    assert_eq!(greedy.team_a.len(), 5);
    assert_eq!(exhaustive.team_a.len(), 5);

    assert!(exhaustive.difference(&weights) <= greedy.difference(&weights) + 1e-9);
    assert!(
        (exhaustive.difference(&weights) - brute_force_difference(&players, &weights)).abs() < 1e-9
    );
}

#[test]
fn splits_are_deterministic() {
    let players = league_roster();
    let weights = ScoreWeights::default();
    for strategy in [Strategy::Greedy, Strategy::Exhaustive] {
        let first = select_teams(&players, &weights, strategy).unwrap();
        let second = select_teams(&players, &weights, strategy).unwrap();
        assert_eq!(first, second, "{strategy}");
    }
}

#[test]
fn equal_rate_four_player_scenario() {
    let players = roster::load_roster(&fixture("even_four.csv")).unwrap();
    let weights = ScoreWeights {
        goal_weight: 1.0,
        assist_weight: 1.0,
        point_weight: 1.0,
    };

    let split = select_teams(&players, &weights, Strategy::Greedy).unwrap();
    let team_a: Vec<&str> = split.team_a.iter().map(|p| p.name.as_str()).collect();
    let team_b: Vec<&str> = split.team_b.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(team_a, vec!["A", "D"]);
    assert_eq!(team_b, vec!["B", "C"]);
    assert!((compute_team_score(&split.team_a, &weights) - 15.0).abs() < 1e-9);
    assert!((compute_team_score(&split.team_b, &weights) - 15.0).abs() < 1e-9);

    let optimal = select_teams(&players, &weights, Strategy::Exhaustive).unwrap();
    assert_eq!(optimal.difference(&weights), 0.0);
}

#[test]
fn selected_subset_of_five_splits_three_two() {
    let players = league_roster();
    let wanted: Vec<String> = [
        "jan dvořák",
        "Petr Svoboda",
        "Filip Horák",
        "David Marek",
        "Ondřej Veselý",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let lineup = selection::select_players(&players, &wanted).unwrap();
    assert_eq!(lineup.len(), 5);

    for strategy in [Strategy::Greedy, Strategy::Exhaustive] {
        let split = select_teams(&lineup, &ScoreWeights::default(), strategy).unwrap();
        assert_valid_split(&lineup, &split);
        let mut sizes = [split.team_a.len(), split.team_b.len()];
        sizes.sort();
        assert_eq!(sizes, [2, 3]);
    }
}

#[test]
fn size_correction_policies_both_keep_parity() {
    let players = league_roster();
    for correction in [SizeCorrection::BestMove, SizeCorrection::LastAdded] {
        let split = Partitioner::new(ScoreWeights::default(), Strategy::Greedy)
            .with_size_correction(correction)
            .split(&players)
            .unwrap();
        assert_valid_split(&players, &split);
    }
}

#[test]
fn excluding_players_before_split() {
    let players = league_roster();
    let lineup =
        selection::exclude_players(&players, &["David Marek".into(), "Vojtěch Němec".into()])
            .unwrap();
    assert_eq!(lineup.len(), 8);

    let split = select_teams(&lineup, &ScoreWeights::default(), Strategy::Exhaustive).unwrap();
    assert_valid_split(&lineup, &split);
    assert!(split.team_a.iter().chain(&split.team_b).all(|p| p.name != "David Marek"));
}

// ===========================================================================
// Config bootstrap
// ===========================================================================

#[test]
fn defaults_bootstrap_and_drive_partitioner() {
    let project_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let base = std::env::temp_dir().join("teamsplit_it_bootstrap");
    let _ = std::fs::remove_dir_all(&base);
    std::fs::create_dir_all(base.join("defaults")).unwrap();
    std::fs::copy(
        project_root.join("defaults").join(config::CONFIG_FILE_NAME),
        base.join("defaults").join(config::CONFIG_FILE_NAME),
    )
    .unwrap();

    let config = config::load_config(&base).unwrap();
    assert!(base.join("config").join(config::CONFIG_FILE_NAME).exists());
    assert_eq!(config.partition.strategy, Strategy::Greedy);

    // Second run copies nothing.
    assert!(config::ensure_config_files(&base).unwrap().is_empty());

    let players = league_roster();
    selection::check_roster_size(players.len(), &config.roster).unwrap();
    let split = Partitioner::from_config(&config).split(&players).unwrap();
    assert_valid_split(&players, &split);

    let _ = std::fs::remove_dir_all(&base);
}

// ===========================================================================
// Reports
// ===========================================================================

#[test]
fn reports_describe_the_split() {
    let players = league_roster();
    let weights = ScoreWeights::default();
    let split = select_teams(&players, &weights, Strategy::Exhaustive).unwrap();

    let report = SplitReport::new(&split, &weights, Strategy::Exhaustive);
    assert!((report.difference - split.difference(&weights)).abs() < 1e-9);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let listed = json["team_a"]["players"].as_array().unwrap().len()
        + json["team_b"]["players"].as_array().unwrap().len();
    assert_eq!(listed, players.len());

    let text = report::format_teams(&split, &weights);
    for player in &players {
        assert!(text.contains(&format!("  - {}\n", player.name)), "{}", player.name);
    }
}

#[test]
fn roster_summary_leads_with_top_scorer() {
    let players = league_roster();
    let weights = ScoreWeights::default();
    let summary = RosterSummary::new(&players, &weights);

    let board = &summary.leaderboard;
    assert_eq!(board.len(), players.len());
    assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(summary.best_player.as_deref(), Some(board[0].name.as_str()));
}
