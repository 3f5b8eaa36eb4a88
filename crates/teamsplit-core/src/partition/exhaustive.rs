// Exhaustive bipartition search with a team-size cap and branch-and-bound.
//
// Every player is placed on team A or team B in descending-score order. No
// team may exceed ceil(n/2) members, which keeps the sizes within one of each
// other and bounds the search. Worst case is still exponential in the roster
// size, so callers cap how many players they hand to this strategy.

use tracing::debug;

use super::{Assignment, Scored};

/// Slack applied to the lower-bound prune so float rounding never discards a
/// branch that could tie or beat the incumbent.
const BOUND_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Team {
    A,
    B,
}

struct Search<'a> {
    ranked: &'a [Scored],
    cap: usize,
    /// `remaining[i]` is the total score of `ranked[i..]`.
    remaining: Vec<f64>,
    current: Vec<Team>,
    best: Vec<Team>,
    best_diff: f64,
    visited: u64,
}

impl Search<'_> {
    fn descend(&mut self, idx: usize, count_a: usize, count_b: usize, score_a: f64, score_b: f64) {
        self.visited += 1;

        // An exact tie cannot be improved on.
        if self.best_diff == 0.0 {
            return;
        }

        let gap = (score_a - score_b).abs();

        if idx == self.ranked.len() {
            if gap < self.best_diff && count_a.abs_diff(count_b) <= 1 {
                self.best_diff = gap;
                self.best.clone_from(&self.current);
            }
            return;
        }

        // Even handing every remaining player to the trailing team cannot get
        // the difference below `gap - remaining`.
        if gap - self.remaining[idx] >= self.best_diff + BOUND_SLACK {
            return;
        }

        let score = self.ranked[idx].score;

        if count_a < self.cap {
            self.current.push(Team::A);
            self.descend(idx + 1, count_a + 1, count_b, score_a + score, score_b);
            self.current.pop();
        }
        if count_b < self.cap {
            self.current.push(Team::B);
            self.descend(idx + 1, count_a, count_b + 1, score_a, score_b + score);
            self.current.pop();
        }
    }
}

/// Find the size-valid assignment of `ranked` with the smallest absolute
/// score difference.
///
/// The first (highest-scoring) player is fixed to team A: swapping the two
/// teams of any assignment gives the same difference, so this halves the
/// search without losing the optimum. A complete assignment only replaces the
/// best one so far when its difference is strictly smaller, so among equally
/// good assignments the first one reached is kept.
pub(crate) fn assign(ranked: &[Scored]) -> Assignment {
    let Some(first) = ranked.first() else {
        return Assignment::default();
    };

    let n = ranked.len();
    let mut remaining = vec![0.0; n + 1];
    for i in (0..n).rev() {
        remaining[i] = remaining[i + 1] + ranked[i].score;
    }

    let mut search = Search {
        ranked,
        cap: n.div_ceil(2),
        remaining,
        current: Vec::with_capacity(n),
        best: Vec::new(),
        best_diff: f64::INFINITY,
        visited: 0,
    };

    search.current.push(Team::A);
    search.descend(1, 1, 0, first.score, 0.0);

    debug!(
        "exhaustive search over {} players visited {} nodes, best difference {:.3}",
        n, search.visited, search.best_diff
    );

    let mut assignment = Assignment::default();
    for (entry, team) in ranked.iter().zip(&search.best) {
        match team {
            Team::A => assignment.team_a.push(entry.index),
            Team::B => assignment.team_b.push(entry.index),
        }
    }
    assignment
}
