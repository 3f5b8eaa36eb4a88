// Greedy descending-score assignment with a size-parity correction pass.

use tracing::debug;

use super::{Assignment, Scored, SizeCorrection};

/// One team under construction: scored entries in assignment order plus the
/// running total.
#[derive(Debug, Default)]
struct Side {
    members: Vec<Scored>,
    total: f64,
}

impl Side {
    fn push(&mut self, entry: Scored) {
        self.total += entry.score;
        self.members.push(entry);
    }

    fn remove(&mut self, pos: usize) -> Scored {
        let entry = self.members.remove(pos);
        self.total -= entry.score;
        entry
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn indices(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.index).collect()
    }
}

/// Assign `ranked` (already sorted by descending score) to two teams.
///
/// A player joins team A when A is not ahead on score, or when A is ahead but
/// has fewer members; otherwise team B. This stops one team from holding both
/// the score lead and the size lead. If the sizes still end up more than one
/// apart, `correct_sizes` moves players from the larger team.
pub(crate) fn assign(ranked: &[Scored], correction: SizeCorrection) -> Assignment {
    let mut a = Side::default();
    let mut b = Side::default();

    for &entry in ranked {
        if a.total <= b.total || a.len() < b.len() {
            a.push(entry);
        } else {
            b.push(entry);
        }
    }

    correct_sizes(&mut a, &mut b, correction);

    Assignment {
        team_a: a.indices(),
        team_b: b.indices(),
    }
}

/// Move players from the larger team to the smaller one until the sizes
/// differ by at most one. Size parity wins over score balance.
fn correct_sizes(a: &mut Side, b: &mut Side, correction: SizeCorrection) {
    while a.len().abs_diff(b.len()) > 1 {
        let (from, to) = if a.len() > b.len() {
            (&mut *a, &mut *b)
        } else {
            (&mut *b, &mut *a)
        };

        let pos = match correction {
            SizeCorrection::LastAdded => from.len() - 1,
            SizeCorrection::BestMove => best_move(from, to),
        };
        let moved = from.remove(pos);
        debug!(
            "size correction moved entry {} (score {:.3}); sizes now {}/{}",
            moved.index,
            moved.score,
            from.len(),
            to.len() + 1
        );
        to.push(moved);
    }
}

/// Position in `from` whose transfer to `to` leaves the smallest absolute
/// score difference. Later positions win ties.
fn best_move(from: &Side, to: &Side) -> usize {
    let mut best_pos = 0;
    let mut best_diff = f64::INFINITY;
    for (pos, entry) in from.members.iter().enumerate() {
        let diff = ((from.total - entry.score) - (to.total + entry.score)).abs();
        if diff <= best_diff {
            best_diff = diff;
            best_pos = pos;
        }
    }
    best_pos
}
