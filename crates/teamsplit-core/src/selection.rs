// Choosing who plays: name-based selection and the roster size policy.

use thiserror::Error;

use crate::config::RosterLimits;
use crate::player::Player;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no player named '{0}' in the roster")]
    UnknownPlayer(String),

    #[error("need at least {min} players to split, got {count}")]
    TooFewPlayers { count: usize, min: usize },

    #[error("at most {max} players can be split, got {count}")]
    TooManyPlayers { count: usize, max: usize },
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn ensure_known(roster: &[Player], names: &[String]) -> Result<(), SelectionError> {
    for name in names {
        if !roster.iter().any(|p| same_name(&p.name, name)) {
            return Err(SelectionError::UnknownPlayer(name.trim().to_string()));
        }
    }
    Ok(())
}

/// Players from `roster` whose names appear in `names`, in roster order.
///
/// Matching ignores case and surrounding whitespace. An empty `names` list
/// selects the whole roster.
pub fn select_players(
    roster: &[Player],
    names: &[String],
) -> Result<Vec<Player>, SelectionError> {
    if names.is_empty() {
        return Ok(roster.to_vec());
    }
    ensure_known(roster, names)?;
    Ok(roster
        .iter()
        .filter(|p| names.iter().any(|n| same_name(&p.name, n)))
        .cloned()
        .collect())
}

/// Every roster player except those named in `names`.
pub fn exclude_players(
    roster: &[Player],
    names: &[String],
) -> Result<Vec<Player>, SelectionError> {
    ensure_known(roster, names)?;
    Ok(roster
        .iter()
        .filter(|p| !names.iter().any(|n| same_name(&p.name, n)))
        .cloned()
        .collect())
}

/// Refuse to split rosters outside the configured bounds.
pub fn check_roster_size(count: usize, limits: &RosterLimits) -> Result<(), SelectionError> {
    if count < limits.min_players {
        return Err(SelectionError::TooFewPlayers {
            count,
            min: limits.min_players,
        });
    }
    if count > limits.max_players {
        return Err(SelectionError::TooManyPlayers {
            count,
            max: limits.max_players,
        });
    }
    Ok(())
}
