// Roster import from CSV.
//
// One row per player with season totals: Name, Matches, Goals, Assists,
// Points. Per-match rates are derived here; the partitioner trusts them.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::player::Player;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("roster {path} produced zero valid players")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Roster CSV row. Counting stats are read as f64 so that exports with
/// decimal cells still parse. Extra columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerRow {
    #[serde(alias = "Player")]
    Name: String,
    #[serde(alias = "GP", alias = "Games")]
    Matches: f64,
    #[serde(alias = "G")]
    Goals: f64,
    #[serde(alias = "A")]
    Assists: f64,
    #[serde(alias = "P", alias = "Pts")]
    Points: f64,
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

/// Read players from any CSV source.
///
/// Rows are skipped, with a warning, when they are malformed, have an empty
/// name, zero matches, negative or non-finite numbers, or repeat a name that
/// was already read, ignoring case (the first occurrence wins).
pub fn load_roster_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut players = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for result in reader.deserialize::<RawPlayerRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
                continue;
            }
        };

        let name = raw.Name.trim().to_string();
        if name.is_empty() {
            warn!("skipping roster row without a player name");
            continue;
        }

        let numbers = [raw.Matches, raw.Goals, raw.Assists, raw.Points];
        if numbers.iter().any(|v| !v.is_finite() || *v < 0.0) {
            warn!("skipping '{}': negative or non-finite stats", name);
            continue;
        }

        let matches = raw.Matches.round() as u32;
        if matches == 0 {
            warn!("skipping '{}': no matches played", name);
            continue;
        }

        // Selection matches names case-insensitively, so uniqueness does too.
        if !seen.insert(name.to_lowercase()) {
            warn!("duplicate roster entry for '{}', keeping the first", name);
            continue;
        }

        players.push(Player::from_totals(
            name,
            matches,
            raw.Goals,
            raw.Assists,
            raw.Points,
        ));
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load a roster CSV file. Fails when the file yields no usable players.
pub fn load_roster(path: &Path) -> Result<Vec<Player>, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_roster_from_reader(file).map_err(|e| RosterError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    if players.is_empty() {
        return Err(RosterError::Empty {
            path: path.display().to_string(),
        });
    }

    info!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
