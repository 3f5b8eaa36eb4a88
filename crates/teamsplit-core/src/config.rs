// Configuration loading and parsing (teamsplit.toml).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::partition::{SizeCorrection, Strategy};

/// Name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE_NAME: &str = "teamsplit.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub weights: ScoreWeights,
    pub partition: PartitionConfig,
    pub roster: RosterLimits,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// teamsplit.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire teamsplit.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    weights: ScoreWeights,
    partition: PartitionConfig,
    roster: RosterLimits,
    data: DataPaths,
}

/// Coefficients applied to the three per-match rates when scoring a player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub goal_weight: f64,
    pub assist_weight: f64,
    pub point_weight: f64,
}

impl Default for ScoreWeights {
    /// Points and goals count for more than assists.
    fn default() -> Self {
        ScoreWeights {
            goal_weight: 1.5,
            assist_weight: 1.0,
            point_weight: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionConfig {
    pub strategy: Strategy,
    #[serde(default)]
    pub size_correction: SizeCorrection,
    /// Largest roster the exhaustive strategy is allowed to search.
    pub max_exhaustive_players: usize,
}

/// Roster size bounds enforced before any split is attempted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RosterLimits {
    pub min_players: usize,
    pub max_players: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/teamsplit.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = read_file(&config_path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    let config = Config {
        weights: file.weights,
        partition: file.partition,
        roster: file.roster,
        data_paths: file.data,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: copies defaults into `base_dir/config` when missing,
/// then loads from there.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    // Weights may be zero (a stat can be switched off) but never negative.
    let w = &config.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("weights.goal_weight", w.goal_weight),
        ("weights.assist_weight", w.assist_weight),
        ("weights.point_weight", w.point_weight),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite value >= 0, got {val}"),
            });
        }
    }

    if config.partition.max_exhaustive_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "partition.max_exhaustive_players".into(),
            message: "must be > 0".into(),
        });
    }

    let roster = &config.roster;
    if roster.min_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "roster.min_players".into(),
            message: "must be > 0".into(),
        });
    }
    if roster.min_players > roster.max_players {
        return Err(ConfigError::ValidationError {
            field: "roster.max_players".into(),
            message: format!(
                "must be >= roster.min_players ({}), got {}",
                roster.min_players, roster.max_players
            ),
        });
    }

    if config.data_paths.roster.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.roster".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
