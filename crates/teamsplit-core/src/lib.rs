// Library root: player scoring, two-team partitioning, and the roster,
// selection and report layers that surround them.

pub mod config;
pub mod partition;
pub mod player;
pub mod report;
pub mod roster;
pub mod score;
pub mod selection;
