use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacementError {
    /// Neither random sampling nor the exhaustive scan found a free spot.
    #[error("no free {size}x{size} spot left in the play field")]
    NoFreeSpace { size: i32 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
