//! Ocean Cleanup: a two-player fish game where each fish collects trash of its
//! own colour while rocks, algae and the other team's trash get in the way.
//!
//! The library holds the whole simulation; the binary only adds a terminal
//! front end (input, rendering, leaderboard prompts).

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod leaderboard;
pub mod level;
pub mod placement;
pub mod player;
pub mod session;
