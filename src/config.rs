/// Tunable game parameters.
///
/// Everything the rules need to know about sizes, counts and timings lives
/// here so tests can shrink the field or speed things up without touching
/// the simulation code.  Defaults give a 1280×720 field.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Stage at which rocks appear.
pub const ROCK_STAGE: u32 = 2;
/// Stage at which algae appear (and the algae check runs).
pub const ALGAE_STAGE: u32 = 3;

/// Distance of the player spawn row from the bottom edge.
pub const SPAWN_OFFSET_BOTTOM: i32 = 100;
/// Horizontal spawn positions for player 1 and player 2.
pub const SPAWN_X: [i32; 2] = [100, 200];

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Side of trash, rocks and algae.
    pub tile_size: i32,
    /// Side of a fish sprite (tile + 20).
    pub player_size: i32,
    /// Pixels per frame at full stick deflection.
    pub player_speed: f32,
    pub immobilize_ms: u64,
    pub countdown_ms: u64,
    pub trash_per_color: u32,
    pub penalty_trash: u32,
    pub rocks_per_stage: u32,
    pub algae_per_stage: u32,
    pub levels_per_stage: u32,
    pub final_stage: u32,
    /// Random draws before placement falls back to a scan.
    pub max_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            tile_size: 40,
            player_size: 60,
            player_speed: 3.0,
            immobilize_ms: 3000,
            countdown_ms: 3000,
            trash_per_color: 5,
            penalty_trash: 2,
            rocks_per_stage: 10,
            algae_per_stage: 5,
            levels_per_stage: 3,
            final_stage: 3,
            max_placement_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file.  Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid("field dimensions must be positive"));
        }
        if self.tile_size <= 0 || self.player_size <= 0 {
            return Err(ConfigError::Invalid("sprite sizes must be positive"));
        }
        if self.tile_size > self.width.min(self.height) {
            return Err(ConfigError::Invalid("tiles do not fit in the field"));
        }
        // Both fish spawn on the same row near the bottom-left corner.
        let spawn_y = self.height - SPAWN_OFFSET_BOTTOM;
        if spawn_y < 0
            || spawn_y + self.player_size > self.height
            || SPAWN_X[1] + self.player_size > self.width
            || SPAWN_X[0] + self.player_size > SPAWN_X[1]
        {
            return Err(ConfigError::Invalid("player spawn points do not fit the field"));
        }
        if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
            return Err(ConfigError::Invalid("player speed must be positive"));
        }
        if self.levels_per_stage == 0 || self.final_stage == 0 {
            return Err(ConfigError::Invalid("need at least one stage and one level"));
        }
        if self.trash_per_color == 0 {
            return Err(ConfigError::Invalid("each level needs trash of both colours"));
        }
        if self.peak_load() > self.free_tiles() {
            return Err(ConfigError::Invalid(
                "trash, penalty and hazard counts do not fit the field",
            ));
        }
        Ok(())
    }

    /// Most tiles the field must hold at once: a full stage 3 level with
    /// every hazard and one penalty from each fish.
    fn peak_load(&self) -> i64 {
        2 * i64::from(self.trash_per_color)
            + 2 * i64::from(self.penalty_trash)
            + i64::from(self.rocks_per_stage)
            + i64::from(self.algae_per_stage)
    }

    /// Grid-aligned tiles left once both fish have spawned.  Aligned tiles
    /// never overlap each other, so this is a lower bound on what placement
    /// can fit.
    fn free_tiles(&self) -> i64 {
        let grid = i64::from(self.width / self.tile_size) * i64::from(self.height / self.tile_size);
        let per_fish = i64::from(self.player_size / self.tile_size + 2).pow(2);
        grid - 2 * per_fish
    }

    pub fn immobilize_duration(&self) -> Duration {
        Duration::from_millis(self.immobilize_ms)
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    pub fn spawn_point(&self, player: usize) -> (i32, i32) {
        (SPAWN_X[player], self.height - SPAWN_OFFSET_BOTTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "player_speed": 5.0 }"#).unwrap();
        assert_eq!(config.player_speed, 5.0);
        assert_eq!(config.width, 1280);
        assert_eq!(config.rocks_per_stage, 10);
    }

    #[test]
    fn rejects_oversized_player() {
        let config = GameConfig {
            player_size: 200,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_levels_without_trash() {
        let config = GameConfig {
            trash_per_color: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_more_entities_than_the_field_holds() {
        let crowded = GameConfig {
            rocks_per_stage: 600,
            ..GameConfig::default()
        };
        assert!(crowded.validate().is_err());

        let penalties = GameConfig {
            penalty_trash: 300,
            ..GameConfig::default()
        };
        assert!(penalties.validate().is_err());

        // 576 tiles, 18 kept clear around the fish.
        let packed = GameConfig {
            trash_per_color: 200,
            penalty_trash: 2,
            rocks_per_stage: 100,
            algae_per_stage: 54,
            ..GameConfig::default()
        };
        assert!(packed.validate().is_ok());
    }

    #[test]
    fn rejects_zero_speed() {
        let config = GameConfig {
            player_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
