/// Levels, stages and the transition between them.

use rand::Rng;

use crate::config::{GameConfig, ALGAE_STAGE, ROCK_STAGE};
use crate::entities::{Rect, Trash, TrashColor};
use crate::error::PlacementError;
use crate::placement::place;

/// One trash-collection objective within a stage.
#[derive(Clone, Debug)]
pub struct Level {
    pub stage: u32,
    pub number: u32,
    pub trash: Vec<Trash>,
    /// Indexed by `TrashColor::index`.
    required: [u32; 2],
}

impl Level {
    /// Lay out `trash_per_color` pieces of each colour, orange first.
    ///
    /// `occupied` holds the boxes of everything already in the field and
    /// gains each new piece as it is placed.
    pub fn generate<R: Rng + ?Sized>(
        stage: u32,
        number: u32,
        config: &GameConfig,
        occupied: &mut Vec<Rect>,
        rng: &mut R,
    ) -> Result<Self, PlacementError> {
        let mut level = Level {
            stage,
            number,
            trash: Vec::new(),
            required: [config.trash_per_color; 2],
        };
        for color in TrashColor::ALL {
            for _ in 0..config.trash_per_color {
                level.spawn_trash(color, config, occupied, rng)?;
            }
        }
        Ok(level)
    }

    /// Drop `count` penalty pieces of `color` and raise that colour's quota
    /// to match.  Either every piece finds a spot or nothing changes,
    /// `occupied` included.
    pub fn add_trash<R: Rng + ?Sized>(
        &mut self,
        color: TrashColor,
        count: u32,
        config: &GameConfig,
        occupied: &mut Vec<Rect>,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let before = occupied.len();
        for _ in 0..count {
            if let Err(err) = place_tile(config, occupied, rng) {
                occupied.truncate(before);
                return Err(err);
            }
        }
        let size = config.tile_size;
        self.trash.extend(
            occupied[before..]
                .iter()
                .map(|spot| Trash::new(color, spot.x, spot.y, size)),
        );
        self.required[color.index()] += count;
        Ok(())
    }

    fn spawn_trash<R: Rng + ?Sized>(
        &mut self,
        color: TrashColor,
        config: &GameConfig,
        occupied: &mut Vec<Rect>,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let spot = place_tile(config, occupied, rng)?;
        self.trash
            .push(Trash::new(color, spot.x, spot.y, config.tile_size));
        Ok(())
    }

    pub fn required(&self, color: TrashColor) -> u32 {
        self.required[color.index()]
    }

    pub fn collected(&self, color: TrashColor) -> u32 {
        self.trash
            .iter()
            .filter(|t| t.color == color && t.collected)
            .count() as u32
    }

    pub fn all_collected(&self) -> bool {
        self.trash.iter().all(|t| t.collected)
    }
}

/// Find a free tile-sized spot in the field and mark it occupied.
fn place_tile<R: Rng + ?Sized>(
    config: &GameConfig,
    occupied: &mut Vec<Rect>,
    rng: &mut R,
) -> Result<Rect, PlacementError> {
    let field = Rect::new(0, 0, config.width, config.height);
    let spot = place(
        rng,
        config.tile_size,
        field,
        occupied,
        config.max_placement_attempts,
    )?;
    occupied.push(spot);
    Ok(spot)
}

/// Where the session goes after a level is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    NextLevel { stage: u32, level: u32 },
    /// First level of a new stage, and which hazards it brings.
    NextStage {
        stage: u32,
        spawn_rocks: bool,
        spawn_algae: bool,
    },
    GameComplete,
}

/// Transition out of `(stage, level)` once its trash is all collected.
pub fn next_after(stage: u32, level: u32, config: &GameConfig) -> Advance {
    if level < config.levels_per_stage {
        return Advance::NextLevel {
            stage,
            level: level + 1,
        };
    }
    let stage = stage + 1;
    if stage > config.final_stage {
        return Advance::GameComplete;
    }
    Advance::NextStage {
        stage,
        spawn_rocks: stage == ROCK_STAGE,
        spawn_algae: stage == ALGAE_STAGE,
    }
}
