/// The live game: everything the tick loop owns and hands to each rule.

use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{Algae, Entity, Rect, Rock, TrashColor};
use crate::level::Level;
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Pre-play countdown; also re-entered when resuming from pause.
    Countdown { remaining: Duration },
    Running,
    Paused,
    /// All stages cleared.  `score` is the match clock at that moment.
    Complete { score: Duration },
}

#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    /// Player 1 (red fish, orange trash) then player 2 (blue fish, teal).
    pub players: [Player; 2],
    pub level: Level,
    /// Owned by the session, not the level: rocks survive level changes.
    pub rocks: Vec<Rock>,
    pub algae: Vec<Algae>,
    pub status: SessionStatus,
    /// Match clock; only advances while `Running`.
    pub elapsed: Duration,
}

impl Session {
    pub fn stage(&self) -> u32 {
        self.level.stage
    }

    pub fn level_number(&self) -> u32 {
        self.level.number
    }

    pub fn field(&self) -> Rect {
        Rect::new(0, 0, self.config.width, self.config.height)
    }

    pub fn progress(&self, color: TrashColor) -> (u32, u32) {
        (self.level.collected(color), self.level.required(color))
    }

    pub fn score(&self) -> Option<Duration> {
        match self.status {
            SessionStatus::Complete { score } => Some(score),
            _ => None,
        }
    }

    /// Running → Paused, Paused → Countdown.  Other states ignore it.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            SessionStatus::Running => SessionStatus::Paused,
            SessionStatus::Paused => SessionStatus::Countdown {
                remaining: self.config.countdown(),
            },
            other => other,
        };
    }

    /// Boxes of every entity in the field, for spawn placement.
    pub fn occupied_rects(&self) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(
            self.level.trash.len() + self.rocks.len() + self.algae.len() + 2,
        );
        rects.extend(self.level.trash.iter().map(|t| t.rect));
        rects.extend(self.players.iter().map(|p| p.rect));
        rects.extend(self.rocks.iter().map(|r| r.rect));
        rects.extend(self.algae.iter().map(|a| a.rect));
        rects
    }

    /// Everything a renderer should draw this frame, back to front.
    pub fn visible_entities(&self) -> Vec<&dyn Entity> {
        let mut out: Vec<&dyn Entity> = Vec::new();
        out.extend(
            self.level
                .trash
                .iter()
                .filter(|t| !t.collected)
                .map(|t| t as &dyn Entity),
        );
        out.extend(self.rocks.iter().map(|r| r as &dyn Entity));
        out.extend(self.algae.iter().map(|a| a as &dyn Entity));
        out.extend(self.players.iter().map(|p| p as &dyn Entity));
        out
    }
}
