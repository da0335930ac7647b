/// Fish movement, facing and algae lock-out.

use std::time::Duration;

use crate::collision::Mask;
use crate::entities::{Entity, Facing, Rect, Rock, Sprite, TrashColor};

/// Held direction keys for one fish this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mobility {
    Free,
    /// Locked by algae; `since` is the match clock at contact.
    Immobilized { since: Duration },
}

/// Edge detector for wrong-colour contact, updated once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrongTrashContact {
    NotTouching,
    Touching,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// The colour this fish collects; also its team.
    pub target: TrashColor,
    pub speed: f32,
    pub contact: WrongTrashContact,
    pub mobility: Mobility,
    pub facing: Facing,
    pub stunned: bool,
    last_direction: Facing,
    /// Silhouette facing left; `mask` is this or its mirror.
    base_mask: Mask,
    mask: Mask,
}

impl Player {
    pub fn new(x: i32, y: i32, size: i32, target: TrashColor, speed: f32) -> Self {
        let base_mask = Mask::fish(size);
        Self {
            rect: Rect::square(x, y, size),
            target,
            speed,
            contact: WrongTrashContact::NotTouching,
            mobility: Mobility::Free,
            facing: Facing::Left,
            stunned: false,
            last_direction: Facing::Left,
            mask: base_mask.clone(),
            base_mask,
        }
    }

    pub fn is_immobilized(&self) -> bool {
        matches!(self.mobility, Mobility::Immobilized { .. })
    }

    pub fn immobilize(&mut self, now: Duration) {
        self.mobility = Mobility::Immobilized { since: now };
        self.stunned = true;
    }

    /// Lift the algae lock once its time is up.  Returns true on release.
    pub fn try_recover(&mut self, now: Duration, lock: Duration) -> bool {
        match self.mobility {
            Mobility::Immobilized { since } if now.saturating_sub(since) >= lock => {
                self.mobility = Mobility::Free;
                self.stunned = false;
                true
            }
            _ => false,
        }
    }

    /// Apply one frame of input.
    ///
    /// The step is normalised so diagonals are no faster than straight
    /// lines, clamped to `field`, and dropped entirely if the resulting box
    /// would overlap a rock.
    pub fn step(&mut self, input: MoveInput, field: Rect, rocks: &[Rock]) {
        if self.is_immobilized() {
            return;
        }

        let mut dx = 0.0_f32;
        let mut dy = 0.0_f32;
        let mut turned = None;

        if input.left {
            dx -= 1.0;
            if self.last_direction != Facing::Left || !input.right {
                turned = Some(Facing::Left);
            }
        }
        if input.right {
            dx += 1.0;
            if self.last_direction != Facing::Right || !input.left {
                turned = Some(Facing::Right);
            }
        }
        if input.up {
            dy -= 1.0;
        }
        if input.down {
            dy += 1.0;
        }

        if let Some(facing) = turned {
            self.face(facing);
        }
        if dx != 0.0 {
            self.last_direction = if dx > 0.0 { Facing::Right } else { Facing::Left };
        }

        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let length = dx.hypot(dy);
        let new_x = (self.rect.x as f32 + dx / length * self.speed) as i32;
        let new_y = (self.rect.y as f32 + dy / length * self.speed) as i32;

        let new_x = new_x.clamp(field.x, field.right() - self.rect.w);
        let new_y = new_y.clamp(field.y, field.bottom() - self.rect.h);
        let proposed = self.rect.moved_to(new_x, new_y);

        if rocks.iter().any(|rock| proposed.intersects(&rock.rect)) {
            return;
        }
        self.rect = proposed;
    }

    fn face(&mut self, facing: Facing) {
        if self.facing == facing {
            return;
        }
        self.facing = facing;
        self.mask = match facing {
            Facing::Left => self.base_mask.clone(),
            Facing::Right => self.base_mask.mirrored(),
        };
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn mask(&self) -> &Mask {
        &self.mask
    }
    fn sprite(&self) -> Sprite {
        Sprite::Fish {
            team: self.target,
            facing: self.facing,
            stunned: self.stunned,
        }
    }
}
