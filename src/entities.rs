/// Entity types placed in the play field: pure data plus the shared
/// `Entity` capability trait used for collision and drawing.

use crate::collision::Mask;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in field pixels, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn square(x: i32, y: i32, side: i32) -> Self {
        Self::new(x, y, side, side)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }

    /// Strict overlap: boxes that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

// ── Teams & facing ────────────────────────────────────────────────────────────

/// Trash colour, which doubles as the team a fish plays for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrashColor {
    Orange,
    Teal,
}

impl TrashColor {
    pub const ALL: [TrashColor; 2] = [TrashColor::Orange, TrashColor::Teal];

    pub fn index(self) -> usize {
        match self {
            TrashColor::Orange => 0,
            TrashColor::Teal => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrashColor::Orange => "Orange",
            TrashColor::Teal => "Teal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// What to draw for an entity.  Renderers map this to glyphs or textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Fish {
        team: TrashColor,
        facing: Facing,
        /// Shown while the fish is immobilised by algae.
        stunned: bool,
    },
    Trash(TrashColor),
    Rock,
    Algae,
}

/// Anything that occupies space in the field.
pub trait Entity {
    fn rect(&self) -> Rect;
    /// Occupancy bitmap, anchored at `rect()`'s top-left.
    fn mask(&self) -> &Mask;
    fn sprite(&self) -> Sprite;
}

// ── Static entities ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Trash {
    pub rect: Rect,
    pub color: TrashColor,
    pub collected: bool,
    mask: Mask,
}

impl Trash {
    pub fn new(color: TrashColor, x: i32, y: i32, size: i32) -> Self {
        Self {
            rect: Rect::square(x, y, size),
            color,
            collected: false,
            mask: Mask::ellipse(size, size),
        }
    }
}

impl Entity for Trash {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn mask(&self) -> &Mask {
        &self.mask
    }
    fn sprite(&self) -> Sprite {
        Sprite::Trash(self.color)
    }
}

/// Blocks fish movement.  Collision against rocks is box-based.
#[derive(Clone, Debug)]
pub struct Rock {
    pub rect: Rect,
    mask: Mask,
}

impl Rock {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            rect: Rect::square(x, y, size),
            mask: Mask::filled(size, size),
        }
    }
}

impl Entity for Rock {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn mask(&self) -> &Mask {
        &self.mask
    }
    fn sprite(&self) -> Sprite {
        Sprite::Rock
    }
}

/// Immobilises the first fish that touches it, then disappears.
#[derive(Clone, Debug)]
pub struct Algae {
    pub rect: Rect,
    mask: Mask,
}

impl Algae {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            rect: Rect::square(x, y, size),
            mask: Mask::filled(size, size),
        }
    }
}

impl Entity for Algae {
    fn rect(&self) -> Rect {
        self.rect
    }
    fn mask(&self) -> &Mask {
        &self.mask
    }
    fn sprite(&self) -> Sprite {
        Sprite::Algae
    }
}
