//! Collision tests between entities.
//!
//! Two precisions are used on purpose:
//!  - **Mask collision** (pixel-exact) decides gameplay outcomes: picking up
//!    trash, touching the wrong colour, brushing against algae.
//!  - **Box overlap** gates positioning: spawn placement and rock blocking.

use crate::entities::{Entity, Rect};

/// Opaque/transparent bitmap for one sprite, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    fn from_fn(width: i32, height: i32, opaque: impl Fn(i32, i32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Fully opaque rectangle (rocks, algae).
    pub fn filled(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Ellipse inscribed in the bounding box (trash).
    pub fn ellipse(width: i32, height: i32) -> Self {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let nx = (x as f32 + 0.5 - rx) / rx;
            let ny = (y as f32 + 0.5 - ry) / ry;
            nx * nx + ny * ny <= 1.0
        })
    }

    /// Fish silhouette facing left: an oval body with a forked tail on the
    /// right-hand side.  Corners stay transparent.
    pub fn fish(size: i32) -> Self {
        let s = size as f32;
        let (cx, cy) = (0.42 * s, 0.5 * s);
        let (rx, ry) = (0.4 * s, 0.28 * s);
        let tail_start = 0.7 * s;
        Self::from_fn(size, size, |x, y| {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let nx = (px - cx) / rx;
            let ny = (py - cy) / ry;
            let body = nx * nx + ny * ny <= 1.0;
            let tail = px >= tail_start && {
                let half = 0.35 * s * (px - tail_start) / (s - tail_start);
                (py - cy).abs() <= half
            };
            body || tail
        })
    }

    /// Horizontal mirror image.
    pub fn mirrored(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(self.width - 1 - x, y)
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opaque at `(x, y)`?  Out-of-range reads are transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if any opaque pixel of `self` lands on an opaque pixel of
    /// `other` when `other`'s origin sits at `(dx, dy)` in `self`'s frame.
    pub fn overlaps(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

/// Pixel-exact collision between two placed entities.
pub fn mask_collision(a: &dyn Entity, b: &dyn Entity) -> bool {
    let ra = a.rect();
    let rb = b.rect();
    // Cheap reject before walking pixels.
    if !ra.intersects(&rb) {
        return false;
    }
    a.mask().overlaps(b.mask(), rb.x - ra.x, rb.y - ra.y)
}

pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_corners_are_transparent() {
        let m = Mask::ellipse(40, 40);
        assert!(!m.get(0, 0));
        assert!(!m.get(39, 39));
        assert!(m.get(20, 20));
    }

    #[test]
    fn fish_mirror_moves_the_tail() {
        let left = Mask::fish(60);
        let right = left.mirrored();
        assert_eq!(left.count(), right.count());
        // Tail tip sits on the far edge, mid-height.
        assert!(left.get(59, 30));
        assert!(!left.get(0, 30));
        assert!(right.get(0, 30));
        assert!(!right.get(59, 30));
    }

    #[test]
    fn overlap_outside_extent_is_false() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert!(a.overlaps(&b, 9, 9));
        assert!(!a.overlaps(&b, 10, 0));
        assert!(!a.overlaps(&b, -10, 0));
    }
}
