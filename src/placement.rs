/// Finding a free spot for a new entity.
///
/// Random rejection sampling first, bounded by `max_attempts`; if that runs
/// dry the field is scanned row by row so a free spot is never missed.

use rand::Rng;

use crate::entities::Rect;
use crate::error::PlacementError;

/// Pick a `size`×`size` box inside `bounds` that intersects none of
/// `occupied`.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    size: i32,
    bounds: Rect,
    occupied: &[Rect],
    max_attempts: u32,
) -> Result<Rect, PlacementError> {
    let max_x = bounds.right() - size;
    let max_y = bounds.bottom() - size;
    if size <= 0 || max_x < bounds.x || max_y < bounds.y {
        return Err(PlacementError::NoFreeSpace { size });
    }

    for _ in 0..max_attempts {
        let candidate = Rect::square(
            rng.gen_range(bounds.x..=max_x),
            rng.gen_range(bounds.y..=max_y),
            size,
        );
        if is_free(&candidate, occupied) {
            return Ok(candidate);
        }
    }

    log::warn!(
        "random placement gave up after {max_attempts} draws ({} occupied); scanning",
        occupied.len()
    );
    scan(size, bounds, occupied).ok_or(PlacementError::NoFreeSpace { size })
}

fn is_free(candidate: &Rect, occupied: &[Rect]) -> bool {
    occupied.iter().all(|r| !candidate.intersects(r))
}

/// Row-major scan.  On a conflict the cursor jumps past the blocking box
/// instead of stepping one pixel at a time.
fn scan(size: i32, bounds: Rect, occupied: &[Rect]) -> Option<Rect> {
    let max_x = bounds.right() - size;
    let max_y = bounds.bottom() - size;
    for y in bounds.y..=max_y {
        let mut x = bounds.x;
        while x <= max_x {
            let candidate = Rect::square(x, y, size);
            match occupied.iter().find(|r| candidate.intersects(r)) {
                None => return Some(candidate),
                Some(blocker) => x = blocker.right(),
            }
        }
    }
    None
}
