use ocean_cleanup::config::GameConfig;
use ocean_cleanup::entities::{Rect, TrashColor};
use ocean_cleanup::error::PlacementError;
use ocean_cleanup::level::Level;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn generate_places_both_colours_clear_of_each_other() {
    let config = GameConfig::default();
    let mut occupied = vec![Rect::square(100, 620, 60), Rect::square(200, 620, 60)];
    let level = Level::generate(2, 3, &config, &mut occupied, &mut seeded_rng()).unwrap();

    assert_eq!((level.stage, level.number), (2, 3));
    assert_eq!(level.trash.len(), 10);
    assert_eq!(occupied.len(), 12);
    for color in TrashColor::ALL {
        assert_eq!(level.required(color), 5);
        assert_eq!(level.collected(color), 0);
    }
    assert!(!level.all_collected());
}

#[test]
fn penalty_pieces_raise_the_quota() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut occupied = Vec::new();
    let mut level = Level::generate(1, 1, &config, &mut occupied, &mut rng).unwrap();

    level
        .add_trash(TrashColor::Teal, 2, &config, &mut occupied, &mut rng)
        .unwrap();
    assert_eq!(level.required(TrashColor::Teal), 7);
    assert_eq!(level.required(TrashColor::Orange), 5);
    assert_eq!(level.trash.len(), 12);
    assert!(level.trash[10..].iter().all(|t| t.color == TrashColor::Teal));
    assert_eq!(occupied.len(), 12);
}

#[test]
fn penalty_that_does_not_fit_changes_nothing() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut level = Level::generate(1, 1, &config, &mut Vec::new(), &mut rng).unwrap();

    // One free tile left at (1240, 680).
    let mut occupied = vec![Rect::new(0, 0, 1280, 680), Rect::new(0, 680, 1240, 40)];
    let err = level
        .add_trash(TrashColor::Orange, 2, &config, &mut occupied, &mut rng)
        .unwrap_err();

    assert!(matches!(err, PlacementError::NoFreeSpace { size: 40 }));
    assert_eq!(level.trash.len(), 10);
    assert_eq!(level.required(TrashColor::Orange), 5);
    assert_eq!(occupied.len(), 2);

    // A single piece still fits the gap.
    level
        .add_trash(TrashColor::Orange, 1, &config, &mut occupied, &mut rng)
        .unwrap();
    assert_eq!(level.trash[10].rect, Rect::square(1240, 680, 40));
    assert_eq!(level.required(TrashColor::Orange), 6);
}
