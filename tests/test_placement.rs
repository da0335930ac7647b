use ocean_cleanup::entities::Rect;
use ocean_cleanup::error::PlacementError;
use ocean_cleanup::placement::place;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn placed_boxes_are_disjoint_and_inside() {
    let mut rng = seeded_rng();
    let field = Rect::new(0, 0, 1280, 720);
    let mut occupied = vec![Rect::square(100, 620, 60), Rect::square(200, 620, 60)];

    for _ in 0..60 {
        let spot = place(&mut rng, 40, field, &occupied, 10_000).unwrap();
        assert!(field.contains(&spot));
        assert!(occupied.iter().all(|r| !r.intersects(&spot)));
        occupied.push(spot);
    }
}

#[test]
fn scan_finds_the_last_free_slot() {
    // Only (40, 0) is free and no random draws are allowed.
    let field = Rect::new(0, 0, 80, 40);
    let occupied = [Rect::square(0, 0, 40)];
    let spot = place(&mut seeded_rng(), 40, field, &occupied, 0).unwrap();
    assert_eq!(spot, Rect::square(40, 0, 40));
}

#[test]
fn scan_skips_past_blockers_on_later_rows() {
    let field = Rect::new(0, 0, 100, 100);
    let occupied = [Rect::new(0, 0, 100, 50), Rect::new(0, 50, 55, 50)];
    let spot = place(&mut seeded_rng(), 40, field, &occupied, 0).unwrap();
    assert_eq!(spot, Rect::square(55, 50, 40));
}

#[test]
fn full_field_reports_no_space() {
    let field = Rect::new(0, 0, 80, 80);
    let occupied = [Rect::new(0, 0, 80, 80)];
    let err = place(&mut seeded_rng(), 40, field, &occupied, 100).unwrap_err();
    assert!(matches!(err, PlacementError::NoFreeSpace { size: 40 }));
}

#[test]
fn oversized_entity_reports_no_space() {
    let field = Rect::new(0, 0, 30, 30);
    let err = place(&mut seeded_rng(), 40, field, &[], 100).unwrap_err();
    assert!(matches!(err, PlacementError::NoFreeSpace { .. }));
}

#[test]
fn same_seed_same_layout() {
    let field = Rect::new(0, 0, 1280, 720);
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut occupied = Vec::new();
        for _ in 0..10 {
            let spot = place(&mut rng, 40, field, &occupied, 10_000).unwrap();
            occupied.push(spot);
        }
        occupied
    };
    assert_eq!(run(9), run(9));
}
