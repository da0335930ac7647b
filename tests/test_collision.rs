use ocean_cleanup::collision::{boxes_overlap, mask_collision, Mask};
use ocean_cleanup::entities::*;
use ocean_cleanup::player::Player;

#[test]
fn round_trash_misses_at_the_corners() {
    let a = Trash::new(TrashColor::Orange, 0, 0, 40);
    let b = Trash::new(TrashColor::Teal, 34, 34, 40);
    assert!(boxes_overlap(&a.rect, &b.rect));
    assert!(!mask_collision(&a, &b));

    let c = Trash::new(TrashColor::Teal, 10, 0, 40);
    assert!(mask_collision(&a, &c));
}

#[test]
fn separated_boxes_never_collide() {
    let a = Rock::new(0, 0, 40);
    let b = Rock::new(40, 0, 40);
    assert!(!boxes_overlap(&a.rect, &b.rect));
    assert!(!mask_collision(&a, &b));
}

#[test]
fn fish_box_corner_is_see_through() {
    let fish = Player::new(0, 0, 60, TrashColor::Orange, 3.0);
    let rock = Rock::new(-39, -39, 40);
    assert!(boxes_overlap(&fish.rect, &rock.rect));
    assert!(!mask_collision(&fish, &rock));
}

#[test]
fn mask_collision_is_symmetric() {
    let fish = Player::new(100, 100, 60, TrashColor::Teal, 3.0);
    for dy in (-70..=70).step_by(7) {
        for dx in (-70..=70).step_by(7) {
            let trash = Trash::new(TrashColor::Orange, 110 + dx, 110 + dy, 40);
            assert_eq!(
                mask_collision(&fish, &trash),
                mask_collision(&trash, &fish),
                "offset ({dx}, {dy})"
            );
        }
    }
}

#[test]
fn mask_collision_implies_box_overlap() {
    let fish = Player::new(100, 100, 60, TrashColor::Teal, 3.0);
    for dy in (-60..=60).step_by(5) {
        for dx in (-60..=60).step_by(5) {
            let algae = Algae::new(110 + dx, 110 + dy, 40);
            if mask_collision(&fish, &algae) {
                assert!(boxes_overlap(&fish.rect, &algae.rect));
            }
        }
    }
}

#[test]
fn filled_masks_match_boxes() {
    let a = Rock::new(0, 0, 40);
    for dx in -45..=45 {
        let b = Algae::new(dx, 10, 40);
        assert_eq!(mask_collision(&a, &b), boxes_overlap(&a.rect, &b.rect), "dx {dx}");
    }
}

#[test]
fn fish_mask_shape() {
    let m = Mask::fish(60);
    assert_eq!((m.width(), m.height()), (60, 60));
    assert!(m.get(25, 30));
    assert!(!m.get(0, 0));
    assert!(!m.get(59, 0));
    assert!(m.count() < 60 * 60);
    assert_eq!(m.mirrored().mirrored(), m);
    assert_eq!(m.mirrored().count(), m.count());
}
