use std::path::PathBuf;
use std::time::Duration;

use ocean_cleanup::leaderboard::{score_seconds, Entry, Leaderboard};

fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "ocean_cleanup_{}_{name}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn missing_file_is_an_empty_board() {
    let board = Leaderboard::load(scratch("missing"));
    assert!(board.entries().is_empty());
    assert!(board.top(3).is_empty());
}

#[test]
fn corrupt_file_is_an_empty_board() {
    let path = scratch("corrupt");
    std::fs::write(&path, "{ not json").unwrap();
    let board = Leaderboard::load(&path);
    assert!(board.entries().is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn records_stay_sorted_fastest_first() {
    let mut board = Leaderboard::load(scratch("sorted"));
    assert_eq!(board.record("Slow", 90.5), 0);
    assert_eq!(board.record("Fast", 41.2), 0);
    assert_eq!(board.record("Middle", 60.0), 1);
    // A tie goes behind the existing time.
    assert_eq!(board.record("Also fast", 41.2), 1);

    let teams: Vec<&str> = board.entries().iter().map(|e| e.team.as_str()).collect();
    assert_eq!(teams, ["Fast", "Also fast", "Middle", "Slow"]);
    assert_eq!(board.top(2).len(), 2);
    assert_eq!(board.top(10).len(), 4);
}

#[test]
fn save_then_load_keeps_entries() {
    let path = scratch("persist");
    let mut board = Leaderboard::load(&path);
    board.record("Sharks", 75.25);
    board.record("Dolphins", 63.1);
    board.save().unwrap();

    let reloaded = Leaderboard::load(&path);
    assert_eq!(
        reloaded.entries(),
        [
            Entry {
                team: "Dolphins".into(),
                score: 63.1
            },
            Entry {
                team: "Sharks".into(),
                score: 75.25
            },
        ]
    );
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unsorted_file_is_sorted_on_load() {
    let path = scratch("unsorted");
    std::fs::write(
        &path,
        r#"[{"team":"B","score":80.0},{"team":"A","score":20.5}]"#,
    )
    .unwrap();
    let board = Leaderboard::load(&path);
    assert_eq!(board.entries()[0].team, "A");
    assert_eq!(board.path(), path.as_path());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn scores_round_to_hundredths() {
    assert_eq!(score_seconds(Duration::from_millis(42_346)), 42.35);
    assert_eq!(score_seconds(Duration::from_millis(900)), 0.9);
    assert_eq!(score_seconds(Duration::from_secs(61)), 61.0);
}

#[test]
fn invalid_times_are_dropped_on_load() {
    let path = scratch("negative");
    std::fs::write(
        &path,
        r#"[{"team":"Cheat","score":-5.0},{"team":"Real","score":33.3}]"#,
    )
    .unwrap();
    let board = Leaderboard::load(&path);
    let teams: Vec<&str> = board.entries().iter().map(|e| e.team.as_str()).collect();
    assert_eq!(teams, ["Real"]);
    std::fs::remove_file(&path).unwrap();
}
