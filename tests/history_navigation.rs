use std::sync::Arc;

use eframe_palette::SnapshotHistory;
use eframe_palette::command::DEFAULT_HISTORY_CAPACITY;
use image::{Rgb, RgbImage};

fn snapshot(v: u8) -> eframe_palette::Snapshot {
    Arc::new(RgbImage::from_pixel(2, 2, Rgb([v, 0, 0])))
}

fn tag(s: &eframe_palette::Snapshot) -> u8 {
    s.get_pixel(0, 0)[0]
}

#[test]
fn test_length_never_exceeds_capacity() {
    for capacity in [1, 2, 5, DEFAULT_HISTORY_CAPACITY] {
        let mut history = SnapshotHistory::new(snapshot(0), capacity);
        for n in 1..=(capacity as u8 * 3) {
            history.commit(snapshot(n));
            assert!(history.len() <= capacity);
            assert_eq!(history.cursor(), history.len() - 1);
            assert_eq!(history.current().map(tag), Some(n));
            assert!(!history.can_redo());
        }
    }
}

#[test]
fn test_twelve_commits_with_capacity_ten() {
    let mut history = SnapshotHistory::new(snapshot(0), 10);
    for n in 1..=12 {
        history.commit(snapshot(n));
    }
    assert_eq!(history.len(), 10);

    let mut reachable = vec![history.current().map(tag).unwrap()];
    while let Some(s) = history.undo() {
        reachable.push(tag(&s));
    }
    reachable.reverse();
    assert_eq!(reachable, (3..=12).collect::<Vec<u8>>());
    // The initial canvas and the first two commits are gone
    assert!(!reachable.contains(&0));
    assert!(!reachable.contains(&1));
    assert!(!reachable.contains(&2));
}

#[test]
fn test_redo_after_fresh_commit_is_noop() {
    let mut history = SnapshotHistory::new(snapshot(0), 10);
    history.commit(snapshot(1));
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), 1);

    history.undo();
    history.commit(snapshot(2));
    assert!(history.redo().is_none());
    assert_eq!(history.len(), 2);
}

#[test]
fn test_undo_at_oldest_is_noop() {
    let mut history = SnapshotHistory::new(snapshot(0), 10);
    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), 0);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut history = SnapshotHistory::new(snapshot(0), 10);
    history.commit(snapshot(1));
    history.commit(snapshot(2));
    history.undo();
    history.undo();
    history.commit(snapshot(7));

    assert_eq!(history.len(), 2);
    assert_eq!(history.undo().map(|s| tag(&s)), Some(0));
    assert_eq!(history.redo().map(|s| tag(&s)), Some(7));
    assert!(history.redo().is_none());
}
