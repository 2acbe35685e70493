// Unit tests for the prediction stabilizer state machine.
//
// These pin the debouncing contract: no commit before a full window, one
// commit per stable run, deterministic tie-breaks and a strict confidence
// gate on the newest sample.

use chrono::Utc;

use signbridge::models::{Sample, SignLabel};
use signbridge::stabilizer::{SlidingWindow, Stabilizer, StabilizerConfig};

fn label(ch: char) -> SignLabel {
    SignLabel::from_char(ch).expect("test label")
}

fn sample(ch: char, confidence: f64) -> Sample {
    Sample {
        label: label(ch),
        confidence,
        timestamp: Utc::now(),
    }
}

fn stabilizer(window_size: usize) -> Stabilizer {
    let config = StabilizerConfig {
        window_size,
        ..StabilizerConfig::default()
    };
    Stabilizer::new(config, "test-session".to_string(), None)
}

#[test]
fn test_no_commit_before_window_fills() {
    let mut stab = stabilizer(5);

    for _ in 0..4 {
        assert_eq!(stab.observe(&sample('A', 0.99)), None);
    }
}

#[test]
fn test_strict_majority_commits_with_latest_confidence() {
    let mut stab = stabilizer(5);

    for ch in ['A', 'A', 'B', 'A'] {
        assert_eq!(stab.observe(&sample(ch, 0.99)), None);
    }

    let event = stab
        .observe(&sample('A', 0.95))
        .expect("full window with majority should commit");
    assert_eq!(event.label, label('A'));
    assert_eq!(event.confidence, 0.95);
    assert_eq!(event.session_id, "test-session");
    assert_eq!(event.user_id, None);
}

#[test]
fn test_window_resets_after_commit() {
    let mut stab = stabilizer(5);

    for _ in 0..5 {
        stab.observe(&sample('A', 0.99));
    }
    assert_eq!(stab.last_committed(), Some(label('A')));

    // A fresh full window of the new sign is required before the next
    // commit can fire.
    for _ in 0..4 {
        assert_eq!(stab.observe(&sample('B', 0.99)), None);
    }
    let event = stab.observe(&sample('B', 0.99)).expect("fifth B commits");
    assert_eq!(event.label, label('B'));
}

#[test]
fn test_held_sign_commits_exactly_once() {
    let mut stab = stabilizer(5);

    let mut commits = Vec::new();
    for _ in 0..20 {
        if let Some(event) = stab.observe(&sample('A', 0.99)) {
            commits.push(event.label);
        }
    }

    assert_eq!(commits, vec![label('A')]);
}

#[test]
fn test_tie_break_prefers_first_seen() {
    let mut stab = stabilizer(4);

    stab.observe(&sample('A', 0.99));
    stab.observe(&sample('B', 0.99));
    stab.observe(&sample('A', 0.99));
    let event = stab.observe(&sample('B', 0.99)).expect("tie still commits");
    assert_eq!(event.label, label('A'), "A appears first in the window");

    // Mirrored order resolves the other way.
    let mut stab = stabilizer(4);
    stab.observe(&sample('B', 0.99));
    stab.observe(&sample('A', 0.99));
    stab.observe(&sample('B', 0.99));
    let event = stab.observe(&sample('A', 0.99)).expect("tie still commits");
    assert_eq!(event.label, label('B'));
}

#[test]
fn test_tie_break_is_reproducible() {
    for _ in 0..10 {
        let mut stab = stabilizer(4);
        stab.observe(&sample('A', 0.99));
        stab.observe(&sample('B', 0.99));
        stab.observe(&sample('A', 0.99));
        let event = stab.observe(&sample('B', 0.99)).expect("tie commits");
        assert_eq!(event.label, label('A'));
    }
}

#[test]
fn test_all_distinct_window_resolves_to_oldest() {
    let mut stab = stabilizer(5);

    for ch in ['C', 'D', 'E', 'F'] {
        assert_eq!(stab.observe(&sample(ch, 0.99)), None);
    }
    let event = stab.observe(&sample('G', 0.99)).expect("commit");
    assert_eq!(event.label, label('C'));
}

#[test]
fn test_confidence_gate_is_strict() {
    let mut stab = stabilizer(5);

    for _ in 0..4 {
        stab.observe(&sample('A', 0.99));
    }

    // Exactly at the threshold: no commit. The gate looks at the newest
    // sample only.
    assert_eq!(stab.observe(&sample('A', 0.90)), None);

    // Barely above: commits on the sliding (still full) window.
    let event = stab
        .observe(&sample('A', 0.9001))
        .expect("strictly above threshold commits");
    assert_eq!(event.label, label('A'));
    assert_eq!(event.confidence, 0.9001);
}

#[test]
fn test_low_confidence_final_frame_blocks_unanimous_window() {
    let mut stab = stabilizer(5);

    for _ in 0..4 {
        stab.observe(&sample('A', 0.99));
    }
    assert_eq!(stab.observe(&sample('A', 0.50)), None);
    assert_eq!(stab.last_committed(), None);
}

#[test]
fn test_sliding_window_evicts_oldest() {
    let mut window = SlidingWindow::new(3);
    for ch in ['A', 'B', 'C'] {
        window.push(label(ch));
    }
    assert!(window.is_full());

    // 'A' falls out; 'D' joins. Majority tie now resolves to 'B'.
    window.push(label('D'));
    assert_eq!(window.len(), 3);
    assert_eq!(window.majority(), Some(label('B')));
}

#[test]
fn test_sliding_window_majority_counts() {
    let mut window = SlidingWindow::new(5);
    for ch in ['B', 'A', 'A', 'B', 'A'] {
        window.push(label(ch));
    }
    assert_eq!(window.majority(), Some(label('A')));
}

#[test]
fn test_empty_window_has_no_majority() {
    let window = SlidingWindow::new(5);
    assert!(window.is_empty());
    assert_eq!(window.majority(), None);
}
