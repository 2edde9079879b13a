//! Buffer bound verification tests

use markreset::{MarkReset, MarkResetConfig};
use test_helpers::*;

#[test]
fn test_repeated_cycles_do_not_grow_buffer() {
    let config = MarkResetConfig::default().with_profile(true);
    let mut it = MarkReset::with_config(0u64.., config);

    for cycle in 0..1_000 {
        it.mark();
        let ahead = read_n(&mut it, 10);
        it.reset().expect("reset after mark");
        let replay = read_n(&mut it, 10);
        assert_eq!(ahead, replay, "cycle {}", cycle);
        assert_eq!(it.buffered_len(), 0, "buffer not drained after cycle {}", cycle);
    }

    let profile = it.profile().expect("profiling enabled");
    assert!(profile.satisfies_bound(10), "max buffered {}", profile.max_buffered);
    assert_eq!(profile.marks, 1_000);
    assert_eq!(profile.resets, 1_000);
    assert_eq!(profile.replayed, 10_000);
    assert_eq!(profile.trimmed, 10_000);
    assert!(profile.timeline.iter().all(|&(_, buffered)| buffered == 10));
}

#[test]
fn test_lookahead_by_remarking_holds_one_item() {
    // Mark before every read, the way a key-run scan peeks one row ahead
    let mut it = MarkReset::new(0u32..10_000);
    while it.has_next() {
        it.mark();
        let item = it.next_item().expect("has_next said so");
        if item % 100 == 99 {
            it.reset().expect("reset");
            it.next_item().expect("replayed item");
        }
        assert!(it.buffered_len() <= 1);
    }
    assert!(it.space().max_buffered() <= 1);
}

#[test]
fn test_nested_marks_during_replay_stay_bounded() {
    let mut it = MarkReset::new(0u32..100_000);
    let window = 32;

    for _ in 0..500 {
        it.mark();
        read_n(&mut it, window);
        it.reset().expect("reset");
        // Half the replay, then re-mark in the middle of it
        read_n(&mut it, window / 2);
        it.mark();
        read_n(&mut it, window);
        it.reset().expect("reset");
        while it.is_replaying() {
            it.next();
        }
        assert_eq!(it.buffered_len(), 0);
    }

    assert!(
        it.space().max_buffered() <= window + window / 2,
        "max buffered {} exceeds window",
        it.space().max_buffered()
    );
}

#[test]
fn test_capacity_released_after_large_mark() {
    let config = MarkResetConfig::default().with_retained_capacity(8);
    let mut it = MarkReset::with_config(0u32..50_000, config);

    it.mark();
    read_n(&mut it, 20_000);
    assert!(it.buffer_capacity() >= 20_000);

    // Re-marking drops the visited span but keeps the buffer alive
    it.mark();
    assert_eq!(it.buffered_len(), 0);
    assert!(it.buffer_capacity() < 20_000);

    it.clear_mark().expect("clear");
    assert_eq!(it.buffer_capacity(), 0);
}
