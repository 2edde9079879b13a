//! Key-run grouping over mark/reset iteration

use markreset::{group_runs, group_runs_with, MarkResetConfig};

#[derive(Debug, Clone, PartialEq)]
struct Event {
    vial_id: u64,
    date: u32,
}

fn events() -> Vec<Event> {
    [(1, 20), (1, 3), (1, 9), (2, 4), (4, 1), (4, 2), (7, 8)]
        .into_iter()
        .map(|(vial_id, date)| Event { vial_id, date })
        .collect()
}

#[test]
fn test_events_grouped_per_vial() {
    let runs: Vec<Vec<Event>> = group_runs(events(), |e| e.vial_id).collect();

    let vials: Vec<u64> = runs.iter().map(|run| run[0].vial_id).collect();
    assert_eq!(vials, vec![1, 2, 4, 7]);
    let sizes: Vec<usize> = runs.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 1, 2, 1]);

    // Within a run the original order is untouched
    let dates: Vec<u32> = runs[0].iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![20, 3, 9]);
}

#[test]
fn test_concatenated_runs_equal_input() {
    let flattened: Vec<Event> = group_runs(events(), |e| e.vial_id).flatten().collect();
    assert_eq!(flattened, events());
}

#[test]
fn test_adjacent_runs_have_distinct_keys() {
    let keys = [3, 3, 1, 1, 1, 3, 2, 2, 3];
    let runs: Vec<Vec<i32>> = group_runs(keys, |k| *k).collect();
    for pair in runs.windows(2) {
        assert_ne!(pair[0][0], pair[1][0]);
    }
    assert_eq!(runs.iter().map(Vec::len).sum::<usize>(), keys.len());
}

#[test]
fn test_grouping_profile_counts_rewinds() {
    let config = MarkResetConfig::default().with_profile(true);
    let mut runs = group_runs_with(events(), |e| e.vial_id, config);
    assert_eq!(runs.by_ref().count(), 4);

    let profile = runs.get_ref().profile().expect("profiling enabled").clone();
    // One rewind per run boundary
    assert_eq!(profile.resets, 3);
    assert_eq!(profile.replayed, 3);
    assert_eq!(profile.max_buffered, 1);
}

#[test]
fn test_no_mark_left_behind_between_runs() {
    let mut runs = group_runs(events(), |e| e.vial_id);
    while let Some(run) = runs.next() {
        let inner = runs.get_ref();
        assert!(!inner.is_marked(), "mark left active after vial {}", run[0].vial_id);
        // At most the first item of the next run waits for replay
        assert!(inner.buffered_len() <= 1);
    }
    assert_eq!(runs.get_ref().buffered_len(), 0);
}
