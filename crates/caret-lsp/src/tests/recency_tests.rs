use super::*;

#[test]
fn test_most_recent_first() {
    let mut recency = RecencyTracker::new(4);
    recency.record("map");
    recency.record("filter");
    assert_eq!(recency.rank("filter"), Some(0));
    assert_eq!(recency.rank("map"), Some(1));
    assert_eq!(recency.rank("reduce"), None);
}

#[test]
fn test_record_again_moves_to_front() {
    let mut recency = RecencyTracker::new(4);
    recency.record("a");
    recency.record("b");
    recency.record("a");
    assert_eq!(recency.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(recency.len(), 2);
}

#[test]
fn test_oldest_dropped_at_capacity() {
    let mut recency = RecencyTracker::new(2);
    recency.record("a");
    recency.record("b");
    recency.record("c");
    assert_eq!(recency.iter().collect::<Vec<_>>(), vec!["c", "b"]);
    assert_eq!(recency.rank("a"), None);
    assert_eq!(recency.capacity(), 2);
}

#[test]
fn test_zero_capacity_and_empty_labels_record_nothing() {
    let mut recency = RecencyTracker::new(0);
    recency.record("a");
    assert!(recency.is_empty());

    let mut recency = RecencyTracker::new(3);
    recency.record("");
    assert!(recency.is_empty());
    recency.record("x");
    recency.clear();
    assert!(recency.is_empty());
}
