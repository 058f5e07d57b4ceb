use pointsync::{detect, ChangeSet, Quality, Snapshot, ERR_NONE};

fn good(value: f64) -> Snapshot<f64> {
    Snapshot {
        update_time_ns: 100,
        value,
        change_time_ns: 100,
        quality: Quality::Good,
        error: ERR_NONE,
    }
}

#[test]
fn identical_snapshots_produce_no_changes() {
    let changes = detect(&good(1.0), &good(1.0));
    assert_eq!(changes, ChangeSet::default());
    assert!(!changes.any_changed());
}

#[test]
fn value_difference_is_detected() {
    let changes = detect(&good(1.0), &good(2.0));
    assert!(changes.value_changed);
    assert!(!changes.quality_changed);
    assert!(!changes.error_changed);
    assert!(changes.any_changed());
}

#[test]
fn quality_and_error_differences_are_detected() {
    let mut bad = good(0.0);
    bad.quality = Quality::Bad;
    bad.error = 7;

    let changes = detect(&good(0.0), &bad);
    assert!(!changes.value_changed);
    assert!(changes.quality_changed);
    assert!(changes.error_changed);
}

#[test]
fn update_time_alone_is_not_change_worthy() {
    let old = good(1.0);
    let mut new = good(1.0);
    new.update_time_ns = 999;

    assert!(!detect(&old, &new).any_changed());
    assert!(!new.differs_from(&old));
}

#[test]
fn error_code_swap_is_a_summary_change_only() {
    let mut a = good(0.0);
    a.quality = Quality::Bad;
    a.error = 7;
    let mut b = a.clone();
    b.error = 8;

    let changes = detect(&a, &b);
    assert!(!changes.value_changed);
    assert!(!changes.quality_changed);
    assert!(changes.error_changed);
    assert!(changes.any_changed());
}
