use pointsync::{PointTelemetry, Quality, Snapshot, ERR_NO_DATA};

#[test]
fn snapshot_serializes_round_trip() {
    let snapshot = Snapshot {
        update_time_ns: 42,
        value: 1.5f64,
        change_time_ns: 40,
        quality: Quality::Good,
        error: 0,
    };

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Snapshot<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn default_snapshot_reflects_the_uninitialized_state() {
    let snapshot: Snapshot<f64> = Snapshot::default();
    assert_eq!(snapshot.quality, Quality::Bad);
    assert_eq!(snapshot.error, ERR_NO_DATA);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["quality"], "Bad");
    assert_eq!(json["error"], ERR_NO_DATA);
}

#[test]
fn telemetry_counters_serialize_with_stable_field_names() {
    let telemetry = PointTelemetry {
        reads: 3,
        read_failures: 1,
        writes: 2,
        write_failures: 0,
        empty_write_cycles: 4,
        invalidations: 1,
    };

    let json = serde_json::to_value(telemetry).unwrap();
    assert_eq!(json["reads"], 3);
    assert_eq!(json["read_failures"], 1);
    assert_eq!(json["empty_write_cycles"], 4);

    let restored: PointTelemetry = serde_json::from_value(json).unwrap();
    assert_eq!(restored, telemetry);
}
