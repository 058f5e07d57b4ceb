use pointsync::{
    DeviceFault, DeviceReader, DeviceWriter, Direction, OutputPoint, PointTask, Quality,
    EVENT_WRITE_CHANGED,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fault(u32);

impl DeviceFault for Fault {
    fn error_code(&self) -> u32 {
        self.0
    }
}

/// Device that records written values and can be switched to fail writes.
#[derive(Default)]
struct RecordingDevice {
    read_back: Mutex<f64>,
    written: Mutex<Vec<f64>>,
    fail_writes: AtomicBool,
}

impl DeviceReader<f64> for RecordingDevice {
    type Error = Fault;

    fn read_value(&self) -> Result<f64, Fault> {
        Ok(*self.read_back.lock().unwrap())
    }
}

impl DeviceWriter<f64> for RecordingDevice {
    type Error = Fault;

    fn write_value(&self, value: f64) -> Result<(), Fault> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Fault(21));
        }
        self.written.lock().unwrap().push(value);
        *self.read_back.lock().unwrap() = value;
        Ok(())
    }
}

fn realized_output() -> (Arc<RecordingDevice>, OutputPoint<f64, RecordingDevice>) {
    let device = Arc::new(RecordingDevice::default());
    let point = OutputPoint::new(Arc::clone(&device));
    point.realize().unwrap();
    (device, point)
}

#[test]
fn scheduled_values_collapse_to_the_latest_one() {
    let (device, mut point) = realized_output();

    point.schedule_output_value(7.0);
    point.schedule_output_value(9.0);
    point.write(1_000).unwrap();

    // Exactly one device write, carrying the last scheduled value.
    assert_eq!(*device.written.lock().unwrap(), vec![9.0]);

    let status = point.write_snapshot().unwrap();
    assert_eq!(status.quality, Quality::Good);
    assert_eq!(status.error, 0);
    assert_eq!(status.value, 9.0);
    assert_eq!(status.update_time_ns, 1_000);
}

#[test]
fn write_cycle_without_pending_value_is_a_no_op() {
    let (device, mut point) = realized_output();

    let changes = point.write(1_000).unwrap();
    assert_eq!(changes, None);
    assert!(device.written.lock().unwrap().is_empty());

    // No commit happened: the write status still shows "no data yet".
    let status = point.write_snapshot().unwrap();
    assert_eq!(status.quality, Quality::Bad);
    assert_eq!(status.update_time_ns, 0);
    assert_eq!(point.telemetry().empty_write_cycles, 1);
    assert_eq!(point.telemetry().writes, 0);
}

#[test]
fn each_scheduled_value_is_sent_at_most_once() {
    let (device, mut point) = realized_output();

    point.schedule_output_value(5.0);
    point.write(1_000).unwrap();
    point.write(2_000).unwrap();

    assert_eq!(*device.written.lock().unwrap(), vec![5.0]);
    assert_eq!(point.telemetry().writes, 1);
    assert_eq!(point.telemetry().empty_write_cycles, 1);
}

#[test]
fn failed_write_commits_bad_write_status() {
    let (device, mut point) = realized_output();
    device.fail_writes.store(true, Ordering::SeqCst);

    let fired = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&fired);
    point
        .resolve_event(EVENT_WRITE_CHANGED)
        .unwrap()
        .subscribe(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

    point.schedule_output_value(5.0);
    point.write(1_000).unwrap();

    let status = point.write_snapshot().unwrap();
    assert_eq!(status.quality, Quality::Bad);
    assert_eq!(status.error, 21);
    assert_eq!(status.value, 0.0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(point.telemetry().write_failures, 1);

    // Same failure again: update time moves, no further event.
    point.schedule_output_value(5.0);
    point.write(2_000).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(point.write_snapshot().unwrap().update_time_ns, 2_000);
    assert_eq!(point.write_snapshot().unwrap().change_time_ns, 1_000);
}

#[test]
fn read_back_cycle_updates_the_read_state() {
    let (device, mut point) = realized_output();
    *device.read_back.lock().unwrap() = 2.5;

    point.read(1_000).unwrap();
    let snapshot = point.snapshot().unwrap();
    assert_eq!(snapshot.value, 2.5);
    assert_eq!(snapshot.quality, Quality::Good);
}

#[test]
fn invalidate_data_touches_read_back_only() {
    let (_device, mut point) = realized_output();
    point.schedule_output_value(1.0);
    point.write(500).unwrap();
    point.read(600).unwrap();

    point.invalidate_data(1_000).unwrap();

    let read_back = point.snapshot().unwrap();
    assert_eq!(read_back.quality, Quality::Bad);
    assert_eq!(read_back.update_time_ns, 1_000);

    let status = point.write_snapshot().unwrap();
    assert_eq!(status.quality, Quality::Good);
    assert_eq!(status.update_time_ns, 500);
}

#[test]
fn write_handle_is_weak() {
    let (device, point) = realized_output();
    let handle = point.value_write_handle();
    assert!(handle.is_alive());
    assert!(handle.schedule(4.0));

    drop(point);
    assert!(!handle.is_alive());
    assert!(!handle.schedule(5.0));
    assert!(device.written.lock().unwrap().is_empty());
}

#[test]
fn write_handle_feeds_the_next_cycle() {
    let (device, mut point) = realized_output();
    let handle = point.value_write_handle();

    assert!(handle.schedule(7.0));
    assert!(handle.schedule(9.0));
    point.write(1_000).unwrap();

    assert_eq!(*device.written.lock().unwrap(), vec![9.0]);
}

#[test]
fn metadata_surface() {
    let device = Arc::new(RecordingDevice::default());
    let point = OutputPoint::new(device);

    assert_eq!(point.direction(), Direction::Output);
    assert_eq!(point.tasks(), &[PointTask::Read, PointTask::Write]);
    assert_eq!(point.resolve_task("write"), Some(PointTask::Write));

    assert_eq!(
        point.attribute_names(),
        vec![
            "value",
            "update_time",
            "change_time",
            "quality",
            "error",
            "write_time",
            "write_quality",
            "write_error"
        ]
    );
    assert!(point.resolve_attribute("write_error").is_some());
    assert!(point.resolve_attribute("unknown").is_none());
    assert!(point.resolve_event(EVENT_WRITE_CHANGED).is_some());
    assert_eq!(point.events().len(), 4);
}
