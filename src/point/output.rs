use crate::attribute::AttributeReadHandle;
use crate::change::ChangeSet;
use crate::device::{DeviceFault, DeviceReader, DeviceWriter};
use crate::error::{PointError, RealizeError};
use crate::events::EventHandle;
use crate::point::read_state::ReadState;
use crate::point::write_state::WriteState;
use crate::point::{Direction, PointTask, PointTelemetry};
use crate::queue::SingleValueQueue;
use crate::snapshot::{PointValue, Snapshot, ERR_NO_DATA};
use std::sync::{Arc, Weak};

/// An output point: a writable data item with read-back.
///
/// Composes a read-back state, a write-status state and the single-slot
/// pending-value queue. Output scheduling is decoupled from value selection:
/// [`schedule_output_value`](OutputPoint::schedule_output_value) only
/// enqueues, and the next [`write`](OutputPoint::write) cycle transmits the
/// latest pending value exactly once.
#[derive(Debug)]
pub struct OutputPoint<T, D> {
    device: Arc<D>,
    read_state: ReadState<T>,
    write_state: WriteState<T>,
    pending: Arc<SingleValueQueue<T>>,
    telemetry: PointTelemetry,
}

impl<T, D> OutputPoint<T, D>
where
    T: PointValue,
    D: DeviceReader<T> + DeviceWriter<T>,
{
    /// Attaches an output to its device-access collaborator.
    pub fn new(device: Arc<D>) -> Self {
        Self {
            device,
            read_state: ReadState::new(),
            write_state: WriteState::new(),
            pending: Arc::new(SingleValueQueue::new()),
            telemetry: PointTelemetry::default(),
        }
    }

    /// Realizes both backing states. Must be called once, before the
    /// scheduler starts polling; failure is fatal for this point.
    pub fn realize(&self) -> Result<(), RealizeError> {
        self.read_state.realize()?;
        self.write_state.realize()
    }

    /// Attempts one device read of the read-back value and commits the
    /// outcome, exactly like an input's read cycle.
    pub fn read(&mut self, timestamp_ns: u64) -> Result<ChangeSet, PointError> {
        if !self.read_state.is_realized() {
            return Err(PointError::Unrealized);
        }
        self.telemetry.reads += 1;
        let outcome = match self.device.read_value() {
            Ok(value) => Ok(value),
            Err(fault) => {
                self.telemetry.read_failures += 1;
                Err(fault.error_code())
            }
        };
        self.read_state.update(timestamp_ns, outcome)
    }

    /// Drains the pending-value queue and, if a value was pending, attempts
    /// one device write and commits the write status. A cycle with nothing
    /// pending performs no device access and no commit; that is a no-op
    /// cycle, not an error. Returns the write-status change set, or `None`
    /// for a no-op cycle.
    pub fn write(&mut self, timestamp_ns: u64) -> Result<Option<ChangeSet>, PointError> {
        if !self.write_state.is_realized() {
            return Err(PointError::Unrealized);
        }
        let Some(value) = self.pending.dequeue() else {
            self.telemetry.empty_write_cycles += 1;
            return Ok(None);
        };
        self.telemetry.writes += 1;
        let outcome = match self.device.write_value(value.clone()) {
            Ok(()) => Ok(value),
            Err(fault) => {
                self.telemetry.write_failures += 1;
                Err(fault.error_code())
            }
        };
        self.write_state.update(timestamp_ns, outcome).map(Some)
    }

    /// Forcibly commits a bad/"no data" read-back state without a device
    /// access.
    pub fn invalidate_data(&mut self, timestamp_ns: u64) -> Result<ChangeSet, PointError> {
        if !self.read_state.is_realized() {
            return Err(PointError::Unrealized);
        }
        self.telemetry.invalidations += 1;
        self.read_state.update(timestamp_ns, Err(ERR_NO_DATA))
    }

    /// Schedules a value for the next write cycle, overwriting any value not
    /// yet transmitted. Fire-and-forget: no I/O happens here, and no
    /// acknowledgment of when or whether the value reaches the device.
    /// Callable from any thread.
    pub fn schedule_output_value(&self, value: T) {
        self.pending.enqueue(value);
    }

    /// Creates a weak write handle through which external callers schedule
    /// output values. The handle never extends the point's lifetime.
    pub fn value_write_handle(&self) -> ValueWriteHandle<T> {
        ValueWriteHandle {
            queue: Arc::downgrade(&self.pending),
        }
    }

    /// The current committed read-back snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        self.read_state.snapshot()
    }

    /// The current committed write-status snapshot.
    pub fn write_snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        self.write_state.snapshot()
    }

    pub fn direction(&self) -> Direction {
        Direction::Output
    }

    /// Resolves an attribute by name: the value attribute (backed by the
    /// read-back state), the read-back state attributes, or the
    /// `write_`-prefixed write-status attributes.
    pub fn resolve_attribute(&self, name: &str) -> Option<AttributeReadHandle<T>> {
        if name == "value" {
            return Some(self.read_state.value_read_handle());
        }
        self.read_state
            .resolve_attribute(name)
            .or_else(|| self.write_state.resolve_attribute(name))
    }

    /// Names of every attribute this point resolves.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        let mut names = vec!["value"];
        names.extend_from_slice(ReadState::<T>::attribute_names());
        names.extend_from_slice(WriteState::<T>::attribute_names());
        names
    }

    /// Resolves an event by name: the read-direction events plus the
    /// write-status axis.
    pub fn resolve_event(&self, name: &str) -> Option<EventHandle> {
        self.read_state
            .resolve_event(name)
            .or_else(|| self.write_state.resolve_event(name))
    }

    /// Handles for every event this point fires.
    pub fn events(&self) -> Vec<EventHandle> {
        let mut events = self.read_state.events().to_vec();
        events.push(self.write_state.event());
        events
    }

    /// The tasks this point exposes to the scheduler.
    pub fn tasks(&self) -> &'static [PointTask] {
        &[PointTask::Read, PointTask::Write]
    }

    /// Resolves a task by name. Unknown names resolve to `None`.
    pub fn resolve_task(&self, name: &str) -> Option<PointTask> {
        PointTask::resolve(name).filter(|task| self.tasks().contains(task))
    }

    /// Poll counters for this point.
    pub fn telemetry(&self) -> PointTelemetry {
        self.telemetry
    }
}

/// Non-owning handle used by write callers to schedule output values.
///
/// Scheduling through a handle whose point has been destroyed reports
/// failure instead of dangling; the handle never keeps the point alive.
#[derive(Debug, Clone)]
pub struct ValueWriteHandle<T> {
    queue: Weak<SingleValueQueue<T>>,
}

impl<T> ValueWriteHandle<T> {
    /// Schedules `value` for the owning output's next write cycle. Returns
    /// false when the output is gone.
    pub fn schedule(&self, value: T) -> bool {
        match self.queue.upgrade() {
            Some(queue) => {
                queue.enqueue(value);
                true
            }
            None => false,
        }
    }

    /// Whether the owning output is still alive.
    pub fn is_alive(&self) -> bool {
        self.queue.strong_count() > 0
    }
}
