use crate::attribute::AttributeReadHandle;
use crate::change::ChangeSet;
use crate::device::{DeviceFault, DeviceReader};
use crate::error::{PointError, RealizeError};
use crate::events::EventHandle;
use crate::point::read_state::ReadState;
use crate::point::{Direction, PointTask, PointTelemetry};
use crate::snapshot::{PointValue, Snapshot, ERR_NO_DATA};
use std::sync::Arc;

/// An input point: a single readable data item polled from a device.
///
/// The external scheduler is the sole caller of the poll methods, which take
/// `&mut self`; attribute and event consumers work through the weak handles
/// returned by the resolution methods and never block the poll path.
#[derive(Debug)]
pub struct InputPoint<T, D> {
    device: Arc<D>,
    state: ReadState<T>,
    telemetry: PointTelemetry,
}

impl<T, D> InputPoint<T, D>
where
    T: PointValue,
    D: DeviceReader<T>,
{
    /// Attaches an input to its device-access collaborator. The point holds
    /// a non-owning role: the device's lifetime is managed by whatever
    /// container owns all points and components.
    pub fn new(device: Arc<D>) -> Self {
        Self {
            device,
            state: ReadState::new(),
            telemetry: PointTelemetry::default(),
        }
    }

    /// Realizes the backing state. Must be called once, before the scheduler
    /// starts polling; failure is fatal for this point.
    pub fn realize(&self) -> Result<(), RealizeError> {
        self.state.realize()
    }

    /// Attempts one device read and commits the outcome: the value with good
    /// quality on success, the mapped error code with bad quality on
    /// failure. Device faults never propagate; the only error here is
    /// polling an unrealized point.
    pub fn read(&mut self, timestamp_ns: u64) -> Result<ChangeSet, PointError> {
        if !self.state.is_realized() {
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
        self.state.update(timestamp_ns, outcome)
    }

    /// Forcibly commits a bad/"no data" state without a device access. Used
    /// when the owning component is known to be unreachable.
    pub fn invalidate_data(&mut self, timestamp_ns: u64) -> Result<ChangeSet, PointError> {
        if !self.state.is_realized() {
            return Err(PointError::Unrealized);
        }
        self.telemetry.invalidations += 1;
        self.state.update(timestamp_ns, Err(ERR_NO_DATA))
    }

    /// The current committed snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        self.state.snapshot()
    }

    pub fn direction(&self) -> Direction {
        Direction::Input
    }

    /// Resolves an attribute by name: the value attribute (read-only for an
    /// input) or one of the state attributes. Unknown names resolve to
    /// `None`.
    pub fn resolve_attribute(&self, name: &str) -> Option<AttributeReadHandle<T>> {
        if name == "value" {
            return Some(self.state.value_read_handle());
        }
        self.state.resolve_attribute(name)
    }

    /// Names of every attribute this point resolves.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        let mut names = vec!["value"];
        names.extend_from_slice(ReadState::<T>::attribute_names());
        names
    }

    /// Resolves an event by name. Unknown names resolve to `None`.
    pub fn resolve_event(&self, name: &str) -> Option<EventHandle> {
        self.state.resolve_event(name)
    }

    /// Handles for every event this point fires.
    pub fn events(&self) -> Vec<EventHandle> {
        self.state.events().to_vec()
    }

    /// The tasks this point exposes to the scheduler.
    pub fn tasks(&self) -> &'static [PointTask] {
        &[PointTask::Read]
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
