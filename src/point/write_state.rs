use crate::attribute::{Attribute, AttributeReadHandle};
use crate::cell::StateCell;
use crate::change::ChangeSet;
use crate::error::{PointError, RealizeError};
use crate::events::{Event, EventHandle, EVENT_WRITE_CHANGED};
use crate::snapshot::{ErrorCode, PointValue, Snapshot};
use std::sync::Arc;

/// Attribute name: timestamp of the most recent write attempt.
pub const ATTR_WRITE_TIME: &str = "write_time";
/// Attribute name: quality of the last write attempt.
pub const ATTR_WRITE_QUALITY: &str = "write_quality";
/// Attribute name: error code of the last write attempt.
pub const ATTR_WRITE_ERROR: &str = "write_error";

/// Write-status state of an output: one state cell tracking the outcome of
/// write attempts, plus the write-status change event.
///
/// The cell's value field holds the last successfully written value, its
/// quality/error fields describe the last attempt. Attribute names are
/// prefixed with `write_` so they can live alongside the read-back
/// attributes on the same point.
#[derive(Debug)]
pub struct WriteState<T> {
    cell: Arc<StateCell<T>>,
    write_changed: Arc<Event>,
}

impl<T: PointValue> WriteState<T> {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(StateCell::new()),
            write_changed: Event::new(EVENT_WRITE_CHANGED),
        }
    }

    /// Realizes the backing cell. Must be called once before any update.
    pub fn realize(&self) -> Result<(), RealizeError> {
        self.cell.realize()
    }

    pub fn is_realized(&self) -> bool {
        self.cell.is_realized()
    }

    /// The current committed write-status snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        self.cell.snapshot()
    }

    /// Commits a write outcome. `Ok(value)` records the value that reached
    /// the device with good quality; `Err(code)` records a failed attempt.
    /// Fires the write-status event when value, quality or error changed.
    pub fn update(
        &self,
        timestamp_ns: u64,
        outcome: Result<T, ErrorCode>,
    ) -> Result<ChangeSet, PointError> {
        let changes = self.cell.update(timestamp_ns, outcome)?;
        if changes.any_changed() {
            self.write_changed.fire();
        }
        Ok(changes)
    }

    /// Resolves one of the write-status attributes by its `write_`-prefixed
    /// name.
    pub fn resolve_attribute(&self, name: &str) -> Option<AttributeReadHandle<T>> {
        let attribute = match name {
            ATTR_WRITE_TIME => Attribute::UpdateTime,
            ATTR_WRITE_QUALITY => Attribute::Quality,
            ATTR_WRITE_ERROR => Attribute::Error,
            _ => return None,
        };
        Some(AttributeReadHandle::new(&self.cell, attribute))
    }

    /// Resolves the write-status event by name.
    pub fn resolve_event(&self, name: &str) -> Option<EventHandle> {
        if name == EVENT_WRITE_CHANGED {
            Some(EventHandle::new(&self.write_changed))
        } else {
            None
        }
    }

    /// Handle for the write-status event.
    pub fn event(&self) -> EventHandle {
        EventHandle::new(&self.write_changed)
    }

    /// Names of the write-status attributes this object resolves.
    pub fn attribute_names() -> &'static [&'static str] {
        &[ATTR_WRITE_TIME, ATTR_WRITE_QUALITY, ATTR_WRITE_ERROR]
    }
}

impl<T: PointValue> Default for WriteState<T> {
    fn default() -> Self {
        Self::new()
    }
}
