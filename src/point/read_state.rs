use crate::attribute::{Attribute, AttributeReadHandle};
use crate::cell::StateCell;
use crate::change::ChangeSet;
use crate::error::{PointError, RealizeError};
use crate::events::{
    Event, EventHandle, EVENT_CHANGED, EVENT_QUALITY_CHANGED, EVENT_VALUE_CHANGED,
};
use crate::snapshot::{ErrorCode, PointValue, Snapshot};
use std::sync::Arc;

/// State information for the read direction of a point: one state cell plus
/// the three change events fired from its commits.
///
/// Shared by inputs and by the read-back side of outputs.
#[derive(Debug)]
pub struct ReadState<T> {
    cell: Arc<StateCell<T>>,
    value_changed: Arc<Event>,
    quality_changed: Arc<Event>,
    changed: Arc<Event>,
}

impl<T: PointValue> ReadState<T> {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(StateCell::new()),
            value_changed: Event::new(EVENT_VALUE_CHANGED),
            quality_changed: Event::new(EVENT_QUALITY_CHANGED),
            changed: Event::new(EVENT_CHANGED),
        }
    }

    /// Realizes the backing cell. Must be called once before any update.
    pub fn realize(&self) -> Result<(), RealizeError> {
        self.cell.realize()
    }

    pub fn is_realized(&self) -> bool {
        self.cell.is_realized()
    }

    /// The current committed snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        self.cell.snapshot()
    }

    /// Commits a read outcome and fires the events whose fields changed.
    /// The commit is fully published before the first event fires.
    pub fn update(
        &self,
        timestamp_ns: u64,
        outcome: Result<T, ErrorCode>,
    ) -> Result<ChangeSet, PointError> {
        let changes = self.cell.update(timestamp_ns, outcome)?;
        if changes.value_changed {
            self.value_changed.fire();
        }
        if changes.quality_changed {
            self.quality_changed.fire();
        }
        if changes.any_changed() {
            self.changed.fire();
        }
        Ok(changes)
    }

    /// Resolves one of the state attributes (update time, change time,
    /// quality, error). The value attribute is not resolved here: it may be
    /// writable as well, so the owning point handles it separately via
    /// [`value_read_handle`](ReadState::value_read_handle).
    pub fn resolve_attribute(&self, name: &str) -> Option<AttributeReadHandle<T>> {
        let attribute = Attribute::resolve(name)?;
        self.attribute_read_handle(attribute)
    }

    /// Creates a read handle for a state attribute, or `None` for the value
    /// attribute (see [`resolve_attribute`](ReadState::resolve_attribute)).
    pub fn attribute_read_handle(&self, attribute: Attribute) -> Option<AttributeReadHandle<T>> {
        match attribute {
            Attribute::UpdateTime
            | Attribute::ChangeTime
            | Attribute::Quality
            | Attribute::Error => Some(AttributeReadHandle::new(&self.cell, attribute)),
            Attribute::Value => None,
        }
    }

    /// Creates a read handle for the value attribute.
    pub fn value_read_handle(&self) -> AttributeReadHandle<T> {
        AttributeReadHandle::new(&self.cell, Attribute::Value)
    }

    /// Resolves one of the read-direction events by name.
    pub fn resolve_event(&self, name: &str) -> Option<EventHandle> {
        match name {
            EVENT_VALUE_CHANGED => Some(EventHandle::new(&self.value_changed)),
            EVENT_QUALITY_CHANGED => Some(EventHandle::new(&self.quality_changed)),
            EVENT_CHANGED => Some(EventHandle::new(&self.changed)),
            _ => None,
        }
    }

    /// Handles for every read-direction event.
    pub fn events(&self) -> [EventHandle; 3] {
        [
            EventHandle::new(&self.value_changed),
            EventHandle::new(&self.quality_changed),
            EventHandle::new(&self.changed),
        ]
    }

    /// Names of the state attributes this object resolves.
    pub fn attribute_names() -> &'static [&'static str] {
        &["update_time", "change_time", "quality", "error"]
    }
}

impl<T: PointValue> Default for ReadState<T> {
    fn default() -> Self {
        Self::new()
    }
}
