use crate::cell::StateCell;
use crate::snapshot::{ErrorCode, PointValue, Quality};
use std::sync::{Arc, Weak};

/// The fixed attribute vocabulary over a snapshot. Resolution is a static
/// mapping, not a plugin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    UpdateTime,
    ChangeTime,
    Quality,
    Error,
    Value,
}

impl Attribute {
    /// The canonical attribute name.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::UpdateTime => "update_time",
            Attribute::ChangeTime => "change_time",
            Attribute::Quality => "quality",
            Attribute::Error => "error",
            Attribute::Value => "value",
        }
    }

    /// Resolves a name to an attribute, or `None` for an unknown name.
    pub fn resolve(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|attribute| attribute.name() == name)
    }

    /// Every attribute in the vocabulary.
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::UpdateTime,
            Attribute::ChangeTime,
            Attribute::Quality,
            Attribute::Error,
            Attribute::Value,
        ]
    }
}

/// One typed field read from a committed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<T> {
    /// `update_time` or `change_time`, in ns since the epoch.
    Time(u64),
    Quality(Quality),
    Error(ErrorCode),
    Value(T),
}

/// Read-only accessor over one field of a state cell's current snapshot.
///
/// Holds only a weak reference to the cell: reading through a handle whose
/// point has been destroyed yields `None` rather than dangling, and the
/// handle never keeps the point alive.
#[derive(Debug, Clone)]
pub struct AttributeReadHandle<T> {
    cell: Weak<StateCell<T>>,
    attribute: Attribute,
}

impl<T: PointValue> AttributeReadHandle<T> {
    pub(crate) fn new(cell: &Arc<StateCell<T>>, attribute: Attribute) -> Self {
        Self {
            cell: Arc::downgrade(cell),
            attribute,
        }
    }

    /// The attribute this handle reads.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Reads the field from the current committed snapshot. Never blocks and
    /// may run concurrently with a commit. Returns `None` when the owning
    /// point is gone or not yet realized.
    pub fn read(&self) -> Option<AttributeValue<T>> {
        let cell = self.cell.upgrade()?;
        let snapshot = cell.snapshot().ok()?;
        Some(match self.attribute {
            Attribute::UpdateTime => AttributeValue::Time(snapshot.update_time_ns),
            Attribute::ChangeTime => AttributeValue::Time(snapshot.change_time_ns),
            Attribute::Quality => AttributeValue::Quality(snapshot.quality),
            Attribute::Error => AttributeValue::Error(snapshot.error),
            Attribute::Value => AttributeValue::Value(snapshot.value.clone()),
        })
    }
}
