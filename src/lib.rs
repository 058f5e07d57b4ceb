//! State-synchronization core for polling-driven I/O drivers.
//!
//! One producer (the periodic read/write task owned by an external scheduler)
//! publishes new values for a device point; arbitrary consumers observe the
//! latest committed value without blocking the producer and without tearing
//! reads. Three mechanisms carry the design:
//!
//! - [`StateCell`]: a versioned cell holding the current snapshot of a
//!   point's value/quality/timestamps, with atomic swap-in commit and access
//!   to both the pending and the previously committed snapshot during a
//!   commit.
//! - [`ChangeSet`] / [`Event`]: a field-level diff computed on every commit
//!   that decides which change events fire, synchronously, after publish.
//! - [`SingleValueQueue`]: a single-slot overwrite mailbox bridging arbitrary
//!   write callers and the single polling thread.
//!
//! [`InputPoint`] and [`OutputPoint`] compose these into the façade the
//! scheduler drives. Everything else (configuration, transport, the device
//! protocol, scheduling policy) is an external collaborator reached through
//! the [`DeviceReader`]/[`DeviceWriter`] traits.

pub mod attribute;
pub mod cell;
pub mod change;
pub mod device;
pub mod error;
pub mod events;
pub mod point;
pub mod queue;
pub mod snapshot;

pub use attribute::{Attribute, AttributeReadHandle, AttributeValue};
pub use cell::{CommitGuard, StateCell};
pub use change::{detect, ChangeSet};
pub use device::{DeviceFault, DeviceReader, DeviceWriter};
pub use error::{PointError, RealizeError};
pub use events::{
    Event, EventHandle, EVENT_CHANGED, EVENT_QUALITY_CHANGED, EVENT_VALUE_CHANGED,
    EVENT_WRITE_CHANGED,
};
pub use point::{
    Direction, InputPoint, OutputPoint, PointTask, PointTelemetry, ReadState, ValueWriteHandle,
    WriteState, ATTR_WRITE_ERROR, ATTR_WRITE_QUALITY, ATTR_WRITE_TIME,
};
pub use queue::SingleValueQueue;
pub use snapshot::{
    ErrorCode, PointValue, Quality, Snapshot, ERR_NONE, ERR_NO_DATA, ERR_UNMAPPED,
};
