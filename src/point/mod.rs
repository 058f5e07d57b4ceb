//! Point façades: the input/output wrappers the external scheduler drives.

mod input;
mod output;
mod read_state;
mod write_state;

pub use input::InputPoint;
pub use output::{OutputPoint, ValueWriteHandle};
pub use read_state::ReadState;
pub use write_state::{WriteState, ATTR_WRITE_ERROR, ATTR_WRITE_QUALITY, ATTR_WRITE_TIME};

use serde::{Deserialize, Serialize};
use std::fmt;

/// I/O direction of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Returns the canonical lowercase representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks a point exposes to the external scheduler. The scheduler resolves
/// these by name and invokes the matching poll method at its own cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointTask {
    Read,
    Write,
}

impl PointTask {
    /// The canonical task name.
    pub fn name(self) -> &'static str {
        match self {
            PointTask::Read => "read",
            PointTask::Write => "write",
        }
    }

    /// Resolves a name to a task, or `None` for an unknown name.
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "read" => Some(PointTask::Read),
            "write" => Some(PointTask::Write),
            _ => None,
        }
    }
}

/// Per-point poll counters surfaced for observability. Deterministic: only
/// the owning poll path increments them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointTelemetry {
    /// Read cycles attempted.
    pub reads: u64,
    /// Read cycles that produced a device fault.
    pub read_failures: u64,
    /// Write cycles that attempted a device write.
    pub writes: u64,
    /// Write cycles whose device write faulted.
    pub write_failures: u64,
    /// Write cycles that found no pending value (no-op cycles).
    pub empty_write_cycles: u64,
    /// Forced invalidations of the read-back state.
    pub invalidations: u64,
}
