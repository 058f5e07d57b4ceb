use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable integer error code carried in a snapshot. `ERR_NONE` means no error.
pub type ErrorCode = u32;

/// Code meaning "no error"; the only code compatible with good quality.
pub const ERR_NONE: ErrorCode = 0;
/// Reserved code used before the first read/write attempt, and by
/// `invalidate_data`.
pub const ERR_NO_DATA: ErrorCode = 1;
/// Substituted when a device fault maps to 0, which would break the
/// quality/error invariant.
pub const ERR_UNMAPPED: ErrorCode = 2;

/// Payload types a point can carry. Mirrors what the polling core needs from
/// a value: comparable for change detection, defaultable for the error state,
/// and shareable across the reader threads.
pub trait PointValue: Clone + Default + PartialEq + Send + Sync + 'static {}

impl<T> PointValue for T where T: Clone + Default + PartialEq + Send + Sync + 'static {}

/// Trustworthiness of the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    /// The last attempt produced a usable value.
    Good,
    /// The last attempt failed, or no attempt has been made yet.
    #[default]
    Bad,
}

impl Quality {
    /// Returns the canonical lowercase representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Bad => "bad",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full set of observable fields for a point at one instant. Published
/// atomically by [`StateCell::begin_commit`](crate::StateCell::begin_commit)
/// and immutable once committed.
///
/// Invariants maintained by the commit protocol:
/// - `quality == Bad` if and only if `error != ERR_NONE`
/// - `quality == Bad` implies `value == T::default()` (never stale)
/// - `change_time_ns` is rewritten on every commit, copied forward when the
///   comparable fields did not change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Timestamp of the most recent read/write attempt (ns since the epoch).
    pub update_time_ns: u64,
    /// The current payload; `T::default()` whenever quality is bad.
    pub value: T,
    /// Timestamp of the most recent commit in which value, quality or error
    /// actually differed from the prior snapshot.
    pub change_time_ns: u64,
    /// Trustworthiness of `value`.
    pub quality: Quality,
    /// Error code of the last attempt, `ERR_NONE` when quality is good.
    pub error: ErrorCode,
}

impl<T: Default> Default for Snapshot<T> {
    /// The uninitialized state: bad quality, "no data yet", minimum times.
    fn default() -> Self {
        Self {
            update_time_ns: 0,
            value: T::default(),
            change_time_ns: 0,
            quality: Quality::Bad,
            error: ERR_NO_DATA,
        }
    }
}

impl<T: PointValue> Snapshot<T> {
    /// Returns true when the comparable fields (value, quality, error) differ
    /// from `other`. `update_time_ns` changes on every attempt by design and
    /// is not change-worthy.
    pub fn differs_from(&self, other: &Self) -> bool {
        self.value != other.value || self.quality != other.quality || self.error != other.error
    }
}
