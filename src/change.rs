use crate::snapshot::{PointValue, Snapshot};

/// Field-level diff between the previously committed snapshot and the one
/// about to be published. Decides which events fire for a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSet {
    /// The payload differs.
    pub value_changed: bool,
    /// The good/bad quality flag differs.
    pub quality_changed: bool,
    /// The error code differs. Two distinct failure codes flip this without
    /// touching quality.
    pub error_changed: bool,
}

impl ChangeSet {
    /// True when any comparable field differs; drives the summary event and
    /// the change-time update. `update_time_ns` is excluded by design.
    pub fn any_changed(self) -> bool {
        self.value_changed || self.quality_changed || self.error_changed
    }
}

/// Compares two snapshots field by field. Pure; equality is value equality
/// for `value`, `quality` and `error`.
pub fn detect<T: PointValue>(old: &Snapshot<T>, new: &Snapshot<T>) -> ChangeSet {
    ChangeSet {
        value_changed: new.value != old.value,
        quality_changed: new.quality != old.quality,
        error_changed: new.error != old.error,
    }
}
