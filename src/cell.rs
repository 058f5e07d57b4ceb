use crate::change::{self, ChangeSet};
use crate::error::{PointError, RealizeError};
use crate::snapshot::{ErrorCode, PointValue, Quality, Snapshot, ERR_NONE, ERR_UNMAPPED};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Versioned storage for one point's snapshot with atomic swap-in publish.
///
/// Readers call [`snapshot`](StateCell::snapshot) from any thread, at any
/// time, and always observe a fully-committed snapshot; a commit in progress
/// is invisible until published. Exactly one writer (the owning point's poll
/// path) may hold a [`CommitGuard`] at a time; the façade layer enforces this
/// by taking `&mut self` on its poll methods.
#[derive(Default)]
pub struct StateCell<T> {
    storage: OnceLock<ArcSwap<Snapshot<T>>>,
}

impl<T> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("realized", &self.storage.get().is_some())
            .finish()
    }
}

impl<T: PointValue> StateCell<T> {
    /// Creates an unrealized cell. [`realize`](StateCell::realize) must be
    /// called once before any commit or read.
    pub fn new() -> Self {
        Self {
            storage: OnceLock::new(),
        }
    }

    /// Allocates the backing storage, seeded with the uninitialized snapshot
    /// (bad quality, "no data yet", minimum times).
    pub fn realize(&self) -> Result<(), RealizeError> {
        self.storage
            .set(ArcSwap::from_pointee(Snapshot::default()))
            .map_err(|_| RealizeError::AlreadyRealized)
    }

    /// Whether [`realize`](StateCell::realize) has completed.
    pub fn is_realized(&self) -> bool {
        self.storage.get().is_some()
    }

    /// Returns the current committed snapshot. Wait-free; never observes a
    /// partially-written snapshot because publish replaces the whole `Arc`.
    pub fn snapshot(&self) -> Result<Arc<Snapshot<T>>, PointError> {
        Ok(self.slot()?.load_full())
    }

    /// Opens a commit. The guard grants mutable access to a fresh snapshot
    /// pre-seeded from the current one, plus read-only access to the previous
    /// committed snapshot, both consistent with each other.
    pub fn begin_commit(&self) -> Result<CommitGuard<'_, T>, PointError> {
        let slot = self.slot()?;
        let previous = slot.load_full();
        let next = (*previous).clone();
        Ok(CommitGuard {
            slot,
            previous,
            next,
        })
    }

    /// Populates and commits in one step: a value becomes a good snapshot, an
    /// error code becomes a bad one. Returns the resulting change set.
    pub fn update(
        &self,
        timestamp_ns: u64,
        outcome: Result<T, ErrorCode>,
    ) -> Result<ChangeSet, PointError> {
        let mut commit = self.begin_commit()?;
        match outcome {
            Ok(value) => commit.set_value(timestamp_ns, value),
            Err(code) => commit.set_error(timestamp_ns, code),
        }
        Ok(commit.commit())
    }

    fn slot(&self) -> Result<&ArcSwap<Snapshot<T>>, PointError> {
        self.storage.get().ok_or(PointError::Unrealized)
    }
}

/// Scoped write handle for one commit. Dropping the guard without calling
/// [`commit`](CommitGuard::commit) abandons the pending snapshot; readers
/// keep seeing the previous one.
pub struct CommitGuard<'a, T> {
    slot: &'a ArcSwap<Snapshot<T>>,
    previous: Arc<Snapshot<T>>,
    next: Snapshot<T>,
}

impl<T: PointValue> CommitGuard<'_, T> {
    /// The snapshot that was visible when this commit began.
    pub fn previous(&self) -> &Snapshot<T> {
        &self.previous
    }

    /// The pending snapshot, seeded as a copy of the previous one.
    pub fn next(&self) -> &Snapshot<T> {
        &self.next
    }

    /// Mutable field-level access to the pending snapshot. Callers taking
    /// this route must set `update_time_ns` themselves and keep the
    /// quality/error/value invariants intact.
    pub fn next_mut(&mut self) -> &mut Snapshot<T> {
        &mut self.next
    }

    /// Records a successful attempt: the value with good quality and no
    /// error.
    pub fn set_value(&mut self, timestamp_ns: u64, value: T) {
        self.next.update_time_ns = timestamp_ns;
        self.next.value = value;
        self.next.quality = Quality::Good;
        self.next.error = ERR_NONE;
    }

    /// Records a failed attempt: default value, bad quality and the mapped
    /// error code. A code of `ERR_NONE` is normalized to `ERR_UNMAPPED` so
    /// bad quality always pairs with a non-zero code.
    pub fn set_error(&mut self, timestamp_ns: u64, code: ErrorCode) {
        self.next.update_time_ns = timestamp_ns;
        self.next.value = T::default();
        self.next.quality = Quality::Bad;
        self.next.error = if code == ERR_NONE { ERR_UNMAPPED } else { code };
    }

    /// Publishes the pending snapshot atomically and returns the field diffs.
    ///
    /// The change time is rewritten on every commit: the update timestamp
    /// when a comparable field changed, the previous change time otherwise.
    /// The publish is fully visible before this returns, so events fired from
    /// the returned change set always expose the new state to subscribers.
    pub fn commit(mut self) -> ChangeSet {
        let changes = change::detect(&self.previous, &self.next);
        self.next.change_time_ns = if changes.any_changed() {
            self.next.update_time_ns
        } else {
            self.previous.change_time_ns
        };
        self.slot.store(Arc::new(self.next));
        changes
    }
}
