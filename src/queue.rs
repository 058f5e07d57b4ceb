use crossbeam_queue::ArrayQueue;

/// Single-slot overwrite mailbox for output values awaiting transmission.
///
/// Any number of producer threads may [`enqueue`](SingleValueQueue::enqueue);
/// a value not yet consumed is overwritten, so a flurry of enqueues between
/// write cycles collapses to the latest one. The owning output point is the
/// sole consumer. No operation blocks.
#[derive(Debug)]
pub struct SingleValueQueue<T> {
    slot: ArrayQueue<T>,
}

impl<T> SingleValueQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            slot: ArrayQueue::new(1),
        }
    }

    /// Stores `value` as the pending value, replacing any value that has not
    /// been consumed yet. Always succeeds; the last writer before the next
    /// dequeue wins.
    pub fn enqueue(&self, value: T) {
        // force_push displaces the occupant of the single slot, which is
        // exactly the overwrite semantics; the displaced value is dropped.
        let _ = self.slot.force_push(value);
    }

    /// Atomically takes the pending value and clears the slot, or returns
    /// `None` if nothing is pending.
    pub fn dequeue(&self) -> Option<T> {
        self.slot.pop()
    }

    /// Whether a value is currently pending.
    pub fn is_pending(&self) -> bool {
        !self.slot.is_empty()
    }
}

impl<T> Default for SingleValueQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
