use std::sync::{Arc, Mutex, Weak};

/// Event name: the payload changed.
pub const EVENT_VALUE_CHANGED: &str = "value_changed";
/// Event name: the quality flag changed.
pub const EVENT_QUALITY_CHANGED: &str = "quality_changed";
/// Event name: value, quality or error changed (summary event).
pub const EVENT_CHANGED: &str = "changed";
/// Event name: the write status of an output changed.
pub const EVENT_WRITE_CHANGED: &str = "write_changed";

type Subscriber = Arc<dyn Fn() + Send + Sync>;

/// A named, fireable signal owned by a point's state. Fired synchronously
/// on the committing thread after the corresponding snapshot is published,
/// so a subscriber that reads the cell always observes the new state.
pub struct Event {
    name: &'static str,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Event {
    pub(crate) fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// The event's identity.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers a subscriber invoked in-line on every fire. Subscribers must
    /// not perform long-running work; they stall the polling path.
    pub fn subscribe(&self, subscriber: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Arc::new(subscriber));
        }
    }

    /// Invokes every subscriber. The list is snapshotted first so a
    /// subscriber may register further subscribers without deadlocking.
    pub(crate) fn fire(&self) {
        let subscribers: Vec<Subscriber> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers.clone(),
            Err(_) => return,
        };
        for subscriber in subscribers {
            subscriber();
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event").field("name", &self.name).finish()
    }
}

/// Non-owning handle to an event. Validity is tied to the owning point's
/// lifetime: once the point is destroyed the handle reports dead instead of
/// dangling, and never extends the point's lifetime.
#[derive(Debug, Clone)]
pub struct EventHandle {
    event: Weak<Event>,
}

impl EventHandle {
    pub(crate) fn new(event: &Arc<Event>) -> Self {
        Self {
            event: Arc::downgrade(event),
        }
    }

    /// The event's name, or `None` once the owning point is gone.
    pub fn name(&self) -> Option<&'static str> {
        self.event.upgrade().map(|event| event.name())
    }

    /// Whether the owning point is still alive.
    pub fn is_alive(&self) -> bool {
        self.event.strong_count() > 0
    }

    /// Registers a subscriber. Returns false when the owning point is gone.
    pub fn subscribe(&self, subscriber: impl Fn() + Send + Sync + 'static) -> bool {
        match self.event.upgrade() {
            Some(event) => {
                event.subscribe(subscriber);
                true
            }
            None => false,
        }
    }
}
