//! Event bus.
//!
//! Listeners are registered on a bus instance, never globally. Two
//! delivery styles are supported and can be combined:
//! - **Listeners**: callbacks invoked synchronously in registration order
//! - **Queue**: events buffered for the host to `drain` once per frame

use log::trace;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;

/// Identifier returned by `subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Fan-out of game events to many consumers.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use quantum_tiles::events::{EventBus, GameEvent};
/// use quantum_tiles::core::GameStats;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut bus = EventBus::new().with_queue();
/// bus.subscribe(move |e| sink.borrow_mut().push(e.kind()));
/// bus.emit(GameEvent::StatsUpdated(GameStats::new(2)));
///
/// assert_eq!(*seen.borrow(), vec!["stats_updated"]);
/// assert_eq!(bus.drain().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
    queue: Option<Vec<GameEvent>>,
}

impl EventBus {
    /// Create a bus with no listeners and no queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also buffer events for `drain`.
    ///
    /// The queue is unbounded; a host that turns it on must `drain` it
    /// every frame.
    #[must_use]
    pub fn with_queue(mut self) -> Self {
        self.enable_queue();
        self
    }

    /// Start buffering events for `drain`, keeping registered listeners.
    ///
    /// Same draining contract as `with_queue`. Already queued events are
    /// kept if the queue was on.
    pub fn enable_queue(&mut self) {
        self.queue.get_or_insert_with(Vec::new);
    }

    /// Stop buffering and drop anything not yet drained.
    pub fn disable_queue(&mut self) {
        self.queue = None;
    }

    #[must_use]
    pub fn is_queueing(&self) -> bool {
        self.queue.is_some()
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every listener and the queue.
    pub fn emit(&mut self, event: GameEvent) {
        trace!("event {}", event.kind());
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        if let Some(queue) = &mut self.queue {
            queue.push(event);
        }
    }

    /// Take every queued event, oldest first. Empty if queueing is off.
    ///
    /// Call once per frame while the queue is on; nothing is dropped for
    /// the host.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.queue.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.as_ref().map(Vec::len))
            .finish()
    }
}
