//! Explicit subscribe/unsubscribe event fan-out.
//!
//! Frame ticks and scroll changes are both delivered through an
//! [`EventSource`]. Everything runs on one thread; listeners must not
//! re-enter the source they are subscribed to.

/// Handle returned by [`EventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// A list of listeners for events of type `E`.
pub struct EventSource<E> {
    next_id: u64,
    listeners: Vec<(Subscription, Listener<E>)>,
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> EventSource<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. It runs on every emit until unsubscribed.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> std::fmt::Debug for EventSource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
