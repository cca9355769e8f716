use super::ViewportEvent;

/// Handle returned by [`EventDispatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback; returns true when it changed something worth redrawing
pub type Listener<C> = Box<dyn FnMut(&mut C, &ViewportEvent) -> bool>;

/// Delivers viewport events to listeners that borrow a shared context `C`.
///
/// Not `Send`: it lives on the event loop thread with the rest of the
/// session.
pub struct EventDispatcher<C> {
    listeners: Vec<(ListenerId, Listener<C>)>,
    next_id: u64,
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &ViewportEvent) -> bool + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Calls every listener in subscription order.
    ///
    /// Returns true if any listener reported a change.
    pub fn dispatch(&mut self, context: &mut C, event: &ViewportEvent) -> bool {
        let mut changed = false;
        for (_, listener) in self.listeners.iter_mut() {
            changed |= listener(context, event);
        }
        changed
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_in_subscription_order() {
        let mut dispatcher: EventDispatcher<Vec<&'static str>> = EventDispatcher::new();
        dispatcher.subscribe(|log, _| {
            log.push("first");
            false
        });
        dispatcher.subscribe(|log, _| {
            log.push("second");
            true
        });

        let mut log = Vec::new();
        assert!(dispatcher.dispatch(&mut log, &ViewportEvent::PointerUp));
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        let a = dispatcher.subscribe(|count, _| {
            *count += 1;
            true
        });
        let b = dispatcher.subscribe(|count, _| {
            *count += 10;
            true
        });

        assert!(dispatcher.unsubscribe(a));
        assert!(!dispatcher.unsubscribe(a));
        assert_eq!(dispatcher.len(), 1);

        let mut count = 0;
        dispatcher.dispatch(&mut count, &ViewportEvent::Wheel { delta: 1.0 });
        assert_eq!(count, 10);

        assert!(dispatcher.unsubscribe(b));
        assert!(dispatcher.is_empty());
        assert!(!dispatcher.dispatch(&mut count, &ViewportEvent::PointerLeave));
        assert_eq!(count, 10);
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut dispatcher: EventDispatcher<()> = EventDispatcher::new();
        let a = dispatcher.subscribe(|_, _| false);
        dispatcher.clear();
        let b = dispatcher.subscribe(|_, _| false);
        assert_ne!(a, b);
        assert!(!dispatcher.unsubscribe(a));
    }
}
