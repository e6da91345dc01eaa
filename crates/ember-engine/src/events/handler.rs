use std::collections::HashMap;
use std::fmt;

use super::event::{Event, EventType, TypedEvent};

/// Type-erased callback stored by [`EventHandler`].
pub type EventCallback = Box<dyn FnMut(&mut Event) -> bool>;

/// Callback table keyed by [`EventType`].
///
/// One callback per event kind; registering again replaces the previous one.
/// Kinds without a callback are left unhandled. Dispatch runs synchronously
/// on the calling thread.
#[derive(Default)]
pub struct EventHandler {
    callbacks: HashMap<EventType, EventCallback>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of type `E` and returns the callback it
    /// replaced, if any.
    ///
    /// The callback returns whether it handled the event; `true` sets the
    /// event's handled flag.
    pub fn set_callback<E, F>(&mut self, mut callback: F) -> Option<EventCallback>
    where
        E: TypedEvent,
        F: FnMut(&mut E) -> bool + 'static,
    {
        let erased: EventCallback =
            Box::new(move |event| E::from_event_mut(event).is_some_and(|e| callback(e)));
        self.callbacks.insert(E::TYPE, erased)
    }

    /// Removes the callback for `E`, restoring the unhandled default.
    pub fn clear_callback<E: TypedEvent>(&mut self) -> Option<EventCallback> {
        self.callbacks.remove(&E::TYPE)
    }

    pub fn has_callback(&self, event_type: EventType) -> bool {
        self.callbacks.contains_key(&event_type)
    }

    /// Runs the callback registered for `event`'s type and returns the
    /// event's handled flag afterwards.
    pub fn dispatch(&mut self, event: &mut Event) -> bool {
        let Some(callback) = self.callbacks.get_mut(&event.event_type()) else {
            log::trace!("no callback for {event}");
            return event.handled();
        };
        if callback(event) {
            event.handle(true);
        }
        event.handled()
    }

    /// Wraps `event` and dispatches it.
    pub fn dispatch_typed<E: TypedEvent>(&mut self, event: E) -> bool {
        self.dispatch(&mut event.into_event())
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("registered", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
