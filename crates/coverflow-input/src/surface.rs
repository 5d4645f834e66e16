use crate::InputEvent;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Which input events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Wheel,
    TouchBegin,
    TouchEnd,
}

type Handler = Box<dyn FnMut(&InputEvent)>;

struct Listener {
    id: u64,
    kind: ListenerKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// The container surface navigation input arrives on.
///
/// Single-threaded: the host's event loop dispatches into it and the
/// listeners run to completion before `dispatch` returns. Listeners must
/// not subscribe or drop subscriptions from inside a dispatch.
#[derive(Clone, Default)]
pub struct InputSurface {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`. It stays registered until the
    /// returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, kind: ListenerKind, handler: F) -> Subscription
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            handler: Box::new(handler),
        });
        trace!(id, ?kind, "Listener registered");

        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every listener of its kind.
    ///
    /// Returns whether any listener consumed it; a consumed wheel event must
    /// not also scroll the host.
    pub fn dispatch(&self, event: &InputEvent) -> bool {
        let kind = event.kind();
        let mut registry = self.registry.borrow_mut();
        let mut consumed = false;
        for listener in registry.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.handler)(event);
            consumed = true;
        }
        consumed
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn listeners_of(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// A registered listener. Dropping it removes the listener from its surface.
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The surface may already be gone; nothing left to release then.
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|l| l.id != self.id);
            trace!(id = self.id, kind = ?self.kind, "Listener released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn dispatch_reaches_matching_kind_only() {
        let surface = InputSurface::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let wheel_hits = hits.clone();
        let _wheel = surface.subscribe(ListenerKind::Wheel, move |e| {
            wheel_hits.borrow_mut().push(*e);
        });

        assert!(surface.dispatch(&InputEvent::Wheel { delta_y: 1.0 }));
        assert!(!surface.dispatch(&InputEvent::TouchEnd {
            x: 0.0,
            at: Instant::now()
        }));
        assert_eq!(hits.borrow().len(), 1);
    }

    #[test]
    fn dropping_subscription_releases_listener() {
        let surface = InputSurface::new();
        let sub = surface.subscribe(ListenerKind::TouchBegin, |_| {});
        assert_eq!(surface.listener_count(), 1);
        drop(sub);
        assert_eq!(surface.listener_count(), 0);
        assert!(!surface.dispatch(&InputEvent::TouchBegin {
            x: 1.0,
            at: Instant::now()
        }));
    }

    #[test]
    fn subscription_outliving_surface_is_harmless() {
        let surface = InputSurface::new();
        let sub = surface.subscribe(ListenerKind::Wheel, |_| {});
        drop(surface);
        drop(sub);
    }
}
