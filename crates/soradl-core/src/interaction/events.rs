//! Synchronous event registry keyed by event kind.

use crate::page::{Document, ElementHandle, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerOver,
    Click,
    ContextMenu,
    KeyDown,
}

/// Capture listeners run before bubble listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Capture,
    Bubble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageEvent {
    pub kind: EventKind,
    pub target: ElementHandle,
    /// Viewport coordinates of the pointer (zero for keyboard events).
    pub client: Point,
    pub modifiers: Modifiers,
    /// Key value for `KeyDown`.
    pub key: Option<String>,
    propagation_stopped: bool,
}

impl PageEvent {
    pub fn pointer(kind: EventKind, target: ElementHandle, client: Point) -> Self {
        Self {
            kind,
            target,
            client,
            modifiers: Modifiers::default(),
            key: None,
            propagation_stopped: false,
        }
    }

    pub fn key(target: ElementHandle, key: &str, modifiers: Modifiers) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            client: Point::default(),
            modifiers,
            key: Some(key.to_string()),
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&dyn Document, &mut PageEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    phase: Phase,
    callback: Listener,
}

/// Callback registry standing in for DOM `addEventListener`.
///
/// Dispatch order: capture listeners, then bubble listeners, each group in
/// subscription order. A listener calling [`PageEvent::stop_propagation`]
/// prevents every later listener from seeing the event.
#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, phase: Phase, callback: F) -> SubscriptionId
    where
        F: FnMut(&dyn Document, &mut PageEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            phase,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    /// Delivers `event` and returns how many listeners ran.
    pub fn dispatch(&mut self, doc: &dyn Document, event: &mut PageEvent) -> usize {
        let kind = event.kind;
        let mut ran = 0;
        for phase in [Phase::Capture, Phase::Bubble] {
            for sub in self
                .subscriptions
                .iter_mut()
                .filter(|s| s.kind == kind && s.phase == phase)
            {
                if event.propagation_stopped() {
                    return ran;
                }
                (sub.callback)(doc, event);
                ran += 1;
            }
        }
        ran
    }
}
