use std::collections::{BTreeMap, VecDeque};

use crate::element::NodeId;

/// Handle returned by [`Dom::listen`](crate::Dom::listen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Node(NodeId),
    Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Scroll position of the target changed.
    Scroll,
    /// Pointer wheel over the target or one of its descendants.
    Wheel,
    /// Viewport dimensions changed.
    Resize,
}

/// Low-level notification raised by the document.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    Scroll {
        node: NodeId,
    },
    Wheel {
        /// Innermost node under the pointer.
        node: NodeId,
        delta_x: f32,
        delta_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Scroll { .. } => EventKind::Scroll,
            DomEvent::Wheel { .. } => EventKind::Wheel,
            DomEvent::Resize { .. } => EventKind::Resize,
        }
    }
}

/// An event routed to one listener.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub listener: ListenerId,
    pub event: DomEvent,
}

/// Listener registry plus the queue of undelivered dispatches.
///
/// Dispatches are queued when the event is raised and delivered when the host
/// polls. A dispatch whose listener was removed in between is dropped.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    next_id: u64,
    listeners: BTreeMap<ListenerId, (Target, EventKind)>,
    pending: VecDeque<Dispatch>,
}

impl EventQueue {
    pub fn listen(&mut self, target: Target, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, (target, kind));
        id
    }

    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Drop every listener attached to `node`.
    pub fn purge(&mut self, node: NodeId) {
        self.listeners
            .retain(|_, (target, _)| *target != Target::Node(node));
    }

    /// Queue `event` for every listener on `target` interested in its kind.
    pub fn emit(&mut self, target: Target, event: &DomEvent) {
        let kind = event.kind();
        for (id, (listener_target, listener_kind)) in &self.listeners {
            if *listener_target == target && *listener_kind == kind {
                log::trace!("queue {:?} for listener {:?}", kind, id);
                self.pending.push_back(Dispatch {
                    listener: *id,
                    event: event.clone(),
                });
            }
        }
    }

    pub fn poll(&mut self) -> Option<Dispatch> {
        while let Some(dispatch) = self.pending.pop_front() {
            if self.listeners.contains_key(&dispatch.listener) {
                return Some(dispatch);
            }
        }
        None
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
