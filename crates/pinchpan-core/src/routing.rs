//! Bubbling delivery of gesture events through a node tree.
//!
//! Recognizers publish to their target node; the router walks from that node
//! outward to the root and invokes the handlers subscribed for the event's
//! [`GestureKind`] on each node along the way.
//!
//! # Example
//!
//! ```
//! use pinchpan_core::{EventRouter, GestureKind};
//!
//! let mut router = EventRouter::new();
//! let root = router.add_root();
//! let canvas = router.add_child(root).expect("root exists");
//! router.subscribe(root, GestureKind::Pan, |routed| {
//!     routed.handled = true;
//! });
//! assert!(router.contains(canvas));
//! ```

use crate::event::{GestureEvent, GestureKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a node in the routing tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// A gesture event in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedGesture {
    /// Node the event was raised on
    pub origin: NodeId,
    /// Node whose handlers are currently running
    pub current: NodeId,
    /// The gesture payload
    pub event: GestureEvent,
    /// Set by a handler to stop further bubbling
    pub handled: bool,
}

/// Result of raising one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteOutcome {
    /// Handlers invoked
    pub delivered: usize,
    /// Whether a handler marked the event handled
    pub handled: bool,
}

/// Handler callback type.
pub type GestureHandler = Box<dyn FnMut(&mut RoutedGesture) + Send>;

struct Subscription {
    kind: GestureKind,
    handler: GestureHandler,
}

/// Typed publish/subscribe router over a parent-linked node tree.
#[derive(Default)]
pub struct EventRouter {
    next_node: u32,
    parents: HashMap<NodeId, Option<NodeId>>,
    subscriptions: HashMap<NodeId, Vec<Subscription>>,
}

impl EventRouter {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no parent.
    pub fn add_root(&mut self) -> NodeId {
        self.insert(None)
    }

    /// Add a node under `parent`. Returns `None` if `parent` is unknown.
    pub fn add_child(&mut self, parent: NodeId) -> Option<NodeId> {
        if self.parents.contains_key(&parent) {
            Some(self.insert(Some(parent)))
        } else {
            None
        }
    }

    fn insert(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.parents.insert(id, parent);
        id
    }

    /// Check whether `node` exists.
    pub fn contains(&self, node: NodeId) -> bool {
        self.parents.contains_key(&node)
    }

    /// Parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied().flatten()
    }

    /// `node` followed by its ancestors, innermost first.
    pub fn route(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.contains(node).then_some(node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Subscribe `handler` to events of `kind` passing through `node`.
    pub fn subscribe<F>(&mut self, node: NodeId, kind: GestureKind, handler: F)
    where
        F: FnMut(&mut RoutedGesture) + Send + 'static,
    {
        self.subscriptions.entry(node).or_default().push(Subscription {
            kind,
            handler: Box::new(handler),
        });
    }

    /// Publish `event` on `origin` and bubble it to the root.
    pub fn raise(&mut self, origin: NodeId, event: GestureEvent) -> RouteOutcome {
        let kind = event.kind();
        let mut routed = RoutedGesture {
            origin,
            current: origin,
            event,
            handled: false,
        };
        let mut outcome = RouteOutcome::default();

        for node in self.route(origin) {
            routed.current = node;
            if let Some(subs) = self.subscriptions.get_mut(&node) {
                for sub in subs.iter_mut().filter(|s| s.kind == kind) {
                    (sub.handler)(&mut routed);
                    outcome.delivered += 1;
                }
            }
            if routed.handled {
                break;
            }
        }

        outcome.handled = routed.handled;
        outcome
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("nodes", &self.parents.len())
            .field(
                "subscriptions",
                &self.subscriptions.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::event::{PanGestureEvent, PinchGestureEvent};
    use crate::geometry::Vector;
    use crate::gesture_id::GestureId;
    use std::sync::{Arc, Mutex};

    fn pan() -> GestureEvent {
        GestureEvent::Pan(PanGestureEvent {
            gesture_id: GestureId(1),
            delta: Vector::new(1.0, 0.0),
            velocity: Vector::ZERO,
        })
    }

    fn pinch() -> GestureEvent {
        GestureEvent::Pinch(PinchGestureEvent {
            gesture_id: GestureId(2),
            scale: 1.5,
            offset: Vector::ZERO,
            velocity: Vector::ZERO,
        })
    }

    #[test]
    fn test_route_innermost_first() {
        let mut router = EventRouter::new();
        let root = router.add_root();
        let mid = router.add_child(root).unwrap();
        let leaf = router.add_child(mid).unwrap();
        assert_eq!(router.route(leaf), vec![leaf, mid, root]);
        assert_eq!(router.parent(root), None);
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut router = EventRouter::new();
        assert_eq!(router.add_child(NodeId(42)), None);
    }

    #[test]
    fn test_raise_bubbles_outward() {
        let mut router = EventRouter::new();
        let root = router.add_root();
        let leaf = router.add_child(root).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for node in [root, leaf] {
            let seen = Arc::clone(&seen);
            router.subscribe(node, GestureKind::Pan, move |routed| {
                seen.lock().unwrap().push((routed.current, routed.origin));
            });
        }

        let outcome = router.raise(leaf, pan());
        assert_eq!(outcome.delivered, 2);
        assert!(!outcome.handled);
        assert_eq!(*seen.lock().unwrap(), vec![(leaf, leaf), (root, leaf)]);
    }

    #[test]
    fn test_raise_filters_by_kind() {
        let mut router = EventRouter::new();
        let root = router.add_root();
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        router.subscribe(root, GestureKind::Pinch, move |_| {
            *counter.lock().unwrap() += 1;
        });

        assert_eq!(router.raise(root, pan()).delivered, 0);
        assert_eq!(router.raise(root, pinch()).delivered, 1);
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_handled_stops_bubbling() {
        let mut router = EventRouter::new();
        let root = router.add_root();
        let leaf = router.add_child(root).unwrap();
        let root_hits = Arc::new(Mutex::new(0));

        router.subscribe(leaf, GestureKind::Pan, |routed| routed.handled = true);
        let counter = Arc::clone(&root_hits);
        router.subscribe(root, GestureKind::Pan, move |_| {
            *counter.lock().unwrap() += 1;
        });

        let outcome = router.raise(leaf, pan());
        assert!(outcome.handled);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(*root_hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_raise_unknown_origin_is_noop() {
        let mut router = EventRouter::new();
        assert_eq!(router.raise(NodeId(9), pan()), RouteOutcome::default());
    }
}
