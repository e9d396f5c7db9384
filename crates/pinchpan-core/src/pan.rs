//! Pan gesture recognition.
//!
//! A pan starts the moment the configured number of touch/pen contacts are
//! down together. The contact whose press completed the set becomes the
//! anchor: its position at that moment is the gesture origin. Moves of any
//! counted contact then emit [`PanGestureEvent`]s measured from that origin.

use crate::capture::{CaptureDispatcher, RecognizerId};
use crate::config::PanConfig;
use crate::event::{GestureEvent, PanGestureEvent, Pointer, PointerId, Sample, Timestamp};
use crate::geometry::Point;
use crate::gesture_id::GestureId;
use crate::recognizer::GestureRecognizer;
use crate::routing::NodeId;
use std::sync::Arc;
use tracing::{debug, trace};

/// State of an active pan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanAnchor {
    gesture_id: GestureId,
    pointer: PointerId,
    origin: Point,
    last: Sample,
}

/// Recognizes pans over a configurable number of contacts.
#[derive(Debug)]
pub struct PanGestureRecognizer {
    id: RecognizerId,
    config: PanConfig,
    target: Option<NodeId>,
    dispatcher: Option<Arc<dyn CaptureDispatcher>>,
    /// Contacts counted toward the requirement, in press order.
    tracked: Vec<PointerId>,
    anchor: Option<PanAnchor>,
}

impl PanGestureRecognizer {
    /// Create a recognizer with the given configuration.
    pub fn new(config: PanConfig) -> Self {
        Self {
            id: RecognizerId::unique(),
            config,
            target: None,
            dispatcher: None,
            tracked: Vec::with_capacity(config.required_pointers.get()),
            anchor: None,
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Number of contacts currently counted.
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Check whether `pointer` is counted toward the requirement.
    pub fn is_tracking(&self, pointer: PointerId) -> bool {
        self.tracked.contains(&pointer)
    }

    /// Whether a pan is in progress.
    pub const fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Id of the pan in progress.
    pub fn gesture_id(&self) -> Option<GestureId> {
        self.anchor.map(|a| a.gesture_id)
    }

    /// Position the current pan is measured from.
    pub fn anchor_position(&self) -> Option<Point> {
        self.anchor.map(|a| a.origin)
    }

    /// Contact driving the current pan.
    pub fn anchor_pointer(&self) -> Option<PointerId> {
        self.anchor.map(|a| a.pointer)
    }

    fn required(&self) -> usize {
        self.config.required_pointers.get()
    }

    fn qualifies(&self, pointer: &Pointer) -> bool {
        pointer.pointer_type.is_contact() && (!self.config.primary_only || pointer.is_primary)
    }
}

impl Default for PanGestureRecognizer {
    fn default() -> Self {
        Self::new(PanConfig::default())
    }
}

impl GestureRecognizer for PanGestureRecognizer {
    fn id(&self) -> RecognizerId {
        self.id
    }

    fn initialize(&mut self, target: NodeId, dispatcher: Arc<dyn CaptureDispatcher>) {
        self.target = Some(target);
        self.dispatcher = Some(dispatcher);
    }

    fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn pointer_pressed(&mut self, pointer: Pointer, position: Point, timestamp: Timestamp) {
        if self.target.is_none() || !self.qualifies(&pointer) || self.is_tracking(pointer.id) {
            return;
        }
        if self.tracked.len() >= self.required() {
            trace!(pointer = %pointer.id, "pan at capacity, contact ignored");
            return;
        }

        self.tracked.push(pointer.id);
        if self.tracked.len() == self.required() {
            let gesture_id = GestureId::next();
            self.anchor = Some(PanAnchor {
                gesture_id,
                pointer: pointer.id,
                origin: position,
                last: Sample::new(position, timestamp),
            });
            debug!(%gesture_id, anchor = %pointer.id, "pan started");
        }
    }

    fn pointer_moved(
        &mut self,
        pointer: PointerId,
        position: Point,
        timestamp: Timestamp,
    ) -> Option<GestureEvent> {
        if self.tracked.len() != self.required() || !self.tracked.contains(&pointer) {
            return None;
        }
        let anchor = self.anchor.as_mut()?;
        let elapsed = timestamp.elapsed_since(anchor.last.timestamp)?;

        let velocity = (position - anchor.last.position) / elapsed as f64;
        anchor.last = Sample::new(position, timestamp);
        let event = PanGestureEvent {
            gesture_id: anchor.gesture_id,
            delta: position - anchor.origin,
            velocity,
        };

        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.capture(pointer, self.id);
        }
        trace!(gesture_id = %event.gesture_id, delta = %event.delta, "pan");
        Some(event.into())
    }

    fn pointer_released(&mut self, pointer: PointerId) {
        let Some(index) = self.tracked.iter().position(|p| *p == pointer) else {
            return;
        };
        self.tracked.remove(index);
        if self.tracked.len() < self.required() {
            self.end_gesture();
        }
    }

    /// Losing the anchor ends the pan. Losing any other counted contact
    /// counts as its release, so the pan may end below the requirement.
    fn pointer_capture_lost(&mut self, pointer: PointerId) {
        // The release of a lost contact goes to its new owner, never here.
        if self.anchor_pointer() == Some(pointer) {
            self.tracked.retain(|p| *p != pointer);
            self.end_gesture();
        } else {
            self.pointer_released(pointer);
        }
    }

    fn end_gesture(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            debug!(gesture_id = %anchor.gesture_id, "pan ended");
        }
    }
}
