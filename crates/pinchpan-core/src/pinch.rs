//! Pinch-to-zoom gesture recognition.
//!
//! Exactly two contacts drive a pinch. The first contact down is the
//! primary, the second the secondary; a third contact ends the gesture. The
//! gesture id is allocated when the secondary arrives, while the baseline
//! (initial distance and midpoint) is captured lazily on the first move with
//! both contacts present, from their positions just before that move.
//!
//! Lifting the primary promotes the secondary so a pinch survives one finger
//! being replaced. The baseline is only re-armed once no contact remains.

use crate::capture::{CaptureDispatcher, RecognizerId};
use crate::event::{
    GestureEvent, PinchGestureEvent, Pointer, PointerId, Sample, Timestamp, TICKS_PER_SECOND,
};
use crate::geometry::{Point, Vector};
use crate::gesture_id::GestureId;
use crate::recognizer::GestureRecognizer;
use crate::routing::NodeId;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A contact held as primary or secondary.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    id: PointerId,
    /// Where velocity is measured from.
    origin: Sample,
    last: Sample,
}

impl Contact {
    const fn new(id: PointerId, sample: Sample) -> Self {
        Self {
            id,
            origin: sample,
            last: sample,
        }
    }

    /// Units per second since `origin`; zero when no time has passed.
    fn velocity(&self) -> Vector {
        self.last
            .timestamp
            .elapsed_since(self.origin.timestamp)
            .map_or(Vector::ZERO, |ticks| {
                let seconds = ticks as f64 / TICKS_PER_SECOND as f64;
                (self.last.position - self.origin.position) / seconds
            })
    }
}

/// Reference captured at the start of a two-contact engagement.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Baseline {
    distance: f64,
    center: Point,
}

/// Recognizes two-contact pinch-to-zoom gestures.
#[derive(Debug)]
pub struct PinchToZoomGestureRecognizer {
    id: RecognizerId,
    target: Option<NodeId>,
    dispatcher: Option<Arc<dyn CaptureDispatcher>>,
    zoomable: bool,
    primary: Option<Contact>,
    secondary: Option<Contact>,
    gesture_id: Option<GestureId>,
    baseline: Option<Baseline>,
}

impl PinchToZoomGestureRecognizer {
    /// Create a recognizer; `zoomable` gates event emission.
    pub fn new(zoomable: bool) -> Self {
        Self {
            id: RecognizerId::unique(),
            target: None,
            dispatcher: None,
            zoomable,
            primary: None,
            secondary: None,
            gesture_id: None,
            baseline: None,
        }
    }

    /// Whether zoom events are emitted.
    pub const fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    /// Enable or disable emission. Contact tracking continues either way.
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.zoomable = zoomable;
    }

    /// Primary contact.
    pub fn primary_pointer(&self) -> Option<PointerId> {
        self.primary.map(|c| c.id)
    }

    /// Secondary contact.
    pub fn secondary_pointer(&self) -> Option<PointerId> {
        self.secondary.map(|c| c.id)
    }

    /// Id allocated when the secondary contact arrived.
    pub const fn gesture_id(&self) -> Option<GestureId> {
        self.gesture_id
    }

    /// Captured initial distance; `None` until armed.
    pub fn initial_distance(&self) -> Option<f64> {
        self.baseline.map(|b| b.distance)
    }

    /// Captured initial midpoint; `None` until armed.
    pub fn initial_center(&self) -> Option<Point> {
        self.baseline.map(|b| b.center)
    }

    fn contact_mut(&mut self, pointer: PointerId) -> Option<&mut Contact> {
        if self.primary.is_some_and(|c| c.id == pointer) {
            self.primary.as_mut()
        } else if self.secondary.is_some_and(|c| c.id == pointer) {
            self.secondary.as_mut()
        } else {
            None
        }
    }

    /// Shared release and capture-loss handling.
    fn remove_contact(&mut self, pointer: PointerId) {
        if self.primary.is_some_and(|c| c.id == pointer) {
            self.primary = self.secondary.take();
        } else if self.secondary.is_some_and(|c| c.id == pointer) {
            self.secondary = None;
        }

        if self.primary.is_none() {
            self.end_gesture();
        }
    }

    /// Arm the baseline from the contacts' current samples.
    ///
    /// Returns false when the contacts coincide, leaving the baseline unarmed
    /// so the next move tries again.
    fn arm_baseline(&mut self) -> bool {
        let (Some(primary), Some(secondary)) = (self.primary.as_mut(), self.secondary.as_mut())
        else {
            return false;
        };

        let distance = primary.last.position.distance(&secondary.last.position);
        if !(distance.is_finite() && distance > 0.0) {
            warn!(
                primary = %primary.id,
                secondary = %secondary.id,
                "pinch contacts coincide, baseline not captured"
            );
            return false;
        }

        self.baseline = Some(Baseline {
            distance,
            center: primary.last.position.midpoint(&secondary.last.position),
        });
        primary.origin = primary.last;
        secondary.origin = secondary.last;

        let (first, second) = (primary.id, secondary.id);
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.capture(first, self.id);
            dispatcher.capture(second, self.id);
        }
        debug!(distance, "pinch baseline captured");
        true
    }
}

impl Default for PinchToZoomGestureRecognizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GestureRecognizer for PinchToZoomGestureRecognizer {
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
        if !pointer.pointer_type.is_contact() || self.contact_mut(pointer.id).is_some() {
            return;
        }
        let contact = Contact::new(pointer.id, Sample::new(position, timestamp));

        if self.primary.is_none() {
            self.primary = Some(contact);
        } else if self.secondary.is_none() {
            let gesture_id = GestureId::next();
            self.gesture_id = Some(gesture_id);
            self.secondary = Some(contact);
            debug!(%gesture_id, "pinch engaged");
        } else {
            debug!(pointer = %pointer.id, "third contact, pinch ended");
            self.end_gesture();
        }
    }

    fn pointer_moved(
        &mut self,
        pointer: PointerId,
        position: Point,
        timestamp: Timestamp,
    ) -> Option<GestureEvent> {
        self.contact_mut(pointer)?;
        let sample = Sample::new(position, timestamp);

        let engaged = self.primary.is_some() && self.secondary.is_some();
        if engaged && self.zoomable && self.baseline.is_none() && !self.arm_baseline() {
            self.contact_mut(pointer)?.last = sample;
            return None;
        }
        self.contact_mut(pointer)?.last = sample;
        if !engaged || !self.zoomable {
            return None;
        }

        let (primary, secondary, baseline) = (self.primary?, self.secondary?, self.baseline?);
        let current_center = primary.last.position.midpoint(&secondary.last.position);
        let event = PinchGestureEvent {
            gesture_id: self.gesture_id?,
            scale: primary.last.position.distance(&secondary.last.position) / baseline.distance,
            offset: current_center - baseline.center,
            velocity: (primary.velocity() + secondary.velocity()) / 2.0,
        };
        if !(event.scale.is_finite() && event.offset.is_finite() && event.velocity.is_finite()) {
            warn!(gesture_id = %event.gesture_id, "pinch overflowed, event dropped");
            return None;
        }
        trace!(gesture_id = %event.gesture_id, scale = event.scale, "pinch");
        Some(event.into())
    }

    fn pointer_released(&mut self, pointer: PointerId) {
        self.remove_contact(pointer);
    }

    fn pointer_capture_lost(&mut self, pointer: PointerId) {
        self.remove_contact(pointer);
    }

    fn end_gesture(&mut self) {
        if let Some(gesture_id) = self.gesture_id {
            debug!(%gesture_id, "pinch ended");
        }
        self.primary = None;
        self.secondary = None;
        self.gesture_id = None;
        self.baseline = None;
    }
}
