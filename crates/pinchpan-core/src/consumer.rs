//! Applying gesture events to a transform.

use crate::event::{GestureEvent, GestureKind};
use crate::gesture_id::GestureId;
use crate::transform::Transform2D;
use tracing::trace;

/// Folds a gesture stream into a [`Transform2D`].
///
/// Every event of a gesture is composed against the transform that was current
/// when the gesture began, so events carry absolute rather than incremental
/// values and replaying one is harmless.
///
/// # Examples
///
/// ```
/// use pinchpan_core::{GestureConsumer, GestureEvent, GestureId, PinchGestureEvent, Vector};
///
/// let mut consumer = GestureConsumer::new();
/// let zoom = GestureEvent::Pinch(PinchGestureEvent {
///     gesture_id: GestureId(7),
///     scale: 2.0,
///     offset: Vector::new(-5.0, 0.0),
///     velocity: Vector::ZERO,
/// });
/// consumer.apply(&zoom);
/// consumer.apply(&zoom);
/// assert_eq!(consumer.transform().matrix, [2.0, 0.0, 0.0, 2.0, -5.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureConsumer {
    transform: Transform2D,
    baseline: Transform2D,
    last_pan: Option<GestureId>,
    last_pinch: Option<GestureId>,
}

impl GestureConsumer {
    /// Start from the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `transform`.
    #[must_use]
    pub fn with_transform(transform: Transform2D) -> Self {
        Self {
            transform,
            baseline: transform,
            ..Self::default()
        }
    }

    /// Current transform.
    pub const fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Transform snapshotted when the latest gesture began.
    pub const fn baseline(&self) -> Transform2D {
        self.baseline
    }

    /// Last gesture id seen for `kind`.
    pub const fn last_seen(&self, kind: GestureKind) -> Option<GestureId> {
        match kind {
            GestureKind::Pan => self.last_pan,
            GestureKind::Pinch => self.last_pinch,
        }
    }

    /// Apply `event` and return the resulting transform.
    pub fn apply(&mut self, event: &GestureEvent) -> Transform2D {
        let id = event.gesture_id();
        let last = match event.kind() {
            GestureKind::Pan => &mut self.last_pan,
            GestureKind::Pinch => &mut self.last_pinch,
        };
        if *last != Some(id) {
            *last = Some(id);
            self.baseline = self.transform;
            trace!(kind = %event.kind(), gesture_id = %id, "new gesture, baseline snapshot");
        }

        let step = match event {
            GestureEvent::Pan(pan) => Transform2D::translate(pan.delta.x, pan.delta.y),
            GestureEvent::Pinch(pinch) => Transform2D::scale(pinch.scale, pinch.scale)
                .then(&Transform2D::translate(pinch.offset.x, pinch.offset.y)),
        };
        self.transform = self.baseline.then(&step);
        self.transform
    }

    /// Return to the identity transform and forget seen gestures.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
